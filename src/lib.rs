//! Plain-text Ride-Hire Fleet Management
//!
//! Vehicles take date-bound bookings, complete trips for a computed fee, and
//! persist between runs as colon-delimited text lines.

pub mod domain;
pub use domain::{
    Booking, BookingId, BookingRequest, Date, Fleet, FleetConfig, NewVehicle, RegNo, Vehicle,
    VehicleKind,
};

/// Text-file persistence for the fleet.
pub mod storage;
pub use storage::{DataFiles, Loaded, Origin};
