//! Domain models for the ride-hire fleet.
//!
//! This module contains the core domain types: calendar dates and booking
//! windows, registration numbers, bookings, vehicles, and the fleet registry
//! that owns them.

/// Bookings and the outcome of a completed trip.
pub mod booking;
pub use booking::{Booking, BookingId, BookingMatch, BookingRequest, Completion};

mod config;
pub use config::FleetConfig;

/// Calendar days and booking-window rules.
pub mod date;
pub use date::{Date, Window};

/// Human-readable vehicle and booking reports.
pub mod details;

/// The fleet registry.
pub mod fleet;
pub use fleet::{Confirmation, Fleet, SortOrder};

/// Vehicle registration numbers.
pub mod registration;
pub use registration::RegNo;

/// Vehicles and their per-service booking rules.
pub mod vehicle;
pub use vehicle::{NewVehicle, Refreshments, ServiceRequest, Vehicle, VehicleKind};
