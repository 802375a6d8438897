//! The fleet registry
//!
//! A [`Fleet`] owns every vehicle, in the order they were added, and routes
//! booking and completion requests to them. Vehicles in turn own their
//! bookings, so the fleet is the single entry point for every mutation.

use std::fmt;

use tracing::instrument;

use crate::domain::{
    BookingId, BookingMatch, BookingRequest, Completion, Date, FleetConfig, NewVehicle, RegNo,
    Vehicle, VehicleKind,
    details::VehicleDetails,
    vehicle::{BookingRejected, CompletionError, InvalidVehicle},
};

/// The ordered collection of vehicles.
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    capacity: usize,
    active_booking_limit: usize,
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new(&FleetConfig::default())
    }
}

impl Fleet {
    /// Creates an empty fleet bounded by `config`.
    #[must_use]
    pub fn new(config: &FleetConfig) -> Self {
        Self {
            vehicles: Vec::new(),
            capacity: config.fleet_capacity(),
            active_booking_limit: config.active_booking_limit(),
        }
    }

    /// Validates and adds a vehicle, returning its normalised registration.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    ///
    /// - the registration number is malformed
    /// - a vehicle with the same registration number is already present
    /// - the fleet is full
    /// - any other detail of the vehicle is invalid
    #[instrument(level = "debug", skip(self, new), fields(reg_no = %new.reg_no))]
    pub fn create_vehicle(&mut self, new: NewVehicle) -> Result<RegNo, CreateVehicleError> {
        let reg_no = RegNo::new(&new.reg_no).map_err(InvalidVehicle::from)?;
        if self.vehicle_exists(&reg_no) {
            return Err(CreateVehicleError::Duplicate(reg_no));
        }
        if self.vehicles.len() >= self.capacity {
            return Err(CreateVehicleError::FleetFull(self.capacity));
        }

        let vehicle = Vehicle::new(new, self.active_booking_limit)?;
        tracing::info!("Added {} vehicle {reg_no}", vehicle.kind());
        self.vehicles.push(vehicle);

        Ok(reg_no)
    }

    /// Looks up a vehicle by registration number, in any letter case.
    #[must_use]
    pub fn vehicle(&self, reg_no: &str) -> Option<&Vehicle> {
        self.position(reg_no).map(|i| &self.vehicles[i])
    }

    fn vehicle_mut(&mut self, reg_no: &str) -> Option<&mut Vehicle> {
        self.position(reg_no).map(|i| &mut self.vehicles[i])
    }

    fn position(&self, reg_no: &str) -> Option<usize> {
        if reg_no.chars().count() != RegNo::LENGTH {
            return None;
        }
        self.vehicles
            .iter()
            .position(|vehicle| vehicle.reg_no().eq_ignore_ascii_case(reg_no))
    }

    /// Whether a vehicle with this registration number is in the fleet.
    ///
    /// Anything that is not exactly six characters is rejected without a
    /// search.
    #[must_use]
    pub fn vehicle_exists(&self, reg_no: &str) -> bool {
        self.position(reg_no).is_some()
    }

    /// All vehicles, in the order they were added.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// The number of vehicles.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the fleet has no vehicles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// The most vehicles this fleet may hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Vehicles with no active booking on `date`, in fleet order.
    ///
    /// This only checks for a same-day booking; a listed vehicle may still
    /// reject a booking for other reasons.
    #[must_use]
    pub fn find_available(&self, date: Date) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|vehicle| !vehicle.is_booked_on(date))
            .collect()
    }

    /// Vehicles of `kind` with no active booking on `date`, in fleet order.
    #[must_use]
    pub fn find_available_of_kind(&self, kind: VehicleKind, date: Date) -> Vec<&Vehicle> {
        self.find_available(date)
            .into_iter()
            .filter(|vehicle| vehicle.kind() == kind)
            .collect()
    }

    /// Books the vehicle `reg_no`, judging the date against the current day.
    ///
    /// # Errors
    ///
    /// See [`Fleet::book_as_of`].
    pub fn book(&mut self, reg_no: &str, request: BookingRequest) -> Result<Confirmation, BookError> {
        self.book_as_of(reg_no, request, Date::today())
    }

    /// Books the vehicle `reg_no`, judging the date against `today`.
    ///
    /// # Errors
    ///
    /// Returns [`BookError::VehicleNotFound`] if there is no such vehicle, or
    /// [`BookError::Rejected`] if the vehicle's booking rules refuse the
    /// request.
    #[instrument(level = "debug", skip(self, request), fields(date = %request.date))]
    pub fn book_as_of(
        &mut self,
        reg_no: &str,
        request: BookingRequest,
        today: Date,
    ) -> Result<Confirmation, BookError> {
        let vehicle = self
            .vehicle_mut(reg_no)
            .ok_or_else(|| BookError::VehicleNotFound(reg_no.to_string()))?;

        let date = request.date;
        let driver = vehicle.driver_name().to_string();
        let booking = vehicle.book_as_of(request, today)?;

        Ok(Confirmation {
            driver,
            date,
            booking_id: booking.id().clone(),
            vehicle: booking.vehicle().clone(),
        })
    }

    /// Completes a booking found by passenger name and date.
    ///
    /// The first vehicle, in fleet order, with any active booking on `date`
    /// is chosen; the booking under the given name on that date is then
    /// completed on that vehicle alone. If two vehicles are booked on the
    /// same day, only the first is searched.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound::Vehicle`] if no vehicle is booked on `date`,
    /// [`NotFound::Booking`] if the chosen vehicle has no booking under the
    /// name, or [`CompleteError::Distance`] if `kilometres` is negative or
    /// not finite.
    #[instrument(level = "debug", skip(self))]
    pub fn complete_by_date(
        &mut self,
        first_name: &str,
        last_name: &str,
        date: Date,
        kilometres: f64,
    ) -> Result<Completion, CompleteError> {
        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|vehicle| vehicle.is_booked_on(date))
            .ok_or_else(|| NotFound::Vehicle(date.to_string()))?;

        vehicle
            .complete(
                BookingMatch::NameAndDate {
                    first_name,
                    last_name,
                    date,
                },
                kilometres,
            )
            .map_err(CompleteError::from)
    }

    /// Completes the first active booking under the passenger's name on the
    /// vehicle `reg_no`, whatever its date.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound::Vehicle`] if there is no such vehicle,
    /// [`NotFound::Booking`] if it has no booking under the name, or
    /// [`CompleteError::Distance`] for a negative or non-finite distance.
    #[instrument(level = "debug", skip(self))]
    pub fn complete_by_reg_no(
        &mut self,
        reg_no: &str,
        first_name: &str,
        last_name: &str,
        kilometres: f64,
    ) -> Result<Completion, CompleteError> {
        self.vehicle_mut(reg_no)
            .ok_or_else(|| NotFound::Vehicle(reg_no.to_string()))?
            .complete(
                BookingMatch::Name {
                    first_name,
                    last_name,
                },
                kilometres,
            )
            .map_err(CompleteError::from)
    }

    /// Whether the vehicle `reg_no` has an active booking under the name.
    ///
    /// This is the booking [`Fleet::complete_by_reg_no`] would complete.
    #[must_use]
    pub fn has_booking(&self, reg_no: &str, first_name: &str, last_name: &str) -> bool {
        self.vehicle(reg_no).is_some_and(|vehicle| {
            vehicle
                .find_booking(BookingMatch::Name {
                    first_name,
                    last_name,
                })
                .is_some()
        })
    }

    /// The reference of an active booking on `reg_no` under the name on
    /// `date`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound::Vehicle`] if there is no such vehicle, or
    /// [`NotFound::Booking`] if no booking matches.
    pub fn booking_id(
        &self,
        reg_no: &str,
        first_name: &str,
        last_name: &str,
        date: Date,
    ) -> Result<&BookingId, NotFound> {
        self.vehicle(reg_no)
            .ok_or_else(|| NotFound::Vehicle(reg_no.to_string()))?
            .booking_id(first_name, last_name, date)
            .ok_or(NotFound::Booking)
    }

    /// Vehicles of `kind`, sorted by registration number.
    #[must_use]
    pub fn list_by_kind(&self, kind: VehicleKind, order: SortOrder) -> Vec<&Vehicle> {
        let mut vehicles: Vec<&Vehicle> = self
            .vehicles
            .iter()
            .filter(|vehicle| vehicle.kind() == kind)
            .collect();

        vehicles.sort_by(|a, b| match order {
            SortOrder::Ascending => a.reg_no().cmp(b.reg_no()),
            SortOrder::Descending => b.reg_no().cmp(a.reg_no()),
        });
        vehicles
    }

    /// The human-readable report of the vehicle `reg_no`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound::Vehicle`] if there is no such vehicle.
    pub fn details(&self, reg_no: &str) -> Result<VehicleDetails<'_>, NotFound> {
        self.vehicle(reg_no)
            .map(Vehicle::details)
            .ok_or_else(|| NotFound::Vehicle(reg_no.to_string()))
    }
}

/// Direction of a sort by registration number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// A to Z.
    #[default]
    Ascending,
    /// Z to A.
    Descending,
}

/// The outcome of a successful booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Name of the driver who will make the trip.
    pub driver: String,
    /// The booked day.
    pub date: Date,
    /// The booking reference.
    pub booking_id: BookingId,
    /// The booked vehicle.
    pub vehicle: RegNo,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Thank you for your booking. {} will pick you up on {}. Your booking reference is: {}",
            self.driver, self.date, self.booking_id
        )
    }
}

/// Reasons a vehicle cannot be added to the fleet.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CreateVehicleError {
    /// A vehicle with this registration number already exists.
    #[error("a vehicle with registration number {0} already exists")]
    Duplicate(RegNo),

    /// The fleet already holds its maximum number of vehicles.
    #[error("the fleet is full ({0} vehicles)")]
    FleetFull(usize),

    /// The vehicle's details are invalid.
    #[error(transparent)]
    Invalid(#[from] InvalidVehicle),
}

/// Reasons a booking request fails.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BookError {
    /// No vehicle has the requested registration number.
    #[error("no vehicle with registration number {0}")]
    VehicleNotFound(String),

    /// The vehicle refused the booking.
    #[error("booking rejected: {0}")]
    Rejected(#[from] BookingRejected),
}

/// A lookup that found nothing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotFound {
    /// No vehicle matches the registration number or date.
    #[error("no vehicle found for {0}")]
    Vehicle(String),

    /// The vehicle has no matching active booking.
    #[error("no matching booking found")]
    Booking,
}

/// Reasons a trip cannot be completed.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CompleteError {
    /// No vehicle or booking matched.
    #[error(transparent)]
    NotFound(#[from] NotFound),

    /// The distance travelled is negative or not a finite number.
    #[error("invalid trip distance {0}: must be a non-negative number of kilometres")]
    Distance(f64),
}

impl From<CompletionError> for CompleteError {
    fn from(error: CompletionError) -> Self {
        match error {
            CompletionError::NoBooking => Self::NotFound(NotFound::Booking),
            CompletionError::Distance(kilometres) => Self::Distance(kilometres),
        }
    }
}
