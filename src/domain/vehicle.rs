use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::{
    Booking, BookingId, BookingMatch, BookingRequest, Completion, Date, RegNo, Window,
    details::VehicleDetails, registration,
};

/// Base fee charged by every standard vehicle.
pub const STANDARD_FEE: f64 = 1.5;

/// The lowest base fee a premium vehicle may take bookings at.
pub const PREMIUM_MIN_FEE: f64 = 3.0;

/// No vehicle carries more passengers than this, whatever its capacity.
pub const MAX_PASSENGERS: u32 = 9;

/// Fewest and most refreshment items a premium vehicle can offer.
pub const REFRESHMENT_RANGE: std::ops::RangeInclusive<usize> = 3..=5;

static MAKE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[a-zA-Z]+$"));
static MODEL: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[a-zA-Z0-9._-]+ ?[a-zA-Z0-9._-]+$"));
static DRIVER: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^[a-zA-Z._-]+ ?[a-zA-Z._-]+ ?[a-zA-Z._-]+$"));

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

/// The two kinds of vehicle in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    /// A standard vehicle with the fixed base fee.
    Standard,
    /// A premium vehicle with its own fee and refreshments.
    Premium,
}

impl VehicleKind {
    /// The lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

impl std::fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The refreshments offered by a premium vehicle.
///
/// Always holds between three and five distinct, non-blank items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Refreshments(Vec<String>);

impl Refreshments {
    /// Validates a list of refreshment items.
    ///
    /// Items are trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the list has fewer than three or more than five
    /// items, if any item is blank or contains the `:` delimiter or a control
    /// character, or if an item appears twice.
    pub fn new<I, S>(items: I) -> Result<Self, RefreshmentsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<String> = items
            .into_iter()
            .map(|item| item.as_ref().trim().to_string())
            .collect();

        if !REFRESHMENT_RANGE.contains(&items.len()) {
            return Err(RefreshmentsError::Count(items.len()));
        }
        if let Some(item) = items.iter().find(|item| !is_valid_item(item)) {
            return Err(RefreshmentsError::Item(item.clone()));
        }
        for (i, item) in items.iter().enumerate() {
            if items[i + 1..].contains(item) {
                return Err(RefreshmentsError::Duplicate(item.clone()));
            }
        }

        Ok(Self(items))
    }

    /// The items, in the order given.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a valid list is never empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn is_valid_item(item: &str) -> bool {
    !item.is_empty() && !item.contains(':') && !item.chars().any(char::is_control)
}

/// The per-variant parameters of a vehicle.
#[derive(Debug, Clone, PartialEq)]
pub enum Service {
    /// Standard service: seven-day window, 0.3 fee factor.
    Standard,
    /// Premium service: three-day window, 0.4 fee factor, refreshments.
    Premium(Refreshments),
}

impl Service {
    /// The kind tag of this service.
    #[must_use]
    pub const fn kind(&self) -> VehicleKind {
        match self {
            Self::Standard => VehicleKind::Standard,
            Self::Premium(_) => VehicleKind::Premium,
        }
    }

    /// How far ahead a booking date may lie.
    #[must_use]
    pub const fn window(&self) -> Window {
        match self {
            Self::Standard => Window::STANDARD,
            Self::Premium(_) => Window::PREMIUM,
        }
    }

    /// The fraction of the base fee charged per kilometre.
    #[must_use]
    pub const fn fee_factor(&self) -> f64 {
        match self {
            Self::Standard => 0.3,
            Self::Premium(_) => 0.4,
        }
    }
}

/// The requested service for a new vehicle, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest {
    /// A standard vehicle.
    Standard,
    /// A premium vehicle with its own base fee and refreshment list.
    Premium {
        /// Base fee.
        fee: f64,
        /// Refreshment item names.
        refreshments: Vec<String>,
    },
}

/// The details needed to add a vehicle to the fleet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    /// Registration number, any letter case.
    pub reg_no: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Name of the vehicle's driver.
    pub driver_name: String,
    /// Number of passenger seats.
    pub capacity: u32,
    /// Standard or premium service.
    pub service: ServiceRequest,
}

impl NewVehicle {
    /// Describes a standard vehicle.
    #[must_use]
    pub fn standard(
        reg_no: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        driver_name: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            reg_no: reg_no.into(),
            make: make.into(),
            model: model.into(),
            driver_name: driver_name.into(),
            capacity,
            service: ServiceRequest::Standard,
        }
    }

    /// Describes a premium vehicle.
    #[must_use]
    pub fn premium<I, S>(
        reg_no: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        driver_name: impl Into<String>,
        capacity: u32,
        fee: f64,
        refreshments: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            service: ServiceRequest::Premium {
                fee,
                refreshments: refreshments.into_iter().map(Into::into).collect(),
            },
            ..Self::standard(reg_no, make, model, driver_name, capacity)
        }
    }
}

/// A vehicle in the fleet, with its active and completed bookings.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    reg_no: RegNo,
    make: String,
    model: String,
    driver_name: String,
    capacity: u32,
    base_fee: f64,
    service: Service,

    /// Bookings awaiting completion, in the order they were made.
    active: Vec<Booking>,

    /// The most bookings that may be active at once.
    active_limit: usize,

    /// Completed bookings, in completion order.
    completed: Vec<Booking>,
}

impl Vehicle {
    /// Validates `new` and builds a vehicle with no bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration number, the descriptive fields,
    /// or (for premium vehicles) the refreshment list are invalid.
    pub(crate) fn new(new: NewVehicle, active_limit: usize) -> Result<Self, InvalidVehicle> {
        let NewVehicle {
            reg_no,
            make,
            model,
            driver_name,
            capacity,
            service,
        } = new;

        let reg_no = RegNo::new(&reg_no)?;
        check_details(&make, &model, &driver_name, capacity)?;

        let (base_fee, service) = match service {
            ServiceRequest::Standard => (STANDARD_FEE, Service::Standard),
            ServiceRequest::Premium { fee, refreshments } => {
                if !fee.is_finite() || fee < 0.0 {
                    return Err(DetailsError::Fee(fee).into());
                }
                (fee, Service::Premium(Refreshments::new(refreshments)?))
            }
        };

        Ok(Self {
            reg_no,
            make,
            model,
            driver_name,
            capacity,
            base_fee,
            service,
            active: Vec::new(),
            active_limit,
            completed: Vec::new(),
        })
    }

    /// The registration number.
    #[must_use]
    pub const fn reg_no(&self) -> &RegNo {
        &self.reg_no
    }

    /// Manufacturer.
    #[must_use]
    pub fn make(&self) -> &str {
        &self.make
    }

    /// Model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Name of the driver.
    #[must_use]
    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    /// Number of passenger seats.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// The base fee copied into each new booking.
    #[must_use]
    pub const fn base_fee(&self) -> f64 {
        self.base_fee
    }

    /// The per-variant service parameters.
    #[must_use]
    pub const fn service(&self) -> &Service {
        &self.service
    }

    /// Standard or premium.
    #[must_use]
    pub const fn kind(&self) -> VehicleKind {
        self.service.kind()
    }

    /// The refreshments on offer, for premium vehicles.
    #[must_use]
    pub const fn refreshments(&self) -> Option<&Refreshments> {
        match &self.service {
            Service::Standard => None,
            Service::Premium(refreshments) => Some(refreshments),
        }
    }

    /// Bookings awaiting completion.
    #[must_use]
    pub fn active_bookings(&self) -> &[Booking] {
        &self.active
    }

    /// Completed bookings, oldest first.
    #[must_use]
    pub fn completed_bookings(&self) -> &[Booking] {
        &self.completed
    }

    /// Whether another booking can be taken.
    ///
    /// A vehicle becomes unavailable once all of its active slots are full.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.active.len() < self.active_limit
    }

    /// Whether any active booking falls on `date`.
    #[must_use]
    pub fn is_booked_on(&self, date: Date) -> bool {
        self.active.iter().any(|booking| booking.is_on(date))
    }

    /// The fee for a trip of the given distance.
    #[must_use]
    pub fn trip_fee(&self, kilometres: f64) -> f64 {
        kilometres * (self.base_fee * self.service.fee_factor())
    }

    /// Books the vehicle, judging the date against the current day.
    ///
    /// # Errors
    ///
    /// See [`Vehicle::book_as_of`].
    pub fn book(&mut self, request: BookingRequest) -> Result<Booking, BookingRejected> {
        self.book_as_of(request, Date::today())
    }

    /// Books the vehicle, judging the date against `today`, and returns a
    /// copy of the new booking.
    ///
    /// # Errors
    ///
    /// The booking is rejected if:
    ///
    /// - a premium vehicle's base fee is below [`PREMIUM_MIN_FEE`]
    /// - every active booking slot is taken
    /// - the vehicle already has an active booking on the requested date
    /// - the date is in the past or beyond the vehicle's booking window
    /// - the passenger count is zero or exceeds the vehicle's capacity
    pub fn book_as_of(
        &mut self,
        request: BookingRequest,
        today: Date,
    ) -> Result<Booking, BookingRejected> {
        if let Err(rejection) = self.check_booking(&request, today) {
            tracing::debug!("{} rejected booking: {rejection}", self.reg_no);
            return Err(rejection);
        }

        let booking = Booking::new(&self.reg_no, request, self.base_fee, today);
        tracing::info!("Booked {}: {}", self.reg_no, booking.id());
        self.active.push(booking.clone());

        Ok(booking)
    }

    fn check_booking(&self, request: &BookingRequest, today: Date) -> Result<(), BookingRejected> {
        if matches!(self.service, Service::Premium(_)) && self.base_fee < PREMIUM_MIN_FEE {
            return Err(BookingRejected::FeeTooLow(self.base_fee));
        }
        if !self.is_available() {
            return Err(BookingRejected::NoFreeSlot(self.active_limit));
        }
        if self.is_booked_on(request.date) {
            return Err(BookingRejected::DateTaken(request.date));
        }

        let window = self.service.window();
        if !window.admits(request.date, today) {
            return Err(BookingRejected::OutsideWindow {
                date: request.date,
                days: window.days(),
            });
        }

        let max = self.capacity.min(MAX_PASSENGERS);
        if !(1..=max).contains(&request.passengers) {
            return Err(BookingRejected::Passengers {
                requested: request.passengers,
                max,
            });
        }

        Ok(())
    }

    /// Finds the first active booking identified by `by`.
    #[must_use]
    pub fn find_booking(&self, by: BookingMatch) -> Option<&Booking> {
        self.active.iter().find(|booking| by.matches(booking))
    }

    /// The reference of the active booking under the given name on `date`.
    #[must_use]
    pub fn booking_id(&self, first_name: &str, last_name: &str, date: Date) -> Option<&BookingId> {
        self.find_booking(BookingMatch::NameAndDate {
            first_name,
            last_name,
            date,
        })
        .map(Booking::id)
    }

    /// Completes the first active booking identified by `by`.
    ///
    /// The booking is charged [`Vehicle::trip_fee`] and moved to the
    /// completed list.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the booking active, if `kilometres` is
    /// negative or not finite, or if no active booking matches.
    pub fn complete(
        &mut self,
        by: BookingMatch,
        kilometres: f64,
    ) -> Result<Completion, CompletionError> {
        if !kilometres.is_finite() || kilometres < 0.0 {
            return Err(CompletionError::Distance(kilometres));
        }
        let index = self
            .active
            .iter()
            .position(|booking| by.matches(booking))
            .ok_or(CompletionError::NoBooking)?;
        let mut booking = self.active.remove(index);

        let fee = self.trip_fee(kilometres);
        booking.complete(kilometres, fee);

        let completion = Completion {
            booking_id: booking.id().clone(),
            vehicle: self.reg_no.clone(),
            kilometres,
            fee,
        };
        tracing::info!("Completed {}: charged {fee:.2}", completion.booking_id);
        self.completed.push(booking);

        Ok(completion)
    }

    /// The human-readable report for this vehicle.
    #[must_use]
    pub const fn details(&self) -> VehicleDetails<'_> {
        VehicleDetails::new(self)
    }
}

fn check_details(make: &str, model: &str, driver: &str, capacity: u32) -> Result<(), DetailsError> {
    if !MAKE.is_match(make) {
        return Err(DetailsError::Make(make.to_string()));
    }
    if !MODEL.is_match(model) {
        return Err(DetailsError::Model(model.to_string()));
    }
    if !DRIVER.is_match(driver) {
        return Err(DetailsError::Driver(driver.to_string()));
    }
    if !(1..=MAX_PASSENGERS).contains(&capacity) {
        return Err(DetailsError::Capacity(capacity));
    }
    Ok(())
}

/// Reasons a vehicle cannot be constructed.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InvalidVehicle {
    /// The registration number is malformed.
    #[error(transparent)]
    Id(#[from] registration::Error),

    /// A descriptive field is malformed.
    #[error(transparent)]
    Details(#[from] DetailsError),

    /// The refreshment list is invalid.
    #[error(transparent)]
    Refreshments(#[from] RefreshmentsError),
}

/// Reasons a trip cannot be completed.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CompletionError {
    /// No active booking matches.
    #[error("no matching booking found")]
    NoBooking,

    /// The distance travelled is negative or not a finite number.
    #[error("invalid trip distance {0}: must be a non-negative number of kilometres")]
    Distance(f64),
}

/// A malformed descriptive field on a new vehicle.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DetailsError {
    /// The make is not a single alphabetic word.
    #[error("invalid make '{0}': must contain only letters")]
    Make(String),

    /// The model is too short or contains characters other than letters,
    /// digits, `.`, `_`, `-` and a single space.
    #[error("invalid model '{0}': use letters, digits, '.', '_', '-' and at most one space")]
    Model(String),

    /// The driver name is too short or contains characters other than
    /// letters, `.`, `_`, `-` and up to two spaces.
    #[error("invalid driver name '{0}': use letters, '.', '_', '-' and at most two spaces")]
    Driver(String),

    /// The capacity is outside 1 to 9.
    #[error("invalid passenger capacity {0}: must be between 1 and 9")]
    Capacity(u32),

    /// The premium base fee is negative or not a number.
    #[error("invalid base fee {0}")]
    Fee(f64),
}

/// An invalid premium refreshment list.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RefreshmentsError {
    /// Too few or too many items.
    #[error("refreshment list has {0} items: expected between 3 and 5")]
    Count(usize),

    /// An item appears more than once.
    #[error("refreshment '{0}' is listed more than once")]
    Duplicate(String),

    /// An item is blank, contains ':' or contains a control character.
    #[error(
        "invalid refreshment '{0}': must be non-empty, on one line and must not contain ':'"
    )]
    Item(String),
}

/// Reasons a vehicle refuses a booking.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BookingRejected {
    /// Every active booking slot is taken.
    #[error("vehicle already has {0} active bookings")]
    NoFreeSlot(usize),

    /// There is already an active booking on this date.
    #[error("vehicle is already booked on {0}")]
    DateTaken(Date),

    /// The date is in the past or too far ahead.
    #[error("{date} is not within the next {days} days")]
    OutsideWindow {
        /// The requested date.
        date: Date,
        /// Length of the vehicle's booking window.
        days: u32,
    },

    /// The passenger count is zero or too large.
    #[error("cannot carry {requested} passengers: must be between 1 and {max}")]
    Passengers {
        /// Passengers requested.
        requested: u32,
        /// The most this vehicle will carry.
        max: u32,
    },

    /// A premium vehicle's base fee is below the premium minimum.
    #[error("premium base fee {0:.2} is below 3.00")]
    FeeTooLow(f64),
}
