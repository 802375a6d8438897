use std::fmt;

use serde::Serialize;

use crate::domain::{Date, RegNo, Window};

/// The shortest first or last name that can appear in a booking reference.
pub const NAME_MIN_LEN: usize = 3;

/// A request to book a vehicle for one trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Passenger's first name.
    pub first_name: String,
    /// Passenger's last name.
    pub last_name: String,
    /// The day the trip is wanted.
    pub date: Date,
    /// Number of passengers travelling.
    pub passengers: u32,
}

impl BookingRequest {
    /// Creates a booking request.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date: Date,
        passengers: u32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date,
            passengers,
        }
    }
}

/// The reference derived for a booking.
///
/// A reference is the vehicle registration, the first three letters of each
/// name in uppercase, and the eight-digit date, e.g. `ABC123JOHSMI05062025`.
/// Bookings whose names are too short, or whose date fell outside the
/// standard window when booked, carry [`BookingId::Invalid`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookingId {
    /// A usable reference.
    Valid(String),
    /// The booking could not be given a reference.
    Invalid,
}

impl BookingId {
    fn derive(vehicle: &RegNo, first_name: &str, last_name: &str, date: Option<Date>) -> Self {
        let Some(date) = date else {
            return Self::Invalid;
        };
        if first_name.chars().count() < NAME_MIN_LEN || last_name.chars().count() < NAME_MIN_LEN {
            return Self::Invalid;
        }

        let prefix = |name: &str| name.chars().take(NAME_MIN_LEN).collect::<String>().to_uppercase();
        Self::Valid(format!(
            "{vehicle}{}{}{}",
            prefix(first_name),
            prefix(last_name),
            date.eight_digit()
        ))
    }

    /// Whether a usable reference was derived.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the reference text, `Invalid` for an invalid booking.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Valid(id) => id,
            Self::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BookingId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// The distance and charge recorded when a trip is completed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trip {
    /// Distance travelled.
    pub kilometres: f64,
    /// The fee charged for the trip.
    pub fee: f64,
}

/// One trip booked against a vehicle.
///
/// A booking is created only by a successful booking attempt, is completed
/// at most once, and is then archived in its vehicle's history. It refers to
/// its vehicle by registration number; the vehicle owns the booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: BookingId,
    vehicle: RegNo,
    first_name: String,
    last_name: String,
    date: Option<Date>,
    passengers: u32,
    booking_fee: f64,
    trip: Option<Trip>,
}

impl Booking {
    /// Records a booking accepted by `vehicle`.
    ///
    /// `booking_fee` is the vehicle's base fee at the time of booking. The
    /// date is kept only if it lies within the standard window from `today`.
    pub(crate) fn new(
        vehicle: &RegNo,
        request: BookingRequest,
        booking_fee: f64,
        today: Date,
    ) -> Self {
        let BookingRequest {
            first_name,
            last_name,
            date,
            passengers,
        } = request;

        let date = Some(date).filter(|&date| Window::STANDARD.admits(date, today));
        let id = BookingId::derive(vehicle, &first_name, &last_name, date);

        Self {
            id,
            vehicle: vehicle.clone(),
            first_name,
            last_name,
            date,
            passengers,
            booking_fee,
            trip: None,
        }
    }

    pub(crate) const fn complete(&mut self, kilometres: f64, fee: f64) {
        self.trip = Some(Trip { kilometres, fee });
    }

    /// The derived booking reference.
    #[must_use]
    pub const fn id(&self) -> &BookingId {
        &self.id
    }

    /// Registration number of the vehicle that owns this booking.
    #[must_use]
    pub const fn vehicle(&self) -> &RegNo {
        &self.vehicle
    }

    /// Passenger's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Passenger's last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// The booked day, or `None` if it failed validation when booked.
    #[must_use]
    pub const fn date(&self) -> Option<Date> {
        self.date
    }

    /// Number of passengers travelling.
    #[must_use]
    pub const fn passengers(&self) -> u32 {
        self.passengers
    }

    /// The vehicle's base fee when the booking was made.
    #[must_use]
    pub const fn booking_fee(&self) -> f64 {
        self.booking_fee
    }

    /// Distance and charge, once the trip has been completed.
    #[must_use]
    pub const fn trip(&self) -> Option<Trip> {
        self.trip
    }

    /// Whether the trip has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.trip.is_some()
    }

    /// Whether the passenger name matches, ignoring case.
    #[must_use]
    pub fn has_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name.to_uppercase() == first_name.to_uppercase()
            && self.last_name.to_uppercase() == last_name.to_uppercase()
    }

    /// Whether the booking falls on `date`.
    #[must_use]
    pub fn is_on(&self, date: Date) -> bool {
        self.date.is_some_and(|booked| booked.same_day(date))
    }
}

/// How an active booking is identified for completion or lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingMatch<'a> {
    /// The first booking under the passenger's name.
    Name {
        /// Passenger's first name.
        first_name: &'a str,
        /// Passenger's last name.
        last_name: &'a str,
    },
    /// The booking under the passenger's name on a given day.
    NameAndDate {
        /// Passenger's first name.
        first_name: &'a str,
        /// Passenger's last name.
        last_name: &'a str,
        /// The booked day.
        date: Date,
    },
}

impl BookingMatch<'_> {
    /// Whether `booking` is the one being identified.
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        match *self {
            Self::Name {
                first_name,
                last_name,
            } => booking.has_name(first_name, last_name),
            Self::NameAndDate {
                first_name,
                last_name,
                date,
            } => booking.has_name(first_name, last_name) && booking.is_on(date),
        }
    }
}

/// The result of completing a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Completion {
    /// Reference of the completed booking.
    pub booking_id: BookingId,
    /// Vehicle that made the trip.
    pub vehicle: RegNo,
    /// Distance travelled.
    pub kilometres: f64,
    /// The fee charged.
    pub fee: f64,
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trip {} complete: ${:.2} has been charged for {:.2} km.",
            self.booking_id, self.fee, self.kilometres
        )
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn today() -> Date {
        Date::new(5, 6, 2025).unwrap()
    }

    fn reg() -> RegNo {
        RegNo::new("ABC123").unwrap()
    }

    fn book(first: &str, last: &str, offset: i64) -> Booking {
        let date = today().offset(offset).unwrap();
        Booking::new(&reg(), BookingRequest::new(first, last, date, 2), 1.5, today())
    }

    #[test]
    fn derives_reference() {
        let booking = book("John", "Smith", 2);

        assert_eq!(booking.id().as_str(), "ABC123JOHSMI07062025");
        assert!(booking.id().is_valid());
        assert_eq!(booking.vehicle(), &reg());
        assert!((booking.booking_fee() - 1.5).abs() < f64::EPSILON);
        assert!(!booking.is_completed());
    }

    #[test]
    fn reference_uppercases_name_prefixes() {
        let booking = book("mary", "o'neil", 0);
        assert_eq!(booking.id().as_str(), "ABC123MARO'N05062025");
    }

    #[test_case("Jo", "Smith"; "short first name")]
    #[test_case("John", "Li"; "short last name")]
    fn short_names_invalidate_reference(first: &str, last: &str) {
        let booking = book(first, last, 1);

        assert_eq!(booking.id(), &BookingId::Invalid);
        assert_eq!(booking.id().to_string(), "Invalid");
        assert!(booking.date().is_some());
    }

    #[test]
    fn out_of_window_date_is_dropped() {
        let booking = book("John", "Smith", 9);

        assert_eq!(booking.date(), None);
        assert_eq!(booking.id(), &BookingId::Invalid);
        assert!(!booking.is_on(today().offset(9).unwrap()));
    }

    #[test]
    fn name_match_ignores_case() {
        let booking = book("John", "Smith", 1);

        assert!(booking.has_name("JOHN", "smith"));
        assert!(!booking.has_name("John", "Smyth"));
    }

    #[test]
    fn match_by_name_and_date() {
        let booking = book("John", "Smith", 1);
        let date = today().offset(1).unwrap();

        let by_name = BookingMatch::Name {
            first_name: "john",
            last_name: "smith",
        };
        let by_date = BookingMatch::NameAndDate {
            first_name: "John",
            last_name: "Smith",
            date,
        };
        let wrong_day = BookingMatch::NameAndDate {
            first_name: "John",
            last_name: "Smith",
            date: today(),
        };

        assert!(by_name.matches(&booking));
        assert!(by_date.matches(&booking));
        assert!(!wrong_day.matches(&booking));
    }

    #[test]
    fn completion_records_trip() {
        let mut booking = book("John", "Smith", 1);
        booking.complete(10.0, 4.5);

        assert!(booking.is_completed());
        assert_eq!(
            booking.trip(),
            Some(Trip {
                kilometres: 10.0,
                fee: 4.5
            })
        );
    }

    #[test]
    fn completion_display() {
        let completion = Completion {
            booking_id: BookingId::Valid("ABC123JOHSMI07062025".to_string()),
            vehicle: reg(),
            kilometres: 10.0,
            fee: 4.5,
        };

        assert_eq!(
            completion.to_string(),
            "Trip ABC123JOHSMI07062025 complete: $4.50 has been charged for 10.00 km."
        );
    }
}
