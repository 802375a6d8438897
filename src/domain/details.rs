//! Borrowed views rendering the multi-line vehicle and booking reports.

use std::fmt;

use crate::domain::{Booking, Vehicle};

const VEHICLE_MARKER_WIDTH: usize = 60;
const BOOKING_MARKER_WIDTH: usize = 40;
const BOOKING_INDENT: usize = 16;

/// A borrowed view of a vehicle that renders its human-readable report.
///
/// The report lists the vehicle's header fields, then (for premium vehicles)
/// the refreshments on offer, then current bookings, then past bookings.
/// Sections with nothing to show are omitted.
#[derive(Debug, Clone, Copy)]
pub struct VehicleDetails<'a> {
    vehicle: &'a Vehicle,
}

impl<'a> VehicleDetails<'a> {
    pub(crate) const fn new(vehicle: &'a Vehicle) -> Self {
        Self { vehicle }
    }
}

impl fmt::Display for VehicleDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vehicle = self.vehicle;

        writeln!(f, "{}", "_".repeat(VEHICLE_MARKER_WIDTH))?;
        writeln!(f, "{:<15} {}", "Reg No:", vehicle.reg_no())?;
        writeln!(
            f,
            "{:<15} {} {}",
            "Make & Model:",
            vehicle.make(),
            vehicle.model()
        )?;
        writeln!(f, "{:<15} {}", "Driver Name:", vehicle.driver_name())?;
        writeln!(f, "{:<15} {}", "Capacity:", vehicle.capacity())?;
        writeln!(f, "{:<15} ${:.2}", "Standard Fee:", vehicle.base_fee())?;
        writeln!(
            f,
            "{:<15} {}",
            "Available:",
            if vehicle.is_available() { "YES" } else { "NO" }
        )?;

        if let Some(refreshments) = vehicle.refreshments() {
            write!(f, "\nRefreshments Available\n")?;
            for (i, item) in refreshments.iter().enumerate() {
                writeln!(f, "{:<12} {item}", format!("Item {}:", i + 1))?;
            }
        }

        write_section(f, "CURRENT BOOKINGS", vehicle.active_bookings())?;
        write_section(f, "PAST BOOKINGS", vehicle.completed_bookings())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, bookings: &[Booking]) -> fmt::Result {
    if bookings.is_empty() {
        return Ok(());
    }
    write!(f, "\n{title}")?;
    for booking in bookings {
        write!(f, "\n{}", BookingDetails::new(booking))?;
    }
    Ok(())
}

/// A borrowed view of a booking that renders its indented report block.
#[derive(Debug, Clone, Copy)]
pub struct BookingDetails<'a> {
    booking: &'a Booking,
}

impl<'a> BookingDetails<'a> {
    /// Wraps a booking for display.
    #[must_use]
    pub const fn new(booking: &'a Booking) -> Self {
        Self { booking }
    }
}

impl fmt::Display for BookingDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let booking = self.booking;

        writeln!(
            f,
            "{:BOOKING_INDENT$}{}",
            "",
            "_".repeat(BOOKING_MARKER_WIDTH)
        )?;
        line(f, "id:", booking.id())?;
        line(f, "Booking Fee:", format_args!("${:.2}", booking.booking_fee()))?;
        match booking.date() {
            Some(date) => line(f, "Pick Up Date:", date)?,
            None => line(f, "Pick Up Date:", "Invalid")?,
        }
        line(
            f,
            "Name:",
            format_args!("{} {}", booking.first_name(), booking.last_name()),
        )?;
        line(f, "Passengers:", booking.passengers())?;
        match booking.trip() {
            Some(trip) => {
                line(f, "Travelled:", format_args!("{:.2}", trip.kilometres))?;
                line(f, "Trip Fee:", format_args!("{:.2}", trip.fee))?;
            }
            None => {
                line(f, "Travelled:", "N/A")?;
                line(f, "Trip Fee:", "N/A")?;
            }
        }
        line(f, "Car Id:", booking.vehicle())
    }
}

fn line(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{:BOOKING_INDENT$}{label:<20} {value}", "")
}

#[cfg(test)]
mod tests {
    use crate::domain::{BookingMatch, BookingRequest, Date, NewVehicle, Vehicle};

    fn today() -> Date {
        Date::new(10, 6, 2025).unwrap()
    }

    fn standard() -> Vehicle {
        Vehicle::new(
            NewVehicle::standard("ABC123", "Toyota", "Corolla", "Jane Doe", 4),
            5,
        )
        .unwrap()
    }

    #[test]
    fn vehicle_without_bookings() {
        let report = standard().details().to_string();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "_".repeat(60));
        assert_eq!(lines[1], "Reg No:         ABC123");
        assert_eq!(lines[2], "Make & Model:   Toyota Corolla");
        assert_eq!(lines[3], "Driver Name:    Jane Doe");
        assert_eq!(lines[4], "Capacity:       4");
        assert_eq!(lines[5], "Standard Fee:   $1.50");
        assert_eq!(lines[6], "Available:      YES");
        assert_eq!(lines.len(), 7);
        assert!(!report.contains("BOOKINGS"));
    }

    #[test]
    fn sections_appear_in_order() {
        let mut vehicle = standard();
        let date = today().offset(1).unwrap();
        vehicle
            .book_as_of(BookingRequest::new("John", "Smith", date, 2), today())
            .unwrap();
        vehicle
            .book_as_of(
                BookingRequest::new("Alice", "Jones", today().offset(2).unwrap(), 1),
                today(),
            )
            .unwrap();
        vehicle
            .complete(
                BookingMatch::NameAndDate {
                    first_name: "John",
                    last_name: "Smith",
                    date,
                },
                10.0,
            )
            .unwrap();

        let report = vehicle.details().to_string();
        let current = report.find("CURRENT BOOKINGS").unwrap();
        let past = report.find("PAST BOOKINGS").unwrap();
        assert!(current < past);

        let (active, completed) = report.split_at(past);
        assert!(active.contains("ABC123ALIJON12062025"));
        assert!(active.contains("N/A"));
        assert!(completed.contains("ABC123JOHSMI11062025"));
        assert!(completed.contains("4.50"));
        assert!(completed.contains("10.00"));
    }

    #[test]
    fn premium_lists_refreshments_before_bookings() {
        let mut vehicle = Vehicle::new(
            NewVehicle::premium(
                "LUX001",
                "Holden",
                "Commodore",
                "Nath Walker",
                3,
                4.0,
                ["Mints", "Orange Juice", "Water"],
            ),
            5,
        )
        .unwrap();
        vehicle
            .book_as_of(
                BookingRequest::new("Kamina", "Simon", today().offset(1).unwrap(), 2),
                today(),
            )
            .unwrap();

        let report = vehicle.details().to_string();
        let refreshments = report.find("Refreshments Available").unwrap();
        let current = report.find("CURRENT BOOKINGS").unwrap();
        assert!(refreshments < current);
        assert!(report.contains("Item 2:      Orange Juice\n"));
        assert!(report.contains("Standard Fee:   $4.00"));
    }

    #[test]
    fn booking_block_is_indented() {
        let mut vehicle = standard();
        let booking = vehicle
            .book_as_of(
                BookingRequest::new("John", "Smith", today().offset(1).unwrap(), 2),
                today(),
            )
            .unwrap();

        let block = super::BookingDetails::new(&booking).to_string();
        let indent = " ".repeat(16);
        for line in block.lines() {
            assert!(line.starts_with(&indent));
        }
        assert!(block.contains(&format!("{indent}{:<20} 11/06/2025", "Pick Up Date:")));
        assert!(block.contains(&format!("{indent}{:<20} ABC123", "Car Id:")));
    }
}
