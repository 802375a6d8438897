//! End-to-end tests of a fleet through booking, completion and persistence.

use ridefleet::{
    BookingRequest, DataFiles, Date, Fleet, FleetConfig, NewVehicle, Origin, VehicleKind,
    domain::{SortOrder, fleet::BookError, vehicle::BookingRejected},
    storage::load_config,
};
use tempfile::tempdir;

fn in_days(days: i64) -> Date {
    Date::today().offset(days).unwrap()
}

fn populated() -> Fleet {
    let mut fleet = Fleet::default();
    fleet
        .create_vehicle(NewVehicle::standard("ABC123", "Toyota", "Corolla", "Jane Doe", 4))
        .unwrap();
    fleet
        .create_vehicle(NewVehicle::premium(
            "lux001",
            "Holden",
            "Commodore",
            "Nath Walker",
            3,
            4.0,
            ["Mints", "Orange Juice", "Water"],
        ))
        .unwrap();
    fleet
        .create_vehicle(NewVehicle::standard("DEF456", "Kia", "Rio", "Sam Li Wu", 2))
        .unwrap();
    fleet
}

#[test]
fn book_complete_save_and_reload() {
    let tmp = tempdir().unwrap();
    let config = load_config(tmp.path());
    let files = DataFiles::in_root(tmp.path(), &config);

    let mut fleet = populated();
    let date = in_days(2);

    let available = fleet.find_available(date);
    assert_eq!(available.len(), 3);

    let confirmation = fleet
        .book("ABC123", BookingRequest::new("John", "Smith", date, 2))
        .unwrap();
    assert!(confirmation.booking_id.as_str().starts_with("ABC123JOHSMI"));
    assert_eq!(confirmation.driver, "Jane Doe");

    let clash = fleet.book("ABC123", BookingRequest::new("Alice", "Jones", date, 1));
    assert_eq!(
        clash,
        Err(BookError::Rejected(BookingRejected::DateTaken(date)))
    );

    fleet
        .book("LUX001", BookingRequest::new("Kamina", "Simon", in_days(1), 2))
        .unwrap();
    assert_eq!(
        fleet
            .find_available_of_kind(VehicleKind::Standard, date)
            .len(),
        1
    );

    let completion = fleet.complete_by_date("john", "smith", date, 10.0).unwrap();
    assert!((completion.fee - 4.5).abs() < 1e-9);
    let completion = fleet
        .complete_by_reg_no("LUX001", "Kamina", "Simon", 5.0)
        .unwrap();
    assert!((completion.fee - 8.0).abs() < 1e-9);

    let abc = fleet.vehicle("ABC123").unwrap();
    assert!(abc.active_bookings().is_empty());
    assert_eq!(abc.completed_bookings().len(), 1);

    files.save(&fleet).unwrap();
    let loaded = files.load(&config);
    assert!(matches!(loaded.origin, Origin::Primary(_)));

    let reloaded = loaded.fleet;
    assert_eq!(reloaded.len(), fleet.len());
    for (before, after) in fleet.vehicles().iter().zip(reloaded.vehicles()) {
        assert_eq!(before.reg_no(), after.reg_no());
        assert_eq!(before.make(), after.make());
        assert_eq!(before.model(), after.model());
        assert_eq!(before.driver_name(), after.driver_name());
        assert_eq!(before.capacity(), after.capacity());
        assert!((before.base_fee() - after.base_fee()).abs() < f64::EPSILON);
        assert_eq!(before.refreshments(), after.refreshments());
        assert!(after.active_bookings().is_empty());
        assert!(after.completed_bookings().is_empty());
    }
}

#[test]
fn listing_and_reports() {
    let fleet = populated();

    let standard: Vec<&str> = fleet
        .list_by_kind(VehicleKind::Standard, SortOrder::Descending)
        .into_iter()
        .map(|v| v.reg_no().as_str())
        .collect();
    assert_eq!(standard, ["DEF456", "ABC123"]);

    let report = fleet.details("lux001").unwrap().to_string();
    assert!(report.contains("Reg No:         LUX001"));
    assert!(report.contains("Refreshments Available"));
    assert!(fleet.details("ZZZ999").is_err());
}

#[test]
fn backup_is_used_when_primary_is_missing() {
    let tmp = tempdir().unwrap();
    let config = FleetConfig::default();
    let files = DataFiles::in_root(tmp.path(), &config);

    files.save(&populated()).unwrap();
    std::fs::remove_file(files.primary()).unwrap();

    let loaded = files.load(&config);
    assert!(matches!(loaded.origin, Origin::Backup(_)));
    assert_eq!(loaded.fleet.len(), 3);
    assert!(loaded.fleet.vehicle_exists("def456"));
}
