use std::{fmt, str::FromStr};

use crate::domain::{NewVehicle, ServiceRequest, Vehicle, VehicleKind};

const DELIMITER: char = ':';
const MIN_FIELDS: usize = 7;
const ITEM_PREFIX: &str = "Item ";

/// A vehicle as stored on one line of a data file.
///
/// The machine form is colon-delimited:
///
/// ```text
/// regNo:make:model:driverName:capacity:YES|NO:baseFee[:Item 1 name:Item 2 name:...]
/// ```
///
/// Refreshment items are present only for premium vehicles. The availability
/// token is written for compatibility but ignored on load, since bookings are
/// not stored.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    /// Registration number.
    pub reg_no: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Name of the driver.
    pub driver_name: String,
    /// Number of passenger seats.
    pub capacity: u32,
    /// Whether the vehicle had a free booking slot when written.
    pub available: bool,
    /// Base fee.
    pub base_fee: f64,
    /// Refreshment items; empty for standard vehicles.
    pub refreshments: Vec<String>,
}

impl VehicleRecord {
    /// The kind of vehicle this line describes.
    #[must_use]
    pub fn kind(&self) -> VehicleKind {
        if self.refreshments.is_empty() {
            VehicleKind::Standard
        } else {
            VehicleKind::Premium
        }
    }

    /// Parses one line of a data file.
    ///
    /// # Errors
    ///
    /// Returns an error if the line has fewer than seven fields, or if the
    /// capacity, availability, fee or any refreshment field is malformed.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        if fields.len() < MIN_FIELDS {
            return Err(RecordError::TooFewFields(fields.len()));
        }

        let capacity = fields[4]
            .parse()
            .map_err(|_| RecordError::Capacity(fields[4].to_string()))?;
        let available = match fields[5] {
            "YES" => true,
            "NO" => false,
            other => return Err(RecordError::Availability(other.to_string())),
        };
        let base_fee = fields[6]
            .parse()
            .map_err(|_| RecordError::Fee(fields[6].to_string()))?;
        let refreshments = fields[MIN_FIELDS..]
            .iter()
            .map(|field| parse_item(field))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            reg_no: fields[0].to_string(),
            make: fields[1].to_string(),
            model: fields[2].to_string(),
            driver_name: fields[3].to_string(),
            capacity,
            available,
            base_fee,
            refreshments,
        })
    }
}

/// Extracts the name from an `Item N name` field.
fn parse_item(field: &str) -> Result<String, RecordError> {
    field
        .strip_prefix(ITEM_PREFIX)
        .and_then(|rest| rest.split_once(' '))
        .filter(|(index, name)| index.parse::<usize>().is_ok() && !name.is_empty())
        .map(|(_, name)| name.to_string())
        .ok_or_else(|| RecordError::Item(field.to_string()))
}

impl FromStr for VehicleRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VehicleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}:{}:{}",
            self.reg_no,
            self.make,
            self.model,
            self.driver_name,
            self.capacity,
            if self.available { "YES" } else { "NO" },
            Decimal(self.base_fee)
        )?;
        for (i, item) in self.refreshments.iter().enumerate() {
            write!(f, "{DELIMITER}{ITEM_PREFIX}{} {item}", i + 1)?;
        }
        Ok(())
    }
}

/// Renders a fee with at least one fractional digit (`1.5`, `4.0`).
struct Decimal(f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<&Vehicle> for VehicleRecord {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            reg_no: vehicle.reg_no().to_string(),
            make: vehicle.make().to_string(),
            model: vehicle.model().to_string(),
            driver_name: vehicle.driver_name().to_string(),
            capacity: vehicle.capacity(),
            available: vehicle.is_available(),
            base_fee: vehicle.base_fee(),
            refreshments: vehicle
                .refreshments()
                .map(|items| items.iter().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<VehicleRecord> for NewVehicle {
    fn from(record: VehicleRecord) -> Self {
        let service = match record.kind() {
            VehicleKind::Standard => ServiceRequest::Standard,
            VehicleKind::Premium => ServiceRequest::Premium {
                fee: record.base_fee,
                refreshments: record.refreshments,
            },
        };

        Self {
            reg_no: record.reg_no,
            make: record.make,
            model: record.model,
            driver_name: record.driver_name,
            capacity: record.capacity,
            service,
        }
    }
}

/// A malformed line in a data file.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    /// The line has too few colon-delimited fields to describe a vehicle.
    #[error("expected at least 7 fields, found {0}")]
    TooFewFields(usize),

    /// The capacity field is not a whole number.
    #[error("invalid capacity '{0}'")]
    Capacity(String),

    /// The availability field is neither `YES` nor `NO`.
    #[error("invalid availability '{0}': expected YES or NO")]
    Availability(String),

    /// The fee field is not a number.
    #[error("invalid fee '{0}'")]
    Fee(String),

    /// A refreshment field is not of the form `Item N name`.
    #[error("invalid refreshment field '{0}': expected 'Item N name'")]
    Item(String),
}
