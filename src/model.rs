//! Domain records returned by the API
//!
//! Records deserialize straight from the API's JSON. Every field is optional
//! because the API omits unknown values instead of sending nulls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declares a string enum with an `Unknown` fallback that keeps the raw value.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A value this client does not know about
            Unknown(String),
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Unknown(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $wire.to_string(),)+
                    $name::Unknown(other) => other,
                }
            }
        }
    };
}

wire_enum! {
    /// Vehicle fuel type
    FuelType {
        Diesel => "DIESEL",
        Electricity => "ELECTRICITY",
        Lpg => "LPG",
        Other => "OTHER",
        Petrol => "PETROL",
        NotAvailable => "UNKNOWN",
    }
}

wire_enum! {
    /// Trip classification
    TripType {
        NoType => "NONE",
        Private => "PRIVATE",
        Business => "BUSINESS",
        Work => "WORK",
        NotAvailable => "UNKNOWN",
    }
}

wire_enum! {
    /// Fuel level event kind
    FuelEventType {
        Drain => "DRAIN",
        Refuel => "REFUEL",
    }
}

wire_enum! {
    /// Driver identification method
    IdentifierType {
        Dlt => "DLT",
        Tachograph => "TACHOGRAPH",
        Wireless => "WIRELESS",
        IButton => "IBUTTON",
    }
}

/// A tracked object (usually a vehicle)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Object {
    pub id: Option<String>,
    pub name: Option<String>,
    pub imei: Option<String>,
    pub vehicle_params: Option<VehicleParams>,
    pub last_coordinate: Option<Position>,
}

/// Static vehicle parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParams {
    pub vin: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub plate_number: Option<String>,
    /// Litres per 100 km
    pub average_fuel_consumption: Option<f64>,
    /// Litres
    pub fuel_tank_capacity: Option<f64>,
    pub fuel_type: Option<FuelType>,
}

/// A GPS fix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Metres
    pub altitude: Option<f64>,
    /// km/h
    pub speed: Option<f64>,
    /// Degrees
    pub direction: Option<f64>,
    pub datetime: Option<DateTime<Utc>>,
    pub satellites_count: Option<i32>,
    pub server_datetime: Option<DateTime<Utc>>,
}

/// A named group of objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectGroup {
    pub id: Option<String>,
    pub name: Option<String>,
    pub objects_ids: Vec<String>,
}

/// A historical coordinate record of an object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinate {
    pub object_id: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub ignition_status: Option<String>,
    pub trip_type: Option<TripType>,
    pub position: Option<Position>,
    pub geozone_ids: Vec<String>,
}

/// A trip of an object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trip {
    pub object_id: Option<String>,
    pub trip_type: Option<TripType>,
    pub driver_ids: Vec<String>,
    /// Seconds
    pub trip_duration: Option<f64>,
    /// Kilometres
    pub mileage: Option<f64>,
    pub trip_start: Option<TripMetrics>,
    pub trip_end: Option<TripMetrics>,
}

/// Where and when a trip started or ended
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripMetrics {
    pub datetime: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<Address>,
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub county: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub zip: Option<String>,
}

/// A refuel or drain event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelEvent {
    pub object_id: Option<String>,
    pub driver_id: Option<String>,
    pub event_type: Option<FuelEventType>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Percent
    pub fuel_level_start: Option<f64>,
    /// Percent
    pub fuel_level_end: Option<f64>,
    /// Percent
    pub difference: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// A driver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Driver {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub identifiers: Vec<DriverIdentifier>,
}

/// A card or key identifying a driver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverIdentifier {
    pub identifier: Option<String>,
    #[serde(rename = "type")]
    pub identifier_type: Option<IdentifierType>,
}
