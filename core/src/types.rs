//! Domain DTOs for the vehicles API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently of
//! the mock-server crate; integration tests catch schema drift. Numeric form
//! fields travel as a JSON number or as `""` when empty, matching what the
//! server accepts from the management panel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned vehicle identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub i64);

/// Server-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl From<i64> for VehicleId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    #[default]
    Available,
    Repair,
    Sold,
    /// A code this client does not know. Listed rows keep loading; a draft
    /// holding it cannot be submitted.
    #[serde(other)]
    Unknown,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Available,
        VehicleStatus::Repair,
        VehicleStatus::Sold,
    ];

    /// Wire code, as sent and received in JSON.
    pub fn code(self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Repair => "repair",
            VehicleStatus::Sold => "sold",
            VehicleStatus::Unknown => "unknown",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

/// A persisted vehicle as listed by the server.
///
/// `owner_name` is derived server-side for display and is never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    #[serde(default, with = "blank_or_number")]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub status: VehicleStatus,
}

/// Reference data for the owner selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub firstname: String,
    pub lastname: String,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Editable working copy of a vehicle's fields, sent as the create/update
/// payload.
///
/// Independent of any list entry: editing a draft never touches the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDraft {
    pub brand: String,
    pub model: String,
    #[serde(default, with = "blank_or_number")]
    pub year: Option<i32>,
    pub license_plate: String,
    #[serde(default, with = "blank_or_number")]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub status: VehicleStatus,
}

impl VehicleDraft {
    /// Defaults for a new record: empty text, `year`, no owner, available.
    pub fn blank(year: i32) -> Self {
        Self {
            brand: String::new(),
            model: String::new(),
            year: Some(year),
            license_plate: String::new(),
            owner_id: None,
            status: VehicleStatus::Available,
        }
    }

    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            year: Some(vehicle.year),
            license_plate: vehicle.license_plate.clone(),
            owner_id: vehicle.owner_id,
            status: vehicle.status,
        }
    }
}

/// `Option<number>` that serializes `None` as `""` and accepts a number,
/// numeric text, `""` or `null` on input.
mod blank_or_number {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: TryFrom<i64>,
        D: Deserializer<'de>,
    {
        let number = match Option::<Raw>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(Raw::Number(n)) => n,
            Some(Raw::Text(text)) if text.trim().is_empty() => return Ok(None),
            Some(Raw::Text(text)) => text.trim().parse::<i64>().map_err(D::Error::custom)?,
        };
        T::try_from(number)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("number out of range: {number}")))
    }
}
