//! Form session: whether a form is open, for which record, and its draft.
//!
//! The session is a tagged variant, so "closed but still editing id X" cannot
//! be represented. The draft lives inside the open variants and is dropped on
//! close.

use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;
use crate::types::{UserId, Vehicle, VehicleDraft, VehicleId, VehicleStatus};

/// Current local calendar year, the default `year` of a new draft. Falls back
/// to UTC when the local offset cannot be determined.
pub fn current_year() -> i32 {
    time::OffsetDateTime::now_local()
        .unwrap_or_else(|_| time::OffsetDateTime::now_utc())
        .year()
}

/// Draft fields addressable by a field edit. `Display` gives the JSON key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Brand,
    Model,
    Year,
    LicensePlate,
    OwnerId,
    Status,
}

impl DraftField {
    pub const ALL: [DraftField; 6] = [
        DraftField::Brand,
        DraftField::Model,
        DraftField::Year,
        DraftField::LicensePlate,
        DraftField::OwnerId,
        DraftField::Status,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DraftField::Brand => "brand",
            DraftField::Model => "model",
            DraftField::Year => "year",
            DraftField::LicensePlate => "license_plate",
            DraftField::OwnerId => "owner_id",
            DraftField::Status => "status",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, DraftField::OwnerId | DraftField::Status)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormSession {
    #[default]
    Closed,
    CreatingNew(VehicleDraft),
    Editing { id: VehicleId, draft: VehicleDraft },
}

impl FormSession {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormSession::Closed)
    }

    pub fn editing_id(&self) -> Option<VehicleId> {
        match self {
            FormSession::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&VehicleDraft> {
        match self {
            FormSession::Closed => None,
            FormSession::CreatingNew(draft) | FormSession::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut VehicleDraft> {
        match self {
            FormSession::Closed => None,
            FormSession::CreatingNew(draft) | FormSession::Editing { draft, .. } => Some(draft),
        }
    }

    /// Add button: opens a blank form when closed, closes any open form.
    pub fn toggle_add(&mut self, year: i32) {
        *self = match self {
            FormSession::Closed => FormSession::CreatingNew(VehicleDraft::blank(year)),
            _ => FormSession::Closed,
        };
    }

    /// Open (or switch) the form onto `vehicle`, copying its current fields.
    pub fn edit(&mut self, vehicle: &Vehicle) {
        *self = FormSession::Editing {
            id: vehicle.id,
            draft: VehicleDraft::from_vehicle(vehicle),
        };
    }

    pub fn close(&mut self) {
        *self = FormSession::Closed;
    }

    /// Apply a raw text edit to the draft.
    ///
    /// `Year` and `OwnerId` become a number, or empty when the text is blank
    /// or not a number. An unknown status code leaves the draft unchanged.
    pub fn set_field(&mut self, field: DraftField, raw: &str) -> Result<(), PanelError> {
        let draft = self.draft_mut().ok_or(PanelError::FormClosed)?;
        match field {
            DraftField::Brand => draft.brand = raw.to_string(),
            DraftField::Model => draft.model = raw.to_string(),
            DraftField::LicensePlate => draft.license_plate = raw.to_string(),
            DraftField::Year => draft.year = coerce_number(raw),
            DraftField::OwnerId => draft.owner_id = coerce_number::<i64>(raw).map(UserId),
            DraftField::Status => match VehicleStatus::from_code(raw) {
                Some(status) => draft.status = status,
                None => tracing::debug!(code = raw, "ignoring unknown status code"),
            },
        }
        Ok(())
    }

    /// The open draft, if every required field is filled in.
    pub fn validated_draft(&self) -> Result<&VehicleDraft, PanelError> {
        let draft = self.draft().ok_or(PanelError::FormClosed)?;
        let missing = DraftField::ALL.into_iter().find(|field| match field {
            DraftField::Brand => draft.brand.trim().is_empty(),
            DraftField::Model => draft.model.trim().is_empty(),
            DraftField::LicensePlate => draft.license_plate.trim().is_empty(),
            DraftField::Year => draft.year.is_none(),
            DraftField::Status => draft.status == VehicleStatus::Unknown,
            DraftField::OwnerId => false,
        });
        match missing {
            Some(field) => Err(PanelError::MissingField(field)),
            None => Ok(draft),
        }
    }
}

fn coerce_number<T: FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}
