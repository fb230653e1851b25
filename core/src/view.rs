//! Side-effect-free rendering of panel state into view models.
//!
//! Hosts draw these however they like; `ListView` also renders itself as a
//! plain text table.

use std::fmt;

use crate::labels::Labels;
use crate::session::{DraftField, FormSession};
use crate::types::{User, Vehicle, VehicleDraft, VehicleId, VehicleStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// No vehicles: show `message` instead of a table.
    Empty { message: String },
    Table { headers: Vec<String>, rows: Vec<RowView> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: VehicleId,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub license_plate: String,
    pub owner: String,
    /// Status code, for styling hooks such as `status-repair`.
    pub status_code: &'static str,
    pub status_label: &'static str,
    pub edit_label: &'static str,
    pub delete_label: &'static str,
}

pub fn list_view(vehicles: &[Vehicle], labels: &Labels) -> ListView {
    if vehicles.is_empty() {
        return ListView::Empty {
            message: labels.empty_list.to_string(),
        };
    }

    let headers = [
        labels.field(DraftField::Brand),
        labels.field(DraftField::Model),
        labels.field(DraftField::Year),
        labels.plate_header,
        labels.field(DraftField::OwnerId),
        labels.field(DraftField::Status),
        labels.actions_header,
    ]
    .into_iter()
    .map(str::to_string)
    .collect();

    let rows = vehicles
        .iter()
        .map(|vehicle| RowView {
            id: vehicle.id,
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year.to_string(),
            license_plate: vehicle.license_plate.clone(),
            owner: vehicle
                .owner_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or(labels.no_owner)
                .to_string(),
            status_code: vehicle.status.code(),
            status_label: labels.status(vehicle.status),
            edit_label: labels.edit_action,
            delete_label: labels.delete_action,
        })
        .collect();

    ListView::Table { headers, rows }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (headers, rows) = match self {
            ListView::Empty { message } => return writeln!(f, "{message}"),
            ListView::Table { headers, rows } => (headers, rows),
        };

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                vec![
                    row.brand.clone(),
                    row.model.clone(),
                    row.year.clone(),
                    row.license_plate.clone(),
                    row.owner.clone(),
                    row.status_label.to_string(),
                    format!("{} / {}", row.edit_label, row.delete_label),
                ]
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for line in &cells {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_line(f, headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(f, &rule, &widths)?;
        for line in &cells {
            write_line(f, line, &widths)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    writeln!(f, "{}", padded.join(" | ").trim_end())
}

/// Label of the add button: add when closed, cancel when a form is open.
pub fn toggle_label(session: &FormSession, labels: &Labels) -> &'static str {
    if session.is_open() {
        labels.cancel_button
    } else {
        labels.add_button
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: DraftField,
    pub label: &'static str,
    pub required: bool,
    pub input: FieldInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text { value: String },
    Number { value: String },
    Select { selected: String, options: Vec<SelectOption> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// The open form, or `None` when the session is closed.
pub fn form_view(session: &FormSession, users: &[User], labels: &Labels) -> Option<FormView> {
    let draft = session.draft()?;
    let submit_label = match session.editing_id() {
        Some(_) => labels.update_submit,
        None => labels.create_submit,
    };
    let fields = DraftField::ALL
        .into_iter()
        .map(|field| FieldView {
            field,
            label: labels.field(field),
            required: field.is_required(),
            input: field_input(field, draft, users, labels),
        })
        .collect();
    Some(FormView {
        fields,
        submit_label,
    })
}

fn field_input(field: DraftField, draft: &VehicleDraft, users: &[User], labels: &Labels) -> FieldInput {
    match field {
        DraftField::Brand => FieldInput::Text {
            value: draft.brand.clone(),
        },
        DraftField::Model => FieldInput::Text {
            value: draft.model.clone(),
        },
        DraftField::LicensePlate => FieldInput::Text {
            value: draft.license_plate.clone(),
        },
        DraftField::Year => FieldInput::Number {
            value: draft.year.map(|year| year.to_string()).unwrap_or_default(),
        },
        DraftField::OwnerId => {
            let placeholder = SelectOption {
                value: String::new(),
                label: labels.owner_placeholder.to_string(),
            };
            let options = std::iter::once(placeholder)
                .chain(users.iter().map(|user| SelectOption {
                    value: user.id.to_string(),
                    label: user.display_name(),
                }))
                .collect();
            FieldInput::Select {
                selected: draft.owner_id.map(|id| id.to_string()).unwrap_or_default(),
                options,
            }
        }
        DraftField::Status => FieldInput::Select {
            selected: draft.status.code().to_string(),
            options: VehicleStatus::ALL
                .into_iter()
                .map(|status| SelectOption {
                    value: status.code().to_string(),
                    label: labels.status(status).to_string(),
                })
                .collect(),
        },
    }
}
