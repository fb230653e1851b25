//! Error types for the vehicles panel.
//!
//! # Design
//! `ApiError` covers one round-trip: transport failure, non-2xx status, or a
//! body that does not parse. `PanelError` covers operations the panel refuses
//! before any request is built.

use thiserror::Error;

use crate::session::DraftField;
use crate::types::VehicleId;

/// Errors from executing or parsing a single API round-trip.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (unreachable host, DNS, reset).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Operations the panel rejects without touching the network.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("no form is open")]
    FormClosed,

    #[error("required field is empty: {0}")]
    MissingField(DraftField),

    #[error("no vehicle with id {0} in the current list")]
    UnknownVehicle(VehicleId),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Invalid or missing panel configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}
