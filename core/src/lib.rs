//! Vehicle management panel core.
//!
//! # Overview
//! Keeps a list of vehicles and users in sync with the admin API and runs the
//! create/edit form workflow, without touching the network or a UI runtime
//! itself.
//!
//! # Design
//! - `VehiclesClient` is stateless and split into `build_*` / `parse_*`
//!   per API operation, so the I/O boundary is explicit.
//! - `VehiclesPanel` owns the remote mirror and the form session. Operations
//!   return `PendingRequest`s; the host executes them and feeds the outcome
//!   back through `complete`.
//! - Dialogs (confirmation, notifications) and transport are injected through
//!   the `host` traits. `UreqTransport` and `run_until_idle` cover the common
//!   blocking case.
//! - Rendering is pure: `view` turns state into view models.

pub mod client;
pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod labels;
pub mod panel;
pub mod session;
pub mod transport;
pub mod types;
pub mod view;

pub use client::VehiclesClient;
pub use config::PanelConfig;
pub use error::{ApiError, ConfigError, PanelError};
pub use host::{run_until_idle, Dialogs, Transport};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use labels::{Labels, Locale};
pub use panel::{Operation, PendingRequest, RemoteMirror, VehiclesPanel};
pub use session::{DraftField, FormSession};
pub use transport::UreqTransport;
pub use types::{User, UserId, Vehicle, VehicleDraft, VehicleId, VehicleStatus};
pub use view::{FieldInput, FieldView, FormView, ListView, RowView, SelectOption};
