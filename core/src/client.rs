//! Stateless HTTP request builder and response parser for the vehicles API.
//!
//! # Design
//! `VehiclesClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. Any 2xx status counts as success.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{User, Vehicle, VehicleDraft, VehicleId};

const VEHICLES: &str = "api/vehicles";
const USERS: &str = "api/users";

#[derive(Debug, Clone)]
pub struct VehiclesClient {
    base_url: String,
}

impl VehiclesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_vehicles(&self) -> HttpRequest {
        self.request(HttpMethod::Get, VEHICLES.to_string(), None)
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.request(HttpMethod::Get, USERS.to_string(), None)
    }

    pub fn build_create_vehicle(&self, draft: &VehicleDraft) -> Result<HttpRequest, ApiError> {
        let body = encode(draft)?;
        Ok(self.request(HttpMethod::Post, VEHICLES.to_string(), Some(body)))
    }

    pub fn build_update_vehicle(
        &self,
        id: VehicleId,
        draft: &VehicleDraft,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode(draft)?;
        Ok(self.request(HttpMethod::Put, format!("{VEHICLES}/{id}"), Some(body)))
    }

    pub fn build_delete_vehicle(&self, id: VehicleId) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("{VEHICLES}/{id}"), None)
    }

    pub fn parse_list_vehicles(&self, response: HttpResponse) -> Result<Vec<Vehicle>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Create and update only need a success status; the body is ignored
    /// because the list is reloaded afterwards.
    pub fn parse_save_vehicle(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_vehicle(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    // Every call carries a JSON content type, with or without a body.
    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}/{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

fn encode(draft: &VehicleDraft) -> Result<String, ApiError> {
    serde_json::to_string(draft).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
