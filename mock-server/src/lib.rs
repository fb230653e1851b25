use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Available,
    Repair,
    Sold,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
}

/// A vehicle as listed, with the owner's display name joined in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub owner_id: Option<i64>,
    pub owner_name: Option<String>,
    pub status: Status,
}

/// Create/update payload. `year` and `owner_id` may be a number, numeric
/// text, `""` or `null`; `owner_name` and `id` are ignored if present.
#[derive(Debug, Deserialize)]
pub struct VehicleInput {
    pub brand: String,
    pub model: String,
    #[serde(default, deserialize_with = "blank_or_number")]
    pub year: Option<i64>,
    pub license_plate: String,
    #[serde(default, deserialize_with = "blank_or_number")]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Clone)]
struct StoredVehicle {
    brand: String,
    model: String,
    year: i32,
    license_plate: String,
    owner_id: Option<i64>,
    status: Status,
}

#[derive(Debug)]
pub struct Store {
    vehicles: BTreeMap<i64, StoredVehicle>,
    users: Vec<User>,
    next_id: i64,
}

impl Store {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            vehicles: BTreeMap::new(),
            users,
            next_id: 1,
        }
    }

    fn listed(&self, id: i64, stored: &StoredVehicle) -> Vehicle {
        let owner_name = stored.owner_id.and_then(|owner| {
            self.users
                .iter()
                .find(|user| user.id == owner)
                .map(|user| format!("{} {}", user.firstname, user.lastname))
        });
        Vehicle {
            id,
            brand: stored.brand.clone(),
            model: stored.model.clone(),
            year: stored.year,
            license_plate: stored.license_plate.clone(),
            owner_id: stored.owner_id,
            owner_name,
            status: stored.status,
        }
    }

    fn validate(&self, input: VehicleInput) -> Result<StoredVehicle, (StatusCode, String)> {
        let unprocessable = |msg: String| (StatusCode::UNPROCESSABLE_ENTITY, msg);
        for (field, value) in [
            ("brand", &input.brand),
            ("model", &input.model),
            ("license_plate", &input.license_plate),
        ] {
            if value.trim().is_empty() {
                return Err(unprocessable(format!("{field} is required")));
            }
        }
        let year = input
            .year
            .ok_or_else(|| unprocessable("year is required".to_string()))?;
        let year = i32::try_from(year).map_err(|_| unprocessable(format!("year out of range: {year}")))?;
        if let Some(owner) = input.owner_id {
            if !self.users.iter().any(|user| user.id == owner) {
                return Err(unprocessable(format!("unknown owner: {owner}")));
            }
        }
        Ok(StoredVehicle {
            brand: input.brand,
            model: input.model,
            year,
            license_plate: input.license_plate,
            owner_id: input.owner_id,
            status: input.status,
        })
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn seed_users() -> Vec<User> {
    [(1, "Jean", "Dupont"), (2, "Inès", "Roux"), (3, "Hugo", "Petit")]
        .into_iter()
        .map(|(id, firstname, lastname)| User {
            id,
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
        })
        .collect()
}

pub fn app() -> Router {
    app_with_users(seed_users())
}

pub fn app_with_users(users: Vec<User>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::new(users)));
    Router::new()
        .route("/api/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/api/vehicles/{id}", put(update_vehicle).delete(delete_vehicle))
        .route("/api/users", get(list_users))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_vehicles(State(db): State<Db>) -> Json<Vec<Vehicle>> {
    let store = db.read().await;
    Json(
        store
            .vehicles
            .iter()
            .map(|(id, stored)| store.listed(*id, stored))
            .collect(),
    )
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.read().await.users.clone())
}

async fn create_vehicle(
    State(db): State<Db>,
    Json(input): Json<VehicleInput>,
) -> Result<(StatusCode, Json<Vehicle>), (StatusCode, String)> {
    let mut store = db.write().await;
    let stored = store.validate(input)?;
    let id = store.next_id;
    store.next_id += 1;
    let vehicle = store.listed(id, &stored);
    store.vehicles.insert(id, stored);
    tracing::info!(id, "vehicle created");
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<Vehicle>, (StatusCode, String)> {
    let mut store = db.write().await;
    if !store.vehicles.contains_key(&id) {
        return Err((StatusCode::NOT_FOUND, format!("no vehicle {id}")));
    }
    let stored = store.validate(input)?;
    let vehicle = store.listed(id, &stored);
    store.vehicles.insert(id, stored);
    tracing::info!(id, "vehicle updated");
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.vehicles.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::info!(id, "vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn blank_or_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text.trim().parse().map(Some).map_err(D::Error::custom),
    }
}
