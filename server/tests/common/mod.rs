#![allow(dead_code, clippy::unwrap_used)]

use airport_booking::accounts::{create_user, obtain_token_impl};
use airport_booking::db::connect_and_migrate;
use airport_booking::dto::CredentialsDto;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use server_lib::{router::build_router, state::AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const PASSWORD: &str = "testpass123";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub media_root: PathBuf,
    /// Scratch directory holding media and, for file-backed apps, the database.
    root: PathBuf,
}

/// Ids of a minimal schedule: two airports, one route, one 10x6 airplane,
/// one crew member and one flight.
pub struct Schedule {
    pub source: i32,
    pub destination: i32,
    pub route: i32,
    pub airplane: i32,
    pub crew: i32,
    pub flight: i32,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_page_size(10).await
    }

    pub async fn with_page_size(order_page_size: u64) -> Self {
        Self::with_root("sqlite::memory:", order_page_size, scratch_dir()).await
    }

    /// Backed by an SQLite file, so several connections contend for writes.
    pub async fn on_file() -> Self {
        let root = scratch_dir();
        std::fs::create_dir_all(&root).unwrap();
        let url = format!("sqlite://{}?mode=rwc", root.join("airport.db").display());
        Self::with_root(&url, 10, root).await
    }

    async fn with_root(database_url: &str, order_page_size: u64, root: PathBuf) -> Self {
        let db = connect_and_migrate(database_url).await.unwrap();
        let media_root = root.join("media");
        let state = AppState {
            db: db.clone(),
            media_root: Arc::new(media_root.clone()),
            order_page_size,
        };
        Self {
            router: build_router(state),
            db,
            media_root,
            root,
        }
    }

    /// Register a user directly and log in through the service layer.
    pub async fn token_for(&self, email: &str, is_staff: bool) -> String {
        create_user(
            &self.db,
            CredentialsDto {
                email: email.to_string(),
                password: PASSWORD.to_string(),
            },
            is_staff,
        )
        .await
        .unwrap();
        obtain_token_impl(
            &self.db,
            CredentialsDto {
                email: email.to_string(),
                password: PASSWORD.to_string(),
            },
        )
        .await
        .unwrap()
        .token
    }

    pub async fn admin_token(&self) -> String {
        self.token_for("admin@airport.test", true).await
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, bytes) = self.send_raw(request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    /// POST as admin and return the created id.
    pub async fn create(&self, uri: &str, admin: &str, body: Value) -> i32 {
        let (status, value) = self.post(uri, admin, body).await;
        assert_eq!(status, StatusCode::CREATED, "{uri}: {value}");
        i32::try_from(value["id"].as_i64().unwrap()).unwrap()
    }

    pub async fn create_flight(
        &self,
        admin: &str,
        route: i32,
        airplane: i32,
        departure: &str,
        arrival: &str,
    ) -> i32 {
        self.create(
            "/api/airport/flights/",
            admin,
            json!({
                "route": route,
                "airplane": airplane,
                "departure_time": departure,
                "arrival_time": arrival,
                "crew": [],
            }),
        )
        .await
    }

    pub async fn schedule(&self, admin: &str) -> Schedule {
        let source = self
            .create(
                "/api/airport/airports/",
                admin,
                json!({ "name": "Boryspil", "closest_big_city": "Kyiv" }),
            )
            .await;
        let destination = self
            .create(
                "/api/airport/airports/",
                admin,
                json!({ "name": "Chopin", "closest_big_city": "Warsaw" }),
            )
            .await;
        let route = self
            .create(
                "/api/airport/routes/",
                admin,
                json!({ "source": source, "destination": destination, "distance": 690 }),
            )
            .await;
        let airplane_type = self
            .create(
                "/api/airport/airplane_types/",
                admin,
                json!({ "name": "Narrow-body" }),
            )
            .await;
        let airplane = self
            .create(
                "/api/airport/airplanes/",
                admin,
                json!({
                    "name": "Boeing 737",
                    "rows": 10,
                    "seats_in_row": 6,
                    "airplane_type": airplane_type,
                }),
            )
            .await;
        let crew = self
            .create(
                "/api/airport/crew/",
                admin,
                json!({ "first_name": "Amelia", "last_name": "Earhart" }),
            )
            .await;
        let flight = self
            .create(
                "/api/airport/flights/",
                admin,
                json!({
                    "route": route,
                    "airplane": airplane,
                    "departure_time": "2024-01-04T10:00:00Z",
                    "arrival_time": "2024-01-04T12:00:00Z",
                    "crew": [crew],
                }),
            )
            .await;

        Schedule {
            source,
            destination,
            route,
            airplane,
            crew,
            flight,
        }
    }

    pub async fn order(&self, token: &str, tickets: Value) -> (StatusCode, Value) {
        self.post("/api/airport/orders/", token, json!({ "tickets": tickets }))
            .await
    }
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("airport-test-{}", Uuid::new_v4()))
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
