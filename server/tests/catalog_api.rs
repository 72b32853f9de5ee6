//! Airports, airplane types, airplanes (with image upload) and crew.
#![allow(clippy::unwrap_used)]

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use common::TestApp;
use serde_json::{Value, json};

const BOUNDARY: &str = "----airport-test-boundary";

fn multipart_request(uri: &str, token: &str, field: &str, file_name: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_airport_create_and_list() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    app.create(
        "/api/airport/airports/",
        &admin,
        json!({ "name": "Boryspil", "closest_big_city": "Kyiv" }),
    )
    .await;

    let (status, airports) = app.get("/api/airport/airports/", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        airports[0],
        json!({ "id": 1, "name": "Boryspil", "closest_big_city": "Kyiv" })
    );

    // Names are unique.
    let (status, _) = app
        .post(
            "/api/airport/airports/",
            &admin,
            json!({ "name": "Boryspil", "closest_big_city": "Kyiv" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, errors) = app
        .post(
            "/api/airport/airports/",
            &admin,
            json!({ "name": "", "closest_big_city": "Kyiv" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errors["name"][0], "This field may not be blank.");
}

#[tokio::test]
async fn test_airplane_shapes() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let airplane_type = app
        .create(
            "/api/airport/airplane_types/",
            &admin,
            json!({ "name": "Regional" }),
        )
        .await;

    let (status, created) = app
        .post(
            "/api/airport/airplanes/",
            &admin,
            json!({ "name": "Embraer", "rows": 20, "seats_in_row": 4, "airplane_type": airplane_type }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["airplane_type"], airplane_type);

    let (_, list) = app.get("/api/airport/airplanes/", &admin).await;
    assert_eq!(list[0]["capacity"], 80);
    assert_eq!(list[0]["airplane_type"], "Regional");
    assert_eq!(list[0]["image"], Value::Null);
}

#[tokio::test]
async fn test_airplane_validation() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, errors) = app
        .post(
            "/api/airport/airplanes/",
            &admin,
            json!({ "name": "Ghost", "rows": 0, "seats_in_row": 4, "airplane_type": 99 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(errors["rows"].is_array());
    assert_eq!(
        errors["airplane_type"][0],
        "Invalid pk \"99\" - object does not exist."
    );
}

#[tokio::test]
async fn test_crew_create_and_list() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.create(
        "/api/airport/crew/",
        &admin,
        json!({ "first_name": "Amelia", "last_name": "Earhart" }),
    )
    .await;

    let user = app.token_for("user@example.com", false).await;
    let (status, crew) = app.get("/api/airport/crew/", &user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(crew.as_array().unwrap().len(), 1);
    assert_eq!(crew[0]["last_name"], "Earhart");
}

#[tokio::test]
async fn test_image_upload_stores_file_and_path() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let schedule = app.schedule(&admin).await;
    let uri = format!("/api/airport/airplanes/{}/upload-image/", schedule.airplane);

    let (status, bytes) = app
        .send_raw(multipart_request(&uri, &admin, "image", "plane.png", b"fake-png"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let url = body["image"].as_str().unwrap().to_string();
    assert!(url.starts_with("/media/uploads/airplanes/boeing-737-"));
    assert!(url.ends_with(".png"));

    let relative = url.trim_start_matches("/media/");
    let stored = std::fs::read(app.media_root.join(relative)).unwrap();
    assert_eq!(stored, b"fake-png");

    let (_, list) = app.get("/api/airport/airplanes/", &admin).await;
    assert_eq!(list[0]["image"], url.as_str());

    let (status, served) = app
        .send_raw(Request::builder().uri(&url).body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, b"fake-png");
}

#[tokio::test]
async fn test_image_upload_errors() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let user = app.token_for("user@example.com", false).await;
    let schedule = app.schedule(&admin).await;
    let uri = format!("/api/airport/airplanes/{}/upload-image/", schedule.airplane);

    let (status, bytes) = app
        .send_raw(multipart_request(&uri, &admin, "photo", "plane.png", b"x"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["image"].is_array());

    let (status, _) = app
        .send_raw(multipart_request(&uri, &user, "image", "plane.png", b"x"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send_raw(multipart_request(
            "/api/airport/airplanes/999/upload-image/",
            &admin,
            "image",
            "plane.png",
            b"x",
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_upload_requires_multipart_body() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let schedule = app.schedule(&admin).await;
    let uri = format!("/api/airport/airplanes/{}/upload-image/", schedule.airplane);

    let (status, body) = app
        .post(&uri, &admin, json!({ "image": "plane.png" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["image"].is_array());
}
