use crate::handlers::{self, accounts, catalog, flights, orders, routes};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

fn airport_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/airports/",
            get(catalog::list_airports).post(catalog::create_airport),
        )
        .route(
            "/airplane_types/",
            get(catalog::list_airplane_types).post(catalog::create_airplane_type),
        )
        .route(
            "/airplanes/",
            get(catalog::list_airplanes).post(catalog::create_airplane),
        )
        .route(
            "/airplanes/{id}/upload-image/",
            post(catalog::upload_airplane_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/crew/", get(catalog::list_crew).post(catalog::create_crew))
        .route("/routes/", get(routes::list_routes).post(routes::create_route))
        .route("/routes/{id}/", get(routes::get_route))
        .route(
            "/flights/",
            get(flights::list_flights).post(flights::create_flight),
        )
        .route(
            "/flights/{id}/",
            get(flights::get_flight)
                .put(flights::replace_flight)
                .patch(flights::patch_flight)
                .delete(flights::delete_flight),
        )
        .route("/orders/", get(orders::list_orders).post(orders::create_order))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register/", post(accounts::register))
        .route("/token/", post(accounts::obtain_token))
        .route("/me/", get(accounts::me).patch(accounts::update_me))
}

pub fn build_router(state: AppState) -> Router {
    let media = ServeDir::new(state.media_root.as_path());

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/airport", airport_routes())
        .nest("/api/user", user_routes())
        .nest_service("/media", media)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
