pub mod prelude;

pub mod airplane_types;
pub mod airplanes;
pub mod airports;
pub mod auth_tokens;
pub mod crews;
pub mod flight_crews;
pub mod flights;
pub mod orders;
pub mod routes;
pub mod tickets;
pub mod users;
