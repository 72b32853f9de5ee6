pub use super::airplane_types::Entity as AirplaneTypes;
pub use super::airplanes::Entity as Airplanes;
pub use super::airports::Entity as Airports;
pub use super::auth_tokens::Entity as AuthTokens;
pub use super::crews::Entity as Crews;
pub use super::flight_crews::Entity as FlightCrews;
pub use super::flights::Entity as Flights;
pub use super::orders::Entity as Orders;
pub use super::routes::Entity as Routes;
pub use super::tickets::Entity as Tickets;
pub use super::users::Entity as Users;
