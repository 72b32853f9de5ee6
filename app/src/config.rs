use crate::error::{BookingError, Result};
use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub media_root: PathBuf,
    pub order_page_size: u64,
    pub seed_admin: Option<AdminSeed>,
}

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = dotenvy::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data/airport.db?mode=rwc".to_string());

        let bind_addr = dotenvy::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|_| BookingError::Config("Invalid BIND_ADDR".to_string()))?;

        let media_root = PathBuf::from(
            dotenvy::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string()),
        );

        let order_page_size = dotenvy::var("ORDER_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse::<u64>()
            .map_err(|_| BookingError::Config("Invalid ORDER_PAGE_SIZE".to_string()))?
            .clamp(1, MAX_PAGE_SIZE);

        let seed_email = dotenvy::var("SEED_ADMIN_EMAIL")
            .ok()
            .filter(|s| !s.is_empty());
        let seed_password = dotenvy::var("SEED_ADMIN_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty());

        let seed_admin = match (seed_email, seed_password) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            (None, None) => None,
            _ => {
                return Err(BookingError::Config(
                    "SEED_ADMIN_EMAIL and SEED_ADMIN_PASSWORD must be set together".to_string(),
                ));
            }
        };

        Ok(Config {
            database_url,
            bind_addr,
            media_root,
            order_page_size,
            seed_admin,
        })
    }
}
