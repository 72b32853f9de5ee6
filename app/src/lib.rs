pub mod accounts;
pub mod catalog;
pub mod config;
pub mod credentials;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod flights;
pub mod media;
pub mod orders;
pub mod pagination;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod validation;
