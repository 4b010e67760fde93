//! HTTP inbound adapter exposing REST endpoints.

pub mod dashboard;
pub mod error;
pub mod health;
pub mod profile;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod taxonomy;
#[cfg(test)]
pub mod test_utils;
pub mod tickets;
mod tickets_dto;
pub mod users;
pub mod validation;

pub use error::ApiResult;
