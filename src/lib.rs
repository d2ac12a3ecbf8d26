pub mod catalog;
pub mod config;
pub mod definition;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod model;
pub mod service;
pub mod telemetry;

pub use error::{PersistenceError, Result, StoreApiError};
pub use service::StoreApiService;
