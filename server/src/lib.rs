//! Élevage la Providence backend: livestock classification, herd
//! management and farm bookkeeping over CSV storage, served as a JSON API.

pub mod backend;
pub mod config;

pub use backend::{build_state, create_router, initialize_backend, AppState};
pub use config::ServerConfig;
