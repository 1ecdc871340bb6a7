pub mod api;
pub mod config;
pub mod models;
pub mod service;
pub mod static_files;
pub mod telemetry;
pub mod views;

pub use config::{LogFormat, PortalConfig};
pub use service::{AppState, build_router, create_app, load_dataset, spawn_session_sweeper};
