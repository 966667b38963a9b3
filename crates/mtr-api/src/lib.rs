pub mod auth;
pub mod config;
pub mod error;
pub mod mentee;
pub mod mentor;
pub mod metrics;
pub mod middleware;
pub mod program;
pub mod rewards;
pub mod router;
pub mod state;
pub mod tracing;
pub mod v1;
pub mod validation;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
