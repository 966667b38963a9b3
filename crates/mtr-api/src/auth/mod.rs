pub mod jwt;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

pub use middleware::AuthUser;
pub use routes::routes;
