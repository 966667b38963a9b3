//! Typed client for the mentorship API.
//!
//! Authenticated calls take an explicit [`Session`] returned by
//! [`ApiClient::login`]; the client keeps no ambient credentials.

pub mod client;
pub mod error;
pub mod onboarding;
pub mod session;

pub use client::ApiClient;
pub use error::ClientError;
pub use onboarding::{OnboardingWizard, Step, SubmitError};
pub use session::{Session, SessionUser};
