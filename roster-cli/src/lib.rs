//! Roster CLI - personnel dashboard views over the directory and capture cores
//!
//! Session handling, route guarding, configuration and plain-text rendering
//! live here; the `roster` binary wires them to a command line.

pub mod auth;
pub mod config;
pub mod routes;
pub mod source;
pub mod verify;
pub mod views;

pub use auth::{AuthError, Authenticator, Credentials, SessionContext, StaticCredentials};
pub use config::{AuthConfig, CameraConfig, ConfigError, RosterConfig};
pub use routes::{guard, Route};
pub use source::select_source;
pub use verify::{verify_employee, VerifyError};
