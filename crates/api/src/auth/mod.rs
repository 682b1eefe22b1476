//! Credential and token handling for the `/auth` endpoints.

pub mod credentials;
pub mod tokens;
