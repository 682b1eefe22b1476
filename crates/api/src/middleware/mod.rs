//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the user behind a Bearer access token.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.

pub mod auth;
pub mod rbac;
