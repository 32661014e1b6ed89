//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT
//!   Bearer token, rejecting the request when absent or invalid.
//! - [`auth::MaybeAuthUser`] -- Optional variant whose actor id falls back
//!   to the SYSTEM sentinel.

pub mod auth;
