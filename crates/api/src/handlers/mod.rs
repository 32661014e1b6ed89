//! HTTP request handlers, one module per resource.

pub mod assets;
pub mod assignees;
pub mod audit;
pub mod auth;
pub mod discrepancy;
pub mod imports;
pub mod locations;
pub mod scans;
pub mod users;
