//! Domain logic for the stocktake asset-tracking platform.
//!
//! This crate is I/O-free: shared types, the domain error taxonomy, the
//! asset status engine, assignee name resolution, and CSV import parsing.
//! Persistence lives in `stocktake-db`, HTTP in `stocktake-api`.

pub mod error;
pub mod import;
pub mod naming;
pub mod status;
pub mod types;
