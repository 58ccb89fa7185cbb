//! iolens-core
//!
//! Pure domain types and errors for the toric IOL decision engine — the
//! shared vocabulary between the engine and the API/presentation layer.
//! No algorithm code and no I/O live here.

pub mod error;
pub mod models;
