//! Adapters between the payout engine and the outside world: CSV tables in
//! and out, and the JSON milestone configuration document.

pub mod config;
pub mod csv;
