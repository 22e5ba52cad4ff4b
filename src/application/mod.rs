//! Application layer containing the payout computation.
//!
//! This module defines the `PayoutEngine`, the single entry point that turns
//! entity records and a confirmed milestone configuration into payout records.
//! It is synchronous and performs no I/O.

pub mod engine;
