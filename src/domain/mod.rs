//! Domain types for surge payouts: milestones, configurations, entities and
//! the records the engine produces.

pub mod config;
pub mod entity;
pub mod filter;
pub mod milestone;
pub mod payout;
pub mod recommendation;
