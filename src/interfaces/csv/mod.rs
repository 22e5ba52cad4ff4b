pub mod entity_reader;
pub mod payout_writer;
pub mod schema;
pub mod summary_reader;
