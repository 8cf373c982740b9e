//! Data model shared by the engine and its hosts

pub mod filter;
pub mod snapshot;
pub mod table;
