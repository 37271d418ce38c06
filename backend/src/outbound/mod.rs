//! Outbound adapters implementing the user repository port.
//!
//! - **persistence**: PostgreSQL via Diesel, with a lazily connected wrapper
//! - **memory**: ordered in-process collection
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
