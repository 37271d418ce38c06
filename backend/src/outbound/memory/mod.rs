//! Process-local user storage.
//!
//! Used when the service runs without PostgreSQL. Data is lost on restart.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
