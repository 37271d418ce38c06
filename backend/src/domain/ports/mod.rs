//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod health_query;
mod user_repository;
mod users_command;
mod users_query;

pub use health_query::HealthQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
