//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{HealthQuery, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{HealthService, UsersService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub health: Arc<dyn HealthQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        users: Arc<dyn UsersQuery>,
        users_command: Arc<dyn UsersCommand>,
        health: Arc<dyn HealthQuery>,
    ) -> Self {
        Self {
            users,
            users_command,
            health,
        }
    }

    /// Wire the domain services over a single repository.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use user_service::inbound::http::state::HttpState;
    /// use user_service::outbound::memory::InMemoryUserRepository;
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let repository = Arc::new(InMemoryUserRepository::new(clock.clone()));
    /// let _state = HttpState::from_repository(repository, clock);
    /// ```
    pub fn from_repository(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        let users = Arc::new(UsersService::new(Arc::clone(&repository)));
        let health = Arc::new(HealthService::new(repository, clock));
        Self::new(users.clone(), users, health)
    }
}
