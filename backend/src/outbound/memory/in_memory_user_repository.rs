//! `UserRepository` over an ordered in-process collection.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DatabaseStatus, User, UserDraft, UserId};

struct Collection {
    users: Vec<User>,
    next_id: i64,
}

/// In-memory user store.
///
/// ## Invariants
/// - `users` is ordered by ascending identifier.
/// - `next_id` is greater than every identifier ever issued.
///
/// Email uniqueness is not enforced.
pub struct InMemoryUserRepository {
    collection: Mutex<Collection>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    /// Create an empty store. The first insert receives id 1.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            collection: Mutex::new(Collection {
                users: Vec::new(),
                next_id: 1,
            }),
            clock,
        }
    }

    /// Create a store pre-populated with `drafts`, numbered from 1.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use mockable::DefaultClock;
    /// use user_service::domain::sample_user_drafts;
    /// use user_service::outbound::memory::InMemoryUserRepository;
    ///
    /// let store = InMemoryUserRepository::seeded(Arc::new(DefaultClock), sample_user_drafts());
    /// assert_eq!(store.len(), 3);
    /// ```
    pub fn seeded(clock: Arc<dyn Clock>, drafts: Vec<UserDraft>) -> Self {
        let now = clock.utc();
        let users: Vec<User> = drafts
            .into_iter()
            .zip(1_i64..)
            .map(|(draft, id)| User::new(UserId::new(id), draft, now))
            .collect();
        let next_id = users.last().map_or(1, |user| user.id().get() + 1);
        Self {
            collection: Mutex::new(Collection { users, next_id }),
            clock,
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |collection| collection.users.len())
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collection>, UserPersistenceError> {
        self.collection
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store lock poisoned"))
    }
}

impl Collection {
    fn position(&self, id: UserId) -> Option<usize> {
        self.users.binary_search_by_key(&id, User::id).ok()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.users.clone())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let collection = self.lock()?;
        Ok(collection
            .position(id)
            .and_then(|index| collection.users.get(index).cloned()))
    }

    async fn insert(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let created = self.clock.utc();
        let mut collection = self.lock()?;
        let id = UserId::new(collection.next_id);
        collection.next_id += 1;
        let user = User::new(id, draft.clone(), created);
        collection.users.push(user.clone());
        debug!(%id, "stored user in memory");
        Ok(user)
    }

    async fn update(
        &self,
        id: UserId,
        draft: &UserDraft,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut collection = self.lock()?;
        let Some(slot) = collection
            .position(id)
            .and_then(|index| collection.users.get_mut(index))
        else {
            return Ok(None);
        };
        let updated = slot.clone().with_details(draft.clone());
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut collection = self.lock()?;
        match collection.position(id) {
            Some(index) => {
                collection.users.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn probe(&self) -> Option<DatabaseStatus> {
        None
    }
}
