//! UserDao trait — low-level user data access abstraction.
//!
//! This is the DAO (Data Access Object) interface for user data.
//! Implementations connect directly to a single data source.
//!
//! [`UserRepository`] uses one or more `UserDao` instances to
//! fulfil domain-level operations.
//!
//! [`UserRepository`]: crate::traits::UserRepository

use async_trait::async_trait;
use docstore_core::{DocstoreResult, Interface, Page, PageRequest, User, UserId};

/// Low-level user data access object.
///
/// Each implementation targets a single data source.
/// Use [`crate::UserRepositoryImpl`] to coordinate multiple DAOs.
#[async_trait]
pub trait UserDao: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> DocstoreResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> DocstoreResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> DocstoreResult<Option<User>>;

    /// Finds users by a set of IDs, ordered by ID.
    async fn find_by_ids(&self, ids: &[UserId]) -> DocstoreResult<Vec<User>>;

    /// Checks if an email already exists.
    async fn exists_by_email(&self, email: &str) -> DocstoreResult<bool>;

    /// Finds all users with pagination.
    async fn find_all(&self, page: PageRequest) -> DocstoreResult<Page<User>>;

    /// Persists a new user and returns it with its assigned ID.
    async fn save(&self, user: &User) -> DocstoreResult<User>;

    /// Persists a batch of new users. Returns the number of rows stored.
    async fn save_all(&self, users: &[User]) -> DocstoreResult<u64>;

    /// Updates an existing user.
    async fn update(&self, user: &User) -> DocstoreResult<User>;

    /// Updates only a user's password.
    async fn update_password(&self, id: UserId, password: &str) -> DocstoreResult<()>;

    /// Deletes a user by ID. Returns `true` if deleted.
    async fn delete(&self, id: UserId) -> DocstoreResult<bool>;

    /// Counts all users.
    async fn count(&self) -> DocstoreResult<u64>;
}
