//! Repository trait definitions.

use async_trait::async_trait;
use docstore_core::{DocstoreResult, Interface, Page, PageRequest, User, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> DocstoreResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> DocstoreResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &str) -> DocstoreResult<Option<User>>;

    /// Finds users by a set of IDs.
    async fn find_by_ids(&self, ids: &[UserId]) -> DocstoreResult<Vec<User>>;

    /// Checks if an email exists.
    async fn exists_by_email(&self, email: &str) -> DocstoreResult<bool>;

    /// Finds all users with pagination.
    async fn find_all(&self, page: PageRequest) -> DocstoreResult<Page<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> DocstoreResult<User>;

    /// Saves a batch of new users.
    async fn save_all(&self, users: &[User]) -> DocstoreResult<u64>;

    /// Updates an existing user.
    async fn update(&self, user: &User) -> DocstoreResult<User>;

    /// Updates only a user's password.
    async fn update_password(&self, id: UserId, password: &str) -> DocstoreResult<()>;

    /// Deletes a user by ID.
    async fn delete(&self, id: UserId) -> DocstoreResult<bool>;

    /// Counts all users.
    async fn count(&self) -> DocstoreResult<u64>;
}
