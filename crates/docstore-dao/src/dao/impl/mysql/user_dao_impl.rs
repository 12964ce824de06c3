//! MySQL user DAO implementation.

use crate::dao::UserDao;
use crate::generic::GenericDao;
use crate::queries::{default_catalog, names};
use crate::query::{Param, QueryCatalog};
use crate::record::Record;
use crate::DatabasePoolInterface;
use async_trait::async_trait;
use docstore_core::{
    DocstoreError, DocstoreResult, Page, PageRequest, User, UserId, ValidateExt, Window,
};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL user DAO backed by the generic query-dispatch surface.
#[derive(Component)]
#[shaku(interface = UserDao)]
pub struct MySqlUserDaoImpl {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
    #[shaku(default = Arc::new(default_catalog()))]
    catalog: Arc<QueryCatalog>,
}

impl MySqlUserDaoImpl {
    /// Creates a new MySQL user DAO with the built-in query catalog.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            pool,
            catalog: Arc::new(default_catalog()),
        }
    }

    /// Creates a DAO with a custom query catalog.
    #[must_use]
    pub fn with_catalog(pool: Arc<dyn DatabasePoolInterface>, catalog: Arc<QueryCatalog>) -> Self {
        Self { pool, catalog }
    }

    fn generic(&self) -> GenericDao {
        GenericDao::new(self.pool.clone(), self.catalog.clone())
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    usr_id: Option<i64>,
    usr_name: String,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl Record for UserRow {
    const TABLE: &'static str = "t_usr";
    const ID_COLUMN: &'static str = "usr_id";
    const DATA_COLUMNS: &'static [&'static str] =
        &["usr_name", "email", "password", "first_name", "last_name"];

    fn id(&self) -> Option<i64> {
        self.usr_id
    }

    fn values(&self) -> Vec<Param> {
        vec![
            self.usr_name.as_str().into(),
            self.email.as_str().into(),
            self.password.as_str().into(),
            self.first_name.as_str().into(),
            self.last_name.as_str().into(),
        ]
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            usr_id: user.id.map(UserId::into_inner),
            usr_name: user.username.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.usr_id.map(UserId::new),
            username: row.usr_name,
            email: row.email,
            password: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

#[async_trait]
impl UserDao for MySqlUserDaoImpl {
    async fn find_by_id(&self, id: UserId) -> DocstoreResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = self.generic().get::<UserRow>(id.into_inner()).await?;
        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> DocstoreResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let rows = self
            .generic()
            .find_named::<UserRow>(
                names::USER_FIND_BY_USERNAME,
                &[username.into()],
                Window::first(1),
            )
            .await?;
        Ok(rows.into_iter().next().map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> DocstoreResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let rows = self
            .generic()
            .find_named::<UserRow>(names::USER_FIND_BY_EMAIL, &[email.into()], Window::first(1))
            .await?;
        Ok(rows.into_iter().next().map(User::from))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> DocstoreResult<Vec<User>> {
        debug!("Finding users by {} ids", ids.len());

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params: Vec<Param> = ids.iter().copied().map(Param::from).collect();
        let rows = self
            .generic()
            .find_named_in::<UserRow>(names::USER_FIND_BY_ID_IN, &params, Window::all())
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn exists_by_email(&self, email: &str) -> DocstoreResult<bool> {
        let count = self
            .generic()
            .count_named(names::USER_COUNT_BY_EMAIL, &[email.into()])
            .await?;
        Ok(count > 0)
    }

    async fn find_all(&self, page: PageRequest) -> DocstoreResult<Page<User>> {
        debug!("Finding all users, page: {}, size: {}", page.page, page.size);

        let generic = self.generic();
        let total = generic.count_named(names::USER_COUNT_ALL, &[]).await?;
        let rows = generic
            .find_named::<UserRow>(names::USER_FIND_ALL, &[], page.into())
            .await?;

        let users: Vec<User> = rows.into_iter().map(User::from).collect();
        Ok(Page::new(users, page.page, page.size, total as u64))
    }

    async fn save(&self, user: &User) -> DocstoreResult<User> {
        debug!("Saving new user: {}", user.username);

        user.validate_entity()?;
        let id = self.generic().store(&UserRow::from(user)).await?;
        Ok(user.clone().with_id(UserId::new(id)))
    }

    async fn save_all(&self, users: &[User]) -> DocstoreResult<u64> {
        debug!("Saving {} new users", users.len());

        for user in users {
            user.validate_entity()?;
        }
        let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
        self.generic().store_batch(&rows).await
    }

    async fn update(&self, user: &User) -> DocstoreResult<User> {
        debug!("Updating user: {:?}", user.id);

        user.validate_entity()?;
        self.generic().update(&UserRow::from(user)).await?;
        Ok(user.clone())
    }

    async fn update_password(&self, id: UserId, password: &str) -> DocstoreResult<()> {
        debug!("Updating password for user: {}", id);

        let affected = self
            .generic()
            .execute_named(names::USER_UPDATE_PASSWORD, &[password.into(), id.into()])
            .await?;
        if affected == 0 {
            return Err(DocstoreError::not_found("t_usr", id.into_inner()));
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> DocstoreResult<bool> {
        debug!("Deleting user: {}", id);

        let affected = self
            .generic()
            .execute_named(names::USER_DELETE_BY_ID, &[id.into()])
            .await?;
        Ok(affected > 0)
    }

    async fn count(&self) -> DocstoreResult<u64> {
        let count = self.generic().count_named(names::USER_COUNT_ALL, &[]).await?;
        Ok(count as u64)
    }
}

impl std::fmt::Debug for MySqlUserDaoImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserDaoImpl").finish_non_exhaustive()
    }
}
