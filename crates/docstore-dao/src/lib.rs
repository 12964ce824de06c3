//! # Docstore DAO
//!
//! Generic data access layer over MySQL:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>  (domain interface)
//! UserRepositoryImpl            (repository impl — coordinates DAOs)
//!   ↓  Arc<dyn UserDao>         (DAO interface)
//! MySqlUserDaoImpl              (DAO impl — built on GenericDao)
//!   ↓
//! GenericDao                    (CRUD, named queries, native SQL, batches)
//!   ↓
//! MySQL
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   pool.rs                      ← DatabasePool + interface
//!   query.rs                     ← Param, QueryCatalog, {in} expansion
//!   record.rs                    ← Record trait + SQL builders
//!   generic.rs                   ← GenericDao
//!   keygen.rs                    ← hi/lo unique-ID generator
//!   queries.rs                   ← built-in named queries
//!   traits.rs                    ← UserRepository trait
//!   impl/
//!     user_repository_impl.rs    ← UserRepositoryImpl
//!   dao/
//!     user_dao.rs                ← UserDao trait
//!     impl/
//!       mysql/
//!         user_dao_impl.rs       ← MySqlUserDaoImpl
//! ```

pub mod dao;
pub mod generic;
pub mod r#impl;
pub mod keygen;
pub mod pool;
pub mod queries;
pub mod query;
pub mod record;
pub mod traits;

pub use dao::{MySqlUserDaoImpl, UserDao};
pub use generic::{GenericDao, DEFAULT_BATCH_SIZE};
pub use keygen::{HiLoKeyGenerator, KeySeries, DEFAULT_MAX_LO};
pub use pool::*;
pub use queries::default_catalog;
pub use query::{Param, QueryCatalog, IN_PLACEHOLDER};
pub use r#impl::UserRepositoryImpl;
pub use record::Record;
pub use traits::UserRepository;
