//! Named queries shipped with the crate.

use crate::query::QueryCatalog;

/// Stable names for the built-in user queries.
pub mod names {
    pub const USER_FIND_ALL: &str = "User.findAll";
    pub const USER_FIND_BY_USERNAME: &str = "User.findByUsername";
    pub const USER_FIND_BY_EMAIL: &str = "User.findByEmail";
    pub const USER_FIND_BY_ID_IN: &str = "User.findByIdIn";
    pub const USER_COUNT_ALL: &str = "User.countAll";
    pub const USER_COUNT_BY_EMAIL: &str = "User.countByEmail";
    pub const USER_UPDATE_PASSWORD: &str = "User.updatePassword";
    pub const USER_DELETE_BY_ID: &str = "User.deleteById";
}

/// Catalog pre-loaded with the built-in user queries.
#[must_use]
pub fn default_catalog() -> QueryCatalog {
    let mut catalog = QueryCatalog::new();
    catalog
        .register(
            names::USER_FIND_ALL,
            "SELECT usr_id, usr_name, email, password, first_name, last_name \
             FROM t_usr ORDER BY usr_id",
        )
        .register(
            names::USER_FIND_BY_USERNAME,
            "SELECT usr_id, usr_name, email, password, first_name, last_name \
             FROM t_usr WHERE usr_name = ?",
        )
        .register(
            names::USER_FIND_BY_EMAIL,
            "SELECT usr_id, usr_name, email, password, first_name, last_name \
             FROM t_usr WHERE email = ?",
        )
        .register(
            names::USER_FIND_BY_ID_IN,
            "SELECT usr_id, usr_name, email, password, first_name, last_name \
             FROM t_usr WHERE usr_id IN ({in}) ORDER BY usr_id",
        )
        .register(names::USER_COUNT_ALL, "SELECT COUNT(*) FROM t_usr")
        .register(
            names::USER_COUNT_BY_EMAIL,
            "SELECT COUNT(*) FROM t_usr WHERE email = ?",
        )
        .register(
            names::USER_UPDATE_PASSWORD,
            "UPDATE t_usr SET password = ? WHERE usr_id = ?",
        )
        .register(
            names::USER_DELETE_BY_ID,
            "DELETE FROM t_usr WHERE usr_id = ?",
        );
    catalog
}
