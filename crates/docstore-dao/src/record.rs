//! Row-mapping metadata for the generic DAO.

use crate::query::Param;
use sqlx::mysql::MySqlRow;
use sqlx::FromRow;

/// Minimal table mapping a row type must provide for generic CRUD.
///
/// The identifier column is assumed numeric and storage-assigned;
/// [`Record::id`] is `None` for rows that have not been stored yet.
/// [`Record::values`] must yield one [`Param`] per entry of
/// [`Record::DATA_COLUMNS`], in the same order.
pub trait Record: for<'r> FromRow<'r, MySqlRow> + Send + Sync + Unpin {
    /// Table name.
    const TABLE: &'static str;
    /// Primary-key column name.
    const ID_COLUMN: &'static str;
    /// Non-key column names, in binding order.
    const DATA_COLUMNS: &'static [&'static str];

    /// The row's identifier, if assigned.
    fn id(&self) -> Option<i64>;

    /// The row's non-key values, matching [`Record::DATA_COLUMNS`].
    fn values(&self) -> Vec<Param>;
}

/// Comma-separated select list: id column followed by data columns.
#[must_use]
pub fn select_columns<R: Record>() -> String {
    let mut columns = Vec::with_capacity(R::DATA_COLUMNS.len() + 1);
    columns.push(R::ID_COLUMN);
    columns.extend_from_slice(R::DATA_COLUMNS);
    columns.join(", ")
}

/// `INSERT` statement for a record's data columns.
#[must_use]
pub fn insert_sql<R: Record>() -> String {
    let placeholders = vec!["?"; R::DATA_COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::TABLE,
        R::DATA_COLUMNS.join(", "),
        placeholders
    )
}

/// `UPDATE` statement setting all data columns by primary key.
#[must_use]
pub fn update_sql<R: Record>() -> String {
    let assignments = R::DATA_COLUMNS
        .iter()
        .map(|c| format!("{} = ?", c))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {} = ?",
        R::TABLE,
        assignments,
        R::ID_COLUMN
    )
}

/// `DELETE` statement by primary key.
#[must_use]
pub fn delete_sql<R: Record>() -> String {
    format!("DELETE FROM {} WHERE {} = ?", R::TABLE, R::ID_COLUMN)
}

/// `SELECT` statement by primary key.
#[must_use]
pub fn select_by_id_sql<R: Record>() -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_columns::<R>(),
        R::TABLE,
        R::ID_COLUMN
    )
}

/// `SELECT` statement for all rows, ordered by primary key.
#[must_use]
pub fn select_all_sql<R: Record>() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_columns::<R>(),
        R::TABLE,
        R::ID_COLUMN
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[derive(Debug)]
    struct Widget {
        id: Option<i64>,
        name: String,
        weight: i64,
    }

    impl<'r> FromRow<'r, MySqlRow> for Widget {
        fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
            Ok(Self {
                id: row.try_get("widget_id")?,
                name: row.try_get("name")?,
                weight: row.try_get("weight")?,
            })
        }
    }

    impl Record for Widget {
        const TABLE: &'static str = "t_widget";
        const ID_COLUMN: &'static str = "widget_id";
        const DATA_COLUMNS: &'static [&'static str] = &["name", "weight"];

        fn id(&self) -> Option<i64> {
            self.id
        }

        fn values(&self) -> Vec<Param> {
            vec![self.name.as_str().into(), self.weight.into()]
        }
    }

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            insert_sql::<Widget>(),
            "INSERT INTO t_widget (name, weight) VALUES (?, ?)"
        );
    }

    #[test]
    fn test_update_sql() {
        assert_eq!(
            update_sql::<Widget>(),
            "UPDATE t_widget SET name = ?, weight = ? WHERE widget_id = ?"
        );
    }

    #[test]
    fn test_delete_sql() {
        assert_eq!(delete_sql::<Widget>(), "DELETE FROM t_widget WHERE widget_id = ?");
    }

    #[test]
    fn test_select_by_id_sql() {
        assert_eq!(
            select_by_id_sql::<Widget>(),
            "SELECT widget_id, name, weight FROM t_widget WHERE widget_id = ?"
        );
    }

    #[test]
    fn test_select_all_sql() {
        assert_eq!(
            select_all_sql::<Widget>(),
            "SELECT widget_id, name, weight FROM t_widget ORDER BY widget_id"
        );
    }

    #[test]
    fn test_values_match_data_columns() {
        let widget = Widget {
            id: None,
            name: "gear".to_string(),
            weight: 3,
        };
        assert_eq!(widget.values().len(), Widget::DATA_COLUMNS.len());
        assert_eq!(widget.id(), None);
    }
}
