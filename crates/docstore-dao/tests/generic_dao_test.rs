//! Integration tests for GenericDao and the hi/lo key generator.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use docstore_core::Window;
use docstore_dao::queries::names;
use docstore_dao::{
    default_catalog, DatabasePoolInterface, GenericDao, HiLoKeyGenerator, KeySeries, Param,
    QueryCatalog, Record,
};
use sqlx::FromRow;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, FromRow)]
struct TUsrRecord {
    usr_id: Option<i64>,
    usr_name: String,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl TUsrRecord {
    fn new(username: &str, email: &str) -> Self {
        Self {
            usr_id: None,
            usr_name: username.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        }
    }
}

impl Record for TUsrRecord {
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

fn create_dao(pool: Arc<dyn DatabasePoolInterface>) -> GenericDao {
    GenericDao::new(pool, Arc::new(default_catalog()))
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_store_and_get() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let id = dao
        .store(&TUsrRecord::new("alice", "alice@example.com"))
        .await
        .expect("Failed to store record");
    assert!(id > 0);

    let found: TUsrRecord = dao
        .get(id)
        .await
        .expect("Query failed")
        .expect("Record not found");
    assert_eq!(found.usr_id, Some(id));
    assert_eq!(found.usr_name, "alice");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_missing_row() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let found: Option<TUsrRecord> = dao.get(99999).await.expect("Query failed");
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_existing_row() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let mut record = TUsrRecord::new("bob", "bob@example.com");
    let id = dao.store(&record).await.expect("Failed to store record");
    record.usr_id = Some(id);
    record.first_name = "Robert".to_string();

    dao.update(&record).await.expect("Failed to update record");

    let found: TUsrRecord = dao.get(id).await.unwrap().unwrap();
    assert_eq!(found.first_name, "Robert");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_unstored_record_fails() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let err = dao
        .update(&TUsrRecord::new("ghost", "ghost@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_row_fails() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let mut record = TUsrRecord::new("ghost", "ghost@example.com");
    record.usr_id = Some(99999);

    let err = dao.update(&record).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_remove_by_id() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let id = dao
        .store(&TUsrRecord::new("carol", "carol@example.com"))
        .await
        .unwrap();

    assert!(dao.remove_by_id::<TUsrRecord>(id).await.unwrap());
    assert!(!dao.remove_by_id::<TUsrRecord>(id).await.unwrap());

    let found: Option<TUsrRecord> = dao.get(id).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_load_all_ordered_by_id() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    for i in 0..3 {
        dao.store(&TUsrRecord::new(
            &format!("user{}", i),
            &format!("user{}@example.com", i),
        ))
        .await
        .unwrap();
    }

    let rows: Vec<TUsrRecord> = dao.load_all().await.expect("Failed to load rows");
    assert_eq!(rows.len(), 3);
    let ids: Vec<i64> = rows.iter().filter_map(TUsrRecord::id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_store_batch_spans_chunks() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool()).with_batch_size(100);

    let records: Vec<TUsrRecord> = (0..250)
        .map(|i| TUsrRecord::new(&format!("batch{}", i), &format!("batch{}@example.com", i)))
        .collect();

    let inserted = dao.store_batch(&records).await.expect("Batch store failed");
    assert_eq!(inserted, 250);

    let total = dao.count_named(names::USER_COUNT_ALL, &[]).await.unwrap();
    assert_eq!(total, 250);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_store_batch_rejects_empty() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let err = dao.store_batch::<TUsrRecord>(&[]).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_batch() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool()).with_batch_size(2);

    let mut records = Vec::new();
    for i in 0..5 {
        let mut record =
            TUsrRecord::new(&format!("upd{}", i), &format!("upd{}@example.com", i));
        let id = dao.store(&record).await.unwrap();
        record.usr_id = Some(id);
        record.last_name = "Renamed".to_string();
        records.push(record);
    }

    let updated = dao.update_batch(&records).await.expect("Batch update failed");
    assert_eq!(updated, 5);

    let rows: Vec<TUsrRecord> = dao.load_all().await.unwrap();
    assert!(rows.iter().all(|r| r.last_name == "Renamed"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_named_with_window() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    for i in 0..5 {
        dao.store(&TUsrRecord::new(
            &format!("page{}", i),
            &format!("page{}@example.com", i),
        ))
        .await
        .unwrap();
    }

    let first_two: Vec<TUsrRecord> = dao
        .find_named(names::USER_FIND_ALL, &[], Window::new(0, 2))
        .await
        .unwrap();
    assert_eq!(first_two.len(), 2);
    assert_eq!(first_two[0].usr_name, "page0");

    let next_two: Vec<TUsrRecord> = dao
        .find_named(names::USER_FIND_ALL, &[], Window::new(2, 2))
        .await
        .unwrap();
    assert_eq!(next_two.len(), 2);
    assert_eq!(next_two[0].usr_name, "page2");

    let all: Vec<TUsrRecord> = dao
        .find_named(names::USER_FIND_ALL, &[], Window::all())
        .await
        .unwrap();
    assert_eq!(all.len(), 5);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_named_with_params() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    dao.store(&TUsrRecord::new("dave", "dave@example.com"))
        .await
        .unwrap();

    let rows: Vec<TUsrRecord> = dao
        .find_named(
            names::USER_FIND_BY_EMAIL,
            &["dave@example.com".into()],
            Window::all(),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].usr_name, "dave");

    let missing: Vec<TUsrRecord> = dao
        .find_named(
            names::USER_FIND_BY_EMAIL,
            &["nobody@example.com".into()],
            Window::all(),
        )
        .await
        .unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_named_in_expands_id_list() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let mut ids = Vec::new();
    for i in 0..4 {
        let id = dao
            .store(&TUsrRecord::new(
                &format!("in{}", i),
                &format!("in{}@example.com", i),
            ))
            .await
            .unwrap();
        ids.push(id);
    }

    let params: Vec<Param> = vec![ids[0].into(), ids[2].into()];
    let rows: Vec<TUsrRecord> = dao
        .find_named_in(names::USER_FIND_BY_ID_IN, &params, Window::all())
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].usr_id, Some(ids[0]));
    assert_eq!(rows[1].usr_id, Some(ids[2]));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_execute_named() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let id = dao
        .store(&TUsrRecord::new("eve", "eve@example.com"))
        .await
        .unwrap();

    let affected = dao
        .execute_named(names::USER_UPDATE_PASSWORD, &["changed".into(), id.into()])
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let found: TUsrRecord = dao.get(id).await.unwrap().unwrap();
    assert_eq!(found.password, "changed");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_execute_named_batch() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool()).with_batch_size(2);

    let mut param_sets = Vec::new();
    for i in 0..5 {
        let id = dao
            .store(&TUsrRecord::new(
                &format!("pw{}", i),
                &format!("pw{}@example.com", i),
            ))
            .await
            .unwrap();
        param_sets.push(vec![Param::from("rotated"), Param::from(id)]);
    }

    let affected = dao
        .execute_named_batch(names::USER_UPDATE_PASSWORD, &param_sets)
        .await
        .unwrap();
    assert_eq!(affected, 5);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unknown_named_query() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    let err = dao
        .find_named::<TUsrRecord>("User.noSuchQuery", &[], Window::all())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_QUERY");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_native_sql_round_trip() {
    let db = TestDatabase::new().await;
    let dao = create_dao(db.pool());

    dao.execute_sql(
        "INSERT INTO t_usr (usr_name, email, password, first_name, last_name) \
         VALUES (?, ?, ?, ?, ?)",
        &[
            "frank".into(),
            "frank@example.com".into(),
            "secret".into(),
            "Frank".into(),
            "Stone".into(),
        ],
    )
    .await
    .expect("Native insert failed");

    let count = dao
        .count_sql("SELECT COUNT(*) FROM t_usr WHERE usr_name = ?", &["frank".into()])
        .await
        .unwrap();
    assert_eq!(count, 1);

    let rows: Vec<TUsrRecord> = dao
        .find_sql(
            "SELECT usr_id, usr_name, email, password, first_name, last_name \
             FROM t_usr WHERE first_name = ? ORDER BY usr_id",
            &["Frank".into()],
            Window::first(10),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].last_name, "Stone");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_custom_catalog() {
    let db = TestDatabase::new().await;

    let mut catalog = QueryCatalog::new();
    catalog.register("Usr.names", "SELECT usr_name FROM t_usr ORDER BY usr_id");
    let dao = GenericDao::new(db.pool(), Arc::new(catalog));

    dao.execute_sql(
        "INSERT INTO t_usr (usr_name, email, password, first_name, last_name) \
         VALUES ('grace', 'grace@example.com', 'secret', 'Grace', 'Hill')",
        &[],
    )
    .await
    .unwrap();

    let count = dao.count_sql("SELECT COUNT(*) FROM t_usr", &[]).await.unwrap();
    assert_eq!(count, 1);
}

// =============================================================================
// Hi/lo key generator
// =============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_keygen_ids_start_at_one_and_stay_unique() {
    let db = TestDatabase::new().await;
    let generator = HiLoKeyGenerator::new(db.pool());
    let series = KeySeries::new("t_usr").with_max_lo(3);

    let mut seen = HashSet::new();
    let first = generator.next_id(&series).await.unwrap();
    assert_eq!(first, 1);
    seen.insert(first);

    // Spans several counter windows.
    for _ in 0..20 {
        let id = generator.next_id(&series).await.unwrap();
        assert!(id > 0);
        assert!(seen.insert(id), "duplicate id {}", id);
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_keygen_series_are_independent() {
    let db = TestDatabase::new().await;
    let generator = HiLoKeyGenerator::new(db.pool());
    let users = KeySeries::new("t_usr").with_max_lo(2);
    let docs = KeySeries::new("t_doc").with_max_lo(2);

    assert_eq!(generator.next_id(&users).await.unwrap(), 1);
    assert_eq!(generator.next_id(&docs).await.unwrap(), 1);
    assert_eq!(generator.next_id(&users).await.unwrap(), 2);
    assert_eq!(generator.next_id(&docs).await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_keygen_degenerate_window() {
    let db = TestDatabase::new().await;
    let generator = HiLoKeyGenerator::new(db.pool());
    // max_lo below one: every call is a counter round-trip, and the
    // sequence still starts at 1 like the windowed path.
    let series = KeySeries::new("t_usr").with_max_lo(0);

    assert_eq!(generator.next_id(&series).await.unwrap(), 1);
    assert_eq!(generator.next_id(&series).await.unwrap(), 2);
    assert_eq!(generator.next_id(&series).await.unwrap(), 3);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_keygen_concurrent_series_allocation() {
    let db = TestDatabase::new().await;
    let generator = Arc::new(HiLoKeyGenerator::new(db.pool()));
    let users = KeySeries::new("t_usr").with_max_lo(2);
    let docs = KeySeries::new("t_doc").with_max_lo(2);

    let mut handles = Vec::new();
    for _ in 0..4 {
        for series in [users.clone(), docs.clone()] {
            let generator = Arc::clone(&generator);
            handles.push(tokio::spawn(async move {
                let mut ids = Vec::new();
                for _ in 0..5 {
                    ids.push((series.group.clone(), generator.next_id(&series).await.unwrap()));
                }
                ids
            }));
        }
    }

    let mut seen: HashMap<String, HashSet<i64>> = HashMap::new();
    for handle in handles {
        for (group, id) in handle.await.unwrap() {
            assert!(id >= 1);
            assert!(
                seen.entry(group).or_default().insert(id),
                "duplicate id {}",
                id
            );
        }
    }
    assert_eq!(seen["t_usr"].len(), 20);
    assert_eq!(seen["t_doc"].len(), 20);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_keygen_counter_survives_generator_restart() {
    let db = TestDatabase::new().await;
    let series = KeySeries::new("t_usr").with_max_lo(2);

    let first_batch: Vec<i64> = {
        let generator = HiLoKeyGenerator::new(db.pool());
        let mut ids = Vec::new();
        for _ in 0..4 {
            ids.push(generator.next_id(&series).await.unwrap());
        }
        ids
    };

    // A fresh generator must not reissue any previously allocated id.
    let generator = HiLoKeyGenerator::new(db.pool());
    let next = generator.next_id(&series).await.unwrap();
    assert!(!first_batch.contains(&next));
    assert!(next > *first_batch.iter().max().unwrap_or(&0));
}
