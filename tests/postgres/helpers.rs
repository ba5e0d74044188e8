//! Shared test helpers for `PostgreSQL` intern repository tests.
//!
//! Uses `pg-embed-setup-unpriv` for embedded `PostgreSQL` lifecycle
//! management. Each test works in its own database cloned from a migrated
//! template.

use chrono::{DateTime, TimeDelta, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use internhub::intern::{
    adapters::{memory::InMemoryInternRepository, postgres::PostgresInternRepository},
    domain::{InternFields, InternId, InternRecord, StorageValue},
    ports::InternRepository,
};
use pg_embedded_setup_unpriv::TestCluster;
use serde_json::json;
use tokio::runtime::Runtime;

/// Error type returned by setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating the `interns` table.
pub const CREATE_INTERNS_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_interns/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "internhub_test_template";

/// Creates a tokio runtime for driving async repository calls.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_INTERNS_SQL)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(())
}

/// Creates a database from the template and returns a repository over it.
///
/// # Errors
///
/// Returns an error if database creation or pool construction fails.
pub fn setup_repository(
    cluster: &TestCluster,
    db_name: &str,
) -> Result<PostgresInternRepository, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|err| Box::new(err) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(PostgresInternRepository::new(pool))
}

/// Drops the per-test database when the test finishes, even on panic.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    /// Guards `db_name` on `cluster`.
    #[must_use]
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    #[expect(
        clippy::print_stderr,
        reason = "Test cleanup warnings are informational"
    )]
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {err}", self.db_name);
        }
    }
}

/// Repository, runtime and cleanup guard for one test database.
pub struct PreparedRepo {
    /// Repository over the test database.
    pub repo: PostgresInternRepository,
    /// Runtime driving repository calls.
    pub rt: Runtime,
    _guard: CleanupGuard<'static>,
}

/// Prepares an empty, migrated database named after `prefix`.
///
/// # Errors
///
/// Returns an error if template setup, database creation or runtime
/// construction fails.
pub fn prepare(cluster: &'static TestCluster, prefix: &str) -> Result<PreparedRepo, BoxError> {
    ensure_template(cluster)?;
    let db_name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
    let guard = CleanupGuard::new(cluster, db_name.clone());
    let repo = setup_repository(cluster, &db_name)?;
    Ok(PreparedRepo {
        repo,
        rt: test_runtime()?,
        _guard: guard,
    })
}

/// Stores `records` in order.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn seed(prepared: &PreparedRepo, records: &[InternRecord]) -> Result<(), BoxError> {
    for record in records {
        prepared
            .rt
            .block_on(prepared.repo.create(record))
            .map_err(|err| Box::new(err) as BoxError)?;
    }
    Ok(())
}

/// In-memory repository holding the same records, for contract checks.
#[must_use]
pub fn in_memory_twin(records: &[InternRecord]) -> InMemoryInternRepository {
    InMemoryInternRepository::with_records(records.iter().cloned())
}

/// 2025-06-01T09:00:00Z shifted by `hours`.
fn at(hours: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_240) + TimeDelta::hours(9 + hours)
}

fn record(
    id: &str,
    name: &str,
    batch: &str,
    tasks: StorageValue,
    hours: (i64, i64),
) -> InternRecord {
    let (created, updated) = hours;
    let fields = InternFields::new(name, batch)
        .with_roles(vec!["Developer".to_owned()])
        .with_tasks_assigned(tasks);
    let mut stored = InternRecord::new(InternId::new(id), fields, at(created));
    stored.updated_at = at(updated);
    stored
}

/// Six interns in creation order, one per task-list encoding and with
/// update times running opposite to creation times.
#[must_use]
pub fn seed_records() -> Vec<InternRecord> {
    vec![
        record(
            "intern-01",
            "Grace Hopper",
            "2025-Fall",
            StorageValue::ListOfMixed(vec![
                json!({"id": "t1", "title": "Parser", "status": "working"}),
                json!({"id": "t2", "title": "Linker", "status": "todo", "priority": 2}),
            ]),
            (0, 50),
        ),
        record(
            "intern-02",
            "Alan Turing",
            "2025-Summer",
            StorageValue::LegacyJsonString(
                r#"[{"id":"t3","title":"Bombe","status":"completed"}]"#.to_owned(),
            ),
            (1, 40),
        ),
        record(
            "intern-03",
            "Katherine Johnson",
            "2025-Fall",
            StorageValue::ListOfMixed(vec![
                json!(r#"{"id":"t4","title":"Orbits","status":"open"}"#),
                json!("not a task"),
            ]),
            (2, 30),
        ),
        record(
            "intern-04",
            "Barbara Liskov",
            "2025-Spring",
            StorageValue::Empty,
            (3, 20),
        ),
        record(
            "intern-05",
            "Edsger Dijkstra",
            "2025-Summer",
            StorageValue::Empty,
            (4, 10),
        ),
        record(
            "intern-06",
            "Frances Allen (100%)",
            "2025-Fall",
            StorageValue::ListOfMixed(Vec::new()),
            (5, 5),
        ),
    ]
}
