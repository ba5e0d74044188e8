//! `PostgreSQL` repository implementation for intern records.
//!
//! Task lists are stored in a JSONB column exactly as written, so records
//! persisted with older encodings are returned unchanged and decoded by the
//! domain codec.

use super::{
    models::{InternChangeset, InternRow, NewInternRow},
    schema::interns,
};
use crate::intern::{
    domain::{
        InternFields, InternId, InternPatch, InternQuery, InternRecord, InternSort, SortField,
        SortOrder, StorageValue,
    },
    ports::{InternPage, InternRepository, InternRepositoryError, InternRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by intern adapters.
pub type InternPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed intern repository.
#[derive(Debug, Clone)]
pub struct PostgresInternRepository {
    pool: InternPgPool,
}

impl PostgresInternRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InternPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InternRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InternRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(InternRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(InternRepositoryError::persistence)?
    }
}

#[async_trait]
impl InternRepository for PostgresInternRepository {
    async fn list(&self, query: &InternQuery) -> InternRepositoryResult<InternPage> {
        let filters = query.clone();
        self.run_blocking(move |connection| {
            let matching = filtered(&filters)
                .count()
                .get_result::<i64>(connection)
                .map_err(InternRepositoryError::persistence)?;

            let mut page = ordered(filtered(&filters), filters.sort);
            if let Some(offset) = filters.offset {
                page = page.offset(saturating_i64(offset));
            }
            if let Some(limit) = filters.limit {
                page = page.limit(saturating_i64(limit));
            }
            let rows = page
                .load::<InternRow>(connection)
                .map_err(InternRepositoryError::persistence)?;

            let records = rows
                .into_iter()
                .map(row_to_record)
                .collect::<InternRepositoryResult<Vec<_>>>()?;
            let total = u64::try_from(matching).map_err(InternRepositoryError::persistence)?;
            Ok(InternPage { records, total })
        })
        .await
    }

    async fn fetch(&self, id: &InternId) -> InternRepositoryResult<InternRecord> {
        let intern_id = id.clone();
        self.run_blocking(move |connection| {
            let row = interns::table
                .find(intern_id.as_str())
                .select(InternRow::as_select())
                .first::<InternRow>(connection)
                .optional()
                .map_err(InternRepositoryError::persistence)?;
            row.map_or(Err(InternRepositoryError::NotFound(intern_id)), row_to_record)
        })
        .await
    }

    async fn create(&self, record: &InternRecord) -> InternRepositoryResult<InternRecord> {
        let intern_id = record.id.clone();
        let new_row = to_new_row(record);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(interns::table)
                .values(&new_row)
                .returning(InternRow::as_returning())
                .get_result::<InternRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        InternRepositoryError::DuplicateIntern(intern_id.clone())
                    }
                    _ => InternRepositoryError::persistence(err),
                })?;
            row_to_record(row)
        })
        .await
    }

    async fn update(
        &self,
        id: &InternId,
        patch: &InternPatch,
    ) -> InternRepositoryResult<InternRecord> {
        let intern_id = id.clone();
        let changeset = to_changeset(patch);

        self.run_blocking(move |connection| {
            let row = diesel::update(interns::table.find(intern_id.as_str()))
                .set(&changeset)
                .returning(InternRow::as_returning())
                .get_result::<InternRow>(connection)
                .optional()
                .map_err(InternRepositoryError::persistence)?;
            row.map_or(Err(InternRepositoryError::NotFound(intern_id)), row_to_record)
        })
        .await
    }

    async fn delete(&self, id: &InternId) -> InternRepositoryResult<()> {
        let intern_id = id.clone();
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(interns::table.find(intern_id.as_str()))
                .execute(connection)
                .map_err(InternRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(InternRepositoryError::NotFound(intern_id));
            }
            Ok(())
        })
        .await
    }
}

fn filtered(query: &InternQuery) -> interns::BoxedQuery<'static, Pg> {
    let mut statement = interns::table.into_boxed();
    if let Some(batch) = query.batch.clone() {
        statement = statement.filter(interns::batch.eq(batch));
    }
    if let Some(search) = query.search.as_deref() {
        statement = statement.filter(interns::intern_name.ilike(contains_pattern(search)));
    }
    statement
}

fn ordered(
    statement: interns::BoxedQuery<'static, Pg>,
    sort: Option<InternSort>,
) -> interns::BoxedQuery<'static, Pg> {
    let primary = match sort {
        None => statement.order(interns::created_at.asc()),
        Some(InternSort { field, order }) => match (field, order) {
            (SortField::Name, SortOrder::Asc) => statement.order(interns::intern_name.asc()),
            (SortField::Name, SortOrder::Desc) => statement.order(interns::intern_name.desc()),
            (SortField::Batch, SortOrder::Asc) => statement.order(interns::batch.asc()),
            (SortField::Batch, SortOrder::Desc) => statement.order(interns::batch.desc()),
            (SortField::CreatedAt, SortOrder::Asc) => statement.order(interns::created_at.asc()),
            (SortField::CreatedAt, SortOrder::Desc) => {
                statement.order(interns::created_at.desc())
            }
            (SortField::UpdatedAt, SortOrder::Asc) => statement.order(interns::updated_at.asc()),
            (SortField::UpdatedAt, SortOrder::Desc) => {
                statement.order(interns::updated_at.desc())
            }
        },
    };
    primary.then_order_by(interns::id.asc())
}

/// Builds an `ILIKE` pattern matching any value containing `search`
/// literally.
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn saturating_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn strings_to_value(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

fn tasks_to_column(tasks_assigned: &StorageValue) -> Option<Value> {
    match tasks_assigned {
        StorageValue::Empty => None,
        other => Some(Value::from(other.clone())),
    }
}

fn to_new_row(record: &InternRecord) -> NewInternRow {
    let fields = &record.fields;
    NewInternRow {
        id: record.id.as_str().to_owned(),
        intern_name: fields.name.clone(),
        batch: fields.batch.clone(),
        roles: strings_to_value(&fields.roles),
        current_projects: strings_to_value(&fields.current_projects),
        tasks_assigned: tasks_to_column(&fields.tasks_assigned),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn to_changeset(patch: &InternPatch) -> InternChangeset {
    InternChangeset {
        intern_name: patch.name.clone(),
        batch: patch.batch.clone(),
        roles: patch.roles.as_deref().map(strings_to_value),
        current_projects: patch.current_projects.as_deref().map(strings_to_value),
        tasks_assigned: patch.tasks_assigned.as_ref().map(tasks_to_column),
        updated_at: patch.updated_at,
    }
}

fn row_to_record(row: InternRow) -> InternRepositoryResult<InternRecord> {
    let InternRow {
        id,
        intern_name,
        batch,
        roles,
        current_projects,
        tasks_assigned,
        created_at,
        updated_at,
    } = row;

    let parsed_roles: Vec<String> =
        serde_json::from_value(roles).map_err(InternRepositoryError::invalid_persisted_data)?;
    let parsed_projects: Vec<String> = serde_json::from_value(current_projects)
        .map_err(InternRepositoryError::invalid_persisted_data)?;
    let fields = InternFields::new(intern_name, batch)
        .with_roles(parsed_roles)
        .with_current_projects(parsed_projects)
        .with_tasks_assigned(tasks_assigned.map_or(StorageValue::Empty, StorageValue::from));

    Ok(InternRecord {
        id: InternId::new(id),
        fields,
        created_at,
        updated_at,
    })
}
