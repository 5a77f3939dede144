use sqlx::PgConnection;

use crate::error::{ReferenceKind, Result, StorageError};

/// Outcome of looking up a by-name reference.
///
/// Carrying the miss as a value instead of an error lets callers decide
/// whether a missing name is fatal, and keeps the looked-up name attached
/// for the eventual error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(i32),
    NotFound(String),
}

impl Resolution {
    /// Unwrap into a foreign key value, failing with the name that missed.
    pub fn into_fk(self, kind: ReferenceKind) -> Result<i32> {
        match self {
            Self::Resolved(pk_id) => Ok(pk_id),
            Self::NotFound(name) => Err(StorageError::ReferenceNotFound { kind, name }),
        }
    }
}

/// Resolve a category or training center name to its surrogate key.
///
/// Runs on the caller's connection so that resolution and the write that
/// uses it share one transaction.
pub async fn resolve_reference(
    conn: &mut PgConnection,
    kind: ReferenceKind,
    name: &str,
) -> Result<Resolution> {
    let sql = match kind {
        ReferenceKind::Category => "SELECT pk_id FROM categories WHERE name = $1",
        ReferenceKind::TrainingCenter => "SELECT pk_id FROM training_centers WHERE name = $1",
    };

    let pk_id = sqlx::query_scalar::<_, i32>(sql)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(match pk_id {
        Some(pk_id) => Resolution::Resolved(pk_id),
        None => Resolution::NotFound(name.to_owned()),
    })
}
