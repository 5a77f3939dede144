use sqlx::PgConnection;

use crate::error::{ReferenceKind, Result, StorageError};

/// Number of athletes currently assigned to the given category or
/// training center.
pub async fn count_dependents(
    conn: &mut PgConnection,
    kind: ReferenceKind,
    pk_id: i32,
) -> Result<i64> {
    let sql = match kind {
        ReferenceKind::Category => "SELECT COUNT(*) FROM athletes WHERE category_pk_id = $1",
        ReferenceKind::TrainingCenter => {
            "SELECT COUNT(*) FROM athletes WHERE training_center_pk_id = $1"
        }
    };

    Ok(sqlx::query_scalar::<_, i64>(sql)
        .bind(pk_id)
        .fetch_one(&mut *conn)
        .await?)
}

/// Refuse to proceed while any athlete still points at the row.
///
/// Runs on the caller's connection so the check and the delete that
/// follows share one transaction.
pub async fn ensure_no_dependents(
    conn: &mut PgConnection,
    kind: ReferenceKind,
    pk_id: i32,
    name: &str,
) -> Result<()> {
    let dependents = count_dependents(conn, kind, pk_id).await?;
    if dependents > 0 {
        return Err(StorageError::DependencyConflict {
            kind,
            name: name.to_owned(),
            dependents,
        });
    }
    Ok(())
}
