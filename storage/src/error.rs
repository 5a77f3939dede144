use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Entity addressed by its public UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Athlete,
    Category,
    TrainingCenter,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Athlete => write!(f, "athlete"),
            Self::Category => write!(f, "category"),
            Self::TrainingCenter => write!(f, "training center"),
        }
    }
}

/// Entity referenced by name from an athlete payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Category,
    TrainingCenter,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::TrainingCenter => write!(f, "training center"),
        }
    }
}

/// Which unique constraint a rejected write collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKind {
    AthleteCpf,
    CategoryName,
    TrainingCenterName,
}

impl DuplicateKind {
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        match constraint {
            "athletes_cpf_key" => Some(Self::AthleteCpf),
            "categories_name_key" => Some(Self::CategoryName),
            "training_centers_name_key" => Some(Self::TrainingCenterName),
            _ => None,
        }
    }
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AthleteCpf => write!(f, "CPF"),
            Self::CategoryName => write!(f, "category name"),
            Self::TrainingCenterName => write!(f, "training center name"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("{kind} '{name}' was not found")]
    ReferenceNotFound { kind: ReferenceKind, name: String },

    #[error("{kind} '{value}' is already registered")]
    DuplicateKey { kind: DuplicateKind, value: String },

    #[error("{kind} '{name}' still has {dependents} athlete(s) assigned to it")]
    DependencyConflict {
        kind: ReferenceKind,
        name: String,
        dependents: i64,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    /// Turn a write failure into `DuplicateKey` when it was a unique
    /// violation, attributing the collision to `value`.
    pub fn classify_write(err: sqlx::Error, value: &str) -> Self {
        match unique_violation(&err) {
            Some(kind) => Self::DuplicateKey {
                kind,
                value: value.to_owned(),
            },
            None => Self::from(err),
        }
    }
}

/// Identify a unique violation (SQLSTATE 23505) by the constraint it hit.
pub fn unique_violation(err: &sqlx::Error) -> Option<DuplicateKind> {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return db_err.constraint().and_then(DuplicateKind::from_constraint);
        }
    }
    None
}

/// Identify a foreign key violation (SQLSTATE 23503) on the athletes table
/// by the constraint it hit.
pub fn reference_violation(err: &sqlx::Error) -> Option<ReferenceKind> {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23503") {
            return match db_err.constraint() {
                Some("athletes_category_pk_id_fkey") => Some(ReferenceKind::Category),
                Some("athletes_training_center_pk_id_fkey") => Some(ReferenceKind::TrainingCenter),
                _ => None,
            };
        }
    }
    None
}
