//! End-to-end checks of reference resolution, duplicate classification and
//! delete protection against a real PostgreSQL instance. They are ignored by
//! default; point TEST_DATABASE_URL (or DATABASE_URL) at a database and run:
//!
//!     cargo test -p storage -- --ignored

use storage::dto::athlete::{
    CategoryRef, CreateAthleteRequest, TrainingCenterRef, UpdateAthleteRequest,
};
use storage::dto::category::{CreateCategoryRequest, UpdateCategoryRequest};
use storage::dto::training_center::{CreateTrainingCenterRequest, UpdateTrainingCenterRequest};
use storage::error::{reference_violation, DuplicateKind, ReferenceKind, StorageError};
use storage::models::{Category, TrainingCenter};
use storage::repository::athlete::AthleteRepository;
use storage::repository::category::CategoryRepository;
use storage::repository::training_center::TrainingCenterRepository;
use storage::Database;
use uuid::Uuid;

async fn test_db() -> Database {
    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TEST_DATABASE_URL or DATABASE_URL must point at a PostgreSQL instance");
    let db = Database::new(&url).await.expect("database connection");
    db.run_migrations().await.expect("migrations");
    db
}

/// Unique name that still fits the 10-character category limit.
fn unique_name(prefix: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &token[..8])
}

fn unique_cpf() -> String {
    format!("{:011}", Uuid::new_v4().as_u128() % 100_000_000_000)
}

async fn seed_category(db: &Database) -> Category {
    CategoryRepository::new(db.pool())
        .create(&CreateCategoryRequest {
            name: unique_name("c"),
        })
        .await
        .expect("seed category")
}

async fn seed_training_center(db: &Database) -> TrainingCenter {
    TrainingCenterRepository::new(db.pool())
        .create(&CreateTrainingCenterRequest {
            name: unique_name("ct "),
            address: "Rua X, Q02".to_owned(),
            owner: "Marcos".to_owned(),
        })
        .await
        .expect("seed training center")
}

fn athlete_request(cpf: &str, category: &str, training_center: &str) -> CreateAthleteRequest {
    CreateAthleteRequest {
        cpf: cpf.to_owned(),
        name: "Joao".to_owned(),
        age: 25,
        weight: 75.5,
        height: 1.70,
        gender: "M".to_owned(),
        category: CategoryRef {
            name: category.to_owned(),
        },
        training_center: TrainingCenterRef {
            name: training_center.to_owned(),
        },
    }
}

fn no_op_update() -> UpdateAthleteRequest {
    UpdateAthleteRequest {
        name: None,
        age: None,
        weight: None,
        height: None,
        gender: None,
        category: None,
        training_center: None,
    }
}

async fn reference_pk(db: &Database, table: &str, id: Uuid) -> i32 {
    sqlx::query_scalar::<_, i32>(&format!("SELECT pk_id FROM {table} WHERE id = $1"))
        .bind(id)
        .fetch_one(db.pool())
        .await
        .expect("reference pk")
}

/// Insert an athlete row directly, sidestepping name resolution.
async fn insert_athlete_row(
    db: &Database,
    category_pk: i32,
    training_center_pk: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO athletes
            (id, cpf, name, age, weight, height, gender,
             category_pk_id, training_center_pk_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(unique_cpf())
    .bind("Joao")
    .bind(25_i16)
    .bind(75.5)
    .bind(1.70)
    .bind("M")
    .bind(category_pk)
    .bind(training_center_pk)
    .execute(db.pool())
    .await
    .map(|_| ())
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn create_athlete_with_unknown_category_persists_nothing() {
    let db = test_db().await;
    let center = seed_training_center(&db).await;
    let cpf = unique_cpf();

    let err = AthleteRepository::new(db.pool())
        .create(&athlete_request(&cpf, "missing", &center.name))
        .await
        .unwrap_err();

    match err {
        StorageError::ReferenceNotFound { kind, name } => {
            assert_eq!(kind, ReferenceKind::Category);
            assert_eq!(name, "missing");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM athletes WHERE cpf = $1")
        .bind(&cpf)
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn create_athlete_with_unknown_training_center_persists_nothing() {
    let db = test_db().await;
    let category = seed_category(&db).await;
    let cpf = unique_cpf();

    let err = AthleteRepository::new(db.pool())
        .create(&athlete_request(&cpf, &category.name, "missing"))
        .await
        .unwrap_err();

    match err {
        StorageError::ReferenceNotFound { kind, name } => {
            assert_eq!(kind, ReferenceKind::TrainingCenter);
            assert_eq!(name, "missing");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM athletes WHERE cpf = $1")
        .bind(&cpf)
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn duplicate_cpf_is_classified() {
    let db = test_db().await;
    let category = seed_category(&db).await;
    let center = seed_training_center(&db).await;
    let cpf = unique_cpf();

    let repo = AthleteRepository::new(db.pool());
    repo.create(&athlete_request(&cpf, &category.name, &center.name))
        .await
        .expect("first create");

    let err = repo
        .create(&athlete_request(&cpf, &category.name, &center.name))
        .await
        .unwrap_err();

    match err {
        StorageError::DuplicateKey { kind, value } => {
            assert_eq!(kind, DuplicateKind::AthleteCpf);
            assert_eq!(value, cpf);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn concurrent_duplicate_cpf_has_a_single_winner() {
    let db = test_db().await;
    let category = seed_category(&db).await;
    let center = seed_training_center(&db).await;
    let cpf = unique_cpf();

    let req_a = athlete_request(&cpf, &category.name, &center.name);
    let req_b = athlete_request(&cpf, &category.name, &center.name);
    let pool = db.pool();

    let (first, second) = tokio::join!(
        async { AthleteRepository::new(pool).create(&req_a).await },
        async { AthleteRepository::new(pool).create(&req_b).await },
    );

    let winners = [first.is_ok(), second.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(winners, 1, "exactly one create may win the CPF");

    let loser = if first.is_err() {
        first.unwrap_err()
    } else {
        second.unwrap_err()
    };
    assert!(matches!(
        loser,
        StorageError::DuplicateKey {
            kind: DuplicateKind::AthleteCpf,
            ..
        }
    ));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn partial_update_resolves_only_named_references() {
    let db = test_db().await;
    let category = seed_category(&db).await;
    let other_category = seed_category(&db).await;
    let center = seed_training_center(&db).await;
    let cpf = unique_cpf();

    let repo = AthleteRepository::new(db.pool());
    let created = repo
        .create(&athlete_request(&cpf, &category.name, &center.name))
        .await
        .expect("create");

    let updated = repo
        .update(
            created.id,
            &UpdateAthleteRequest {
                category: Some(CategoryRef {
                    name: other_category.name.clone(),
                }),
                ..no_op_update()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.category_name, other_category.name);
    assert_eq!(updated.training_center_name, center.name);
    assert_eq!(updated.cpf, cpf);
    assert_eq!(updated.weight, created.weight);

    let err = repo
        .update(
            created.id,
            &UpdateAthleteRequest {
                training_center: Some(TrainingCenterRef {
                    name: "missing".to_owned(),
                }),
                ..no_op_update()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::ReferenceNotFound {
            kind: ReferenceKind::TrainingCenter,
            ..
        }
    ));

    // the failed update must not have moved the athlete
    let reread = repo.find_by_id(created.id).await.expect("reread");
    assert_eq!(reread.training_center_name, center.name);
    assert_eq!(reread.category_name, other_category.name);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn category_delete_is_blocked_until_athletes_are_reassigned() {
    let db = test_db().await;
    let category = seed_category(&db).await;
    let center = seed_training_center(&db).await;
    let cpf = unique_cpf();

    let athletes = AthleteRepository::new(db.pool());
    let categories = CategoryRepository::new(db.pool());

    let athlete = athletes
        .create(&athlete_request(&cpf, &category.name, &center.name))
        .await
        .expect("create athlete");

    let err = categories.delete(category.id).await.unwrap_err();
    match err {
        StorageError::DependencyConflict {
            kind,
            name,
            dependents,
        } => {
            assert_eq!(kind, ReferenceKind::Category);
            assert_eq!(name, category.name);
            assert_eq!(dependents, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // the blocked delete must leave both rows untouched
    categories
        .find_by_id(category.id)
        .await
        .expect("category still there");
    athletes
        .find_by_id(athlete.id)
        .await
        .expect("athlete still there");

    let replacement = seed_category(&db).await;
    athletes
        .update(
            athlete.id,
            &UpdateAthleteRequest {
                category: Some(CategoryRef {
                    name: replacement.name.clone(),
                }),
                ..no_op_update()
            },
        )
        .await
        .expect("reassign");

    categories
        .delete(category.id)
        .await
        .expect("delete after reassignment");

    let err = categories.find_by_id(category.id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn training_center_delete_is_blocked_while_athletes_are_assigned() {
    let db = test_db().await;
    let category = seed_category(&db).await;
    let center = seed_training_center(&db).await;

    AthleteRepository::new(db.pool())
        .create(&athlete_request(&unique_cpf(), &category.name, &center.name))
        .await
        .expect("create athlete");

    let err = TrainingCenterRepository::new(db.pool())
        .delete(center.id)
        .await
        .unwrap_err();

    match err {
        StorageError::DependencyConflict {
            kind, dependents, ..
        } => {
            assert_eq!(kind, ReferenceKind::TrainingCenter);
            assert_eq!(dependents, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn duplicate_names_are_classified_on_create_and_rename() {
    let db = test_db().await;
    let repo = CategoryRepository::new(db.pool());

    let taken = seed_category(&db).await;
    let err = repo
        .create(&CreateCategoryRequest {
            name: taken.name.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::DuplicateKey {
            kind: DuplicateKind::CategoryName,
            ..
        }
    ));

    let renamed = seed_category(&db).await;
    let err = repo
        .update(
            renamed.id,
            &UpdateCategoryRequest {
                name: Some(taken.name.clone()),
            },
        )
        .await
        .unwrap_err();
    match err {
        StorageError::DuplicateKey { kind, value } => {
            assert_eq!(kind, DuplicateKind::CategoryName);
            assert_eq!(value, taken.name);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = TrainingCenterRepository::new(db.pool())
        .create(&CreateTrainingCenterRequest {
            name: seed_training_center(&db).await.name,
            address: "Rua Y, Q10".to_owned(),
            owner: "Ana".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::DuplicateKey {
            kind: DuplicateKind::TrainingCenterName,
            ..
        }
    ));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn foreign_key_violations_are_attributed_to_the_missing_reference() {
    let db = test_db().await;
    let category = seed_category(&db).await;
    let center = seed_training_center(&db).await;
    let category_pk = reference_pk(&db, "categories", category.id).await;
    let center_pk = reference_pk(&db, "training_centers", center.id).await;

    // serial keys are never reused, so a deleted row leaves its pk dangling
    CategoryRepository::new(db.pool())
        .delete(category.id)
        .await
        .expect("free the category pk");

    let err = insert_athlete_row(&db, category_pk, center_pk)
        .await
        .unwrap_err();
    assert_eq!(reference_violation(&err), Some(ReferenceKind::Category));

    let replacement = seed_category(&db).await;
    let replacement_pk = reference_pk(&db, "categories", replacement.id).await;
    TrainingCenterRepository::new(db.pool())
        .delete(center.id)
        .await
        .expect("free the training center pk");

    let err = insert_athlete_row(&db, replacement_pk, center_pk)
        .await
        .unwrap_err();
    assert_eq!(reference_violation(&err), Some(ReferenceKind::TrainingCenter));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn missing_rows_surface_as_not_found() {
    let db = test_db().await;
    let ghost = Uuid::new_v4();

    let err = AthleteRepository::new(db.pool())
        .find_by_id(ghost)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));

    let err = CategoryRepository::new(db.pool())
        .delete(ghost)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));

    let err = AthleteRepository::new(db.pool())
        .delete(ghost)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));

    let err = TrainingCenterRepository::new(db.pool())
        .update(
            ghost,
            &UpdateTrainingCenterRequest {
                name: None,
                address: None,
                owner: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database"]
async fn listing_windows_the_collection_and_reports_totals() {
    let db = test_db().await;
    for _ in 0..3 {
        seed_category(&db).await;
    }

    let (items, total) = CategoryRepository::new(db.pool())
        .list(2, 0)
        .await
        .expect("list");

    assert_eq!(items.len(), 2);
    assert!(total >= 3);

    let (rest, _) = CategoryRepository::new(db.pool())
        .list(2, 2)
        .await
        .expect("list offset");
    assert!(rest.iter().all(|c| items.iter().all(|i| i.id != c.id)));
}
