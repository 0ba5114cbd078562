//! Integration tests for the council, thesis and score repositories.
//!
//! Exercises the snapshot and lock helpers the scoring workflows build on:
//! - Council row locking and the composition snapshot
//! - Score snapshots joined to the grading council
//! - Report rows in entry order
//! - Per-major thesis tallies and year filtering
//! - Unique constraint on the score composite key

use assert_matches::assert_matches;
use chrono::NaiveDate;
use sqlx::PgPool;
use thesis_core::types::DbId;
use thesis_db::models::council::CreateCouncil;
use thesis_db::models::council_detail::CreateCouncilDetail;
use thesis_db::models::criteria::CreateCriteria;
use thesis_db::models::department::CreateDepartment;
use thesis_db::models::lecturer::CreateLecturer;
use thesis_db::models::major::CreateMajor;
use thesis_db::models::score::CreateScore;
use thesis_db::models::student::CreateStudent;
use thesis_db::models::thesis::CreateThesis;
use thesis_db::models::user::CreateUser;
use thesis_db::repositories::{
    CouncilDetailRepo, CouncilRepo, CriteriaRepo, DepartmentRepo, LecturerRepo, MajorRepo,
    ScoreRepo, StudentRepo, ThesisRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str, role: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.edu"),
            password_hash: "not-a-real-hash".to_string(),
            first_name: username.to_string(),
            last_name: String::new(),
            avatar_url: None,
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_lecturer(pool: &PgPool, department_id: DbId, code: &str, name: &str) -> DbId {
    let user_id = new_user(pool, code, "lecturer").await;
    LecturerRepo::create(
        pool,
        &CreateLecturer {
            code: code.to_string(),
            name: name.to_string(),
            user_id,
            department_id,
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_student(pool: &PgPool, major_id: DbId, code: &str) -> DbId {
    let user_id = new_user(pool, code, "student").await;
    StudentRepo::create(
        pool,
        &CreateStudent {
            code: code.to_string(),
            name: code.to_string(),
            major_id,
            user_id,
            start_study: NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
            end_study: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_department(pool: &PgPool) -> DbId {
    DepartmentRepo::create(
        pool,
        &CreateDepartment {
            code: "IT".to_string(),
            name: "Information Technology".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_major(pool: &PgPool, code: &str, name: &str) -> DbId {
    MajorRepo::create(
        pool,
        &CreateMajor {
            code: code.to_string(),
            name: name.to_string(),
            department_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_council(pool: &PgPool, code: &str) -> DbId {
    CouncilRepo::create(
        pool,
        &CreateCouncil {
            code: code.to_string(),
            name: format!("Council {code}"),
        },
    )
    .await
    .unwrap()
    .id
}

async fn assign(pool: &PgPool, council_id: DbId, lecturer_id: DbId, role: &str) -> DbId {
    let mut tx = pool.begin().await.unwrap();
    let detail = CouncilDetailRepo::create(
        &mut tx,
        &CreateCouncilDetail {
            role: role.to_string(),
            lecturer_id,
            council_id,
        },
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();
    detail.id
}

async fn new_thesis(
    pool: &PgPool,
    council_id: DbId,
    title: &str,
    advisor: DbId,
    students: Vec<DbId>,
) -> DbId {
    let mut tx = pool.begin().await.unwrap();
    let thesis = ThesisRepo::create(
        &mut tx,
        &CreateThesis {
            title: title.to_string(),
            report_text: String::new(),
            council_id,
            advisors: vec![advisor],
            students,
        },
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();
    thesis.id
}

async fn new_criteria(pool: &PgPool, title: &str) -> DbId {
    CriteriaRepo::create(
        pool,
        &CreateCriteria {
            title: title.to_string(),
            description: format!("{title} of the thesis"),
        },
    )
    .await
    .unwrap()
    .id
}

async fn enter_score(
    pool: &PgPool,
    thesis_id: DbId,
    criteria_id: DbId,
    council_detail_id: DbId,
    score: f64,
) -> Result<DbId, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let row = ScoreRepo::create(
        &mut tx,
        &CreateScore {
            score,
            thesis_id,
            criteria_id,
            council_detail_id,
        },
    )
    .await?;
    tx.commit().await?;
    Ok(row.id)
}

// ---------------------------------------------------------------------------
// Councils
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_council_snapshot_lists_active_assignments(pool: PgPool) {
    let dept = new_department(&pool).await;
    let alice = new_lecturer(&pool, dept, "L01", "Alice").await;
    let bob = new_lecturer(&pool, dept, "L02", "Bob").await;
    let council = new_council(&pool, "C01").await;

    assign(&pool, council, alice, "chairman").await;
    assign(&pool, council, bob, "member").await;

    let mut tx = pool.begin().await.unwrap();
    let locked = CouncilRepo::lock_for_update(&mut tx, council).await.unwrap();
    assert_matches!(locked, Some(c) if !c.is_blocked);

    let details = CouncilDetailRepo::list_for_council(&mut tx, council)
        .await
        .unwrap();
    let roles: Vec<_> = details.iter().map(|d| d.role.as_str()).collect();
    assert_eq!(roles, vec!["chairman", "member"]);
    tx.rollback().await.unwrap();

    let members = CouncilDetailRepo::list_members(&pool, council).await.unwrap();
    assert_eq!(members[0].lecturer_name, "Alice");
    assert_eq!(members[1].lecturer_name, "Bob");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_chairman_rejected_by_partial_index(pool: PgPool) {
    let dept = new_department(&pool).await;
    let alice = new_lecturer(&pool, dept, "L01", "Alice").await;
    let bob = new_lecturer(&pool, dept, "L02", "Bob").await;
    let council = new_council(&pool, "C01").await;
    assign(&pool, council, alice, "chairman").await;

    let mut tx = pool.begin().await.unwrap();
    let err = CouncilDetailRepo::create(
        &mut tx,
        &CreateCouncilDetail {
            role: "chairman".to_string(),
            lecturer_id: bob,
            council_id: council,
        },
    )
    .await
    .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.constraint() == Some("uq_council_details_council_role")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_flag_round_trip(pool: PgPool) {
    let council = new_council(&pool, "C01").await;

    let mut tx = pool.begin().await.unwrap();
    let updated = CouncilRepo::set_blocked(&mut tx, council, true).await.unwrap();
    tx.commit().await.unwrap();
    assert!(updated.is_blocked);

    let reloaded = CouncilRepo::find_by_id(&pool, council).await.unwrap().unwrap();
    assert!(reloaded.is_blocked);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivated_council_is_hidden(pool: PgPool) {
    let council = new_council(&pool, "C01").await;

    let mut tx = pool.begin().await.unwrap();
    assert_eq!(CouncilRepo::count_dependents(&mut tx, council).await.unwrap(), (0, 0));
    assert!(CouncilRepo::deactivate(&mut tx, council).await.unwrap());
    tx.commit().await.unwrap();

    assert!(CouncilRepo::find_by_id(&pool, council).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_score_snapshot_carries_grader_council(pool: PgPool) {
    let dept = new_department(&pool).await;
    let major = new_major(&pool, "CS", "Computer Science").await;
    let alice = new_lecturer(&pool, dept, "L01", "Alice").await;
    let student = new_student(&pool, major, "S01").await;
    let council = new_council(&pool, "C01").await;
    let detail = assign(&pool, council, alice, "chairman").await;
    let thesis = new_thesis(&pool, council, "Edge AI", alice, vec![student]).await;
    let content = new_criteria(&pool, "Content").await;

    enter_score(&pool, thesis, content, detail, 1.5).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let snapshot = ScoreRepo::snapshot_for_thesis(&mut tx, thesis).await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].council_id, council);
    assert_eq!(snapshot[0].council_detail_id, detail);
    assert_eq!(snapshot[0].score, 1.5);

    ThesisRepo::set_total_score(&mut tx, thesis, 1.5).await.unwrap();
    let totals = ThesisRepo::totals_for_council(&mut *tx, council).await.unwrap();
    assert_eq!(totals, vec![(thesis, 1.5)]);
    tx.commit().await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_score_key_violates_constraint(pool: PgPool) {
    let dept = new_department(&pool).await;
    let major = new_major(&pool, "CS", "Computer Science").await;
    let alice = new_lecturer(&pool, dept, "L01", "Alice").await;
    let student = new_student(&pool, major, "S01").await;
    let council = new_council(&pool, "C01").await;
    let detail = assign(&pool, council, alice, "chairman").await;
    let thesis = new_thesis(&pool, council, "Edge AI", alice, vec![student]).await;
    let content = new_criteria(&pool, "Content").await;

    enter_score(&pool, thesis, content, detail, 1.0).await.unwrap();
    let err = enter_score(&pool, thesis, content, detail, 2.0)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db)
            if db.constraint() == Some("uq_scores_thesis_criteria_council_detail")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_rows_follow_entry_order(pool: PgPool) {
    let dept = new_department(&pool).await;
    let major = new_major(&pool, "CS", "Computer Science").await;
    let alice = new_lecturer(&pool, dept, "L01", "Alice").await;
    let bob = new_lecturer(&pool, dept, "L02", "Bob").await;
    let student = new_student(&pool, major, "S01").await;
    let council = new_council(&pool, "C01").await;
    let alice_detail = assign(&pool, council, alice, "chairman").await;
    let bob_detail = assign(&pool, council, bob, "secretary").await;
    let thesis = new_thesis(&pool, council, "Edge AI", alice, vec![student]).await;
    let content = new_criteria(&pool, "Content").await;
    let style = new_criteria(&pool, "Style").await;

    enter_score(&pool, thesis, content, alice_detail, 1.5).await.unwrap();
    enter_score(&pool, thesis, style, alice_detail, 0.8).await.unwrap();
    enter_score(&pool, thesis, content, bob_detail, 1.2).await.unwrap();

    let rows = ScoreRepo::report_rows(&pool, thesis).await.unwrap();
    let flat: Vec<_> = rows
        .iter()
        .map(|r| (r.criteria_title.as_str(), r.lecturer_name.as_str(), r.score))
        .collect();
    assert_eq!(
        flat,
        vec![("Content", "Alice", 1.5), ("Style", "Alice", 0.8), ("Content", "Bob", 1.2)]
    );
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_major_tallies_count_each_student(pool: PgPool) {
    let dept = new_department(&pool).await;
    let cs = new_major(&pool, "CS", "Computer Science").await;
    let ee = new_major(&pool, "EE", "Electrical Engineering").await;
    let alice = new_lecturer(&pool, dept, "L01", "Alice").await;
    let s1 = new_student(&pool, cs, "S01").await;
    let s2 = new_student(&pool, cs, "S02").await;
    let s3 = new_student(&pool, ee, "S03").await;
    let council = new_council(&pool, "C01").await;

    new_thesis(&pool, council, "Pair project", alice, vec![s1, s2]).await;
    new_thesis(&pool, council, "Solo project", alice, vec![s3]).await;

    let mut tallies = ThesisRepo::major_tallies(&pool, None).await.unwrap();
    tallies.sort_by(|a, b| a.major_code.cmp(&b.major_code));
    let flat: Vec<_> = tallies
        .iter()
        .map(|t| (t.major_code.as_str(), t.count))
        .collect();
    assert_eq!(flat, vec![("CS", 2), ("EE", 1)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_total_scores_filter_by_year(pool: PgPool) {
    let dept = new_department(&pool).await;
    let cs = new_major(&pool, "CS", "Computer Science").await;
    let alice = new_lecturer(&pool, dept, "L01", "Alice").await;
    let s1 = new_student(&pool, cs, "S01").await;
    let s2 = new_student(&pool, cs, "S02").await;
    let council = new_council(&pool, "C01").await;
    let old = new_thesis(&pool, council, "Old", alice, vec![s1]).await;
    let new = new_thesis(&pool, council, "New", alice, vec![s2]).await;

    sqlx::query("UPDATE theses SET created_at = '2022-05-01T00:00:00Z' WHERE id = $1")
        .bind(old)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE theses SET created_at = '2023-05-01T00:00:00Z' WHERE id = $1")
        .bind(new)
        .execute(&pool)
        .await
        .unwrap();

    let in_2023 = ThesisRepo::list_total_scores(&pool, Some(2023)).await.unwrap();
    assert_eq!(in_2023.len(), 1);
    assert_eq!(in_2023[0].title, "New");

    let all = ThesisRepo::list_total_scores(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let years = ThesisRepo::distinct_years(&pool).await.unwrap();
    assert_eq!(years, vec![2022, 2023]);

    assert!(ThesisRepo::major_tallies(&pool, Some(2021)).await.unwrap().is_empty());
}
