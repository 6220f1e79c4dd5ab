//! Integration tests for the reporting queries.
//!
//! Builds small orgs with the lifecycle engine, then checks the aggregate
//! shapes: department averages, performer ranking, completion progress,
//! and the tag tallies.

use chrono::{TimeZone, Utc};
use fullcircle_core::assignment::RELATIONSHIP_PEER;
use fullcircle_core::review::{DECISION_APPROVE, DECISION_REJECT};
use fullcircle_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE};
use fullcircle_db::lifecycle;
use fullcircle_db::models::assignment::CreateAssignment;
use fullcircle_db::models::cycle::{CreateCycle, ReviewCycle};
use fullcircle_db::models::review::SubmitReview;
use fullcircle_db::models::user::{CreateUser, User};
use fullcircle_db::repositories::{ReportRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str, department: Option<&str>, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$fake".to_string(),
            full_name: format!("Test {username}"),
            department: department.map(str::to_string),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
}

async fn draft_cycle(pool: &PgPool, created_by: i64) -> ReviewCycle {
    lifecycle::create_cycle(
        pool,
        &CreateCycle {
            name: "Q1 2026".to_string(),
            start_date: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 3, 31, 0, 0, 0).unwrap(),
        },
        created_by,
    )
    .await
    .unwrap()
}

fn review_with(performance: f64, areas: &str, training: Option<&str>) -> SubmitReview {
    SubmitReview {
        performance_score: performance,
        leadership_score: 3.0,
        teamwork_score: 4.0,
        innovation_score: 3.0,
        strengths: "Solid work".to_string(),
        areas_for_improvement: areas.to_string(),
        training_recommendations: training.map(str::to_string),
    }
}

async fn assign(pool: &PgPool, cycle_id: i64, reviewer: &User, reviewee: &User) -> i64 {
    lifecycle::add_assignment(
        pool,
        cycle_id,
        &CreateAssignment {
            reviewer_id: reviewer.id,
            reviewee_id: reviewee.id,
            relationship_type: RELATIONSHIP_PEER.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn submit(pool: &PgPool, assignment_id: i64, input: &SubmitReview) -> i64 {
    lifecycle::submit_review(pool, assignment_id, input)
        .await
        .unwrap()
        .id
}

async fn submit_approved(pool: &PgPool, assignment_id: i64, input: &SubmitReview) -> i64 {
    let review_id = submit(pool, assignment_id, input).await;
    lifecycle::decide_review(pool, review_id, DECISION_APPROVE)
        .await
        .unwrap();
    review_id
}

// ---------------------------------------------------------------------------
// Department scores
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn department_scores_average_approved_reviews_only(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let eng1 = create_user(&pool, "eng1", Some("Engineering"), ROLE_EMPLOYEE).await;
    let eng2 = create_user(&pool, "eng2", Some("Engineering"), ROLE_EMPLOYEE).await;
    let sales = create_user(&pool, "sales1", Some("Sales"), ROLE_EMPLOYEE).await;

    let cycle = draft_cycle(&pool, admin.id).await;
    let a1 = assign(&pool, cycle.id, &eng2, &eng1).await;
    let a2 = assign(&pool, cycle.id, &eng1, &eng2).await;
    let a3 = assign(&pool, cycle.id, &eng1, &sales).await;
    lifecycle::activate_cycle(&pool, cycle.id).await.unwrap();

    // Two approved Engineering reviews at 4.0 and 5.0 average to 4.5.
    submit_approved(&pool, a1, &review_with(4.0, "Focus", None)).await;
    submit_approved(&pool, a2, &review_with(5.0, "Focus", None)).await;
    // Pending review must not count.
    submit(&pool, a3, &review_with(1.0, "Focus", None)).await;

    let scores = ReportRepo::department_scores(&pool, cycle.id).await.unwrap();

    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].department, "Engineering");
    assert_eq!(scores[0].avg_performance, 4.5);
    assert_eq!(scores[0].avg_leadership, 3.0);
    assert_eq!(scores[0].total_employees, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn department_scores_empty_cycle_yields_no_rows(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let cycle = draft_cycle(&pool, admin.id).await;

    let scores = ReportRepo::department_scores(&pool, cycle.id).await.unwrap();
    assert!(scores.is_empty());
}

// ---------------------------------------------------------------------------
// Top performers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn top_performers_rank_all_reviews_regardless_of_status(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let alice = create_user(&pool, "alice", Some("Engineering"), ROLE_EMPLOYEE).await;
    let bob = create_user(&pool, "bob", Some("Engineering"), ROLE_EMPLOYEE).await;
    let carol = create_user(&pool, "carol", Some("Sales"), ROLE_EMPLOYEE).await;

    let cycle = draft_cycle(&pool, admin.id).await;
    let to_alice = assign(&pool, cycle.id, &bob, &alice).await;
    let to_bob = assign(&pool, cycle.id, &alice, &bob).await;
    let to_carol = assign(&pool, cycle.id, &alice, &carol).await;
    lifecycle::activate_cycle(&pool, cycle.id).await.unwrap();

    // Alice's 5.0 review stays pending yet still ranks her first.
    submit(&pool, to_alice, &review_with(5.0, "Focus", None)).await;
    submit_approved(&pool, to_bob, &review_with(4.0, "Focus", None)).await;
    submit_approved(&pool, to_carol, &review_with(3.0, "Focus", None)).await;

    let performers = ReportRepo::top_performers(&pool, cycle.id, 2).await.unwrap();

    assert_eq!(performers.len(), 2);
    assert_eq!(performers[0].reviewee_id, alice.id);
    assert_eq!(performers[0].avg_performance, 5.0);
    assert_eq!(performers[1].reviewee_id, bob.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn top_performers_ties_keep_first_submission_order(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let alice = create_user(&pool, "alice", Some("Engineering"), ROLE_EMPLOYEE).await;
    let bob = create_user(&pool, "bob", Some("Engineering"), ROLE_EMPLOYEE).await;

    let cycle = draft_cycle(&pool, admin.id).await;
    let to_bob = assign(&pool, cycle.id, &alice, &bob).await;
    let to_alice = assign(&pool, cycle.id, &bob, &alice).await;
    lifecycle::activate_cycle(&pool, cycle.id).await.unwrap();

    // Same average; bob's review lands first.
    submit(&pool, to_bob, &review_with(4.0, "Focus", None)).await;
    submit(&pool, to_alice, &review_with(4.0, "Focus", None)).await;

    let performers = ReportRepo::top_performers(&pool, cycle.id, 10).await.unwrap();
    assert_eq!(performers.len(), 2);
    assert_eq!(performers[0].reviewee_id, bob.id);
    assert_eq!(performers[1].reviewee_id, alice.id);
}

// ---------------------------------------------------------------------------
// Completion status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn completion_status_counts_assignments(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let alice = create_user(&pool, "alice", Some("Engineering"), ROLE_EMPLOYEE).await;
    let bob = create_user(&pool, "bob", Some("Engineering"), ROLE_EMPLOYEE).await;

    let cycle = draft_cycle(&pool, admin.id).await;
    let done = assign(&pool, cycle.id, &alice, &bob).await;
    assign(&pool, cycle.id, &bob, &alice).await;
    lifecycle::activate_cycle(&pool, cycle.id).await.unwrap();

    submit(&pool, done, &review_with(4.0, "Focus", None)).await;

    let status = ReportRepo::completion_status(&pool, cycle.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(status.cycle_name, "Q1 2026");
    assert_eq!(status.total_assignments, 2);
    assert_eq!(status.completed_assignments, 1);
    assert_eq!(status.pending_assignments, 1);
    assert_eq!(status.completion_rate, 50.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn completion_status_zero_assignments_reports_zero_rate(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let cycle = draft_cycle(&pool, admin.id).await;

    let status = ReportRepo::completion_status(&pool, cycle.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(status.total_assignments, 0);
    assert_eq!(status.completion_rate, 0.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn completion_status_unknown_cycle_is_none(pool: PgPool) {
    let status = ReportRepo::completion_status(&pool, 5150).await.unwrap();
    assert!(status.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn rejected_review_reopens_and_lowers_completion(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let alice = create_user(&pool, "alice", Some("Engineering"), ROLE_EMPLOYEE).await;
    let bob = create_user(&pool, "bob", Some("Engineering"), ROLE_EMPLOYEE).await;

    let cycle = draft_cycle(&pool, admin.id).await;
    let assignment = assign(&pool, cycle.id, &alice, &bob).await;
    lifecycle::activate_cycle(&pool, cycle.id).await.unwrap();

    let review_id = submit(&pool, assignment, &review_with(2.0, "Focus", None)).await;
    let before = ReportRepo::completion_status(&pool, cycle.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(before.completion_rate, 100.0);

    lifecycle::decide_review(&pool, review_id, DECISION_REJECT)
        .await
        .unwrap();
    let after = ReportRepo::completion_status(&pool, cycle.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.completed_assignments, 0);
    assert_eq!(after.completion_rate, 0.0);
}

// ---------------------------------------------------------------------------
// Tag tallies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn training_recommendations_tally_splits_and_counts(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let alice = create_user(&pool, "alice", Some("Engineering"), ROLE_EMPLOYEE).await;
    let bob = create_user(&pool, "bob", Some("Engineering"), ROLE_EMPLOYEE).await;
    let carol = create_user(&pool, "carol", Some("Sales"), ROLE_EMPLOYEE).await;

    let cycle = draft_cycle(&pool, admin.id).await;
    let a1 = assign(&pool, cycle.id, &alice, &bob).await;
    let a2 = assign(&pool, cycle.id, &bob, &carol).await;
    let a3 = assign(&pool, cycle.id, &carol, &alice).await;
    lifecycle::activate_cycle(&pool, cycle.id).await.unwrap();

    submit(&pool, a1, &review_with(4.0, "Focus", Some("SQL, Public Speaking"))).await;
    submit(&pool, a2, &review_with(4.0, "Focus", Some(" SQL ,, Leadership"))).await;
    // No recommendation at all is simply skipped.
    submit(&pool, a3, &review_with(4.0, "Focus", None)).await;

    let tally = ReportRepo::training_recommendations(&pool, cycle.id)
        .await
        .unwrap();

    assert_eq!(tally.len(), 3);
    assert_eq!(tally[0].recommendation, "SQL");
    assert_eq!(tally[0].count, 2);
    // Tied at one each, first-seen order.
    assert_eq!(tally[1].recommendation, "Public Speaking");
    assert_eq!(tally[2].recommendation, "Leadership");
}

#[sqlx::test(migrations = "./migrations")]
async fn improvement_areas_tally_counts_across_reviews(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let alice = create_user(&pool, "alice", Some("Engineering"), ROLE_EMPLOYEE).await;
    let bob = create_user(&pool, "bob", Some("Engineering"), ROLE_EMPLOYEE).await;
    let carol = create_user(&pool, "carol", Some("Sales"), ROLE_EMPLOYEE).await;

    let cycle = draft_cycle(&pool, admin.id).await;
    let a1 = assign(&pool, cycle.id, &alice, &bob).await;
    let a2 = assign(&pool, cycle.id, &bob, &carol).await;
    lifecycle::activate_cycle(&pool, cycle.id).await.unwrap();

    submit(&pool, a1, &review_with(4.0, "Delegation, Focus", None)).await;
    submit(&pool, a2, &review_with(4.0, "Focus", None)).await;

    let tally = ReportRepo::improvement_areas(&pool, cycle.id).await.unwrap();

    assert_eq!(tally.len(), 2);
    assert_eq!(tally[0].area, "Focus");
    assert_eq!(tally[0].count, 2);
    assert_eq!(tally[1].area, "Delegation");
    assert_eq!(tally[1].count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn tallies_on_empty_cycle_are_empty(pool: PgPool) {
    let admin = create_user(&pool, "admin", None, ROLE_ADMIN).await;
    let cycle = draft_cycle(&pool, admin.id).await;

    assert!(ReportRepo::training_recommendations(&pool, cycle.id)
        .await
        .unwrap()
        .is_empty());
    assert!(ReportRepo::improvement_areas(&pool, cycle.id)
        .await
        .unwrap()
        .is_empty());
}
