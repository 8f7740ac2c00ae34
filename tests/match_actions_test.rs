///! Tests for the match status action updates, checked at the ActiveModel
///! level so no database is needed.
///!
///! Run with: `cargo test --test match_actions_test`
use chrono::Utc;
use sea_orm::ActiveValue;
use uuid::Uuid;

use freelancehub_backend::db::matches::toggle_saved_update;
use freelancehub_backend::models::matches;

fn match_row(is_saved: bool) -> matches::Model {
    matches::Model {
        id: Uuid::new_v4(),
        project_id: Uuid::new_v4(),
        freelancer_id: Uuid::new_v4(),
        skills_match: 80,
        experience_match: 70,
        rate_match: 90,
        location_match: 100,
        availability_match: 100,
        past_performance_match: 60,
        client_preference_match: 0,
        match_score: 83,
        is_recommended: false,
        is_viewed: false,
        viewed_at: None,
        is_saved,
        saved_at: None,
        is_applied: false,
        applied_at: None,
        application_id: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[test]
fn test_saving_flips_flag_without_stamping_saved_at() {
    let now = Utc::now();
    let active = toggle_saved_update(match_row(false), now);

    assert_eq!(active.is_saved.clone().unwrap(), true);
    // The timestamp is only written on un-save, so this update must leave
    // the column alone.
    assert!(!active.saved_at.is_set());
    assert_eq!(active.updated_at.clone().unwrap(), Some(now));
}

#[test]
fn test_unsaving_stamps_saved_at() {
    let now = Utc::now();
    let active = toggle_saved_update(match_row(true), now);

    assert_eq!(active.is_saved.clone().unwrap(), false);
    assert_eq!(active.saved_at.clone().unwrap(), Some(now));
    assert_eq!(active.updated_at.clone().unwrap(), Some(now));
}

#[test]
fn test_toggle_never_touches_identity_columns() {
    let row = match_row(false);
    let id = row.id;
    let active = toggle_saved_update(row, Utc::now());

    // The pair and primary key ride along unchanged for the WHERE clause.
    assert!(matches!(active.id, ActiveValue::Unchanged(v) if v == id));
    assert!(!active.project_id.is_set());
    assert!(!active.freelancer_id.is_set());
    assert!(!active.match_score.is_set());
}
