///! Cached values are serialized to JSON strings and read back typed, so
///! every type on the cache read path must survive the round trip.
///!
///! Run with: `cargo test --test cache_encoding_test`
use chrono::Utc;
use uuid::Uuid;

use freelancehub_backend::models::projects::{
    self, Categories, DurationBucket, ExperienceLevel, Milestones, PaymentType, Skills, Status,
    Visibility,
};
use freelancehub_backend::models::users::{self, Roles, UserResponse};

#[test]
fn test_user_response_survives_cache_round_trip() {
    let user = users::Model {
        id: Uuid::new_v4(),
        email: "alice@example.com".to_string(),
        username: Some("alice".to_string()),
        display_name: Some("Alice Smith".to_string()),
        avatar_url: None,
        auth_provider: "google".to_string(),
        role: Roles::Freelancer,
        state: Some("Karnataka".to_string()),
        created_at: Utc::now(),
        updated_at: None,
    };
    let response = UserResponse::from(user.clone());

    // The cache stores JSON strings and reads them back typed.
    let stored = serde_json::to_string(&response).unwrap();
    let read_back: UserResponse = serde_json::from_str(&stored).unwrap();

    assert_eq!(read_back.id, user.id);
    assert_eq!(read_back.email, user.email);
    assert_eq!(read_back.username.as_deref(), Some("alice"));
    assert_eq!(read_back.role, Roles::Freelancer);
    assert_eq!(read_back.state.as_deref(), Some("Karnataka"));
}

#[test]
fn test_project_page_survives_cache_round_trip() {
    let project = projects::Model {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        title: "Landing page".to_string(),
        description: "Build a landing page".to_string(),
        category: Categories::WebDevelopment,
        skills: Skills(vec!["html".to_string()]),
        budget_min: 500.0,
        budget_max: 1000.0,
        currency: "INR".to_string(),
        payment_type: PaymentType::Fixed,
        duration: DurationBucket::LessThanOneMonth,
        experience_level: ExperienceLevel::Beginner,
        status: Status::Open,
        visibility: Visibility::Public,
        freelancer_id: None,
        escrow_id: None,
        milestones: Milestones(Vec::new()),
        start_date: None,
        completion_date: None,
        created_at: Utc::now(),
        updated_at: None,
    };

    let stored = serde_json::to_string(&vec![project.clone()]).unwrap();
    let read_back: Vec<projects::Model> = serde_json::from_str(&stored).unwrap();

    assert_eq!(read_back, vec![project]);
}
