///! Tests for the match-scoring heuristics and the average-of-non-zero
///! overall score rule. Pure functions — no server or database is needed.
///!
///! Run with: `cargo test --test match_scoring_test`
use chrono::Utc;
use uuid::Uuid;

use freelancehub_backend::matching::{
    self, MatchFactors, experience_match, location_match, past_performance_match, rate_match,
    skills_match,
};
use freelancehub_backend::models::profiles::{self, Professions};
use freelancehub_backend::models::projects::{
    self, Categories, DurationBucket, ExperienceLevel, Milestones, PaymentType, Skills, Status,
    Visibility,
};

fn project_with(skills: &[&str], level: ExperienceLevel, min: f64, max: f64) -> projects::Model {
    projects::Model {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        title: "Marketplace backend".to_string(),
        description: "REST API".to_string(),
        category: Categories::WebDevelopment,
        skills: Skills(skills.iter().map(|s| s.to_string()).collect()),
        budget_min: min,
        budget_max: max,
        currency: "INR".to_string(),
        payment_type: PaymentType::Fixed,
        duration: DurationBucket::OneToThreeMonths,
        experience_level: level,
        status: Status::Open,
        visibility: Visibility::Public,
        freelancer_id: None,
        escrow_id: None,
        milestones: Milestones(Vec::new()),
        start_date: None,
        completion_date: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn profile_with(
    professions: &[&str],
    years: i32,
    earnings: f64,
    rating: f64,
    available: bool,
    state: Option<&str>,
) -> profiles::Model {
    profiles::Model {
        user_id: Uuid::new_v4(),
        professions: Professions(professions.iter().map(|s| s.to_string()).collect()),
        experience_years: years,
        total_earnings: earnings,
        rating,
        available,
        state: state.map(|s| s.to_string()),
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[test]
fn test_overall_drops_zero_factors() {
    // Scenario: {80, 0, 70, 0, 0, 50, 0} → average of {80, 70, 50} = 66.67 → 67.
    let factors = MatchFactors {
        skills_match: 80,
        experience_match: 0,
        rate_match: 70,
        location_match: 0,
        availability_match: 0,
        past_performance_match: 50,
        client_preference_match: 0,
    };
    assert_eq!(factors.overall(), 67);
}

#[test]
fn test_overall_is_zero_when_all_factors_zero() {
    assert_eq!(MatchFactors::default().overall(), 0);
}

#[test]
fn test_overall_single_nonzero_factor_is_not_diluted() {
    // The drop-zero rule means one strong factor alone carries the score.
    let factors = MatchFactors {
        skills_match: 90,
        ..MatchFactors::default()
    };
    assert_eq!(factors.overall(), 90);
}

#[test]
fn test_skills_match_substring_containment() {
    let skills = vec!["React".to_string(), "Node.js".to_string(), "SQL".to_string()];
    let professions = vec![
        "react developer".to_string(),
        "node.js".to_string(),
        "graphic design".to_string(),
    ];
    // "React" ⊂ "react developer", "Node.js" == "node.js"; "SQL" unmatched.
    assert_eq!(skills_match(&skills, &professions), 67);
}

#[test]
fn test_skills_match_empty_lists_score_zero() {
    assert_eq!(skills_match(&[], &["dev".to_string()]), 0);
    assert_eq!(skills_match(&["rust".to_string()], &[]), 0);
}

#[test]
fn test_skills_match_full_coverage() {
    let skills = vec!["rust".to_string(), "postgres".to_string()];
    let professions = vec!["Rust backend".to_string(), "PostgreSQL admin".to_string()];
    assert_eq!(skills_match(&skills, &professions), 100);
}

#[test]
fn test_experience_match_bands() {
    // In range → perfect.
    assert_eq!(experience_match(ExperienceLevel::Beginner, 1), 100);
    assert_eq!(experience_match(ExperienceLevel::Intermediate, 3), 100);
    assert_eq!(experience_match(ExperienceLevel::Expert, 10), 100);
    // Over-qualified → 80.
    assert_eq!(experience_match(ExperienceLevel::Beginner, 5), 80);
    assert_eq!(experience_match(ExperienceLevel::Intermediate, 7), 80);
    // Under-qualified → proportional to the range minimum.
    assert_eq!(experience_match(ExperienceLevel::Intermediate, 1), 50);
    assert_eq!(experience_match(ExperienceLevel::Expert, 2), 40);
    assert_eq!(experience_match(ExperienceLevel::Expert, 0), 0);
}

#[test]
fn test_rate_match_bands() {
    // No earnings history → neutral.
    assert_eq!(rate_match(750.0, 0.0), 50);
    // High earner, low-budget project → poor fit.
    assert_eq!(rate_match(400.0, 20_000.0), 40);
    // Low earner, modest budget → strong fit.
    assert_eq!(rate_match(750.0, 2_000.0), 90);
    // Everything else → default.
    assert_eq!(rate_match(5_000.0, 8_000.0), 70);
}

#[test]
fn test_location_match() {
    assert_eq!(location_match(Some("Karnataka"), Some("karnataka")), 100);
    assert_eq!(location_match(Some("Karnataka"), Some("Kerala")), 70);
    assert_eq!(location_match(None, Some("Kerala")), 70);
    assert_eq!(location_match(Some("Kerala"), None), 70);
}

#[test]
fn test_past_performance_match() {
    assert_eq!(past_performance_match(5.0), 100);
    assert_eq!(past_performance_match(4.5), 90);
    assert_eq!(past_performance_match(2.5), 50);
    // Unrated → neutral 50, not zero.
    assert_eq!(past_performance_match(0.0), 50);
    // Rows that predate rating validation stay capped in range.
    assert_eq!(past_performance_match(7.0), 100);
}

#[test]
fn test_compute_factors_end_to_end() {
    let project = project_with(
        &["rust", "postgres"],
        ExperienceLevel::Intermediate,
        500.0,
        1000.0,
    );
    let profile = profile_with(
        &["Rust backend", "PostgreSQL"],
        3,
        2_000.0,
        4.0,
        true,
        Some("Karnataka"),
    );

    let factors = matching::compute_factors(&project, Some("Karnataka"), &profile);

    assert_eq!(factors.skills_match, 100);
    assert_eq!(factors.experience_match, 100);
    // avg budget 750 with earnings 2000 → 90.
    assert_eq!(factors.rate_match, 90);
    assert_eq!(factors.location_match, 100);
    assert_eq!(factors.availability_match, 100);
    assert_eq!(factors.past_performance_match, 80);
    // No client-preference signal source.
    assert_eq!(factors.client_preference_match, 0);

    // (100+100+90+100+100+80)/6 = 95, zero factor dropped.
    assert_eq!(factors.overall(), 95);
    assert!(matching::is_recommended(&factors));
}

#[test]
fn test_unavailable_candidate_scores_zero_availability() {
    let project = project_with(&["rust"], ExperienceLevel::Beginner, 100.0, 200.0);
    let profile = profile_with(&["rust"], 1, 0.0, 0.0, false, None);

    let factors = matching::compute_factors(&project, None, &profile);
    assert_eq!(factors.availability_match, 0);
    // Zero availability is dropped from the average, not penalizing the rest.
    assert!(factors.overall() > 0);
}

#[test]
fn test_compute_factors_is_deterministic() {
    // calculateMatch is idempotent: same inputs, same factors, same score.
    let project = project_with(&["rust"], ExperienceLevel::Expert, 500.0, 1500.0);
    let profile = profile_with(&["rust systems"], 8, 12_000.0, 3.5, true, Some("Goa"));

    let a = matching::compute_factors(&project, Some("Goa"), &profile);
    let b = matching::compute_factors(&project, Some("Goa"), &profile);
    assert_eq!(a, b);
    assert_eq!(a.overall(), b.overall());
}
