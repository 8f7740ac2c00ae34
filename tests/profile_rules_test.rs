///! Tests for freelancer profile input validation. The match scorer assumes
///! a 0–5 rating and non-negative experience and earnings, so out-of-range
///! input is rejected before it is persisted.
///!
///! Run with: `cargo test --test profile_rules_test`
use freelancehub_backend::models::profiles::{ProfileError, UpsertProfile, validate_profile};

fn profile_input() -> UpsertProfile {
    UpsertProfile {
        professions: Some(vec!["rust".to_string()]),
        experience_years: Some(3),
        total_earnings: Some(2_000.0),
        rating: Some(4.5),
        available: Some(true),
        state: Some("Karnataka".to_string()),
    }
}

#[test]
fn test_valid_profile_passes() {
    assert!(validate_profile(&profile_input()).is_ok());
}

#[test]
fn test_all_fields_omitted_passes() {
    // Partial updates leave absent fields alone, so None is always valid.
    let input = UpsertProfile {
        professions: None,
        experience_years: None,
        total_earnings: None,
        rating: None,
        available: None,
        state: None,
    };
    assert!(validate_profile(&input).is_ok());
}

#[test]
fn test_rating_out_of_range_is_rejected() {
    let mut input = profile_input();
    input.rating = Some(7.0);

    let err = validate_profile(&input).unwrap_err();
    assert_eq!(err, ProfileError::RatingOutOfRange);
    assert_eq!(err.to_string(), "Rating must be between 0 and 5");

    input.rating = Some(-0.5);
    assert_eq!(
        validate_profile(&input).unwrap_err(),
        ProfileError::RatingOutOfRange
    );
}

#[test]
fn test_rating_boundaries_pass() {
    let mut input = profile_input();
    input.rating = Some(0.0);
    assert!(validate_profile(&input).is_ok());
    input.rating = Some(5.0);
    assert!(validate_profile(&input).is_ok());
}

#[test]
fn test_negative_experience_is_rejected() {
    let mut input = profile_input();
    input.experience_years = Some(-3);
    assert_eq!(
        validate_profile(&input).unwrap_err(),
        ProfileError::NegativeExperience
    );
}

#[test]
fn test_negative_earnings_are_rejected() {
    let mut input = profile_input();
    input.total_earnings = Some(-1.0);
    assert_eq!(
        validate_profile(&input).unwrap_err(),
        ProfileError::NegativeEarnings
    );
}
