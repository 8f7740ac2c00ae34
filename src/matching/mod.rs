//! Heuristic match scoring between a project and a candidate freelancer.
//!
//! Each factor is scored 0–100 independently; the overall score is the
//! rounded average of the non-zero factors only. A zero factor (whether
//! "inapplicable" or "genuinely poor") is dropped from the average, so it
//! never drags the score down.

use crate::models::profiles;
use crate::models::projects::{self, ExperienceLevel};

/// The per-factor compatibility scores, each 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchFactors {
    pub skills_match: i32,
    pub experience_match: i32,
    pub rate_match: i32,
    pub location_match: i32,
    pub availability_match: i32,
    pub past_performance_match: i32,
    pub client_preference_match: i32,
}

impl MatchFactors {
    fn as_array(&self) -> [i32; 7] {
        [
            self.skills_match,
            self.experience_match,
            self.rate_match,
            self.location_match,
            self.availability_match,
            self.past_performance_match,
            self.client_preference_match,
        ]
    }

    /// Overall score: rounded average of the non-zero factors, or 0 when
    /// every factor is zero.
    pub fn overall(&self) -> i32 {
        let non_zero: Vec<i32> = self.as_array().iter().copied().filter(|&f| f != 0).collect();
        if non_zero.is_empty() {
            return 0;
        }
        let sum: i32 = non_zero.iter().sum();
        (f64::from(sum) / non_zero.len() as f64).round() as i32
    }
}

/// Compute all factors for a (project, candidate) pair.
///
/// `client_state` is the project owner's state, used for the location factor.
/// Client preference has no signal source yet and always scores zero, which
/// the overall average then drops.
pub fn compute_factors(
    project: &projects::Model,
    client_state: Option<&str>,
    profile: &profiles::Model,
) -> MatchFactors {
    MatchFactors {
        skills_match: skills_match(&project.skills.0, &profile.professions.0),
        experience_match: experience_match(project.experience_level, profile.experience_years),
        rate_match: rate_match(project.average_budget(), profile.total_earnings),
        location_match: location_match(profile.state.as_deref(), client_state),
        availability_match: if profile.available { 100 } else { 0 },
        past_performance_match: past_performance_match(profile.rating),
        client_preference_match: 0,
    }
}

/// Fraction of project skills covered by the candidate's professions, using
/// case-insensitive substring containment in either direction.
pub fn skills_match(project_skills: &[String], professions: &[String]) -> i32 {
    if project_skills.is_empty() || professions.is_empty() {
        return 0;
    }

    let professions: Vec<String> = professions
        .iter()
        .map(|p| p.trim().to_lowercase())
        .collect();

    let matched = project_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|skill| {
            professions
                .iter()
                .any(|p| p.contains(skill.as_str()) || skill.contains(p.as_str()))
        })
        .count();

    (100.0 * matched as f64 / project_skills.len() as f64).round() as i32
}

/// Year range a project's experience level maps to.
fn experience_range(level: ExperienceLevel) -> (i32, i32) {
    match level {
        ExperienceLevel::Beginner => (0, 2),
        ExperienceLevel::Intermediate => (2, 5),
        ExperienceLevel::Expert => (5, 100),
    }
}

/// 100 inside the level's year range, 80 when over-qualified, otherwise a
/// proportional score against the range minimum.
pub fn experience_match(level: ExperienceLevel, years: i32) -> i32 {
    let (min, max) = experience_range(level);
    if years >= min && years <= max {
        100
    } else if years > max {
        80
    } else {
        // years < min, so min > 0 here
        ((100.0 * f64::from(years) / f64::from(min)).round() as i32).min(100)
    }
}

/// Rate compatibility from the project's average budget vs. the candidate's
/// earnings history. Bands are coarse on purpose; there is no rate card to
/// compare against.
pub fn rate_match(average_budget: f64, total_earnings: f64) -> i32 {
    if total_earnings == 0.0 {
        50
    } else if total_earnings > 10_000.0 && average_budget < 500.0 {
        40
    } else if total_earnings < 5_000.0 && average_budget < 1_000.0 {
        90
    } else {
        70
    }
}

/// 100 for the same state as the project's client, 70 otherwise (remote work
/// is the norm, so distance is only a mild penalty).
pub fn location_match(candidate_state: Option<&str>, client_state: Option<&str>) -> i32 {
    match (candidate_state, client_state) {
        (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => 100,
        _ => 70,
    }
}

/// Rating mapped to 0–100; unrated candidates get a neutral 50. Ratings
/// are validated to 0–5 on write; the cap keeps the factor in range even
/// for rows that predate that check.
pub fn past_performance_match(rating: f64) -> i32 {
    if rating <= 0.0 {
        50
    } else {
        ((100.0 * rating / 5.0).round() as i32).min(100)
    }
}

/// Recommendation cutoff for the batch job.
pub fn is_recommended(factors: &MatchFactors) -> bool {
    factors.overall() >= 50
}
