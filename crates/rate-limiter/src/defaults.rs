use std::time::Duration;

use crate::model::RatePolicy;

/// Built-in StudyHub policies: a brute-force deterrent for authentication, a
/// generous ceiling for general API traffic, a narrow one for destructive
/// operations, and a capped count for bulk uploads.
pub fn default_policies() -> Vec<(&'static str, RatePolicy)> {
    vec![
        (
            "auth",
            RatePolicy::new(
                Duration::from_secs(15 * 60),
                5,
                "Too many login attempts, please try again later.",
            ),
        ),
        (
            "api",
            RatePolicy::new(
                Duration::from_secs(15 * 60),
                100,
                "Too many requests, please slow down.",
            ),
        ),
        (
            "sensitive",
            RatePolicy::new(
                Duration::from_secs(60 * 60),
                10,
                "Too many sensitive operations, please try again later.",
            ),
        ),
        (
            "upload",
            RatePolicy::new(
                Duration::from_secs(10 * 60),
                20,
                "Upload limit reached, please try again later.",
            ),
        ),
    ]
}
