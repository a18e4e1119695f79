use std::time::Duration;

use rate_limiter::{
    client_key, RateDecision, RateLimitError, RateLimiter, RateLimiterOptions, RatePolicy,
};

fn limiter_with(name: &str, window: Duration, max_requests: u32) -> RateLimiter {
    let mut limiter = RateLimiter::new(RateLimiterOptions::default());
    limiter
        .configure(name, RatePolicy::new(window, max_requests, "slow down"))
        .unwrap();
    limiter
}

#[test]
fn five_per_minute_scenario() {
    let limiter = limiter_with("api", Duration::from_millis(60_000), 5);
    let key = client_key("1.2.3.4", "Mozilla");

    for expected_remaining in [4, 3, 2, 1, 0] {
        let check = limiter.check("api", &key, 0).unwrap();
        assert_eq!(check.limit, 5);
        assert_eq!(
            check.decision,
            RateDecision::Allow {
                remaining: expected_remaining
            }
        );
    }

    let check = limiter.check("api", &key, 100).unwrap();
    match check.decision {
        RateDecision::Throttled { retry_after_ms, .. } => {
            assert_eq!(retry_after_ms, 59_900);
        }
        other => panic!("expected throttle, got {other:?}"),
    }
    assert_eq!(check.reset_at_ms, 60_000);

    // Next window starts a fresh counter.
    let check = limiter.check("api", &key, 61_000).unwrap();
    assert_eq!(check.decision, RateDecision::Allow { remaining: 4 });
    assert_eq!(check.reset_at_ms, 120_000);
}

#[test]
fn throttle_carries_the_policy_message() {
    let limiter = limiter_with("auth", Duration::from_millis(1_000), 1);
    limiter.check("auth", "k", 0).unwrap();
    let check = limiter.check("auth", "k", 1).unwrap();
    match check.decision {
        RateDecision::Throttled { message, .. } => assert_eq!(message, "slow down"),
        other => panic!("expected throttle, got {other:?}"),
    }
}

#[test]
fn keys_are_counted_independently() {
    let limiter = limiter_with("api", Duration::from_millis(1_000), 1);
    assert!(limiter.check("api", "a", 0).unwrap().is_allowed());
    assert!(limiter.check("api", "b", 0).unwrap().is_allowed());
    assert!(!limiter.check("api", "a", 1).unwrap().is_allowed());
}

#[test]
fn policies_sharing_a_client_key_do_not_collide() {
    let mut limiter = limiter_with("api", Duration::from_millis(1_000), 1);
    limiter
        .configure(
            "auth",
            RatePolicy::new(Duration::from_millis(1_000), 1, "slow down"),
        )
        .unwrap();
    assert!(limiter.check("api", "k", 0).unwrap().is_allowed());
    // Same key and window on another policy still has a fresh counter.
    assert!(limiter.check("auth", "k", 0).unwrap().is_allowed());
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut limiter = limiter_with("api", Duration::from_millis(1_000), 1);
    // Identical parameters are rejected the same way as differing ones.
    let err = limiter
        .configure(
            "api",
            RatePolicy::new(Duration::from_millis(1_000), 1, "slow down"),
        )
        .unwrap_err();
    assert_eq!(err, RateLimitError::DuplicatePolicy("api".into()));
}

#[test]
fn unknown_policy_fails_loudly() {
    let limiter = RateLimiter::new(RateLimiterOptions::default());
    let err = limiter.check("nope", "k", 0).unwrap_err();
    assert_eq!(err, RateLimitError::UnknownPolicy("nope".into()));
}

#[test]
fn zero_ceiling_policy_is_invalid() {
    let mut limiter = RateLimiter::new(RateLimiterOptions::default());
    let err = limiter
        .configure("bad", RatePolicy::new(Duration::from_secs(1), 0, "nope"))
        .unwrap_err();
    assert!(matches!(err, RateLimitError::InvalidPolicy { .. }));
}

#[test]
fn cache_capacity_bounds_tracked_windows() {
    let mut limiter = RateLimiter::new(RateLimiterOptions {
        capacity: 2,
        entry_ttl: Duration::from_secs(3600),
    });
    limiter
        .configure("api", RatePolicy::new(Duration::from_secs(60), 10, "slow"))
        .unwrap();

    for key in ["a", "b", "c", "d"] {
        limiter.check("api", key, 0).unwrap();
    }
    let stats = limiter.stats();
    assert_eq!(stats.capacity, 2);
    assert_eq!(stats.current_size, 2);

    // "a" was evicted, so its counter restarts.
    let check = limiter.check("api", "a", 0).unwrap();
    assert_eq!(check.decision, RateDecision::Allow { remaining: 9 });
}

#[test]
fn ttl_never_drops_an_actively_counted_window() {
    let mut limiter = RateLimiter::new(RateLimiterOptions {
        capacity: 16,
        entry_ttl: Duration::from_millis(1),
    });
    // The effective TTL is stretched to the window, so within the window the
    // counter survives.
    limiter
        .configure(
            "api",
            RatePolicy::new(Duration::from_millis(1_000), 2, "slow"),
        )
        .unwrap();
    limiter.check("api", "k", 0).unwrap();
    let check = limiter.check("api", "k", 500).unwrap();
    assert_eq!(check.decision, RateDecision::Allow { remaining: 0 });
}

#[test]
fn reset_clears_all_windows() {
    let limiter = limiter_with("api", Duration::from_millis(1_000), 1);
    limiter.check("api", "k", 0).unwrap();
    assert!(!limiter.check("api", "k", 1).unwrap().is_allowed());

    limiter.reset();
    assert_eq!(limiter.stats().current_size, 0);
    assert!(limiter.check("api", "k", 2).unwrap().is_allowed());
}

#[test]
fn user_agent_prefix_is_bounded() {
    let long_agent = "M".repeat(500);
    let key = client_key("1.2.3.4", &long_agent);
    assert_eq!(key, format!("1.2.3.4:{}", "M".repeat(50)));
    // Multi-byte agents truncate on character boundaries.
    let unicode_key = client_key("1.2.3.4", &"é".repeat(500));
    assert_eq!(unicode_key, format!("1.2.3.4:{}", "é".repeat(50)));
}

#[test]
fn default_policy_set_registers_cleanly() {
    let limiter = RateLimiter::with_default_policies().unwrap();
    for name in ["auth", "api", "sensitive", "upload"] {
        assert!(limiter.policy(name).is_some(), "missing policy {name}");
    }
    assert_eq!(limiter.policy("auth").unwrap().max_requests, 5);
}
