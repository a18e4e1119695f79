use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::Duration;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::errors::RateLimitError;
use crate::model::{CacheStats, RateCheck, RateDecision, RatePolicy};

/// Bound on the user-agent prefix folded into the client key, so pathological
/// header values cannot inflate key cardinality.
const USER_AGENT_PREFIX_CHARS: usize = 50;

/// Sizing of the shared window cache.
#[derive(Clone, Copy, Debug)]
pub struct RateLimiterOptions {
    /// Maximum number of window records held at once; least-recently-used
    /// records are evicted past this.
    pub capacity: usize,
    /// Absolute time-to-live per record, a safety net against records no
    /// window index ever points at again. Stretched to the policy window
    /// where that is longer, so an actively counted window is never dropped
    /// by TTL.
    pub entry_ttl: Duration,
}

impl Default for RateLimiterOptions {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            entry_ttl: Duration::from_secs(30 * 60),
        }
    }
}

#[derive(Clone, Debug)]
struct WindowRecord {
    count: u32,
    window_reset_at_ms: u64,
    stored_at_ms: u64,
}

/// Shared fixed-window counter store. Policies are registered at process
/// start and immutable afterwards; the window cache is the only mutable
/// state and sits behind a single lock, so each check is an atomic
/// read-modify-write with respect to concurrent callers on the same key.
pub struct RateLimiter {
    policies: HashMap<String, RatePolicy>,
    windows: Mutex<LruCache<String, WindowRecord>>,
    capacity: usize,
    entry_ttl: Duration,
}

impl RateLimiter {
    pub fn new(options: RateLimiterOptions) -> Self {
        let capacity = options.capacity.max(1);
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            policies: HashMap::new(),
            windows: Mutex::new(LruCache::new(cap)),
            capacity,
            entry_ttl: options.entry_ttl,
        }
    }

    /// Limiter preloaded with the built-in StudyHub policies.
    pub fn with_default_policies() -> Result<Self, RateLimitError> {
        let mut limiter = Self::new(RateLimiterOptions::default());
        for (name, policy) in crate::defaults::default_policies() {
            limiter.configure(name, policy)?;
        }
        Ok(limiter)
    }

    /// Registers a named policy. Re-registration under an existing name is
    /// rejected, including with identical parameters.
    pub fn configure(&mut self, name: &str, policy: RatePolicy) -> Result<(), RateLimitError> {
        if name.trim().is_empty() {
            return Err(RateLimitError::InvalidPolicy {
                name: name.to_string(),
                message: "policy name is empty".into(),
            });
        }
        if policy.max_requests == 0 {
            return Err(RateLimitError::InvalidPolicy {
                name: name.to_string(),
                message: "max_requests must be at least 1".into(),
            });
        }
        if policy.window < Duration::from_millis(1) {
            return Err(RateLimitError::InvalidPolicy {
                name: name.to_string(),
                message: "window must be at least 1ms".into(),
            });
        }
        if self.policies.contains_key(name) {
            return Err(RateLimitError::DuplicatePolicy(name.to_string()));
        }
        self.policies.insert(name.to_string(), policy);
        Ok(())
    }

    pub fn configure_many<I>(&mut self, policies: I) -> Result<(), RateLimitError>
    where
        I: IntoIterator<Item = (String, RatePolicy)>,
    {
        for (name, policy) in policies {
            self.configure(&name, policy)?;
        }
        Ok(())
    }

    pub fn policy(&self, name: &str) -> Option<&RatePolicy> {
        self.policies.get(name)
    }

    /// Counts one request against `policy_name` for `client_key` at `now_ms`
    /// (epoch milliseconds) and decides allow or throttle.
    pub fn check(
        &self,
        policy_name: &str,
        client_key: &str,
        now_ms: u64,
    ) -> Result<RateCheck, RateLimitError> {
        let policy = self
            .policies
            .get(policy_name)
            .ok_or_else(|| RateLimitError::UnknownPolicy(policy_name.to_string()))?;

        let window_ms = policy.window.as_millis() as u64;
        let window_index = now_ms / window_ms;
        let reset_at_ms = (window_index + 1) * window_ms;
        let key = format!("{client_key}:{policy_name}:{window_index}");
        let ttl_ms = (self.entry_ttl.as_millis() as u64).max(window_ms);

        let (count, reset_at_ms) = {
            let mut windows = self.windows.lock();
            let stale = windows
                .get(&key)
                .map_or(true, |record| now_ms >= record.stored_at_ms + ttl_ms);
            if stale {
                windows.put(
                    key.clone(),
                    WindowRecord {
                        count: 0,
                        window_reset_at_ms: reset_at_ms,
                        stored_at_ms: now_ms,
                    },
                );
            }
            let record = windows.get_mut(&key).expect("window record just inserted");
            record.count += 1;
            (record.count, record.window_reset_at_ms)
        };

        let decision = if count > policy.max_requests {
            debug!(
                target: "rate-limiter",
                policy = policy_name,
                client = client_key,
                count,
                limit = policy.max_requests,
                "request throttled"
            );
            RateDecision::Throttled {
                retry_after_ms: reset_at_ms.saturating_sub(now_ms),
                message: policy.message.clone(),
            }
        } else {
            RateDecision::Allow {
                remaining: policy.max_requests - count,
            }
        };

        Ok(RateCheck {
            decision,
            limit: policy.max_requests,
            reset_at_ms,
        })
    }

    /// Clears every tracked window. Operational/test utility.
    pub fn reset(&self) {
        self.windows.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            current_size: self.windows.lock().len(),
            capacity: self.capacity,
        }
    }
}

/// Derives the composite client identity from the network origin and a
/// bounded prefix of the user-agent header.
pub fn client_key(source_address: &str, user_agent: &str) -> String {
    let prefix: String = user_agent.chars().take(USER_AGENT_PREFIX_CHARS).collect();
    format!("{source_address}:{prefix}")
}
