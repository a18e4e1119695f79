use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::errors::RateLimitError;
use crate::model::{PolicyFile, RatePolicy};

const SUPPORTED_VERSION: u32 = 1;

/// Loads named policies from a YAML policy file. Intended for process start;
/// feed the result to [`crate::RateLimiter::configure_many`].
pub fn load_policies(path: &Path) -> Result<Vec<(String, RatePolicy)>, RateLimitError> {
    let content = fs::read_to_string(path).map_err(|err| RateLimitError::Io(err.to_string()))?;
    parse_policy_file(&content)
}

pub fn parse_policy_file(content: &str) -> Result<Vec<(String, RatePolicy)>, RateLimitError> {
    let file: PolicyFile =
        serde_yaml::from_str(content).map_err(|err| RateLimitError::Invalid(err.to_string()))?;
    if file.version != SUPPORTED_VERSION {
        return Err(RateLimitError::Invalid(format!(
            "unsupported policy file version {}",
            file.version
        )));
    }

    let mut policies = Vec::with_capacity(file.policies.len());
    for entry in file.policies {
        let window = parse_window(&entry.name, &entry.window)?;
        policies.push((
            entry.name,
            RatePolicy::new(window, entry.max_requests, entry.message),
        ));
    }
    Ok(policies)
}

fn parse_window(name: &str, raw: &str) -> Result<Duration, RateLimitError> {
    humantime::parse_duration(raw).map_err(|_| RateLimitError::InvalidPolicy {
        name: name.to_string(),
        message: format!("invalid window format: {raw}"),
    })
}
