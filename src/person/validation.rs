use std::time::Duration;

use async_trait::async_trait;

use crate::form::AsyncValidator;

/// Sync rule for the first name: required, and at least `min_len` characters.
pub fn first_name_validator(min_len: usize) -> impl Fn(&str) -> Option<String> + Send + Sync {
    move |value: &str| {
        if value.is_empty() {
            Some("A first name is required".to_string())
        } else if value.chars().count() < min_len {
            Some(format!("First name must be at least {min_len} characters"))
        } else {
            None
        }
    }
}

/// Async rule that rejects values containing `"error"`.
///
/// Sleeps for `delay` first to stand in for a round trip to a server.
#[derive(Debug, Clone)]
pub struct NoErrorSubstring {
    delay: Duration,
}

impl NoErrorSubstring {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AsyncValidator for NoErrorSubstring {
    fn name(&self) -> &'static str {
        "no_error_substring"
    }

    async fn validate(&self, value: &str) -> Option<String> {
        tokio::time::sleep(self.delay).await;
        value
            .contains("error")
            .then(|| "No \"error\" allowed in first name".to_string())
    }
}
