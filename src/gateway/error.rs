use thiserror::Error;

/// Classified gateway failure. Tells the caller *why* the model call failed;
/// every façade operation surfaces these unchanged.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure: unreachable host, connection reset, timeout.
    #[error("network failure: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    /// Authentication rejected (401/403-class).
    #[error("invalid credential (status {status})")]
    InvalidCredential { status: u16 },

    /// Throttled (429). `retry_after_secs` comes from the response body when
    /// the provider supplies one.
    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Any other non-success status, or a success body that did not decode.
    #[error("invalid response (status {status}): {message}")]
    InvalidResponse { status: u16, message: String },
}

impl GatewayError {
    /// Map an HTTP status plus response body to the matching variant.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => GatewayError::InvalidCredential { status },
            429 => GatewayError::RateLimited {
                retry_after_secs: extract_retry_after(body),
            },
            _ => GatewayError::InvalidResponse {
                status,
                message: truncate_body(body),
            },
        }
    }

    pub fn network(source: reqwest::Error) -> Self {
        GatewayError::Network { source }
    }

    /// A 200 response whose body did not decode as a chat completion.
    pub fn undecodable(detail: impl std::fmt::Display) -> Self {
        GatewayError::InvalidResponse {
            status: 200,
            message: detail.to_string(),
        }
    }

    /// Whether a caller-side retry of the same request could plausibly
    /// succeed. The core itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::Network { .. } | GatewayError::RateLimited { .. }
        )
    }
}

/// Pull a retry hint out of a 429 body.
/// Handles {"error": {"retry_after": 5}} and {"retry_after": 5}, integer or float.
fn extract_retry_after(body: &str) -> Option<u64> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    v["error"]["retry_after"]
        .as_u64()
        .or_else(|| v["retry_after"].as_u64())
        .or_else(|| {
            v["error"]["retry_after"]
                .as_f64()
                .or_else(|| v["retry_after"].as_f64())
                .map(|f| f.ceil() as u64)
        })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 300;
    if body.len() > MAX {
        let mut end = MAX;
        while end > 0 && !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
