//! # Response Classification
//!
//! Every transport response lands in exactly one of four dispositions, and the
//! dispatch loop does nothing but match on them. Keeping the decision in one
//! function keeps the header/status/body probing out of the control flow.

use crate::core::types::RawResponse;
use std::time::Duration;

/// HTTP status the upstream uses to reject a key
const STATUS_INVALID_KEY: u16 = 403;

/// Standard rate-limit status
const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Terminal disposition of a single transport attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// Application-level success; cache and return
    Success,

    /// Key rejected by the upstream; surfaced, never retried
    InvalidKey,

    /// Upstream asked us to back off; retried after the delay
    RateLimited { retry_after: Option<Duration> },

    /// Application-level failure that is neither of the above
    Upstream { cause: Option<String> },
}

/// Classify a raw transport response.
///
/// The application-level `success` flag governs everything below the status
/// checks: a missing or non-boolean flag counts as success, matching the
/// resource endpoints that omit it.
pub(crate) fn classify(response: &RawResponse) -> Disposition {
    if response.status == STATUS_INVALID_KEY {
        return Disposition::InvalidKey;
    }

    if response.body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let retry_after = response
            .header("retry-after")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs);

        if retry_after.is_some() || response.status == STATUS_TOO_MANY_REQUESTS {
            return Disposition::RateLimited { retry_after };
        }

        let cause = response
            .body
            .get("cause")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        return Disposition::Upstream { cause };
    }

    Disposition::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(status: u16, body: serde_json::Value, headers: &[(&str, &str)]) -> RawResponse {
        RawResponse {
            body,
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn forbidden_is_invalid_key() {
        let r = response(403, json!({"success": false, "cause": "Invalid API key"}), &[]);
        assert_eq!(classify(&r), Disposition::InvalidKey);
    }

    #[test]
    fn retry_after_header_means_rate_limited() {
        let r = response(200, json!({"success": false}), &[("retry-after", "7")]);
        assert_eq!(
            classify(&r),
            Disposition::RateLimited {
                retry_after: Some(Duration::from_secs(7))
            }
        );
    }

    #[test]
    fn too_many_requests_without_header_is_rate_limited() {
        let r = response(429, json!({"success": false}), &[]);
        assert_eq!(
            classify(&r),
            Disposition::RateLimited { retry_after: None }
        );
    }

    #[test]
    fn unparseable_retry_after_falls_back_to_status() {
        let r = response(429, json!({"success": false}), &[("retry-after", "soon")]);
        assert_eq!(
            classify(&r),
            Disposition::RateLimited { retry_after: None }
        );
    }

    #[test]
    fn failure_without_limit_signals_is_upstream() {
        let r = response(200, json!({"success": false, "cause": "Malformed UUID"}), &[]);
        assert_eq!(
            classify(&r),
            Disposition::Upstream {
                cause: Some("Malformed UUID".to_string())
            }
        );
    }

    #[test]
    fn failure_without_cause_is_upstream_with_none() {
        let r = response(500, json!({"success": false}), &[]);
        assert_eq!(classify(&r), Disposition::Upstream { cause: None });
    }

    #[test]
    fn explicit_success_flag() {
        let r = response(200, json!({"success": true, "player": {}}), &[]);
        assert_eq!(classify(&r), Disposition::Success);
    }

    #[test]
    fn missing_success_flag_counts_as_success() {
        // Resource endpoints omit the flag entirely.
        let r = response(200, json!({"achievements": {}}), &[]);
        assert_eq!(classify(&r), Disposition::Success);
    }

    #[test]
    fn rate_limit_signals_on_a_success_are_ignored() {
        let r = response(200, json!({"success": true}), &[("retry-after", "9")]);
        assert_eq!(classify(&r), Disposition::Success);
    }
}
