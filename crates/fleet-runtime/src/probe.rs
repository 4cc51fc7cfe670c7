//! Timed HTTP probing for the one health-check convention.

use std::time::Duration;

use fleet_common::constants::PROBE_TIMEOUT;

/// Returns whether `url` answers with a success status within the
/// default probe timeout.
#[must_use]
pub fn http_ok(url: &str) -> bool {
    http_ok_within(url, PROBE_TIMEOUT)
}

/// Returns whether `url` answers with a success status within `timeout`.
///
/// Every failure shape (client build, connect, timeout, non-2xx) is a
/// negative probe result, never an error.
#[must_use]
pub fn http_ok_within(url: &str, timeout: Duration) -> bool {
    let Ok(client) = reqwest::blocking::Client::builder().timeout(timeout).build() else {
        return false;
    };
    match client.get(url).send() {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            tracing::debug!(url, error = %e, "probe failed");
            false
        }
    }
}
