// Copyright (c) The simtest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fabricated diagnostic text for failed and errored cases.
//!
//! The output imitates the traceback a Python test harness would record,
//! because that is what the dashboards consuming the report expect to render.
//! Nothing here is a real error.

use crate::list::MarkerDef;
use chrono::{DateTime, Local};
use rand::{Rng, RngExt};
use simtest_metadata::{ScheduledOutcome, format_timestamp};

/// Synthesizes the exception log for a case that finished as `Failed` or
/// `Error`: a marker-specific message, a fabricated traceback with
/// randomized line numbers, and an error-code footer.
pub(crate) fn synthesize_exception_log(
    marker: &MarkerDef,
    outcome: ScheduledOutcome,
    test_name: &str,
    now: DateTime<Local>,
    rng: &mut impl Rng,
) -> String {
    let pool = message_pool(marker.name, outcome);
    let message = pool[rng.random_range(0..pool.len())];

    let marker = marker.name;
    let test_line = rng.random_range(25..=75);
    let utils_line = rng.random_range(45..=120);
    let client_line = rng.random_range(70..=150);
    let error_code = rng.random_range(1000..=9999);

    format!(
        "Traceback (most recent call last):\n  \
         File \"/opt/app/tests/{marker}/test_{test_name}.py\", line {test_line}, in {test_name}\n    \
         result = execute_{marker}_test(test_data)\n  \
         File \"/opt/app/lib/{marker}_utils.py\", line {utils_line}, in execute_{marker}_test\n    \
         response = {marker}_client.run_test(params)\n  \
         File \"/opt/app/lib/{marker}_client.py\", line {client_line}, in run_test\n    \
         return self.process_request(params)\n\
         {message}\n\
         \n\
         Test Details:\n\
         - Test Category: {marker}\n\
         - Test Name: {test_name}\n\
         - Outcome Type: {outcome}\n\
         - Test Environment: staging\n\
         - Error Code: {marker_upper}_{error_code}\n\
         - Timestamp: {timestamp}",
        marker_upper = marker.to_uppercase(),
        timestamp = format_timestamp(now),
    )
}

fn message_pool(marker: &str, outcome: ScheduledOutcome) -> &'static [&'static str] {
    match (marker, outcome) {
        ("smoke", ScheduledOutcome::Failed) => &[
            "AssertionError: Basic health check failed - service not responding",
            "ConnectionError: Unable to connect to main application endpoint",
        ],
        ("smoke", ScheduledOutcome::Error) => &[
            "Exception: Critical service dependency unavailable",
            "RuntimeError: Application startup sequence failed",
        ],
        ("regression", ScheduledOutcome::Failed) => &[
            "AssertionError: Feature behavior changed from previous version",
            "ValueError: Data validation rules have been modified unexpectedly",
        ],
        ("regression", ScheduledOutcome::Error) => &[
            "Exception: Legacy compatibility check crashed",
            "SystemError: Backward compatibility module not found",
        ],
        ("ui", ScheduledOutcome::Failed) => &[
            "selenium.common.exceptions.NoSuchElementException: Button 'Submit' not found",
            "AssertionError: Expected page title 'Dashboard' but got 'Error 404'",
        ],
        ("ui", ScheduledOutcome::Error) => &[
            "selenium.common.exceptions.WebDriverException: Chrome browser crashed",
            "Exception: UI automation framework initialization failed",
        ],
        ("performance", ScheduledOutcome::Failed) => &[
            "AssertionError: Response time 5.2s exceeded threshold of 2.0s",
            "TimeoutError: Load test failed - too many concurrent users",
        ],
        ("performance", ScheduledOutcome::Error) => &[
            "Exception: Performance monitoring tools crashed during test",
            "MemoryError: System ran out of memory during load testing",
        ],
        ("security", ScheduledOutcome::Failed) => &[
            "AssertionError: Unauthorized access was not properly blocked",
            "SecurityError: Weak password was accepted by system",
        ],
        ("security", ScheduledOutcome::Error) => &[
            "Exception: Security scanner tool encountered fatal error",
            "CertificateError: SSL certificate validation framework crashed",
        ],
        _ => &["Generic error occurred"],
    }
}
