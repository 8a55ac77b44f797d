//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Byte formatting (KB, MB, GB)
//! - Confidence formatting
//! - Relative time formatting (just now, minutes ago, hours ago, days ago)
//! - Color helpers (respects NO_COLOR)

use chrono::{Duration, Utc};
use colepsbot::cli::output::{colors, format_bytes, format_confidence, format_relative_time};

// =============================================================================
// format_bytes tests
// =============================================================================

/// Test byte formatting with various sizes
#[test]
fn test_format_bytes_various_sizes() {
    // Bytes (under 1 KB)
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(1), "1 B");
    assert_eq!(format_bytes(1023), "1023 B");

    // Kilobytes
    assert_eq!(format_bytes(1024), "1.0 KB");
    assert_eq!(format_bytes(10240), "10.0 KB");

    // Megabytes
    assert_eq!(format_bytes(1572864), "1.5 MB");

    // Gigabytes
    assert_eq!(format_bytes(10737418240), "10.0 GB");
}

/// Test byte formatting edge cases
#[test]
fn test_format_bytes_edge_cases() {
    assert_eq!(format_bytes(1048576 - 1), "1024.0 KB"); // Just under 1 MB
    assert_eq!(format_bytes(1073741824 - 1), "1024.0 MB"); // Just under 1 GB
}

// =============================================================================
// format_confidence tests
// =============================================================================

#[test]
fn test_format_confidence_stage_values() {
    let formatted: Vec<String> = [1.0, 0.9, 0.8, 0.7, 0.0]
        .iter()
        .map(|c| format_confidence(*c))
        .collect();
    assert_eq!(formatted, vec!["1.00", "0.90", "0.80", "0.70", "0.00"]);
}

// =============================================================================
// format_relative_time tests
// =============================================================================

#[test]
fn test_format_relative_time() {
    let now = Utc::now();
    assert_eq!(format_relative_time(&now), "just now");
    assert_eq!(format_relative_time(&(now - Duration::minutes(5))), "5m ago");
    assert_eq!(format_relative_time(&(now - Duration::hours(2))), "2h ago");
    assert_eq!(format_relative_time(&(now - Duration::days(3))), "3d ago");
    assert_eq!(
        format_relative_time(&(now + Duration::minutes(10))),
        "in the future"
    );
}

// =============================================================================
// color helpers
// =============================================================================

#[test]
fn test_colors_keep_text() {
    colored::control::set_override(false);
    assert_eq!(colors::answer("9h-18h").to_string(), "9h-18h");
    assert_eq!(colors::warning("Attention").to_string(), "Attention");
    colored::control::unset_override();
}
