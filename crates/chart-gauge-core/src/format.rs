//! Number formatting for labels and SVG attributes.

/// Format a value for display: at most 3 decimals, no trailing zeros.
///
/// ```
/// use chart_gauge_core::format_number;
///
/// assert_eq!(format_number(75.0), "75");
/// assert_eq!(format_number(12.5), "12.5");
/// assert_eq!(format_number(1.0 / 3.0), "0.333");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    trim_fixed(value, 3)
}

/// Format a coordinate for SVG output (at most 3 decimals).
#[must_use]
pub fn fmt_coord(value: f64) -> String {
    trim_fixed(value, 3)
}

fn trim_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    let mut s = format!("{value:.decimals$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
