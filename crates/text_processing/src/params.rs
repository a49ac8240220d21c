//! Parameter Extraction for price growth queries

use once_cell::sync::Lazy;
use regex::Regex;

/// Window used when the query names no "last N years"
pub const DEFAULT_WINDOW_YEARS: usize = 3;

static LAST_N_YEARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"last (\d+) years").expect("valid window regex"));

/// Trailing-window size from "last <N> years"; [`DEFAULT_WINDOW_YEARS`] otherwise.
///
/// A count too large for `usize` saturates, which keeps every row.
pub fn window_years(query: &str) -> usize {
    LAST_N_YEARS
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse::<usize>().unwrap_or(usize::MAX))
        .unwrap_or(DEFAULT_WINDOW_YEARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_window() {
        assert_eq!(window_years("show price growth for wakad over the last 2 years"), 2);
        assert_eq!(window_years("last 10 years for aundh"), 10);
    }

    #[test]
    fn test_default_window() {
        assert_eq!(window_years("show price growth for akurdi"), 3);
        assert_eq!(window_years("last year for akurdi"), 3);
        assert_eq!(window_years("last two years"), 3);
        // Singular "year" does not match the pattern
        assert_eq!(window_years("last 1 year"), 3);
    }

    #[test]
    fn test_zero_window() {
        assert_eq!(window_years("last 0 years"), 0);
    }

    #[test]
    fn test_huge_window_saturates() {
        assert_eq!(window_years("last 99999999999999999999999 years"), usize::MAX);
    }
}
