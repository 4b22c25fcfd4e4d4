// src/ingest/utils.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit regex should parse"));

/// Recover an ordered, deduplicated year list from 4-digit year tokens in a
/// file name, e.g. `Company-Metric-1996-1997-1998-1999-2000.csv` →
/// `[1996, 1997, 1998, 1999, 2000]`. A token must be a maximal 4-digit run in
/// the range 1900–2099; longer runs (timestamps, serials) are ignored.
/// Returns `None` when the name carries no year token at all.
pub fn years_from_filename<P: AsRef<Path>>(path: P) -> Option<Vec<i32>> {
    let stem = path.as_ref().file_stem()?.to_str()?;

    let mut years = Vec::new();
    for m in DIGIT_RUN.find_iter(stem) {
        if m.as_str().len() != 4 {
            continue;
        }
        let year: i32 = m.as_str().parse().ok()?;
        if !(1900..=2099).contains(&year) {
            continue;
        }
        if !years.contains(&year) {
            years.push(year);
        }
    }

    if years.is_empty() {
        None
    } else {
        Some(years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_str_trims_and_strips_quotes() {
        assert_eq!(clean_str("  Microsoft  "), "Microsoft");
        assert_eq!(clean_str("\"Market Cap ($bn)\""), "Market Cap ($bn)");
        assert_eq!(clean_str(" \"1996\" "), "1996");
        assert_eq!(clean_str("\""), "\"");
        assert_eq!(clean_str(""), "");
    }

    #[test]
    fn test_years_from_filename_ordered_and_deduplicated() {
        assert_eq!(
            years_from_filename("Company-Metric-1996-1997-1998-1999-2000.csv"),
            Some(vec![1996, 1997, 1998, 1999, 2000])
        );
        // repeated tokens collapse, first occurrence wins the position
        assert_eq!(
            years_from_filename("panel_2023_2020_2023.tsv"),
            Some(vec![2023, 2020])
        );
    }

    #[test]
    fn test_years_from_filename_without_tokens() {
        assert_eq!(years_from_filename("metrics.csv"), None);
        // 3-digit runs, 5-digit runs and out-of-range 4-digit runs all miss
        assert_eq!(years_from_filename("q3-199-20256-1776.csv"), None);
    }
}
