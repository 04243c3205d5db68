use serde::{Deserialize, Serialize};

use crate::cgpa::entry::text_or_number;
use crate::cgpa::CourseEntry;
use crate::scheme::SchemeId;

/// Credit values offered for bulk entry when nothing is configured.
pub const DEFAULT_BATCH_CREDITS: [f64; 3] = [3.0, 1.5, 0.75];

/// "N courses worth C credits each", as typed into the bulk-entry form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourseBatch {
    #[serde(default, deserialize_with = "text_or_number")]
    pub count: String,

    #[serde(default, deserialize_with = "text_or_number")]
    pub credit: String,
}

impl CourseBatch {
    pub fn new(count: impl Into<String>, credit: impl Into<String>) -> Self {
        Self {
            count: count.into(),
            credit: credit.into(),
        }
    }

    /// Blank count, preset credit.
    pub fn with_credit(credit: f64) -> Self {
        Self::new("", credit.to_string())
    }

    /// Parsed course count; blank or non-numeric is 0, fractions truncate.
    pub fn count_value(&self) -> usize {
        let raw = self.count.trim();
        raw.parse::<i64>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
            .unwrap_or(0)
            .max(0) as usize
    }

    /// Parsed credit; blank or non-numeric is 0.
    pub fn credit_value(&self) -> f64 {
        self.credit
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

/// Blank batches for the given preset credit values.
pub fn default_batches(credits: &[f64]) -> Vec<CourseBatch> {
    credits.iter().map(|c| CourseBatch::with_credit(*c)).collect()
}

/// Expand batches into course rows carrying the scheme's default grade.
pub fn expand_batches(batches: &[CourseBatch], scheme: SchemeId) -> Vec<CourseEntry> {
    let grade = scheme.scheme().default_grade();
    batches
        .iter()
        .flat_map(|batch| {
            let credit = batch.credit_value().to_string();
            std::iter::repeat(CourseEntry::new(credit, grade)).take(batch.count_value())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_batches() {
        let batches = vec![
            CourseBatch::new("2", "3"),
            CourseBatch::new("1", "1.5"),
            CourseBatch::new("", "0.75"),
        ];
        let entries = expand_batches(&batches, SchemeId::Nwu);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], CourseEntry::new("3", "A+"));
        assert_eq!(entries[1], CourseEntry::new("3", "A+"));
        assert_eq!(entries[2], CourseEntry::new("1.5", "A+"));
    }

    #[test]
    fn test_default_grade_follows_scheme() {
        let batches = vec![CourseBatch::new("1", "3")];
        let entries = expand_batches(&batches, SchemeId::Us);
        assert_eq!(entries[0].grade, "A");
    }

    #[test]
    fn test_non_numeric_count_is_zero() {
        assert_eq!(CourseBatch::new("abc", "3").count_value(), 0);
        assert_eq!(CourseBatch::new("", "3").count_value(), 0);
        assert_eq!(CourseBatch::new("-2", "3").count_value(), 0);
        assert_eq!(CourseBatch::new("2.9", "3").count_value(), 2);
    }

    #[test]
    fn test_non_numeric_credit_is_zero() {
        let batches = vec![CourseBatch::new("2", "lots")];
        let entries = expand_batches(&batches, SchemeId::BracNsu);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.credit == "0"));
    }

    #[test]
    fn test_large_count_expands_fully() {
        let entries = expand_batches(&[CourseBatch::new("600", "1")], SchemeId::Us);
        assert_eq!(entries.len(), 600);
    }

    #[test]
    fn test_default_batches() {
        let batches = default_batches(&DEFAULT_BATCH_CREDITS);
        let credits: Vec<_> = batches.iter().map(|b| b.credit.as_str()).collect();
        assert_eq!(credits, vec!["3", "1.5", "0.75"]);
        assert!(batches.iter().all(|b| b.count.is_empty()));
    }

    #[test]
    fn test_batch_yaml_parse() {
        let yaml = r#"
- count: 4
  credit: 3
- count: "2"
  credit: 1.5
"#;
        let batches: Vec<CourseBatch> = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(batches[0], CourseBatch::new("4", "3"));
        assert_eq!(batches[1], CourseBatch::new("2", "1.5"));
    }
}
