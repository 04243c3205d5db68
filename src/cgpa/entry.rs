use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::scheme::GradingScheme;

/// One course row as entered: credit text and a grade label.
///
/// Credit is kept as raw text so a half-typed or non-numeric value can sit in
/// the list without being rejected; it is only interpreted at compute time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CourseEntry {
    #[serde(default, deserialize_with = "text_or_number")]
    pub credit: String,

    #[serde(default)]
    pub grade: String,
}

/// Previously earned aggregate credit, folded in like a course.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BundleEntry {
    #[serde(default, deserialize_with = "text_or_number")]
    pub credit: String,

    #[serde(default)]
    pub grade: String,
}

impl CourseEntry {
    pub fn new(credit: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            credit: credit.into(),
            grade: grade.into(),
        }
    }

    /// Parse "CREDIT:GRADE". Without a colon the whole input is the credit and
    /// the grade is left blank.
    pub fn from_pair(s: &str) -> Self {
        let (credit, grade) = split_pair(s);
        Self::new(credit, grade)
    }

    pub fn evaluate(&self, scheme: &GradingScheme) -> Result<Weighted, Exclusion> {
        evaluate(&self.credit, &self.grade, scheme)
    }
}

impl BundleEntry {
    pub fn new(credit: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            credit: credit.into(),
            grade: grade.into(),
        }
    }

    pub fn from_pair(s: &str) -> Self {
        let (credit, grade) = split_pair(s);
        Self::new(credit, grade)
    }

    /// A bundle only takes part when both fields were filled in.
    pub fn is_filled(&self) -> bool {
        !self.credit.trim().is_empty() && !self.grade.trim().is_empty()
    }

    pub fn evaluate(&self, scheme: &GradingScheme) -> Result<Weighted, Exclusion> {
        evaluate(&self.credit, &self.grade, scheme)
    }
}

fn split_pair(s: &str) -> (&str, &str) {
    match s.split_once(':') {
        Some((credit, grade)) => (credit.trim(), grade.trim()),
        None => (s.trim(), ""),
    }
}

/// Credit and grade point of an entry that takes part in the average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighted {
    pub credit: f64,
    pub points: f64,
}

impl Weighted {
    pub fn grade_points(&self) -> f64 {
        self.credit * self.points
    }
}

/// Why an entry was left out of the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    MissingCredit,
    InvalidCredit,
    MissingGrade,
    UnknownGrade,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Exclusion::MissingCredit => "no credit entered",
            Exclusion::InvalidCredit => "credit is not a non-negative number",
            Exclusion::MissingGrade => "no grade selected",
            Exclusion::UnknownGrade => "grade not in selected scheme",
        };
        f.write_str(reason)
    }
}

/// Interpret credit text. Blank is missing; anything that is not a finite,
/// non-negative number is invalid.
pub fn parse_credit(raw: &str) -> Result<f64, Exclusion> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Exclusion::MissingCredit);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(Exclusion::InvalidCredit),
    }
}

fn evaluate(credit: &str, grade: &str, scheme: &GradingScheme) -> Result<Weighted, Exclusion> {
    let credit = parse_credit(credit)?;
    if grade.is_empty() {
        return Err(Exclusion::MissingGrade);
    }
    let points = scheme.points(grade).ok_or(Exclusion::UnknownGrade)?;
    Ok(Weighted { credit, points })
}

/// Accept either YAML numbers or strings for free-text numeric fields.
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Int(n) => n.to_string(),
        TextOrNumber::Float(n) => n.to_string(),
        TextOrNumber::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::SchemeId;

    #[test]
    fn test_parse_credit_accepts_fractions() {
        assert_eq!(parse_credit("3"), Ok(3.0));
        assert_eq!(parse_credit("0.75"), Ok(0.75));
        assert_eq!(parse_credit(" 1.5 "), Ok(1.5));
        assert_eq!(parse_credit("0"), Ok(0.0));
    }

    #[test]
    fn test_parse_credit_rejects_garbage() {
        assert_eq!(parse_credit(""), Err(Exclusion::MissingCredit));
        assert_eq!(parse_credit("   "), Err(Exclusion::MissingCredit));
        assert_eq!(parse_credit("three"), Err(Exclusion::InvalidCredit));
        assert_eq!(parse_credit("-3"), Err(Exclusion::InvalidCredit));
        assert_eq!(parse_credit("NaN"), Err(Exclusion::InvalidCredit));
        assert_eq!(parse_credit("inf"), Err(Exclusion::InvalidCredit));
    }

    #[test]
    fn test_from_pair() {
        let entry = CourseEntry::from_pair("1.5:B+");
        assert_eq!(entry, CourseEntry::new("1.5", "B+"));

        let entry = CourseEntry::from_pair(" 3 : A- ");
        assert_eq!(entry, CourseEntry::new("3", "A-"));

        let entry = CourseEntry::from_pair("3");
        assert_eq!(entry, CourseEntry::new("3", ""));
    }

    #[test]
    fn test_evaluate_valid_entry() {
        let entry = CourseEntry::new("3", "A");
        let weighted = entry.evaluate(SchemeId::Nwu.scheme()).unwrap();
        assert_eq!(weighted.credit, 3.0);
        assert_eq!(weighted.points, 3.75);
        assert_eq!(weighted.grade_points(), 11.25);
    }

    #[test]
    fn test_evaluate_exclusions() {
        let scheme = SchemeId::BracNsu.scheme();
        assert_eq!(
            CourseEntry::new("3", "Z").evaluate(scheme),
            Err(Exclusion::UnknownGrade)
        );
        assert_eq!(
            CourseEntry::new("3", "").evaluate(scheme),
            Err(Exclusion::MissingGrade)
        );
        assert_eq!(
            CourseEntry::new("x", "A").evaluate(scheme),
            Err(Exclusion::InvalidCredit)
        );
        assert_eq!(
            CourseEntry::new("", "A").evaluate(scheme),
            Err(Exclusion::MissingCredit)
        );
    }

    #[test]
    fn test_bundle_is_filled() {
        assert!(BundleEntry::new("30", "A-").is_filled());
        assert!(!BundleEntry::new("", "A-").is_filled());
        assert!(!BundleEntry::new("30", " ").is_filled());
    }

    #[test]
    fn test_entry_yaml_accepts_numbers_and_strings() {
        let yaml = r#"
- credit: 3
  grade: "A"
- credit: 1.5
  grade: "B+"
- credit: "0.75"
  grade: "C"
- grade: "F"
"#;
        let entries: Vec<CourseEntry> = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(entries[0].credit, "3");
        assert_eq!(entries[1].credit, "1.5");
        assert_eq!(entries[2].credit, "0.75");
        assert_eq!(entries[3].credit, "");
        assert_eq!(entries[3].grade, "F");
    }
}
