use log::debug;

use super::entry::{BundleEntry, CourseEntry, Exclusion, Weighted};
use crate::scheme::{SchemeId, UnknownSchemeError};

/// Which row of the input a contribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    /// 1-based position in the course list
    Course(usize),
    Bundle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryContribution {
    pub source: EntrySource,
    pub credit: String,
    pub grade: String,
    pub outcome: Result<Weighted, Exclusion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputationResult {
    pub scheme: SchemeId,
    /// Weighted average rounded to 2 decimals; 0 when no credit counted
    pub cgpa: f64,
    pub total_credits: f64,
    pub total_grade_points: f64,
    pub breakdown: Vec<EntryContribution>,
}

impl ComputationResult {
    /// Display-ready value with exactly two decimals.
    pub fn display_value(&self) -> String {
        format!("{:.2}", self.cgpa)
    }

    pub fn included_count(&self) -> usize {
        self.breakdown.iter().filter(|c| c.outcome.is_ok()).count()
    }

    pub fn excluded_count(&self) -> usize {
        self.breakdown.len() - self.included_count()
    }
}

/// Round to two decimal places from the exact binary value, so 3.925 (stored
/// as 3.92499...) becomes 3.92.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Compute the CGPA for a scheme identified by name.
pub fn compute(
    scheme_id: &str,
    entries: &[CourseEntry],
    bundle: Option<&BundleEntry>,
) -> Result<ComputationResult, UnknownSchemeError> {
    let scheme = scheme_id.parse::<SchemeId>()?;
    Ok(compute_with(scheme, entries, bundle))
}

/// Compute the CGPA for an already-resolved scheme.
///
/// Entries with unusable credit or a grade outside the scheme are skipped and
/// reported in the breakdown. A bundle with a blank credit or grade is ignored
/// entirely; a filled bundle is subject to the same skip rules as a course.
pub fn compute_with(
    scheme_id: SchemeId,
    entries: &[CourseEntry],
    bundle: Option<&BundleEntry>,
) -> ComputationResult {
    let scheme = scheme_id.scheme();
    let mut total_credits = 0.0;
    let mut total_grade_points = 0.0;
    let mut breakdown = Vec::with_capacity(entries.len() + 1);

    let rows = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (EntrySource::Course(i + 1), e.credit.as_str(), e.grade.as_str(), e.evaluate(scheme)));

    let bundle_row = bundle
        .filter(|b| b.is_filled())
        .map(|b| (EntrySource::Bundle, b.credit.as_str(), b.grade.as_str(), b.evaluate(scheme)));

    for (source, credit, grade, mut outcome) in rows.chain(bundle_row) {
        if let Ok(weighted) = &outcome {
            let credits = total_credits + weighted.credit;
            let grade_points = total_grade_points + weighted.grade_points();
            if credits.is_finite() && grade_points.is_finite() {
                total_credits = credits;
                total_grade_points = grade_points;
            } else {
                // Credit too large to sum
                outcome = Err(Exclusion::InvalidCredit);
            }
        }
        if let Err(reason) = &outcome {
            debug!("Skipping {:?} ({:?}, {:?}): {}", source, credit, grade, reason);
        }
        breakdown.push(EntryContribution {
            source,
            credit: credit.to_string(),
            grade: grade.to_string(),
            outcome,
        });
    }

    let cgpa = if total_credits > 0.0 {
        round2(total_grade_points / total_credits)
    } else {
        0.0
    };

    debug!(
        "{}: {} credits, {} grade points -> {:.2}",
        scheme_id, total_credits, total_grade_points, cgpa
    );

    ComputationResult {
        scheme: scheme_id,
        cgpa,
        total_credits,
        total_grade_points,
        breakdown,
    }
}
