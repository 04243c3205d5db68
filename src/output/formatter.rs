use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cgpa::{ComputationResult, CourseEntry, EntrySource};
use crate::config::ColorMode;
use crate::scheme::{list_scheme_ids, SchemeId};

/// Resolve the configured color mode against whether stdout is a TTY
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Format a grade-point value with two decimals
pub fn format_points(points: f64) -> String {
    format!("{:.2}", points)
}

/// One line per scheme: "NWU       A+ 4.00, A 3.75, ..."
pub fn format_scheme_list(use_colors: bool) -> String {
    let width = list_scheme_ids()
        .iter()
        .map(|id| id.label().len())
        .max()
        .unwrap_or(0);

    list_scheme_ids()
        .iter()
        .map(|id| {
            let table = id
                .scheme()
                .table()
                .iter()
                .map(|(grade, points)| format!("{} {}", grade, format_points(*points)))
                .collect::<Vec<_>>()
                .join(", ");
            let label = format!("{:<width$}", id.label(), width = width);
            if use_colors {
                format!("{}  {}", label.bold().cyan(), table)
            } else {
                format!("{}  {}", label, table)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Grade labels of a scheme, one per line with points
pub fn format_grades(scheme: SchemeId) -> String {
    scheme
        .scheme()
        .table()
        .iter()
        .map(|(grade, points)| format!("{:<3} {}", grade, format_points(*points)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// "CGPA: 3.67"
pub fn format_result(result: &ComputationResult, use_colors: bool) -> String {
    if use_colors {
        format!("CGPA: {}", result.display_value().bold().green())
    } else {
        format!("CGPA: {}", result.display_value())
    }
}

/// Per-row detail followed by the totals line
pub fn format_breakdown(result: &ComputationResult, use_colors: bool) -> String {
    let mut lines: Vec<String> = result
        .breakdown
        .iter()
        .map(|c| {
            let source = match c.source {
                EntrySource::Course(n) => format!("{:>3}.", n),
                EntrySource::Bundle => "bundle".to_string(),
            };
            let row = format!("{:<6} {:>6}  {:<3}", source, c.credit, c.grade);
            match &c.outcome {
                Ok(weighted) => {
                    let detail = format!(
                        "{} x {} = {}",
                        weighted.credit,
                        format_points(weighted.points),
                        format_points(weighted.grade_points())
                    );
                    if use_colors {
                        format!("{}  {}", row, detail.green())
                    } else {
                        format!("{}  {}", row, detail)
                    }
                }
                Err(reason) => {
                    let detail = format!("skipped: {}", reason);
                    if use_colors {
                        format!("{}  {}", row.dimmed(), detail.yellow())
                    } else {
                        format!("{}  {}", row, detail)
                    }
                }
            }
        })
        .collect();

    lines.push(format!(
        "{}: {} credits, {} grade points ({} counted, {} skipped)",
        result.scheme,
        result.total_credits,
        format_points(result.total_grade_points),
        result.included_count(),
        result.excluded_count()
    ));
    lines.join("\n")
}

/// Numbered course rows for the interactive form
pub fn format_course_list(courses: &[CourseEntry], use_colors: bool) -> String {
    if courses.is_empty() {
        return "No courses yet.".to_string();
    }

    courses
        .iter()
        .enumerate()
        .map(|(idx, course)| {
            let index_str = format!("{:>3}.", idx + 1);
            let credit = if course.credit.is_empty() { "-" } else { course.credit.as_str() };
            if use_colors {
                format!("{} {:>6}  {}", index_str.dimmed(), credit, course.grade.bold())
            } else {
                format!("{} {:>6}  {}", index_str, credit, course.grade)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct ResultJson<'a> {
    scheme: &'a str,
    cgpa: f64,
    total_credits: f64,
    total_grade_points: f64,
    counted: usize,
    skipped: usize,
}

/// Machine-readable result for scripting
pub fn format_json(result: &ComputationResult) -> Result<String> {
    let json = ResultJson {
        scheme: result.scheme.label(),
        cgpa: result.cgpa,
        total_credits: result.total_credits,
        total_grade_points: result.total_grade_points,
        counted: result.included_count(),
        skipped: result.excluded_count(),
    };
    serde_json::to_string(&json).context("Failed to serialize result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgpa::{compute_with, BundleEntry};

    fn nwu_example() -> ComputationResult {
        let entries = vec![
            CourseEntry::new("3", "A"),
            CourseEntry::new("1.5", "B+"),
            CourseEntry::new("2", "Z"),
        ];
        compute_with(SchemeId::Nwu, &entries, None)
    }

    #[test]
    fn test_format_result_two_decimals() {
        let result = compute_with(SchemeId::Public, &[], Some(&BundleEntry::new("30", "A-")));
        assert_eq!(format_result(&result, false), "CGPA: 3.50");
    }

    #[test]
    fn test_format_result_zero() {
        let result = compute_with(SchemeId::Us, &[], None);
        assert_eq!(format_result(&result, false), "CGPA: 0.00");
    }

    #[test]
    fn test_format_scheme_list() {
        let output = format_scheme_list(false);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("BRAC/NSU"));
        assert!(lines[1].starts_with("NWU "));
        assert!(lines[1].contains("A+ 4.00, A 3.75"));
        assert!(lines[3].starts_with("US "));
    }

    #[test]
    fn test_format_grades() {
        let output = format_grades(SchemeId::Nwu);
        let first = output.lines().next().unwrap();
        assert_eq!(first, "A+  4.00");
        assert_eq!(output.lines().count(), 9);
    }

    #[test]
    fn test_format_breakdown() {
        let output = format_breakdown(&nwu_example(), false);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("3 x 3.75 = 11.25"));
        assert!(lines[2].contains("skipped: grade not in selected scheme"));
        assert!(lines[3].contains("4.5 credits"));
        assert!(lines[3].contains("2 counted, 1 skipped"));
    }

    #[test]
    fn test_format_course_list() {
        let courses = vec![CourseEntry::new("3", "A"), CourseEntry::new("", "A+")];
        let output = format_course_list(&courses, false);
        assert_eq!(output, "  1.      3  A\n  2.      -  A+");
        assert_eq!(format_course_list(&[], false), "No courses yet.");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&nwu_example()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scheme"], "NWU");
        assert_eq!(value["cgpa"], 3.67);
        assert_eq!(value["total_credits"], 4.5);
        assert_eq!(value["skipped"], 1);
    }

    #[test]
    fn test_color_mode_overrides() {
        assert!(should_use_colors(ColorMode::Always));
        assert!(!should_use_colors(ColorMode::Never));
    }
}
