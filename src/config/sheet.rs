use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cgpa::{BundleEntry, CourseEntry};
use crate::scheme::{SchemeId, UnknownSchemeError};
use crate::session::{CourseBatch, Session};

/// A course list read from a YAML file for one-shot computation.
///
/// Example YAML:
/// ```yaml
/// scheme: NWU
/// batches:
///   - { count: 4, credit: 3 }
/// courses:
///   - { credit: 3, grade: "A" }
///   - { credit: 1.5, grade: "B+" }
/// bundle: { credit: 30, grade: "A-" }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CourseSheet {
    #[serde(default)]
    pub scheme: Option<String>,

    /// Bulk rows, expanded before `courses` with the scheme's default grade
    #[serde(default)]
    pub batches: Vec<CourseBatch>,

    #[serde(default)]
    pub courses: Vec<CourseEntry>,

    #[serde(default)]
    pub bundle: Option<BundleEntry>,
}

impl CourseSheet {
    /// Build a session. `scheme_override` wins over the sheet's own scheme,
    /// which wins over `fallback`.
    pub fn into_session(
        self,
        scheme_override: Option<SchemeId>,
        fallback: SchemeId,
    ) -> Result<Session, UnknownSchemeError> {
        let scheme = match (scheme_override, &self.scheme) {
            (Some(id), _) => id,
            (None, Some(name)) => name.parse::<SchemeId>()?,
            (None, None) => fallback,
        };

        let mut session = Session::new(scheme);
        session.initialize(&self.batches);
        for entry in self.courses {
            session.push_course(entry);
        }
        if let Some(bundle) = self.bundle {
            session.set_bundle(bundle);
        }
        Ok(session)
    }
}

/// Load a course sheet from a YAML file.
pub fn load_sheet(path: &Path) -> Result<CourseSheet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read course sheet at {}", path.display()))?;

    let sheet: CourseSheet = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse course sheet: invalid YAML in {}", path.display()))?;

    Ok(sheet)
}
