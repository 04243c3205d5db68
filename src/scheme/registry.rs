//! Fixed grading schemes and their letter-grade to grade-point tables.
//!
//! The set of schemes is closed: every scheme is a `'static` table and is
//! never mutated after startup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::UnknownSchemeError;

/// Identifier of a grading scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SchemeId {
    BracNsu,
    Nwu,
    Public,
    Us,
}

/// Display order for scheme pickers.
const ALL_SCHEMES: [SchemeId; 4] = [SchemeId::BracNsu, SchemeId::Nwu, SchemeId::Public, SchemeId::Us];

impl SchemeId {
    /// Label shown to users, e.g. "BRAC/NSU".
    pub fn label(self) -> &'static str {
        match self {
            SchemeId::BracNsu => "BRAC/NSU",
            SchemeId::Nwu => "NWU",
            SchemeId::Public => "Public",
            SchemeId::Us => "US",
        }
    }

    /// Comma-separated labels of every scheme, in display order.
    pub fn label_list() -> String {
        ALL_SCHEMES
            .iter()
            .map(|id| id.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn scheme(self) -> &'static GradingScheme {
        match self {
            SchemeId::BracNsu => &BRAC_NSU,
            SchemeId::Nwu => &NWU,
            SchemeId::Public => &PUBLIC,
            SchemeId::Us => &US,
        }
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SchemeId {
    type Err = UnknownSchemeError;

    /// Accepts the display label in any case. Separators are ignored so that
    /// "brac-nsu" and "brac_nsu" work on a command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '/' | '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "bracnsu" => Ok(SchemeId::BracNsu),
            "nwu" => Ok(SchemeId::Nwu),
            "public" => Ok(SchemeId::Public),
            "us" => Ok(SchemeId::Us),
            _ => Err(UnknownSchemeError::new(s.trim())),
        }
    }
}

impl TryFrom<String> for SchemeId {
    type Error = UnknownSchemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SchemeId> for String {
    fn from(id: SchemeId) -> Self {
        id.label().to_string()
    }
}

/// Ordered letter-grade table for one scheme.
#[derive(Debug, PartialEq)]
pub struct GradingScheme {
    id: SchemeId,
    grades: &'static [(&'static str, f64)],
}

impl GradingScheme {
    pub fn id(&self) -> SchemeId {
        self.id
    }

    /// Grade-point value for a label, if the label belongs to this scheme.
    /// Labels are matched exactly.
    pub fn points(&self, grade: &str) -> Option<f64> {
        self.grades
            .iter()
            .find(|(label, _)| *label == grade)
            .map(|(_, points)| *points)
    }

    pub fn contains(&self, grade: &str) -> bool {
        self.points(grade).is_some()
    }

    /// First-listed grade; preselected for new entries.
    pub fn default_grade(&self) -> &'static str {
        self.grades[0].0
    }

    pub fn grades(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.grades.iter().map(|(label, _)| *label)
    }

    /// `(label, points)` pairs in declared order.
    pub fn table(&self) -> &'static [(&'static str, f64)] {
        self.grades
    }
}

static BRAC_NSU: GradingScheme = GradingScheme {
    id: SchemeId::BracNsu,
    grades: &[
        ("A", 4.0),
        ("A-", 3.7),
        ("B+", 3.3),
        ("B", 3.0),
        ("B-", 2.7),
        ("C+", 2.3),
        ("C", 2.0),
        ("C-", 1.7),
        ("D+", 1.3),
        ("D", 1.0),
        ("F", 0.0),
    ],
};

static NWU: GradingScheme = GradingScheme {
    id: SchemeId::Nwu,
    grades: &[
        ("A+", 4.0),
        ("A", 3.75),
        ("B+", 3.5),
        ("B", 3.0),
        ("C+", 2.5),
        ("C", 2.25),
        ("D+", 2.0),
        ("D", 1.75),
        ("F", 0.0),
    ],
};

static PUBLIC: GradingScheme = GradingScheme {
    id: SchemeId::Public,
    grades: &[
        ("A+", 4.0),
        ("A", 3.75),
        ("A-", 3.5),
        ("B+", 3.25),
        ("B", 3.0),
        ("B-", 2.75),
        ("C+", 2.5),
        ("C", 2.25),
        ("D", 2.0),
        ("F", 0.0),
    ],
};

static US: GradingScheme = GradingScheme {
    id: SchemeId::Us,
    grades: &[
        ("A", 4.0),
        ("A-", 3.7),
        ("B+", 3.3),
        ("B", 3.0),
        ("B-", 2.7),
        ("C+", 2.3),
        ("C", 2.0),
        ("C-", 1.7),
        ("D+", 1.3),
        ("D", 1.0),
        ("F", 0.0),
    ],
};

/// Look up a scheme by identifier string.
pub fn get(scheme_id: &str) -> Result<&'static GradingScheme, UnknownSchemeError> {
    scheme_id.parse::<SchemeId>().map(SchemeId::scheme)
}

/// Every scheme identifier in fixed display order.
pub fn list_scheme_ids() -> &'static [SchemeId] {
    &ALL_SCHEMES
}

/// Grade labels of a scheme in declared order.
pub fn list_grades(scheme_id: SchemeId) -> Vec<&'static str> {
    scheme_id.scheme().grades().collect()
}
