pub mod engine;
pub mod entry;

pub use engine::{compute, compute_with, round2, ComputationResult, EntryContribution, EntrySource};
pub use entry::{parse_credit, BundleEntry, CourseEntry, Exclusion, Weighted};
