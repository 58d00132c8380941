//! Core domain types for the course catalog.
//!
//! A catalog is an ordered list of course records. A record has no
//! primary key of its own: its identity is its position in the catalog
//! it was loaded into, and that position is what ranking results point
//! back to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a course in its catalog (0-based)
pub type CourseId = usize;

// =============================================================================
// Course Types
// =============================================================================

/// One course offered in the catalog.
///
/// Records are created once when the catalog is loaded and never mutated
/// afterwards. Numeric columns are optional because the source data has
/// gaps; text columns default to empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub title: String,
    pub organization: String,
    /// Free-text description. Guaranteed non-blank for records in a `Catalog`.
    pub description: String,
    /// Comma-separated skill keywords as written in the source
    pub skills: String,
    pub difficulty: Difficulty,
    /// Average learner rating, usually on a 0-5 scale
    pub rating: Option<f32>,
    pub enrolled_count: Option<u64>,
    /// Human readable duration, e.g. "1 - 3 Months"
    pub duration: String,
    pub url: String,
}

impl CourseRecord {
    /// Build a record with only a title and description set.
    ///
    /// Handy for tests and for ad-hoc catalogs; every other field is empty.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            organization: String::new(),
            description: description.into(),
            skills: String::new(),
            difficulty: Difficulty::Unspecified,
            rating: None,
            enrolled_count: None,
            duration: String::new(),
            url: String::new(),
        }
    }

    /// Skill keywords split on commas, trimmed, blanks removed
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Course difficulty as labelled in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    /// The dataset's "Mixed" label: suitable for several levels
    Mixed,
    /// The column was empty
    Unspecified,
    /// Any label we don't recognise, kept verbatim
    Other(String),
}

impl Difficulty {
    /// Parse a difficulty label (case-insensitive, surrounding whitespace ignored).
    ///
    /// Unknown labels are preserved as `Other` rather than rejected.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "nan" => Difficulty::Unspecified,
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            "mixed" => Difficulty::Mixed,
            _ => Difficulty::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Mixed => "Mixed",
            Difficulty::Unspecified => "",
            Difficulty::Other(label) => label,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Unspecified => f.write_str("Unspecified"),
            other => f.write_str(other.label()),
        }
    }
}

// =============================================================================
// Catalog - The In-Memory Course Table
// =============================================================================

/// The immutable, ordered table of courses available for recommendation.
///
/// Built once per source and shared behind an `Arc` for the life of the
/// process. There are no mutators, so a `CourseId` stays valid.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) courses: Vec<CourseRecord>,
    pub(crate) source: Option<PathBuf>,
}

impl Catalog {
    /// Build a catalog from records, dropping any with a blank description.
    pub fn from_records(records: impl IntoIterator<Item = CourseRecord>) -> Self {
        let courses = records
            .into_iter()
            .filter(|course| has_description(&course.description))
            .collect();
        Self {
            courses,
            source: None,
        }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Get a course by its catalog position
    pub fn get(&self, index: CourseId) -> Option<&CourseRecord> {
        self.courses.get(index)
    }

    /// All courses in catalog order
    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseRecord> {
        self.courses.iter()
    }

    /// Course descriptions in catalog order, ready to hand to an embedder
    pub fn descriptions(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.description.as_str()).collect()
    }

    /// File the catalog was loaded from, if it came from disk
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of courses per difficulty label
    pub fn difficulty_counts(&self) -> BTreeMap<Difficulty, usize> {
        let mut counts = BTreeMap::new();
        for course in &self.courses {
            *counts.entry(course.difficulty.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Case-insensitive title search.
    ///
    /// Exact title matches come first, then substring matches. Within each
    /// group courses are ordered by rating (highest first, unrated last),
    /// then by catalog position.
    pub fn search_title(&self, query: &str) -> Vec<(CourseId, &CourseRecord)> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, CourseId, &CourseRecord)> = self
            .courses
            .iter()
            .enumerate()
            .filter_map(|(index, course)| {
                let title = course.title.to_lowercase();
                if title == needle {
                    Some((0, index, course))
                } else if title.contains(&needle) {
                    Some((1, index, course))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| {
                    let ra = a.2.rating.unwrap_or(f32::NEG_INFINITY);
                    let rb = b.2.rating.unwrap_or(f32::NEG_INFINITY);
                    rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.1.cmp(&b.1))
        });

        matches
            .into_iter()
            .map(|(_, index, course)| (index, course))
            .collect()
    }
}

pub(crate) fn has_description(description: &str) -> bool {
    let trimmed = description.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("nan")
}
