//! Parser for the course dataset.
//!
//! The dataset is a CSV file with a header row. Only the columns below are
//! read; any others are ignored:
//!
//! Title, Organization, course_description, Skills, Difficulty, Ratings,
//! course_students_enrolled, Duration, course_url
//!
//! Rows with a blank description are dropped here, so every record that
//! reaches a `Catalog` has something to embed.

use crate::error::{CatalogError, Result};
use crate::types::{has_description, CourseRecord, Difficulty};
use csv::StringRecord;
use std::io::Read;
use tracing::debug;

pub const TITLE: &str = "Title";
pub const ORGANIZATION: &str = "Organization";
pub const DESCRIPTION: &str = "course_description";
pub const SKILLS: &str = "Skills";
pub const DIFFICULTY: &str = "Difficulty";
pub const RATINGS: &str = "Ratings";
pub const ENROLLED: &str = "course_students_enrolled";
pub const DURATION: &str = "Duration";
pub const URL: &str = "course_url";

/// Header positions of the columns a course record is built from
#[derive(Debug, Clone, Copy)]
struct Columns {
    title: usize,
    organization: usize,
    description: usize,
    skills: usize,
    difficulty: usize,
    ratings: usize,
    enrolled: usize,
    duration: usize,
    url: usize,
}

impl Columns {
    fn locate(headers: &StringRecord, source_label: &str) -> Result<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| CatalogError::MissingColumn {
                    source_label: source_label.to_string(),
                    column,
                })
        };

        Ok(Self {
            title: find(TITLE)?,
            organization: find(ORGANIZATION)?,
            description: find(DESCRIPTION)?,
            skills: find(SKILLS)?,
            difficulty: find(DIFFICULTY)?,
            ratings: find(RATINGS)?,
            enrolled: find(ENROLLED)?,
            duration: find(DURATION)?,
            url: find(URL)?,
        })
    }
}

/// Parse course records from CSV data.
///
/// `source_label` only appears in error messages and logs.
/// Rows whose description is empty, whitespace or the literal `nan` are
/// skipped; order of the remaining rows is preserved.
pub fn parse_courses<R: Read>(reader: R, source_label: &str) -> Result<Vec<CourseRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| CatalogError::from_csv(source_label, e))?
        .clone();
    let columns = Columns::locate(&headers, source_label)?;

    let mut courses = Vec::new();
    let mut dropped = 0usize;
    let mut record = StringRecord::new();

    loop {
        let more = csv_reader
            .read_record(&mut record)
            .map_err(|e| CatalogError::from_csv(source_label, e))?;
        if !more {
            break;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let description = field(columns.description);
        if !has_description(description) {
            dropped += 1;
            continue;
        }

        courses.push(CourseRecord {
            title: field(columns.title).to_string(),
            organization: field(columns.organization).to_string(),
            description: description.to_string(),
            skills: field(columns.skills).to_string(),
            difficulty: Difficulty::parse(field(columns.difficulty)),
            rating: parse_rating(field(columns.ratings), line),
            enrolled_count: parse_enrolled(field(columns.enrolled), line),
            duration: field(columns.duration).to_string(),
            url: field(columns.url).to_string(),
        });
    }

    debug!(
        source = source_label,
        kept = courses.len(),
        dropped,
        "parsed course rows"
    );
    Ok(courses)
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("nan")
}

/// Parse the Ratings column
///
/// Example: "4.8" -> Some(4.8), "" -> None
fn parse_rating(value: &str, line: u64) -> Option<f32> {
    if is_missing(value) {
        return None;
    }
    match value.parse::<f32>() {
        Ok(rating) if rating.is_finite() => Some(rating),
        _ => {
            debug!(line, value, "unparseable rating, leaving empty");
            None
        }
    }
}

/// Parse the enrolled-students column
///
/// Example: "1,234,567" -> Some(1234567), "12k" -> Some(12000),
///          "1.5M" -> Some(1500000), "12345.0" -> Some(12345)
fn parse_enrolled(value: &str, line: u64) -> Option<u64> {
    if is_missing(value) {
        return None;
    }

    let cleaned: String = value
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();
    let (number, multiplier) = match cleaned.chars().last() {
        Some('k') | Some('K') => (&cleaned[..cleaned.len() - 1], 1_000.0),
        Some('m') | Some('M') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    match number.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Some((n * multiplier).round() as u64),
        _ => {
            debug!(line, value, "unparseable enrolment count, leaving empty");
            None
        }
    }
}
