//! Tabular export of recommendations.
//!
//! Columns: Title, Skills, Difficulty, Ratings, course_url, Duration.
//! The header row is written even when there are no results.

use crate::error::ExportError;
use crate::ranking::RankedCourse;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const EXPORT_HEADER: [&str; 6] = [
    "Title",
    "Skills",
    "Difficulty",
    "Ratings",
    "course_url",
    "Duration",
];

#[derive(Serialize)]
struct ExportRow<'a> {
    title: &'a str,
    skills: &'a str,
    difficulty: String,
    rating: Option<f32>,
    url: &'a str,
    duration: &'a str,
}

impl<'a> From<&'a RankedCourse> for ExportRow<'a> {
    fn from(ranked: &'a RankedCourse) -> Self {
        let course = &ranked.course;
        Self {
            title: &course.title,
            skills: &course.skills,
            difficulty: course.difficulty.label().to_string(),
            rating: course.rating,
            url: &course.url,
            duration: &course.duration,
        }
    }
}

/// Write `results` as CSV to `writer`
pub fn export_csv<W: Write>(results: &[RankedCourse], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_HEADER)?;
    for ranked in results {
        csv_writer.serialize(ExportRow::from(ranked))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render `results` as CSV bytes, e.g. for a download
pub fn export_csv_bytes(results: &[RankedCourse]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    export_csv(results, &mut buffer)?;
    Ok(buffer)
}

/// Write the export to a file at `path`, replacing any existing file
pub fn write_export_file(results: &[RankedCourse], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    export_csv(results, file)?;
    info!("Exported {} courses to {}", results.len(), path.display());
    Ok(())
}
