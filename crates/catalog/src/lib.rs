//! # Catalog Crate
//!
//! This crate loads the course dataset into an immutable, typed table.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CourseRecord, Difficulty, Catalog)
//! - **parser**: Parse the CSV dataset into course records
//! - **loader**: Load from disk with a process-lifetime cache
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//!
//! // Load once; later calls for the same file return the same Arc
//! let catalog = Catalog::load("data/coursera_course_dataset_v3.csv")?;
//!
//! for course in catalog.iter().take(3) {
//!     println!("{} ({})", course.title, course.difficulty);
//! }
//! ```

// Public modules
pub mod error;
pub mod loader;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{Catalog, CourseId, CourseRecord, Difficulty};
