use catalog::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/coursera_course_dataset_v3.csv");

    println!("Loading course catalog...\n");

    let start = Instant::now();
    let catalog = Catalog::load(path).expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let cached_start = Instant::now();
    let _again = Catalog::load(path).expect("Failed to reload catalog");
    let cached_elapsed = cached_start.elapsed();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Cached reload: {:?}", cached_elapsed);
    println!("Courses: {}", catalog.len());
    for (difficulty, count) in catalog.difficulty_counts() {
        println!("  {}: {}", difficulty, count);
    }
    println!("\nPerformance: {:.0} courses/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
}
