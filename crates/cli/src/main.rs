use advisor::{AdvisorConfig, DEFAULT_CATALOG_PATH, DEFAULT_TOP_N, LearningPath, LearningPathAdvisor};
use anyhow::{Context, Result, bail};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use colored::Colorize;
use embedder::EmbedderKind;
use recommender::{LearnerProfile, RankedCourse, TargetRole, write_export_file};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// LearnPath - course recommendations for a career goal
#[derive(Parser)]
#[command(name = "learnpath")]
#[command(about = "Recommends courses by semantic similarity to a learner profile", long_about = None)]
struct Cli {
    /// Path to the course dataset CSV
    #[arg(short, long, env = "LEARNPATH_CATALOG", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Embedding backend: hashing or minilm
    #[arg(long, env = "LEARNPATH_EMBEDDER", default_value_t = EmbedderKind::preferred())]
    embedder: EmbedderKind,

    /// Directory for downloaded model weights
    #[arg(long, env = "LEARNPATH_MODEL_CACHE")]
    model_cache: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend courses for a learner profile
    Recommend {
        /// Career goal, e.g. "I want to move into analytics"
        #[arg(long)]
        goal: String,

        /// Current skills, comma separated
        #[arg(long)]
        skills: String,

        /// Target role (Data Analyst, Backend Developer, Project Manager, AI Engineer, UX Designer)
        #[arg(long)]
        role: TargetRole,

        /// Hours per week available for study
        #[arg(long, default_value = "6")]
        hours: u8,

        /// Number of courses to recommend
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Also write the recommendations to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the learning path as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show catalog size and difficulty breakdown
    Catalog,

    /// Search for courses by title
    Search {
        /// Course title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Courses per request
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AdvisorConfig {
        catalog_path: cli.catalog.clone(),
        embedder: cli.embedder,
        model_cache_dir: cli.model_cache.clone(),
        ..AdvisorConfig::default()
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            goal,
            skills,
            role,
            hours,
            top_n,
            export,
            json,
        } => {
            let profile = LearnerProfile::new(goal, skills, role).with_weekly_hours(hours);
            handle_recommend(config, profile, top_n, export, json).await?
        }
        Commands::Catalog => handle_catalog(&cli.catalog)?,
        Commands::Search { title } => handle_search(&cli.catalog, &title)?,
        Commands::Benchmark { requests, top_n } => {
            handle_benchmark(config, requests, top_n).await?
        }
    }

    Ok(())
}

/// Start the advisor, printing how long it took
async fn start_advisor(config: AdvisorConfig) -> Result<LearningPathAdvisor> {
    println!(
        "Loading courses from {} with the {} embedder...",
        config.catalog_path.display(),
        config.embedder
    );
    let start = Instant::now();
    let advisor = LearningPathAdvisor::new(config)
        .await
        .context("Failed to start the learning path advisor")?;
    println!(
        "{} Indexed {} courses in {:?}",
        "✓".green(),
        advisor.catalog().len(),
        start.elapsed()
    );
    Ok(advisor)
}

fn load_catalog(path: &Path) -> Result<Arc<Catalog>> {
    Catalog::load(path).with_context(|| format!("Failed to load course catalog {}", path.display()))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    config: AdvisorConfig,
    profile: LearnerProfile,
    top_n: usize,
    export: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let advisor = start_advisor(config).await?;

    let path = advisor.get_learning_path(&profile, Some(top_n)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&path)?);
    } else {
        print_learning_path(&path);
    }

    if let Some(export_path) = export {
        write_export_file(&path.recommendations, &export_path)
            .with_context(|| format!("Failed to export to {}", export_path.display()))?;
        println!(
            "{} Saved {} courses to {}",
            "✓".green(),
            path.recommendations.len(),
            export_path.display()
        );
    }
    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog(path: &Path) -> Result<()> {
    let catalog = load_catalog(path)?;

    println!("{}", format!("Catalog: {}", path.display()).bold().blue());
    println!("{}Courses: {}", "• ".green(), catalog.len());
    println!("By difficulty:");
    for (difficulty, count) in catalog.difficulty_counts() {
        println!("  - {}: {}", difficulty, count);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(path: &Path, title: &str) -> Result<()> {
    let catalog = load_catalog(path)?;
    let matches = catalog.search_title(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("No courses found");
        return Ok(());
    }
    // Display top 20 results
    for (index, course) in matches.iter().take(20) {
        println!(
            "{}: {} - {} [{}] rating {}",
            index,
            course.title,
            or_dash(&course.organization),
            course.difficulty,
            course
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string())
        );
    }
    if matches.len() > 20 {
        println!("... and {} more", matches.len() - 20);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(config: AdvisorConfig, requests: usize, top_n: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let advisor = start_advisor(config).await?;

    const SKILL_POOL: [&str; 8] = [
        "Python", "SQL", "Excel", "Java", "Communication", "Statistics", "Figma", "Docker",
    ];

    // Random role and skill pair per request
    let profiles: Vec<LearnerProfile> = (0..requests)
        .map(|_| {
            let role = TargetRole::ALL[rand::random::<u32>() as usize % TargetRole::ALL.len()];
            let first = SKILL_POOL[rand::random::<u32>() as usize % SKILL_POOL.len()];
            let second = SKILL_POOL[rand::random::<u32>() as usize % SKILL_POOL.len()];
            LearnerProfile::new(
                format!("I want to grow into a {} role", role),
                format!("{}, {}", first, second),
                role,
            )
        })
        .collect();

    info!("Running {} benchmark requests", requests);
    let wall_clock = Instant::now();

    // Use tokio::spawn to make concurrent requests
    let mut handles = vec![];
    for profile in profiles {
        let advisor = advisor.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            advisor.get_learning_path(&profile, Some(top_n)).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }
    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    let summary = LatencySummary::from_timings(&mut timings)
        .context("No benchmark timings were collected")?;
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", requests);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", summary.avg);
    println!("P50 latency: {:?}", summary.p50);
    println!("P95 latency: {:?}", summary.p95);
    println!("P99 latency: {:?}", summary.p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Latency percentiles over a set of request timings
#[derive(Debug, PartialEq)]
struct LatencySummary {
    avg: Duration,
    p50: Duration,
    p95: Duration,
    p99: Duration,
}

impl LatencySummary {
    /// Sorts `timings` in place; None if there are none
    fn from_timings(timings: &mut [Duration]) -> Option<Self> {
        if timings.is_empty() {
            return None;
        }
        timings.sort();

        let total: Duration = timings.iter().sum();
        let percentile = |p: f64| {
            let index = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
            timings[index]
        };

        Some(Self {
            avg: total / timings.len() as u32,
            p50: percentile(0.50),
            p95: percentile(0.95),
            p99: percentile(0.99),
        })
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

/// Helper function to format and print a learning path
fn print_learning_path(path: &LearningPath) {
    println!(
        "{}",
        format!("Learning path for {}:", path.target_role).bold().blue()
    );
    println!("Profile: {}", path.profile_text.italic());
    println!("Weekly hours: {}", path.weekly_hours);

    if path.recommendations.is_empty() {
        println!("No recommended courses");
        return;
    }
    for (rank, ranked) in path.recommendations.iter().enumerate() {
        print_course(rank + 1, ranked);
    }
}

fn print_course(rank: usize, ranked: &RankedCourse) {
    let course = &ranked.course;
    println!(
        "{}. {} - Similarity: {:.2}",
        rank.to_string().green(),
        course.title.bold(),
        ranked.score
    );
    println!("   Organization: {}", or_dash(&course.organization));
    println!("   Skills: {}", or_dash(&course.skill_list().join(", ")));
    println!("   Difficulty: {}", course.difficulty);
    println!(
        "   Rating: {}",
        course
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "   Students enrolled: {}",
        course
            .enrolled_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("   Duration: {}", or_dash(&course.duration));
    println!("   URL: {}", or_dash(&course.url).cyan());
}
