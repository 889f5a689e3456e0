use clap::Parser;
use dialoguer::Input;
use elector_dedupe::{cli, config, error, export, loader, matcher};

use cli::{Cli, Commands};
use config::Config;
use error::{ElectorError, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use matcher::{clamp_threshold, compare_snapshots, CompareOptions, ComparisonOutcome, Reporter};
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();
    let config = Config::load()?;

    match cli.command {
        Commands::Run { input, threshold, output } => {
            println!("🗳  elector-dedupe - duplicate search\n");

            let input = match input {
                Some(path) => path,
                None => prompt_for_workbook()?,
            };
            let threshold = clamp_threshold(threshold.unwrap_or(config.default_threshold));

            // 1. Load
            println!("[1/3] Loading workbook...");
            let (snapshot_2025, snapshot_2002) = loader::load_workbook(&input)?;
            println!(
                "✔ {}: {} rows, {}: {} rows (after cleaning)\n",
                snapshot_2025.name(),
                snapshot_2025.len(),
                snapshot_2002.name(),
                snapshot_2002.len()
            );

            // 2. Compare
            println!("[2/3] Comparing names... (threshold {}%)", threshold);
            let reporter = ConsoleReporter::new();
            let mut outcome = compare_snapshots(
                &snapshot_2025,
                &snapshot_2002,
                &CompareOptions { threshold },
                &reporter,
            );
            println!("✔ Found {} potential duplicates\n", outcome.matches.len());

            print_summary(&outcome, threshold);

            // 3. Export
            println!("[3/3] Exporting results...");
            let output_path = output.unwrap_or_else(|| export::default_output_path(&input));
            export::export_results(&mut outcome, threshold, &output_path)?;
            println!("✔ Report saved: {}\n", output_path.display());

            print_sample(&outcome);

            println!("✅ Analysis complete");
        }

        Commands::Check { input } => {
            println!("🔍 elector-dedupe - workbook check\n");

            let (snapshot_2025, snapshot_2002) = loader::load_workbook(&input)?;
            for snapshot in [&snapshot_2025, &snapshot_2002] {
                println!("{}:", snapshot.name());
                println!("  Rows (after cleaning): {}", snapshot.len());
                println!("  Columns: {}", snapshot.columns().join(", "));
            }

            match matcher::detect_primary_key(&snapshot_2025, &snapshot_2002) {
                Some(column) => println!("\nPrimary key column: '{}'", column),
                None => {
                    println!("\nNo primary key column detected; duplicate ids will be sequential")
                }
            }

            println!("\n✅ Workbook is usable");
        }

        Commands::Config { set_threshold, show } => {
            let mut config = config;

            if let Some(threshold) = set_threshold {
                config.set_threshold(threshold)?;
                println!("✔ Default threshold set to {}%", threshold);
            }

            if show {
                println!("Configuration:");
                println!("  Default threshold: {}%", config.default_threshold);
                println!("  Config file: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

/// Ask for the workbook path on stdin, until an existing Excel file is
/// given. Quotes from drag-and-drop paths are stripped.
fn prompt_for_workbook() -> Result<PathBuf> {
    loop {
        let raw: String = Input::new()
            .with_prompt("Path to the Excel workbook")
            .interact_text()
            .map_err(|e| ElectorError::Config(format!("Prompt failed: {}", e)))?;
        let trimmed = raw.trim().trim_matches('"').trim_matches('\'');
        if trimmed.is_empty() {
            continue;
        }

        let path = PathBuf::from(trimmed);
        if !path.exists() {
            println!("File not found: {}", path.display());
            continue;
        }
        let is_excel = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e.to_lowercase().as_str(), "xlsx" | "xls"))
            .unwrap_or(false);
        if !is_excel {
            println!("Please provide an Excel file (.xlsx or .xls)");
            continue;
        }

        return Ok(path);
    }
}

fn print_summary(outcome: &ComparisonOutcome, threshold: u32) {
    let stats = &outcome.stats;
    println!("{}", "=".repeat(60));
    println!("ELECTOR NAME COMPARISON SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Total records in 2025_LIST: {}", stats.total_2025);
    println!("Total records in 2002_LIST: {}", stats.total_2002);
    println!("\nDuplicates found: {}", outcome.matches.len());
    println!("  - Exact matches (100%): {}", stats.exact_matches);
    println!("  - Fuzzy matches (>={}%): {}", threshold, stats.fuzzy_matches);
    println!("  - No matches: {}", stats.no_matches);
    match &outcome.primary_key {
        Some(column) => println!("\nDuplicate ids from primary key column: '{}'", column),
        None => println!("\nDuplicate ids: sequential (no primary key column)"),
    }
    println!("{}\n", "=".repeat(60));
}

/// Show the top matches after assembly (highest scores first).
fn print_sample(outcome: &ComparisonOutcome) {
    if outcome.matches.is_empty() {
        return;
    }

    println!("Sample duplicates (top {}):", outcome.matches.len().min(5));
    for (i, m) in outcome.matches.iter().take(5).enumerate() {
        println!(
            "{}. [{}] {}% ({})",
            i + 1,
            m.duplicate_id,
            m.similarity_score,
            m.match_type
        );
        println!("   2025: {} / {}", m.english_2025, m.vernacular_2025);
        println!("   2002: {} / {}", m.english_2002, m.vernacular_2002);
    }
    println!();
}

/// Progress bar over the outer comparison loop.
struct ConsoleReporter {
    bar: ProgressBar,
}

impl ConsoleReporter {
    fn new() -> Self {
        Self { bar: ProgressBar::hidden() }
    }
}

impl Reporter for ConsoleReporter {
    fn begin(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} records ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
    }

    fn record_done(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
