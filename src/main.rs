use reddit_scraper_lib::{cleaner, delay_manager, input_loader, logger, report_writer};
use reddit_scraper_lib::{RedditClient, RedditCredentials, ResultAccumulator, RunConfig, TimeRange};

use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{self, Command};
use std::time::Instant;

use log::{error, info, warn};

const KEYWORDS_FILE: &str = "keyword_lists/keywords.txt";
const EXCLUSIONS_FILE: &str = "keyword_lists/excluded_subreddits.txt";
const OUTPUT_DIR: &str = "scraped_data";

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    logger::init();
    info!("Starting Reddit keyword scraper...");

    let keywords = load_or_exit(KEYWORDS_FILE);
    if keywords.is_empty() {
        error!("No keywords found in {}. Nothing to search for.", KEYWORDS_FILE);
        process::exit(1);
    }
    let exclusions: HashSet<String> = load_or_exit(EXCLUSIONS_FILE).into_iter().collect();

    let output_name = prompt_output_name()?;
    let time_range = prompt_time_range()?;
    let config = RunConfig::from_env(output_name, time_range)?;

    let creds = RedditCredentials::from_env()?;
    let client = RedditClient::connect(&creds)?;

    fs::create_dir_all(OUTPUT_DIR)?;
    let destination: PathBuf = Path::new(OUTPUT_DIR).join(format!("{}.xlsx", config.output_name));

    if config.time_range == TimeRange::All {
        info!("Searching all of Reddit for {} keywords and phrases...", keywords.len());
    } else {
        info!(
            "Searching the past {} on Reddit for {} keywords and phrases...",
            config.time_range.as_str(),
            keywords.len()
        );
    }

    let started = Instant::now();
    let mut accumulator = ResultAccumulator::new();

    for (i, keyword) in keywords.iter().enumerate() {
        info!("Searching {} / {}: '{}'", i + 1, keywords.len(), keyword);
        let posts = client.search(keyword, config.time_range, config.search_limit)?;
        for post in &posts {
            accumulator.append(keyword, post);
        }
        // Mandatory pacing, empty pages included.
        delay_manager::courtesy_pause();
    }

    info!("Accumulated {} raw results. Cleaning...", accumulator.len());
    let cleaned = cleaner::clean(
        accumulator.finalize(),
        &exclusions,
        config.rank_key,
        config.engagement_threshold,
    );

    info!("Writing report...");
    report_writer::write_report(&cleaned, &destination, &config.output_name, config.schema)?;

    info!("Job completed in {}", format_elapsed(started.elapsed().as_secs()));
    info!("Data saved to {}", destination.display());

    if prompt_yes_no("Do you want to open the report? (y or n): ")? {
        open_report(&destination);
    }

    Ok(())
}

fn load_or_exit(path: &str) -> Vec<String> {
    match input_loader::load_terms(path) {
        Ok(terms) => terms,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}

/// Asks for the report file name, re-prompting while it contains a dot
/// (the .xlsx extension is appended later).
fn prompt_output_name() -> io::Result<String> {
    loop {
        let name = prompt_line(
            "Please enter what you want the file to be called (do not include .xlsx): ",
        )?;
        if name.is_empty() || name.contains('.') {
            println!("Names must be non-empty and must not contain '.'");
            continue;
        }
        return Ok(name);
    }
}

fn prompt_time_range() -> io::Result<TimeRange> {
    loop {
        let answer = prompt_line(
            "How far back do you want to fetch data for?\n 1) Day\n 2) Week\n 3) Month\n 4) Year\n 5) All Time\n> ",
        )?;
        if let Some(range) = answer.parse().ok().and_then(TimeRange::from_choice) {
            return Ok(range);
        }
        println!("Please enter a number between 1 and 5.");
    }
}

fn prompt_yes_no(question: &str) -> io::Result<bool> {
    Ok(prompt_line(question)?.to_lowercase() == "y")
}

fn prompt_line(question: &str) -> io::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Best-effort open of the finished report with the platform's default app.
fn open_report(path: &Path) {
    #[cfg(target_os = "windows")]
    let spawned = Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn();
    #[cfg(target_os = "macos")]
    let spawned = Command::new("open").arg(path).spawn();
    #[cfg(all(unix, not(target_os = "macos")))]
    let spawned = Command::new("xdg-open").arg(path).spawn();

    match spawned {
        Ok(_) => info!("Opening {}...", path.display()),
        Err(e) => warn!("Could not open {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::format_elapsed;

    #[test]
    fn elapsed_formats_as_h_mm_ss() {
        assert_eq!(format_elapsed(0), "0:00:00");
        assert_eq!(format_elapsed(75), "0:01:15");
        assert_eq!(format_elapsed(3_725), "1:02:05");
        assert_eq!(format_elapsed(90_000), "25:00:00");
    }
}
