use crate::core::{normalize, validation, Config, SearchProvider, SearchSession, YtDlpManager, YtDlpSearch};
use crate::ui::formatters;
use anyhow::{Context, Result};
use colored::Colorize;
use std::time::Instant;

/// `mashup search <query>`: show the results table and stop
pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let query = matches
        .get_one::<String>("query")
        .context("Query is required")?;

    let config = Config::load()?;
    let limit = matches
        .get_one::<usize>("max-results")
        .copied()
        .unwrap_or(config.max_results);

    let yt_dlp_path = YtDlpManager::with_config(config).ensure_yt_dlp()?;
    let session = run_search(&YtDlpSearch::new(yt_dlp_path), query, limit)?;

    if session.is_empty() {
        println!("{}", format!("No results found for \"{}\"", query).yellow());
        return Ok(());
    }

    formatters::print_results(&session);
    Ok(())
}

/// Search and normalize, reporting how long it took
pub fn run_search<P: SearchProvider>(provider: &P, query: &str, limit: usize) -> Result<SearchSession> {
    validation::validate_query(query)?;

    println!("{}", format!("Searching for \"{}\"...", query).cyan());
    let started = Instant::now();

    let raw = provider.search(query, limit)?;
    let session = normalize(query, raw)?;

    println!(
        "{}",
        format!(
            "Search completed in {:.2} seconds, found {} results",
            started.elapsed().as_secs_f64(),
            session.len()
        )
        .dimmed()
    );

    Ok(session)
}
