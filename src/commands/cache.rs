use crate::core::cleanup;
use crate::core::{Config, MediaCache};
use crate::ui::{formatters, progress, prompts};
use anyhow::Result;
use colored::Colorize;

pub fn handle(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("clear", sub_matches)) => handle_clear(sub_matches),
        Some(("path", _)) => {
            let config = Config::load()?;
            println!("{}", config.get_download_dir()?.display().to_string().cyan().bold());
            Ok(())
        }
        _ => {
            println!("Use 'mashup cache --help' for more information.");
            Ok(())
        }
    }
}

fn handle_clear(matches: &clap::ArgMatches) -> Result<()> {
    let dry_run = matches.get_flag("dry-run");
    let assume_yes = matches.get_flag("yes");
    let config = Config::load()?;
    let cache = MediaCache::new(config.get_download_dir()?);

    let cached = cache.entries().len();
    if cached == 0 {
        println!("{}", "Download cache is empty.".dimmed());
        return Ok(());
    }

    if dry_run {
        println!("{}", "Dry run: nothing will be deleted".yellow());
    } else if !assume_yes {
        let prompt = format!("Delete {} cached downloads? [y/N]: ", cached);
        if !prompts::read_confirmation(&prompt, 3)? {
            println!("{}", "Cancelled.".dimmed());
            return Ok(());
        }
    }
    println!(
        "{} {}",
        "Clearing".cyan(),
        cache.dir().display().to_string().white()
    );

    let stats = cleanup::clear_cache(&cache, dry_run, |processed, total| {
        progress::show_progress_bar(processed, total, "Removing")
    });

    let verb = if dry_run { "Would remove" } else { "Removed" };
    println!(
        "{} {} files ({})",
        verb.green().bold(),
        stats.deleted_files,
        formatters::format_size(stats.deleted_size)
    );

    if stats.failed_files > 0 {
        println!(
            "{}",
            format!("{} files could not be removed", stats.failed_files).yellow()
        );
    }

    Ok(())
}
