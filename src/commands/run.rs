use crate::commands::search::run_search;
use crate::core::{
    validation, AcquireStatus, Acquirer, Assembler, Config, Exporter, ExportOutcome, FFmpegManager,
    FfmpegEncoder, JobReport, LogNotifier, MashupJob, MashupPipeline, MediaCache, OutputFormat,
    OverwritePolicy, SelectionSet, SymphoniaDecoder, WavEncoder, YtDlpFetcher, YtDlpManager,
    YtDlpSearch,
};
use crate::ui::{formatters, progress, prompts};
use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;

/// Output name used when `--output` is not given
pub fn default_output_name() -> String {
    Local::now().format("%d_%m_%Y_%H_%M_%S").to_string()
}

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    // 1. Arguments
    let query = matches
        .get_one::<String>("query")
        .context("Query is required")?;
    let duration = matches
        .get_one::<String>("duration")
        .context("Duration is required")?;
    let keep = matches.get_flag("keep");
    let assume_yes = matches.get_flag("yes");

    let target_secs = validation::parse_duration(duration)
        .with_context(|| format!("Invalid duration: {}", duration))?;

    let output_name = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(default_output_name);
    validation::validate_output_name(&output_name)
        .with_context(|| format!("Invalid output name: {}", output_name))?;

    let recipient = matches.get_one::<String>("email").cloned();
    if let Some(address) = &recipient {
        validation::validate_recipient(address)?;
    }

    let config = Config::load()?;
    let limit = matches
        .get_one::<usize>("max-results")
        .copied()
        .unwrap_or(config.max_results);
    let format = match matches.get_one::<String>("format") {
        Some(value) => value.parse::<OutputFormat>()?,
        None => config.output_format,
    };

    // 2. Tools
    let yt_dlp_path = YtDlpManager::with_config(config.clone()).ensure_yt_dlp()?;
    let ffmpeg_path = FFmpegManager::with_config(config.clone()).ensure_ffmpeg()?;

    // 3. Search
    let session = run_search(&YtDlpSearch::new(&yt_dlp_path), query, limit)?;
    if session.is_empty() {
        println!("{}", format!("No results found for \"{}\"", query).yellow());
        return Ok(());
    }
    formatters::print_results(&session);

    // 4. Selection
    let selection = match matches.get_one::<String>("select") {
        Some(indices) => SelectionSet::parse(indices)?,
        None => prompts::prompt_selection(session.len())?,
    };

    // 5. Pipeline
    let cache = MediaCache::new(config.get_download_dir()?);
    let fetcher = YtDlpFetcher::new(&yt_dlp_path).with_ffmpeg(&ffmpeg_path);
    let exporter = match format {
        OutputFormat::Mp3 => Exporter::new(FfmpegEncoder::new(&ffmpeg_path)),
        OutputFormat::Wav => Exporter::new(WavEncoder),
    };

    let pipeline = MashupPipeline::new(
        Acquirer::new(cache, fetcher),
        Assembler::new(SymphoniaDecoder),
        exporter,
    )
    .with_notifier(LogNotifier);

    let policy = if assume_yes {
        OverwritePolicy::Overwrite
    } else {
        OverwritePolicy::AskCaller
    };
    let job = MashupJob::new(selection, target_secs, output_name)
        .retain(keep)
        .overwrite(policy)
        .recipient(recipient);

    println!("{}", "Downloading selected items...".cyan());
    let report = pipeline.run(&session, job, &prompts::TerminalConfirm, |processed, total| {
        progress::show_progress_bar(processed, total, "Generating mashup")
    })?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &JobReport) {
    println!();

    let acquisition = &report.acquisition;
    println!(
        "{} {} fetched, {} already present, {} failed",
        "Downloads:".white().bold(),
        acquisition.count(|s| matches!(s, AcquireStatus::Fetched)),
        acquisition.count(|s| matches!(s, AcquireStatus::AlreadyPresent)),
        acquisition.failures().len()
    );
    for (item, reason) in acquisition.failures() {
        println!("  {} [{}] {}: {}", "✗".red(), item.index, item.title, reason);
    }

    println!(
        "{} {} clips used, {} skipped",
        "Mashup:".white().bold(),
        report.assembly.included.len(),
        report.assembly.failures.len()
    );
    for (item, reason) in &report.assembly.failures {
        if item.status.is_materialized() {
            println!("  {} [{}] {}: {}", "✗".red(), item.index, item.title, reason);
        }
    }

    if report.cleanup.retained {
        prompts::dimmed(&format!("Kept {} downloaded files", report.cleanup.total_files));
    } else if report.cleanup.deleted_files > 0 {
        prompts::dimmed(&format!(
            "Removed {} downloaded files ({})",
            report.cleanup.deleted_files,
            formatters::format_size(report.cleanup.deleted_size)
        ));
    }
    if report.cleanup.failed_files > 0 {
        prompts::warn(&format!(
            "{} downloaded files could not be removed",
            report.cleanup.failed_files
        ));
    }

    println!();
    match &report.export {
        ExportOutcome::Written(path) => {
            prompts::success(&format!(
                "✓ Mashup saved to {} ({})",
                path.display(),
                formatters::format_duration(report.assembly.buffer.duration())
            ));
        }
        ExportOutcome::Skipped(path) => {
            prompts::info(&format!("Kept the existing {}", path.display()));
        }
    }

    if let Some(message) = notification_line(report.notified) {
        prompts::dimmed(message);
    }
}

/// LogNotifier only writes to the log, so the report must not claim delivery
fn notification_line(notified: bool) -> Option<&'static str> {
    notified.then_some("Recipient recorded in log")
}
