// UI prompts and user interaction module

use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::core::acquisition::SelectionSet;
use crate::core::exporter::ConfirmOverwrite;

/// `y` / `yes` in any case; everything else is a no
pub fn is_affirmative(input: &str) -> bool {
    let response = input.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Ask user for confirmation with retry on IO errors
///
/// # Returns
/// * `Ok(true)` - User confirmed (y/yes)
/// * `Ok(false)` - User declined (n/no or any other input)
/// * `Err` - IO error after max attempts
pub fn read_confirmation(prompt: &str, max_attempts: u32) -> anyhow::Result<bool> {
    for attempt in 1..=max_attempts {
        print!("{}", prompt.white().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => return Ok(is_affirmative(&input)),
            Err(e) if attempt < max_attempts => {
                println!(
                    "{}",
                    format!(
                        "Error reading input (attempt {}/{}): {}",
                        attempt, max_attempts, e
                    )
                    .yellow()
                );
                println!("{}", "Retrying...".dimmed());
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to read confirmation after {} attempts: {}",
                    max_attempts,
                    e
                ));
            }
        }
    }
    Ok(false)
}

/// Read a selection line from `reader`, re-asking until it parses and every
/// index is below `available`. An empty line selects everything.
pub fn read_selection<R: BufRead>(reader: &mut R, available: usize) -> anyhow::Result<SelectionSet> {
    loop {
        print!(
            "{} ",
            "Choose indexes (separated by space) or press enter to select all:"
                .white()
                .bold()
        );
        io::stdout().flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            // EOF: treat like an empty answer
            return Ok(SelectionSet::all());
        }

        match SelectionSet::parse(&line) {
            Ok(selection) => {
                let out_of_range: Vec<usize> = selection
                    .indices()
                    .iter()
                    .copied()
                    .filter(|&i| i >= available)
                    .collect();

                if out_of_range.is_empty() {
                    return Ok(selection);
                }
                warn(&format!(
                    "Indexes {:?} do not exist (valid: 0..{})",
                    out_of_range, available
                ));
            }
            Err(e) => warn(&e.to_string()),
        }
    }
}

/// Prompt on stdin for the indexes to use
pub fn prompt_selection(available: usize) -> anyhow::Result<SelectionSet> {
    let stdin = io::stdin();
    let mut lock = stdin.lock();
    read_selection(&mut lock, available)
}

/// Overwrite confirmation on the terminal
pub struct TerminalConfirm;

impl ConfirmOverwrite for TerminalConfirm {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        warn(&format!("File {} already exists.", path.display()));
        match dialoguer::Confirm::new()
            .with_prompt("Do you want to overwrite?")
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("No overwrite confirmation ({}); leaving file untouched", e);
                false
            }
        }
    }
}

/// Display a warning message
pub fn warn(message: &str) {
    println!("{}", format!("⚠️  Warning: {}", message).yellow().bold());
}

/// Display an info message
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{}", message.green().bold());
}

/// Display a dimmed/secondary message
pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}
