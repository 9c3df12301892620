use crate::core::config::CONFIG_KEYS;
use crate::core::Config;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn handle(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("set", sub_matches)) => handle_set(sub_matches),
        Some(("get", sub_matches)) => handle_get(sub_matches),
        Some(("reset", _)) => handle_reset(),
        _ => {
            println!("Use 'mashup config --help' for more information.");
            Ok(())
        }
    }
}

fn handle_set(matches: &clap::ArgMatches) -> Result<()> {
    let key = matches
        .get_one::<String>("key")
        .context("Key argument is required")?;
    let value = matches
        .get_one::<String>("value")
        .context("Value argument is required")?;

    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;

    println!("{} {}", format!("✓ {} set to:", key).green(), value);
    Ok(())
}

fn handle_get(matches: &clap::ArgMatches) -> Result<()> {
    let config = Config::load()?;

    let keys: Vec<&str> = match matches.get_one::<String>("key") {
        Some(key) => vec![key.as_str()],
        None => CONFIG_KEYS.to_vec(),
    };

    for key in keys {
        match config.get_value(key)? {
            Some(value) => println!("{} {}", format!("{}:", key).white(), value.cyan().bold()),
            None => println!("{} {}", format!("{}:", key).white(), "(not set)".dimmed()),
        }
    }

    if matches.get_one::<String>("key").is_none() {
        println!();
        println!(
            "{} {}",
            "Config file:".dimmed(),
            Config::get_config_path()?.display().to_string().dimmed()
        );
    }

    Ok(())
}

fn handle_reset() -> Result<()> {
    Config::default().save()?;
    println!("{}", "✓ Configuration reset to defaults".green());
    Ok(())
}
