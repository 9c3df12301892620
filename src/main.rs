use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use mashup::commands;

fn build_cli() -> Command {
    Command::new("mashup")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a single audio mashup from the top search results for a query")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("run")
                .about("Search, download, trim and join clips into one audio file")
                .visible_alias("mix")
                .arg(
                    Arg::new("query")
                        .help("What to search for")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("duration")
                        .short('d')
                        .long("duration")
                        .value_name("SECONDS|HH:MM:SS")
                        .help("Length of every clip in the mashup")
                        .required(true)
                )
                .arg(
                    Arg::new("max-results")
                        .short('n')
                        .long("max-results")
                        .value_name("N")
                        .help("Number of search results to fetch (default from config)")
                        .value_parser(clap::value_parser!(usize))
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("NAME")
                        .help("Output file name (default: current date and time)")
                )
                .arg(
                    Arg::new("select")
                        .short('s')
                        .long("select")
                        .value_name("INDEXES")
                        .help("Indexes to use, e.g. \"0,2,5\" (skips the prompt; empty selects all)")
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format")
                        .value_parser(["mp3", "wav"])
                )
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .value_name("ADDRESS")
                        .help("Record this recipient in the log once the mashup is written (no e-mail is sent)")
                )
                .arg(
                    Arg::new("keep")
                        .short('k')
                        .long("keep")
                        .help("Keep downloaded files after the mashup is built")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .help("Overwrite the output file without asking")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("search")
                .about("Show the ranked search results for a query")
                .arg(
                    Arg::new("query")
                        .help("What to search for")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("max-results")
                        .short('n')
                        .long("max-results")
                        .value_name("N")
                        .help("Number of search results to fetch (default from config)")
                        .value_parser(clap::value_parser!(usize))
                )
        )
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'mashup config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(
                            Arg::new("key")
                                .help("download_dir, yt_dlp_path, ffmpeg_path, max_results or output_format")
                                .required(true)
                                .index(1)
                        )
                        .arg(
                            Arg::new("value")
                                .help("New value")
                                .required(true)
                                .index(2)
                        )
                )
                .subcommand(
                    Command::new("get")
                        .about("Show one or all configuration values")
                        .arg(
                            Arg::new("key")
                                .help("Key to show (all keys when omitted)")
                                .index(1)
                        )
                )
                .subcommand(
                    Command::new("reset")
                        .about("Restore the default configuration")
                )
        )
        .subcommand(
            Command::new("cache")
                .about("Manage downloaded audio (use 'mashup cache --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("clear")
                        .about("Delete every cached download")
                        .arg(
                            Arg::new("dry-run")
                                .long("dry-run")
                                .help("Show what would be deleted without actually deleting")
                                .action(ArgAction::SetTrue)
                        )
                        .arg(
                            Arg::new("yes")
                                .short('y')
                                .long("yes")
                                .help("Delete without asking")
                                .action(ArgAction::SetTrue)
                        )
                )
                .subcommand(
                    Command::new("path")
                        .about("Print the download directory")
                )
        )
        .subcommand(
            Command::new("version")
                .about("Shows version information")
        )
}

fn main() -> Result<()> {
    mashup::init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(sub_matches)?,
        Some(("search", sub_matches)) => commands::search(sub_matches)?,
        Some(("config", sub_matches)) => commands::config::handle(sub_matches)?,
        Some(("cache", sub_matches)) => commands::cache::handle(sub_matches)?,
        Some(("version", _)) => commands::version()?,
        _ => {
            println!("Welcome to mashup!");
            println!("Use 'mashup --help' for more information.");
        }
    }

    Ok(())
}
