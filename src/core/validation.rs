// Validation module for user input
// Queries, output names, durations and recipient addresses are checked here
// before they reach the pipeline or a child process.

use anyhow::{anyhow, ensure, Context, Result};
use regex::Regex;
use url::Url;

/// Maximum URL length to prevent DoS attacks
const MAX_URL_LENGTH: usize = 2048;

/// Maximum output filename length
const MAX_OUTPUT_LENGTH: usize = 255;

const MAX_QUERY_LENGTH: usize = 200;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)+$";

/// Validates a search query.
///
/// The query ends up inside a `ytsearchN:` argument, so it must be a single
/// line of reasonable length.
pub fn validate_query(query: &str) -> Result<()> {
    let trimmed = query.trim();

    ensure!(!trimmed.is_empty(), "Search query cannot be empty");
    ensure!(
        trimmed.chars().count() <= MAX_QUERY_LENGTH,
        "Search query is too long ({} characters, max {})",
        trimmed.chars().count(),
        MAX_QUERY_LENGTH
    );
    ensure!(!query.contains('\0'), "Search query contains null byte");
    ensure!(
        !query.contains('\n') && !query.contains('\r'),
        "Search query must be a single line"
    );

    Ok(())
}

/// Validates a source URL before it is handed to yt-dlp
///
/// Only http(s) URLs with a host are accepted, and characters that would be
/// dangerous if the URL were ever used in a shell context are rejected.
pub fn validate_url(url_str: &str) -> Result<()> {
    let trimmed = url_str.trim();

    ensure!(!trimmed.is_empty(), "URL cannot be empty");
    ensure!(
        url_str.len() <= MAX_URL_LENGTH,
        "URL is too long ({} characters, max {})",
        url_str.len(),
        MAX_URL_LENGTH
    );
    ensure!(
        url_str.starts_with("http://") || url_str.starts_with("https://"),
        "URL must start with lowercase http:// or https://"
    );
    ensure!(!url_str.contains('\0'), "URL contains null byte");

    const DANGEROUS_CHARS: [&str; 5] = [";", "|", "`", "\n", "\r"];
    for ch in DANGEROUS_CHARS {
        ensure!(
            !url_str.contains(ch),
            "URL contains dangerous character {:?}",
            ch
        );
    }
    ensure!(
        !url_str.contains("$("),
        "URL contains command substitution pattern $()"
    );

    let url = Url::parse(url_str).context("Invalid URL format")?;
    ensure!(url.host_str().is_some(), "URL has no hostname");

    Ok(())
}

/// Validates the mashup output name.
/// Checks for:
/// - Empty names
/// - Path traversal (..)
/// - Null bytes
/// - Command injection characters
/// - Length
pub fn validate_output_name(output: &str) -> Result<()> {
    let trimmed = output.trim();
    ensure!(!trimmed.is_empty(), "Output name cannot be empty");
    ensure!(
        !output.split(['/', '\\']).any(|part| part == ".."),
        "Output name contains path traversal (..)"
    );
    ensure!(!output.contains('\0'), "Output name contains null byte");

    const DANGEROUS_CHARS: [char; 7] = ['|', '&', ';', '$', '`', '\n', '\r'];
    for ch in DANGEROUS_CHARS {
        ensure!(
            !output.contains(ch),
            "Output name contains dangerous character '{}'",
            ch
        );
    }

    ensure!(
        output.len() <= MAX_OUTPUT_LENGTH,
        "Output name is too long ({} characters, max {})",
        output.len(),
        MAX_OUTPUT_LENGTH
    );

    Ok(())
}

/// Parse a clip duration given as plain seconds or `HH:MM:SS` / `MM:SS`.
/// Zero is rejected.
pub fn parse_duration(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    ensure!(!trimmed.is_empty(), "Duration cannot be empty");

    let seconds = if trimmed.contains(':') {
        let parts: Vec<&str> = trimmed.split(':').collect();
        ensure!(
            parts.len() <= 3,
            "Duration '{}' must be seconds or HH:MM:SS",
            trimmed
        );

        // right-aligned: the last part is always seconds
        parts
            .iter()
            .rev()
            .zip([1u64, 60, 3600])
            .try_fold(0u64, |acc, (part, factor)| {
                let value: u64 = part
                    .parse()
                    .map_err(|_| anyhow!("Invalid duration component '{}'", part))?;
                value
                    .checked_mul(factor)
                    .and_then(|v| acc.checked_add(v))
                    .ok_or_else(|| anyhow!("Duration '{}' is too large", trimmed))
            })?
    } else {
        trimmed
            .parse::<u64>()
            .map_err(|_| anyhow!("Duration '{}' must be seconds or HH:MM:SS", trimmed))?
    };

    ensure!(seconds > 0, "Duration must be greater than zero");
    Ok(seconds)
}

/// Validates a recipient e-mail address
pub fn validate_recipient(address: &str) -> Result<()> {
    let email_re = Regex::new(EMAIL_PATTERN).map_err(|_| anyhow!("Internal regex error"))?;
    ensure!(
        email_re.is_match(address.trim()),
        "'{}' is not a valid e-mail address",
        address
    );
    Ok(())
}
