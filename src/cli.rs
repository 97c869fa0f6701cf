//! Command-line interface definitions.
//!
//! All options can be provided as flags; the manual article URL can also
//! come from the `ARTICLE_URL` environment variable, which is how the
//! scheduled-runner workflow triggers one-off checks.

use clap::Parser;

/// Command-line arguments for the claimwatch pipeline.
///
/// # Examples
///
/// ```sh
/// # Daily run with defaults
/// claimwatch
///
/// # Custom output locations and a tuned rule file
/// claimwatch -r ./reports -j ./json --rules rules.yaml
///
/// # Check one article without polling feeds
/// claimwatch --article-url https://example.com/story
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the HTML report
    #[arg(short, long, default_value = "reports")]
    pub report_output_dir: String,

    /// Output directory for the JSON API file
    #[arg(short, long, default_value = "json")]
    pub json_output_dir: String,

    /// Path to the SQLite article database
    #[arg(short, long, default_value = "data/articles.db")]
    pub db_path: String,

    /// Maximum number of pending articles to analyze per run
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,

    /// Optional YAML rule file overriding the built-in detection rules
    #[arg(long)]
    pub rules: Option<String>,

    /// Analyze a single article URL instead of polling feeds
    #[arg(long, env = "ARTICLE_URL")]
    pub article_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["claimwatch"]);
        assert_eq!(cli.report_output_dir, "reports");
        assert_eq!(cli.json_output_dir, "json");
        assert_eq!(cli.limit, 20);
        assert!(cli.rules.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["claimwatch", "-r", "/tmp/reports", "-j", "/tmp/json", "-l", "5"]);
        assert_eq!(cli.report_output_dir, "/tmp/reports");
        assert_eq!(cli.json_output_dir, "/tmp/json");
        assert_eq!(cli.limit, 5);
    }

    #[test]
    fn test_cli_manual_url() {
        let cli = Cli::parse_from(["claimwatch", "--article-url", "https://example.com/story"]);
        assert_eq!(cli.article_url.as_deref(), Some("https://example.com/story"));
    }
}
