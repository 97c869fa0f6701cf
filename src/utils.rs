//! Small helpers shared across the pipeline: date strings, log truncation,
//! URL domain extraction, and output-directory validation.

use chrono::Local;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Today's local date in `YYYY-MM-DD` format.
pub fn today() -> String {
    Local::now().date_naive().to_string()
}

/// Current local time, `HH:MM:SS`.
pub fn now_time() -> String {
    Local::now().time().format("%H:%M:%S").to_string()
}

/// Truncate a string for logging, appending the number of bytes dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let cut = s
            .char_indices()
            .take_while(|(i, _)| *i <= max)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

/// Hostname of a URL without a leading `www.`, or the input itself when it
/// does not parse. Used as the fallback article source name.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(domain_of("https://www.example.com/story"), "example.com");
/// ```
pub fn domain_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| url.to_string())
}

/// Ensure a directory exists and is writable by probing a temp file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
