//! HTTP fetching with bounded exponential backoff.
//!
//! All outbound requests share one [`reqwest::Client`] carrying a browser
//! User-Agent (some feed hosts reject default library agents) and a request
//! timeout. Transient failures are retried with exponential backoff plus
//! random jitter before the article is given up on.

use rand::{rng, Rng};
use reqwest::Client;
use std::error::Error;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{instrument, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const MAX_RETRIES: usize = 3;
const BASE_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(10);

/// Build the shared HTTP client.
pub fn client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(10))
        .build()
}

/// GET a URL and return the response body, retrying transient failures.
///
/// Retries up to [`MAX_RETRIES`] times with delays of 1s, 2s, 4s (capped at
/// 10s), each with 0-250ms of jitter. Non-2xx statuses count as failures.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn get_text_with_backoff(client: &Client, url: &str) -> Result<String, Box<dyn Error>> {
    let t0 = Instant::now();
    let mut attempt = 0usize;

    loop {
        let result = match client.get(url).send().await {
            Ok(resp) => match resp.error_for_status() {
                Ok(resp) => resp.text().await.map_err(|e| e.into()),
                Err(e) => Err(Box::<dyn Error>::from(e)),
            },
            Err(e) => Err(Box::<dyn Error>::from(e)),
        };

        match result {
            Ok(body) => return Ok(body),
            Err(e) => {
                attempt += 1;
                if attempt > MAX_RETRIES {
                    warn!(
                        attempt,
                        elapsed_ms = t0.elapsed().as_millis() as u64,
                        error = %e,
                        "GET exhausted retries"
                    );
                    return Err(e);
                }

                let mut delay = BASE_DELAY.saturating_mul(1 << (attempt - 1));
                if delay > MAX_DELAY {
                    delay = MAX_DELAY;
                }
                let jitter_ms: u64 = rng().random_range(0..=250);
                let delay = delay + Duration::from_millis(jitter_ms);

                warn!(attempt, max = MAX_RETRIES, ?delay, error = %e, "GET failed; backing off");
                sleep(delay).await;
            }
        }
    }
}
