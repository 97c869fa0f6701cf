//! # claimwatch
//!
//! A fact-check prioritization pipeline for news coverage. It polls RSS
//! feeds for candidate articles, extracts their full text, scans the text
//! for checkable claims (statistical figures, causal assertions, extreme
//! language, vaguely sourced statements), scores each article's fact-check
//! priority, collapses duplicate coverage of the same story, and writes a
//! daily report as HTML plus a JSON API file.
//!
//! ## Usage
//!
//! ```sh
//! claimwatch -r ./reports -j ./json
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Collection**: Poll feeds, keep keyword-matched entries, queue them in SQLite
//! 2. **Extraction**: Download queued articles and pull out body text and metadata
//! 3. **Analysis**: Detect claims and compute each article's priority score
//! 4. **Grouping**: Collapse near-duplicate titles into one entry per story
//! 5. **Output**: Write the HTML report and JSON API file

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod claims;
mod cli;
mod dedup;
mod extract;
mod feeds;
mod fetch;
mod models;
mod outputs;
mod rules;
mod scoring;
mod similarity;
mod store;
mod utils;

use claims::ClaimDetector;
use cli::Cli;
use dedup::DedupParams;
use models::{AnalyzedArticle, Article, DailyReport};
use rules::RuleConfig;
use scoring::PriorityScorer;
use store::{ArticleStore, PendingArticle};
use utils::{ensure_writable_dir, now_time, today};

/// Concurrent article downloads. Analysis itself stays sequential.
const EXTRACT_PARALLELISM: usize = 4;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("claimwatch starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.report_output_dir, ?args.json_output_dir, ?args.db_path, "Parsed CLI arguments");

    // Early check: ensure both output dirs are writable
    for dir in [&args.report_output_dir, &args.json_output_dir] {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Load rules and build the analysis core ----
    let rules = match &args.rules {
        Some(path) => RuleConfig::load(path)?,
        None => RuleConfig::default(),
    };
    let detector = ClaimDetector::new(&rules)?;
    let scorer = PriorityScorer::new(&rules);

    if let Some(parent) = std::path::Path::new(&args.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = ArticleStore::open(&args.db_path)?;
    let client = fetch::client()?;

    // ---- Collect the batch ----
    let manual = args.article_url.is_some();
    let pending: Vec<PendingArticle> = match &args.article_url {
        Some(url) => {
            info!(%url, "Manual mode: analyzing a single article");
            vec![PendingArticle {
                url: url.clone(),
                title: "Manually submitted article".to_string(),
                source: "manual".to_string(),
                score: 0,
            }]
        }
        None => {
            if let Err(e) = feeds::collect(&client, &store).await {
                warn!(error = %e, "Feed collection failed; analyzing whatever is already queued");
            }
            store.pending_articles(args.limit)?
        }
    };
    info!(count = pending.len(), "Articles queued for analysis");

    // ---- Extract article pages ----
    let extracted: Vec<(&PendingArticle, Option<Article>)> = stream::iter(pending.iter())
        .map(|p| {
            let client = &client;
            async move {
                let article = match extract::extract(client, &p.url).await {
                    Ok(Some(a)) => Some(a),
                    Ok(None) => {
                        warn!(url = %p.url, "No article body found; scoring title signals only");
                        None
                    }
                    Err(e) => {
                        error!(url = %p.url, error = %e, "Extraction failed; scoring title signals only");
                        None
                    }
                };
                (p, article)
            }
        })
        .buffer_unordered(EXTRACT_PARALLELISM)
        .collect()
        .await;

    // ---- Analyze ----
    let mut flagged: Vec<AnalyzedArticle> = Vec::new();
    let mut analyzed_count = 0usize;
    for (p, maybe_article) in extracted {
        let article = maybe_article
            .unwrap_or_else(|| Article::placeholder(&p.url, &p.title, &p.source, &today()));

        let claims = detector.detect(&article.text);
        let has_vague = detector.has_vague_source(&article.text);
        let score = scorer.calculate_score(&article, &claims, has_vague);
        analyzed_count += 1;

        info!(
            url = %p.url,
            heuristic_score = p.score,
            total_score = score.total_score,
            priority = ?score.priority,
            claims = score.claims_count,
            "Scored article"
        );

        if let Err(e) = store.mark_analyzed(&p.url, score.total_score, score.should_factcheck) {
            warn!(url = %p.url, error = %e, "Failed to record analysis outcome");
        }

        // Manual submissions always make the report, whatever they score.
        if manual || score.should_factcheck {
            flagged.push(AnalyzedArticle {
                url: p.url.clone(),
                article,
                claims,
                score,
            });
        }
    }
    info!(
        analyzed = analyzed_count,
        flagged = flagged.len(),
        "Analysis pass completed"
    );

    // ---- Group duplicate coverage ----
    let groups = dedup::dedupe(
        flagged,
        DedupParams {
            similarity_threshold: rules.similarity_threshold,
            max_groups: rules.max_report_groups,
        },
    );

    // ---- Journalist statistics ----
    for group in &groups {
        let a = &group.article.article;
        if a.journalist != "Unknown" {
            if let Err(e) = store.record_factcheck(&a.journalist, &a.source) {
                warn!(journalist = %a.journalist, error = %e, "Failed to update journalist statistics");
            }
        }
    }
    let top_journalists = match store.top_journalists(3) {
        Ok(top) => top,
        Err(e) => {
            warn!(error = %e, "Failed to load journalist statistics");
            Vec::new()
        }
    };

    // ---- Outputs ----
    let report = DailyReport {
        local_date: today(),
        generated_at: now_time(),
        groups,
    };

    if let Err(e) = outputs::json::write_report(&report, &args.json_output_dir).await {
        error!(error = %e, "Failed to write JSON report");
    }

    let html = if report.groups.is_empty() {
        outputs::report::render_empty(&report.local_date)
    } else {
        outputs::report::render_report(&report, &top_journalists)
    };
    let html_path = format!("{}/{}.html", args.report_output_dir, report.local_date);
    info!(path = %html_path, groups = report.groups.len(), "Writing HTML report");
    if let Err(e) = tokio::fs::write(&html_path, html).await {
        error!(path = %html_path, error = %e, "Failed writing HTML report");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
