//! SQLite persistence for the article queue and journalist statistics.
//!
//! Two tables:
//! - `articles`: every keyword-matched feed entry, with its title-heuristic
//!   score, the final analysis score once computed, and an `analyzed` flag so
//!   each article is fully analyzed at most once.
//! - `journalist_stats`: per (name, source) counter of fact-checked pieces,
//!   feeding the report's hall-of-fame table.

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use tracing::info;

use crate::utils::today;

/// An article waiting for full-text analysis, as queued by the feed monitor.
#[derive(Debug, Clone)]
pub struct PendingArticle {
    pub url: String,
    pub title: String,
    pub source: String,
    pub score: i64,
}

/// Handle to the article database. Connections are cheap and the pipeline is
/// single-threaded, so one handle is opened per run.
pub struct ArticleStore {
    conn: Connection,
}

impl ArticleStore {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        let store = ArticleStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory database, for tests.
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = ArticleStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT UNIQUE,
                title TEXT,
                source TEXT,
                published_date TEXT,
                collected_date TEXT,
                priority_score INTEGER,
                should_factcheck INTEGER,
                analyzed INTEGER DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS journalist_stats (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                source TEXT NOT NULL,
                factcheck_count INTEGER DEFAULT 0,
                UNIQUE(name, source)
            );",
        )
    }

    /// Queue a feed entry. Returns `false` when the URL is already known.
    pub fn save_pending(
        &self,
        url: &str,
        title: &str,
        source: &str,
        published: &str,
        score: i64,
        should_factcheck: bool,
    ) -> rusqlite::Result<bool> {
        let existing: Option<i64> = self
            .conn
            .query_row("SELECT id FROM articles WHERE url = ?1", params![url], |r| {
                r.get(0)
            })
            .optional()?;
        if existing.is_some() {
            return Ok(false);
        }

        self.conn.execute(
            "INSERT INTO articles
                (url, title, source, published_date, collected_date, priority_score, should_factcheck)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![url, title, source, published, today(), score, should_factcheck],
        )?;
        Ok(true)
    }

    /// Articles flagged by the title heuristic and not yet analyzed, best
    /// heuristic score first.
    pub fn pending_articles(&self, limit: usize) -> rusqlite::Result<Vec<PendingArticle>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, title, source, priority_score
             FROM articles
             WHERE should_factcheck = 1 AND analyzed = 0
             ORDER BY priority_score DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(PendingArticle {
                url: row.get(0)?,
                title: row.get(1)?,
                source: row.get(2)?,
                score: row.get(3)?,
            })
        })?;
        rows.collect()
    }

    /// Record the full-text analysis outcome and retire the article from the
    /// pending queue.
    pub fn mark_analyzed(
        &self,
        url: &str,
        priority_score: u32,
        should_factcheck: bool,
    ) -> rusqlite::Result<()> {
        self.conn.execute(
            "UPDATE articles
             SET priority_score = ?2, should_factcheck = ?3, analyzed = 1
             WHERE url = ?1",
            params![url, priority_score, should_factcheck],
        )?;
        Ok(())
    }

    /// Bump the fact-check counter for a journalist at an outlet.
    pub fn record_factcheck(&self, name: &str, source: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO journalist_stats (name, source, factcheck_count)
             VALUES (?1, ?2, 1)
             ON CONFLICT(name, source) DO UPDATE SET factcheck_count = factcheck_count + 1",
            params![name, source],
        )?;
        info!(name, source, "Updated journalist statistics");
        Ok(())
    }

    /// Most fact-checked journalists, `(name, source, count)` tuples.
    pub fn top_journalists(&self, limit: usize) -> rusqlite::Result<Vec<(String, String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, source, factcheck_count
             FROM journalist_stats
             ORDER BY factcheck_count DESC, name ASC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;
        rows.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_pending_dedupes_by_url() {
        let store = ArticleStore::open_in_memory().unwrap();
        assert!(store
            .save_pending("https://e.com/a", "Title", "wire", "2024-01-05", 30, true)
            .unwrap());
        assert!(!store
            .save_pending("https://e.com/a", "Title again", "wire", "2024-01-05", 50, true)
            .unwrap());
    }

    #[test]
    fn test_pending_ordered_by_score_desc() {
        let store = ArticleStore::open_in_memory().unwrap();
        store
            .save_pending("https://e.com/low", "Low", "wire", "2024-01-05", 30, true)
            .unwrap();
        store
            .save_pending("https://e.com/high", "High", "wire", "2024-01-05", 50, true)
            .unwrap();
        store
            .save_pending("https://e.com/skip", "Skip", "wire", "2024-01-05", 10, false)
            .unwrap();

        let pending = store.pending_articles(10).unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].url, "https://e.com/high");
        assert_eq!(pending[1].url, "https://e.com/low");
    }

    #[test]
    fn test_mark_analyzed_retires_article() {
        let store = ArticleStore::open_in_memory().unwrap();
        store
            .save_pending("https://e.com/a", "Title", "wire", "2024-01-05", 30, true)
            .unwrap();
        store.mark_analyzed("https://e.com/a", 55, true).unwrap();
        assert!(store.pending_articles(10).unwrap().is_empty());
    }

    #[test]
    fn test_pending_limit() {
        let store = ArticleStore::open_in_memory().unwrap();
        for i in 0..4 {
            store
                .save_pending(
                    &format!("https://e.com/{i}"),
                    "Title",
                    "wire",
                    "2024-01-05",
                    30 + i,
                    true,
                )
                .unwrap();
        }
        assert_eq!(store.pending_articles(2).unwrap().len(), 2);
    }

    #[test]
    fn test_journalist_stats_accumulate() {
        let store = ArticleStore::open_in_memory().unwrap();
        store.record_factcheck("Alex Park", "Morning Wire").unwrap();
        store.record_factcheck("Alex Park", "Morning Wire").unwrap();
        store.record_factcheck("Kim Soyeon", "Daily Ledger").unwrap();

        let top = store.top_journalists(3).unwrap();
        assert_eq!(top[0], ("Alex Park".to_string(), "Morning Wire".to_string(), 2));
        assert_eq!(top[1].2, 1);
    }
}
