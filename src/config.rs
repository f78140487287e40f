use clap::Parser;
use std::time::Duration;

use crate::service::sources::SourceContext;

/// Run configuration, from flags or the environment (a `.env` file is
/// loaded first when present).
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gamejobs-crawler",
    version,
    about = "Collects entry-level game job postings and syncs them to a job store"
)]
pub struct Config {
    /// Full URL of the job store endpoint, e.g. http://localhost:3000/tables/job_postings
    #[arg(long, env = "JOBS_STORE_URL")]
    pub store_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Pages walked per search query on paginated sources
    #[arg(long, env = "MAX_PAGES", default_value_t = SourceContext::DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// Also drop postings from clearly non-game industries
    #[arg(long, env = "EXCLUDE_NON_GAME", default_value_t = false)]
    pub exclude_non_game: bool,

    /// Diff against the store but write nothing
    #[arg(long, env = "DRY_RUN", default_value_t = false)]
    pub dry_run: bool,
}

impl Config {
    /// Parse the process arguments after loading `.env`.
    pub fn load() -> Self {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from([
            "gamejobs-crawler",
            "--store-url",
            "http://localhost:3000/tables/job_postings",
        ])
        .unwrap();

        assert_eq!(config.store_url, "http://localhost:3000/tables/job_postings");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_pages, 3);
        assert!(!config.dry_run);
        assert!(!config.exclude_non_game);
    }

    #[test]
    fn test_relative_store_url_is_accepted_by_parser() {
        // validated later so the run can report it as a configuration error
        let config =
            Config::try_parse_from(["gamejobs-crawler", "--store-url", "tables/job_postings"])
                .unwrap();
        assert_eq!(config.store_url, "tables/job_postings");
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "gamejobs-crawler",
            "--store-url",
            "https://store.test/jobs",
            "--max-pages",
            "5",
            "--dry-run",
            "--exclude-non-game",
        ])
        .unwrap();

        assert_eq!(config.max_pages, 5);
        assert!(config.dry_run);
        assert!(config.exclude_non_game);
    }
}
