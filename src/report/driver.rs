//! Report driver - sequences the lookups of one run
//!
//! 1. Resolve the platform id (a missing platform ends the run)
//! 2. Resolve genre filters, only when genre names were configured
//! 3. Enumerate the platform's games through the filters
//! 4. Look up each game's Any% record and print the ones over the threshold

use crate::api::ApiClient;
use crate::catalog::{
    lookup_any_percent_record, resolve_genres, resolve_platform, GameEnumerator, GameFilter,
    GenreIds,
};
use crate::config::{Config, SearchConfig};
use crate::report::format::format_record_line;
use crate::{LongrunError, Result};
use std::io::Write;

/// Counters collected over one report run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Games listed for the platform, before filtering
    pub games_listed: u64,

    /// Games that passed the genre and exclusivity filters
    pub games_scanned: u64,

    /// Scanned games that have an Any% record
    pub records_found: u64,

    /// Games written to the report
    pub games_reported: u64,

    /// Cooldowns entered because of rate limiting
    pub throttle_waits: u64,

    /// HTTP requests issued, retries included
    pub requests: u64,
}

/// Runs the search described by an immutable configuration
pub struct ReportDriver {
    search: SearchConfig,
    client: ApiClient,
}

impl ReportDriver {
    /// Creates a driver and its API client from a validated configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = ApiClient::new(&config.api, &config.user_agent)?;
        Ok(Self::with_client(config.search.clone(), client))
    }

    /// Creates a driver around an existing client
    pub fn with_client(search: SearchConfig, client: ApiClient) -> Self {
        Self { search, client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Runs the whole report, writing one line per qualifying game to `out`
    ///
    /// A record qualifies when it is strictly longer than the threshold.
    /// Games without an Any% record are skipped silently.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<ReportSummary> {
        let search = &self.search;

        tracing::info!("Finding platform id for {}...", search.platform);
        let platform_id = resolve_platform(&self.client, &search.platform)
            .await?
            .ok_or_else(|| LongrunError::PlatformNotFound {
                name: search.platform.clone(),
            })?;
        tracing::info!("Found platform id: {}", platform_id);

        let genres = if search.has_genre_filter() {
            tracing::info!(
                "Finding genre ids for {:?} / {:?}...",
                search.include_genres,
                search.exclude_genres
            );
            let ids = resolve_genres(&self.client, &search.include_genres, &search.exclude_genres)
                .await?;
            tracing::info!("Found genre ids: {:?} / {:?}", ids.include, ids.exclude);
            ids
        } else {
            GenreIds::default()
        };

        let threshold = search.threshold_seconds();
        let filter = GameFilter::new(platform_id, genres, search.platform_exclusive);
        let mut games = GameEnumerator::new(&self.client, filter)?;
        let mut summary = ReportSummary::default();

        while let Some(game) = games.next().await? {
            summary.games_scanned += 1;

            let record = match lookup_any_percent_record(&self.client, &game.id).await? {
                Some(seconds) => seconds,
                None => continue,
            };
            summary.records_found += 1;

            if record > threshold {
                writeln!(out, "{}", format_record_line(record, game.name()))?;
                out.flush()?;
                summary.games_reported += 1;
            } else {
                tracing::debug!("{}: {:.0}s is under the threshold", game.name(), record);
            }

            if summary.games_scanned % 50 == 0 {
                tracing::info!(
                    "Progress: {} games scanned, {} reported",
                    summary.games_scanned,
                    summary.games_reported
                );
            }
        }

        summary.games_listed = games.games_seen();
        summary.throttle_waits = self.client.throttle_count();
        summary.requests = self.client.request_count();

        Ok(summary)
    }
}
