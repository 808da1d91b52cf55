//! Lazy, filtered enumeration of a platform's games
//!
//! The enumerator pulls one catalog page at a time, filters it, and hands out
//! the survivors in catalog order before requesting the next page.

use crate::api::{ApiClient, DataEnvelope, Paginator};
use crate::catalog::genre::GenreIds;
use crate::catalog::types::Game;
use crate::Result;
use serde::Deserialize;
use std::collections::{BTreeSet, VecDeque};

/// Which games of a platform to keep
#[derive(Debug, Clone)]
pub struct GameFilter {
    pub platform_id: String,
    pub genres: GenreIds,

    /// Keep only games released on `platform_id` alone
    pub exclusive: bool,
}

impl GameFilter {
    pub fn new(platform_id: impl Into<String>, genres: GenreIds, exclusive: bool) -> Self {
        Self {
            platform_id: platform_id.into(),
            genres,
            exclusive,
        }
    }

    /// Applies the genre rules to a listed game
    ///
    /// A game with no genre information never passes. An empty include set
    /// does not filter; an empty exclude set does not filter.
    pub fn passes_genres(&self, game: &Game) -> bool {
        let genres = match &game.genres {
            Some(genres) => genres,
            None => return false,
        };

        if !self.genres.include.is_empty() && !intersects(&self.genres.include, genres) {
            return false;
        }

        if !self.genres.exclude.is_empty() && intersects(&self.genres.exclude, genres) {
            return false;
        }

        true
    }

    /// True when `platforms` is exactly this filter's platform
    pub fn is_exclusive_to_platform(&self, platforms: &[String]) -> bool {
        matches!(platforms, [only] if *only == self.platform_id)
    }
}

fn intersects(ids: &BTreeSet<String>, genres: &[String]) -> bool {
    genres.iter().any(|genre| ids.contains(genre))
}

#[derive(Debug, Deserialize)]
struct GameDetail {
    #[serde(default)]
    platforms: Vec<String>,
}

/// Lazy sequence of the games on a platform that pass a `GameFilter`
///
/// Finite and not restartable: once `next` has returned `Ok(None)`, a new
/// enumerator has to be built to walk the catalog again.
pub struct GameEnumerator<'a> {
    client: &'a ApiClient,
    pages: Paginator<'a, Game>,
    filter: GameFilter,
    ready: VecDeque<Game>,
    seen: u64,
    kept: u64,
}

impl<'a> GameEnumerator<'a> {
    /// Starts enumerating `/games?platform=<id>`; no request is made until `next`
    pub fn new(client: &'a ApiClient, filter: GameFilter) -> Result<Self> {
        let start = client.listing(&["games"], &[("platform", filter.platform_id.as_str())])?;

        Ok(Self {
            client,
            pages: Paginator::new(client, start),
            filter,
            ready: VecDeque::new(),
            seen: 0,
            kept: 0,
        })
    }

    /// Returns the next surviving game, fetching more pages as needed
    pub async fn next(&mut self) -> Result<Option<Game>> {
        loop {
            if let Some(game) = self.ready.pop_front() {
                return Ok(Some(game));
            }

            let page = match self.pages.next_page().await? {
                Some(page) => page,
                None => return Ok(None),
            };

            tracing::debug!(
                "Games page {}: {} listed",
                self.pages.pages_fetched(),
                page.len()
            );

            for game in page {
                self.seen += 1;
                if self.accept(&game).await? {
                    self.kept += 1;
                    self.ready.push_back(game);
                }
            }
        }
    }

    async fn accept(&self, game: &Game) -> Result<bool> {
        if !self.filter.passes_genres(game) {
            return Ok(false);
        }

        if !self.filter.exclusive {
            return Ok(true);
        }

        // One extra round-trip per surviving game
        let url = self.client.endpoint(&["games", game.id.as_str()], &[])?;
        let detail: DataEnvelope<GameDetail> = self.client.fetch(&url).await?;
        let platforms = detail.data.map(|d| d.platforms).unwrap_or_default();

        let exclusive = self.filter.is_exclusive_to_platform(&platforms);
        if !exclusive {
            tracing::trace!("Skipping {}: on {} platform(s)", game.name(), platforms.len());
        }
        Ok(exclusive)
    }

    /// Games listed so far, before filtering
    pub fn games_seen(&self) -> u64 {
        self.seen
    }

    /// Games that passed the filter so far
    pub fn games_kept(&self) -> u64 {
        self.kept
    }
}
