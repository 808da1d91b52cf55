//! Catalog lookups built on the paginated API walker
//!
//! - Platform and genre name resolution
//! - Lazy enumeration of a platform's games with genre and exclusivity filters
//! - Any% world-record lookup per game

mod games;
mod genre;
mod platform;
mod records;
mod types;

pub use games::{GameEnumerator, GameFilter};
pub use genre::{resolve_genres, GenreIds};
pub use platform::resolve_platform;
pub use records::{lookup_any_percent_record, ANY_PERCENT};
pub use types::{Category, Game, GameNames, Genre, Leaderboard, Platform};
