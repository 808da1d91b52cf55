use crate::api::{ApiClient, DataEnvelope};
use crate::catalog::types::{Category, Leaderboard};
use crate::Result;

/// Name of the category that only requires finishing the game
pub const ANY_PERCENT: &str = "Any%";

/// Looks up the Any% world record of a game, in seconds
///
/// Two requests: the game's categories, then the Any% leaderboard. Each one
/// goes through the rate-limited fetcher on its own.
///
/// # Returns
///
/// * `Ok(Some(seconds))` - Primary time of the top Any% run
/// * `Ok(None)` - No category named exactly `Any%`, or its leaderboard is empty
/// * `Err(LongrunError)` - A request failed
pub async fn lookup_any_percent_record(client: &ApiClient, game_id: &str) -> Result<Option<f64>> {
    let url = client.endpoint(&["games", game_id, "categories"], &[])?;
    let categories: DataEnvelope<Vec<Category>> = client.fetch(&url).await?;
    let categories = categories.data.unwrap_or_default();

    let category = match find_any_percent(&categories) {
        Some(category) => category,
        None => {
            tracing::trace!("Game {} has no {} category", game_id, ANY_PERCENT);
            return Ok(None);
        }
    };

    let url = client.endpoint(
        &["leaderboards", game_id, "category", category.id.as_str()],
        &[],
    )?;
    let leaderboard: DataEnvelope<Leaderboard> = client.fetch(&url).await?;

    Ok(leaderboard.data.and_then(|board| board.record_seconds()))
}

fn find_any_percent(categories: &[Category]) -> Option<&Category> {
    categories
        .iter()
        .find(|category| category.name == ANY_PERCENT)
}
