use crate::api::{ApiClient, Paginator};
use crate::catalog::types::Genre;
use crate::Result;
use std::collections::BTreeSet;
use std::ops::ControlFlow;

/// Genre ids split into the ones to keep and the ones to drop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreIds {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
}

impl GenreIds {
    /// Sorts one genre into include or exclude; include wins when both name it
    fn classify(&mut self, genre: Genre, include_names: &[String], exclude_names: &[String]) {
        if include_names.contains(&genre.name) {
            self.include.insert(genre.id);
        } else if exclude_names.contains(&genre.name) {
            self.exclude.insert(genre.id);
        }
    }
}

/// Resolves genre names into include and exclude id sets
///
/// The whole genre catalog is walked exactly once. Callers with no genre names
/// at all should skip this call and use `GenreIds::default()`.
pub async fn resolve_genres(
    client: &ApiClient,
    include_names: &[String],
    exclude_names: &[String],
) -> Result<GenreIds> {
    let start = client.listing(&["genres"], &[])?;
    let mut ids = GenreIds::default();
    let mut seen = BTreeSet::new();

    Paginator::<Genre>::new(client, start)
        .walk(|genres| {
            for genre in genres {
                seen.insert(genre.name.clone());
                ids.classify(genre, include_names, exclude_names);
            }
            ControlFlow::Continue(())
        })
        .await?;

    for name in include_names.iter().chain(exclude_names) {
        if !seen.contains(name) {
            tracing::warn!("Genre '{}' does not exist in the catalog", name);
        }
    }

    Ok(ids)
}
