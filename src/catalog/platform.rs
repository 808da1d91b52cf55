use crate::api::{ApiClient, Paginator};
use crate::catalog::types::Platform;
use crate::Result;
use std::ops::ControlFlow;

/// Finds a platform id by its exact, case-sensitive name
///
/// Walks the platform catalog page by page and stops at the first match, so
/// later pages are never requested once the platform has been seen.
///
/// # Returns
///
/// * `Ok(Some(id))` - The platform exists
/// * `Ok(None)` - The whole catalog was walked without a match
/// * `Err(LongrunError)` - A request failed
pub async fn resolve_platform(client: &ApiClient, name: &str) -> Result<Option<String>> {
    let start = client.listing(&["platforms"], &[])?;
    let mut found = None;

    let pages = Paginator::<Platform>::new(client, start)
        .walk(|platforms| match find_platform(&platforms, name) {
            Some(id) => {
                found = Some(id.to_string());
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        })
        .await?;

    tracing::debug!("Searched {} platform page(s) for '{}'", pages, name);
    Ok(found)
}

fn find_platform<'p>(platforms: &'p [Platform], name: &str) -> Option<&'p str> {
    platforms
        .iter()
        .find(|platform| platform.name == name)
        .map(|platform| platform.id.as_str())
}
