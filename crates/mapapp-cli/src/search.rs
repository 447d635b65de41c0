//! Running a search through the plugin, the way the host does

use anyhow::{Context, Result};
use mapapp::{App, Plugin, ResultItem};
use mapapp_search_geocodr::{GeocodrOptions, SearchGeocodrPlugin};
use tracing::{debug, info};

/// Outcome of one search
pub enum SearchOutcome {
    Found(Vec<ResultItem>),
    /// Interrupted with Ctrl-C
    Cancelled,
}

/// Initialize the plugin into a fresh app and search `query`
///
/// Ctrl-C aborts the request through the registry instead of killing the
/// process mid-request.
pub async fn run(options: GeocodrOptions, query: &str) -> Result<SearchOutcome> {
    let mut app = App::new();
    let mut plugin = SearchGeocodrPlugin::new(options);
    plugin
        .initialize(&mut app)
        .context("Failed to initialize Geocodr search")?;

    let provider = app
        .search
        .get(plugin.name())
        .context("Geocodr search is not registered")?;

    let mut searching = {
        let provider = provider.clone();
        let query = query.to_string();
        tokio::spawn(async move { provider.search(&query).await })
    };

    let result = tokio::select! {
        joined = &mut searching => joined,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, aborting search");
            app.search.abort_all();
            searching.await
        }
    }
    .context("Search task failed")?;

    match result {
        Ok(items) => {
            debug!(results = %items.len(), "Search finished");
            Ok(SearchOutcome::Found(items))
        }
        Err(e) if e.is_cancelled() => Ok(SearchOutcome::Cancelled),
        Err(e) => Err(e).context("Geocodr search failed"),
    }
}
