use lastfm_explorer::{ActionOutcome, BrowseController, LastFmApiClient};

/// Handle the search command
pub async fn handle_search_command<C: LastFmApiClient>(
    controller: &BrowseController<C>,
    query: &str,
) -> ActionOutcome {
    let outcome = controller.search(query).await;
    log::debug!("Search for '{query}' finished: {outcome:?}");
    outcome
}
