use lastfm_explorer::{ActionOutcome, BrowseController, LastFmApiClient};

/// Handle the artist command: load the detail, then whichever secondary
/// lists were asked for, concurrently.
pub async fn handle_artist_command<C: LastFmApiClient>(
    controller: &BrowseController<C>,
    name: &str,
    tracks: bool,
    albums: bool,
) -> ActionOutcome {
    let outcome = controller.select_artist(name).await;
    if !outcome.is_completed() {
        return outcome;
    }

    let load_tracks = async {
        if tracks {
            controller.load_top_tracks().await
        } else {
            ActionOutcome::Completed
        }
    };
    let load_albums = async {
        if albums {
            controller.load_top_albums().await
        } else {
            ActionOutcome::Completed
        }
    };

    let (tracks_outcome, albums_outcome) = futures::join!(load_tracks, load_albums);
    log::debug!("Secondary loads for '{name}': tracks={tracks_outcome:?} albums={albums_outcome:?}");

    match (tracks_outcome, albums_outcome) {
        (failed @ ActionOutcome::Failed(_), _) | (_, failed @ ActionOutcome::Failed(_)) => failed,
        _ => ActionOutcome::Completed,
    }
}
