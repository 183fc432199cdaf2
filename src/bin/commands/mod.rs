pub mod artist;
pub mod output;
pub mod search;

use clap::Subcommand;
use lastfm_explorer::{
    ActionOutcome, BrowseController, ClientEvent, ClientEventReceiver, LastFmApiClientImpl,
};
use output::{HumanReadableRenderer, JsonRenderer, SessionRenderer};
use tokio::sync::broadcast;

#[derive(Subcommand)]
pub enum Commands {
    /// Search artists by name
    Search {
        /// Artist name (or part of it) to search for
        query: String,

        /// Maximum number of results to request
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show an artist's info, optionally with top tracks and albums
    Artist {
        /// Artist name
        name: String,

        /// Also load the artist's top tracks
        #[arg(long)]
        tracks: bool,

        /// Also load the artist's top albums
        #[arg(long)]
        albums: bool,

        /// Maximum number of tracks/albums to request
        #[arg(long)]
        limit: Option<u32>,
    },
}

/// Run one command against a fresh browse session and render the result.
pub async fn execute_command(
    command: Commands,
    client: LastFmApiClientImpl,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let default_limit = client.config().default_limit;
    let limit = match &command {
        Commands::Search { limit, .. } | Commands::Artist { limit, .. } => {
            limit.unwrap_or(default_limit)
        }
    };

    let progress = verbose.then(|| tokio::spawn(report_progress(client.subscribe())));
    let controller = BrowseController::new(client).with_limit(limit);

    let outcome = match command {
        Commands::Search { query, .. } => search::handle_search_command(&controller, &query).await,
        Commands::Artist {
            name,
            tracks,
            albums,
            ..
        } => artist::handle_artist_command(&controller, &name, tracks, albums).await,
    };

    let session = controller.snapshot();
    drop(controller);
    if let Some(progress) = progress {
        let _ = progress.await;
    }

    let mut renderer: Box<dyn SessionRenderer> = if json {
        Box::new(JsonRenderer)
    } else {
        Box::new(HumanReadableRenderer::new())
    };
    renderer.render(&session);

    match outcome {
        ActionOutcome::Failed(message) => Err(message.into()),
        ActionOutcome::Rejected(reason) => Err(format!("request refused: {reason:?}").into()),
        ActionOutcome::Completed | ActionOutcome::Superseded => Ok(()),
    }
}

/// Print one status line per request to stderr until the client is dropped.
///
/// Driven by the client's request events rather than the session's busy
/// flags, so short requests are reported too.
async fn report_progress(mut rx: ClientEventReceiver) -> usize {
    let mut reported = 0;
    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Some(line) = progress_line(&event) {
                    eprintln!("{line}");
                    reported += 1;
                }
            }
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    reported
}

fn progress_line(event: &ClientEvent) -> Option<String> {
    let ClientEvent::RequestStarted { request } = event else {
        return None;
    };
    let line = match request.api_method() {
        Some("artist.search") => "🔍 Searching...".to_string(),
        Some("artist.getinfo") => "👤 Loading artist info...".to_string(),
        Some("artist.gettoptracks") => "🎵 Loading top tracks...".to_string(),
        Some("artist.gettopalbums") => "💿 Loading top albums...".to_string(),
        _ => format!("⏳ {}", request.short_description()),
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_types::Url;
    use lastfm_explorer::{RequestInfo, SharedEventBroadcaster};

    fn started(method: &str) -> ClientEvent {
        let url: Url = format!("https://ws.audioscrobbler.com/2.0/?method={method}&artist=Queen")
            .parse()
            .unwrap();
        ClientEvent::RequestStarted {
            request: RequestInfo::from_url_and_method(&url, "GET"),
        }
    }

    #[test]
    fn test_progress_line_per_request_start() {
        assert_eq!(
            progress_line(&started("artist.gettoptracks")).as_deref(),
            Some("🎵 Loading top tracks...")
        );
        let completed = ClientEvent::RequestCompleted {
            request: RequestInfo::from_url_and_method(
                &Url::parse("https://ws.audioscrobbler.com/2.0/").unwrap(),
                "GET",
            ),
            status_code: 200,
            duration_ms: 3,
        };
        assert!(progress_line(&completed).is_none());
    }

    #[tokio::test]
    async fn test_back_to_back_requests_are_all_reported() {
        let broadcaster = SharedEventBroadcaster::new();
        let progress = tokio::spawn(report_progress(broadcaster.subscribe()));

        // Sent without yielding, so a latest-value channel would keep only one.
        broadcaster.broadcast_event(started("artist.gettoptracks"));
        broadcaster.broadcast_event(started("artist.gettopalbums"));
        drop(broadcaster);

        assert_eq!(progress.await.unwrap(), 2);
    }
}
