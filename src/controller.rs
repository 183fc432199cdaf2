//! Search/browse controller.
//!
//! Sequences API calls in response to the four user actions (search, select
//! an artist, load top tracks, load top albums) and records the outcome in a
//! [`SessionStore`]. Client errors never escape: they are normalized into the
//! session's error message.
//!
//! All actions take `&self` and may be polled concurrently on one task, which
//! is how top tracks and top albums loads overlap:
//!
//! ```rust,no_run
//! use lastfm_explorer::{BrowseController, ClientConfig, LastFmApiClientImpl};
//!
//! # tokio_test::block_on(async {
//! let client = LastFmApiClientImpl::new(
//!     Box::new(http_client::native::NativeClient::new()),
//!     ClientConfig::new("my-api-key"),
//! );
//! let controller = BrowseController::new(client);
//!
//! controller.search("Queen").await;
//! controller.select_artist("Queen").await;
//! futures::join!(controller.load_top_tracks(), controller.load_top_albums());
//!
//! println!("{} tracks", controller.snapshot().tracks.len());
//! # });
//! ```

use crate::config::DEFAULT_LIMIT;
use crate::store::{SearchSession, SessionStore};
use crate::LastFmApiClient;
use std::cell::Cell;
use tokio::sync::watch;

/// Why an action was refused without touching the network or the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The query or artist name was empty or whitespace
    BlankQuery,
    /// Top tracks/albums were requested with no artist selected
    NoArtistSelected,
    /// The same kind of request is already in flight
    Busy,
}

/// Result of a controller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The request succeeded and the state was updated
    Completed,
    /// The request failed; the message was stored in the session
    Failed(String),
    /// The action was refused before any request was made
    Rejected(Rejection),
    /// The response arrived after the selection it belonged to was replaced
    /// and was dropped
    Superseded,
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed)
    }
}

/// Drives a [`SessionStore`] from user actions using any [`LastFmApiClient`].
pub struct BrowseController<C> {
    client: C,
    store: SessionStore,
    limit: u32,
    // Bumped whenever the selected artist is replaced or cleared.
    generation: Cell<u64>,
}

impl<C: LastFmApiClient> BrowseController<C> {
    /// Controller over a fresh, empty session.
    pub fn new(client: C) -> Self {
        Self::with_store(client, SessionStore::new())
    }

    /// Controller over an existing store (e.g. one a renderer already watches).
    pub fn with_store(client: C, store: SessionStore) -> Self {
        Self {
            client,
            store,
            limit: DEFAULT_LIMIT,
            generation: Cell::new(0),
        }
    }

    /// Set how many results each list request asks for (minimum 1).
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn snapshot(&self) -> SearchSession {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.store.subscribe()
    }

    fn bump_generation(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }

    /// Search artists by name.
    ///
    /// Blank queries and searches while another search or selection is in
    /// flight are rejected. An accepted search clears the error, the selected
    /// artist and its tracks/albums; on success the results are replaced, on
    /// failure they are emptied and the error is set.
    pub async fn search(&self, query: &str) -> ActionOutcome {
        let query = query.trim();
        if query.is_empty() {
            log::debug!("Ignoring blank search");
            return ActionOutcome::Rejected(Rejection::BlankQuery);
        }
        if self.store.read(|s| s.searching) {
            log::debug!("Search for '{query}' ignored, another request is in flight");
            return ActionOutcome::Rejected(Rejection::Busy);
        }

        self.bump_generation();
        self.store.update(|s| {
            s.query = query.to_string();
            s.searching = true;
            s.error = None;
            s.selected = None;
            s.tracks.clear();
            s.albums.clear();
        });

        log::info!("Searching artists matching '{query}'");
        match self.client.search_artists(query, self.limit).await {
            Ok(artists) => {
                log::info!("Found {} artists for '{query}'", artists.len());
                self.store.update(|s| {
                    s.results = artists;
                    s.searching = false;
                });
                ActionOutcome::Completed
            }
            Err(e) => {
                let message = e.user_message();
                log::warn!("Artist search for '{query}' failed: {e}");
                self.store.update(|s| {
                    s.results.clear();
                    s.error = Some(message.clone());
                    s.searching = false;
                });
                ActionOutcome::Failed(message)
            }
        }
    }

    /// Load the detail page for an artist.
    ///
    /// Tracks and albums of the previous artist are cleared before the request
    /// goes out and again when the new detail lands, since loads for the old
    /// artist may finish in between. A failure keeps whatever detail was shown
    /// before.
    pub async fn select_artist(&self, name: &str) -> ActionOutcome {
        let name = name.trim();
        if name.is_empty() {
            return ActionOutcome::Rejected(Rejection::BlankQuery);
        }
        if self.store.read(|s| s.searching) {
            log::debug!("Selection of '{name}' ignored, another request is in flight");
            return ActionOutcome::Rejected(Rejection::Busy);
        }

        self.bump_generation();
        self.store.update(|s| {
            s.searching = true;
            s.error = None;
            s.tracks.clear();
            s.albums.clear();
        });

        log::info!("Loading artist info for '{name}'");
        match self.client.get_artist_detail(name).await {
            Ok(detail) => {
                // Anything requested for the previously shown artist is stale now.
                self.bump_generation();
                self.store.update(|s| {
                    s.selected = Some(detail);
                    s.tracks.clear();
                    s.albums.clear();
                    s.searching = false;
                });
                ActionOutcome::Completed
            }
            Err(e) => {
                let message = e.user_message();
                log::warn!("Artist info for '{name}' failed: {e}");
                self.store.update(|s| {
                    s.error = Some(message.clone());
                    s.searching = false;
                });
                ActionOutcome::Failed(message)
            }
        }
    }

    /// Load the selected artist's top tracks.
    pub async fn load_top_tracks(&self) -> ActionOutcome {
        let Some(artist) = self.store.read(|s| s.selected_name().map(str::to_string)) else {
            return ActionOutcome::Rejected(Rejection::NoArtistSelected);
        };
        if self.store.read(|s| s.loading_tracks) {
            return ActionOutcome::Rejected(Rejection::Busy);
        }

        let generation = self.generation.get();
        self.store.update(|s| s.loading_tracks = true);

        log::info!("Loading top tracks for '{artist}'");
        let result = self.client.get_top_tracks(&artist, self.limit).await;
        let current = self.generation.get() == generation;

        match result {
            Ok(tracks) if current => {
                log::debug!("Loaded {} top tracks for '{artist}'", tracks.len());
                self.store.update(|s| {
                    s.tracks = tracks;
                    s.loading_tracks = false;
                });
                ActionOutcome::Completed
            }
            Err(e) if current => {
                let message = e.user_message();
                log::warn!("Top tracks for '{artist}' failed: {e}");
                self.store.update(|s| {
                    s.error = Some(message.clone());
                    s.loading_tracks = false;
                });
                ActionOutcome::Failed(message)
            }
            _ => {
                log::debug!("Dropping top tracks for '{artist}', selection changed");
                self.store.update(|s| s.loading_tracks = false);
                ActionOutcome::Superseded
            }
        }
    }

    /// Load the selected artist's top albums.
    pub async fn load_top_albums(&self) -> ActionOutcome {
        let Some(artist) = self.store.read(|s| s.selected_name().map(str::to_string)) else {
            return ActionOutcome::Rejected(Rejection::NoArtistSelected);
        };
        if self.store.read(|s| s.loading_albums) {
            return ActionOutcome::Rejected(Rejection::Busy);
        }

        let generation = self.generation.get();
        self.store.update(|s| s.loading_albums = true);

        log::info!("Loading top albums for '{artist}'");
        let result = self.client.get_top_albums(&artist, self.limit).await;
        let current = self.generation.get() == generation;

        match result {
            Ok(albums) if current => {
                log::debug!("Loaded {} top albums for '{artist}'", albums.len());
                self.store.update(|s| {
                    s.albums = albums;
                    s.loading_albums = false;
                });
                ActionOutcome::Completed
            }
            Err(e) if current => {
                let message = e.user_message();
                log::warn!("Top albums for '{artist}' failed: {e}");
                self.store.update(|s| {
                    s.error = Some(message.clone());
                    s.loading_albums = false;
                });
                ActionOutcome::Failed(message)
            }
            _ => {
                log::debug!("Dropping top albums for '{artist}', selection changed");
                self.store.update(|s| s.loading_albums = false);
                ActionOutcome::Superseded
            }
        }
    }
}
