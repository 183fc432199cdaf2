//! Observable search/browse session state.
//!
//! The controller mutates a single [`SearchSession`] through [`SessionStore`];
//! renderers subscribe and redraw whenever it changes.

use crate::{AlbumSummary, ArtistDetail, ArtistSummary, TrackSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Everything a front end needs to draw the browser.
///
/// Created empty when the application starts, mutated in place by the
/// controller and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSession {
    /// Query of the most recently accepted search
    pub query: String,
    /// Search results in the order Last.fm ranked them
    pub results: Vec<ArtistSummary>,
    /// Artist whose detail is being shown
    pub selected: Option<ArtistDetail>,
    /// Top tracks of the selected artist, once loaded
    pub tracks: Vec<TrackSummary>,
    /// Top albums of the selected artist, once loaded
    pub albums: Vec<AlbumSummary>,
    /// Latest failure, until a new search or selection starts
    pub error: Option<String>,
    /// A search or artist detail request is in flight
    pub searching: bool,
    /// A top tracks request is in flight
    pub loading_tracks: bool,
    /// A top albums request is in flight
    pub loading_albums: bool,
}

/// Which part of the session drives the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    /// Nothing to show yet
    Empty,
    /// The search result list
    Results,
    /// The selected artist's detail page
    Detail,
}

impl SearchSession {
    /// The selected detail wins over the result list.
    pub fn view(&self) -> View {
        if self.selected.is_some() {
            View::Detail
        } else if !self.results.is_empty() {
            View::Results
        } else {
            View::Empty
        }
    }

    /// Name of the selected artist, if any.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|d| d.name.as_str())
    }

    /// Whether any request is in flight.
    pub fn is_busy(&self) -> bool {
        self.searching || self.loading_tracks || self.loading_albums
    }
}

/// Shared, observable container for a [`SearchSession`].
///
/// Clones refer to the same session. Updates notify every receiver obtained
/// from [`SessionStore::subscribe`].
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SearchSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_session(SearchSession::default())
    }

    pub fn with_session(session: SearchSession) -> Self {
        let (tx, _) = watch::channel(session);
        Self { tx: Arc::new(tx) }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SearchSession {
        self.tx.borrow().clone()
    }

    /// Read part of the state without cloning all of it.
    pub fn read<R>(&self, f: impl FnOnce(&SearchSession) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Mutate the state in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut SearchSession)) {
        self.tx.send_modify(f);
    }

    /// Receiver that observes every subsequent update.
    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.tx.borrow())
            .field("subscribers", &self.tx.receiver_count())
            .finish()
    }
}
