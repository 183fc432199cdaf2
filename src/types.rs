//! Data types for Last.fm artist metadata and client activity.
//!
//! This module contains the artist, track and album records returned by the
//! API client, the pure helpers the front ends use to display them, and the
//! event types the client broadcasts while talking to Last.fm.

use chrono::NaiveDateTime;
use http_types::Url;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tokio::sync::{broadcast, watch};

// ================================================================================================
// ARTIST, TRACK AND ALBUM METADATA
// ================================================================================================

/// One resolution of an image, tagged with Last.fm's size label.
///
/// Labels seen in the wild are `small`, `medium`, `large`, `extralarge` and
/// `mega`. The URL may be empty when Last.fm has no artwork.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageVariant {
    /// Image URL (possibly empty)
    pub url: String,
    /// Size label
    pub size: String,
}

impl ImageVariant {
    /// Build a variant from anything string-like.
    pub fn new(url: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            size: size.into(),
        }
    }
}

/// Lightweight artist record as returned by `artist.search`.
///
/// # Examples
///
/// ```rust
/// use lastfm_explorer::{ArtistSummary, ImageVariant};
///
/// let artist = ArtistSummary {
///     name: "Queen".to_string(),
///     mbid: None,
///     url: "https://www.last.fm/music/Queen".to_string(),
///     images: vec![ImageVariant::new("https://img/q.png", "large")],
///     listeners: 5_000_000,
///     streamable: false,
/// };
///
/// assert_eq!(artist.display_image(), Some("https://img/q.png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistSummary {
    /// Artist name
    pub name: String,
    /// MusicBrainz identifier, when Last.fm knows one
    pub mbid: Option<String>,
    /// Artist page on Last.fm
    pub url: String,
    /// Available image resolutions, in the order Last.fm sent them
    pub images: Vec<ImageVariant>,
    /// Number of distinct listeners
    pub listeners: u64,
    /// Whether Last.fm marks the artist as streamable
    pub streamable: bool,
}

impl ArtistSummary {
    /// Preferred image URL for display.
    pub fn display_image(&self) -> Option<&str> {
        select_display_image(&self.images)
    }
}

/// A user-applied tag on an artist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name, e.g. "classic rock"
    pub name: String,
    /// Tag page on Last.fm
    pub url: String,
}

/// Listener and play totals for an artist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistStats {
    /// Number of distinct listeners
    pub listeners: u64,
    /// Total number of scrobbles
    pub playcount: u64,
}

/// Artist biography.
///
/// `summary` is an HTML fragment that ends with a "Read more on Last.fm"
/// anchor; use [`Bio::cleaned_summary`] before showing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bio {
    /// Short biography (HTML fragment)
    pub summary: String,
    /// Full biography (HTML fragment)
    pub content: String,
    /// Publication date as Last.fm formats it, e.g. "10 Feb 2006, 12:00"
    pub published: String,
    /// Link to the full biography page
    pub link: Option<String>,
}

impl Bio {
    /// The summary with the trailing Last.fm link removed.
    pub fn cleaned_summary(&self) -> String {
        clean_bio(&self.summary)
    }

    /// Parse the publication date, if it is in Last.fm's usual format.
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.published.trim(), "%d %b %Y, %H:%M").ok()
    }
}

/// An artist Last.fm considers similar to the selected one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimilarArtist {
    /// Artist name
    pub name: String,
    /// Artist page on Last.fm
    pub url: String,
    /// Available image resolutions
    pub images: Vec<ImageVariant>,
}

/// Enriched artist record as returned by `artist.getinfo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistDetail {
    /// Artist name (canonical spelling, may differ from the query)
    pub name: String,
    /// MusicBrainz identifier, when Last.fm knows one
    pub mbid: Option<String>,
    /// Canonical artist page on Last.fm
    pub url: String,
    /// Available image resolutions
    pub images: Vec<ImageVariant>,
    /// Whether the artist is currently touring
    pub on_tour: bool,
    /// Listener and play totals
    pub stats: ArtistStats,
    /// Similar artists, most similar first
    pub similar: Vec<SimilarArtist>,
    /// Top tags, most applied first
    pub tags: Vec<Tag>,
    /// Biography
    pub bio: Bio,
}

impl ArtistDetail {
    /// Preferred image URL for display.
    pub fn display_image(&self) -> Option<&str> {
        select_display_image(&self.images)
    }
}

/// One entry of `artist.gettoptracks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackSummary {
    /// Track title
    pub name: String,
    /// Total number of scrobbles
    pub playcount: u64,
    /// Number of distinct listeners
    pub listeners: u64,
    /// Track page on Last.fm
    pub url: String,
    /// Position in the chart (1-based), when provided
    pub rank: Option<u32>,
}

/// One entry of `artist.gettopalbums`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlbumSummary {
    /// Album title
    pub name: String,
    /// Total number of scrobbles
    pub playcount: u64,
    /// Album page on Last.fm
    pub url: String,
    /// Available cover resolutions
    pub images: Vec<ImageVariant>,
    /// Position in the chart (1-based), when provided
    pub rank: Option<u32>,
}

impl AlbumSummary {
    /// Preferred cover URL for display.
    pub fn display_image(&self) -> Option<&str> {
        select_display_image(&self.images)
    }
}

/// Pick the image to show for an artist or album.
///
/// Returns the first variant labelled `large` or `extralarge` whose URL is
/// non-empty, or `None` when there is no such variant.
///
/// ```rust
/// use lastfm_explorer::{select_display_image, ImageVariant};
///
/// let images = vec![ImageVariant::new("a", "small"), ImageVariant::new("b", "large")];
/// assert_eq!(select_display_image(&images), Some("b"));
///
/// let small_only = vec![ImageVariant::new("a", "small")];
/// assert_eq!(select_display_image(&small_only), None);
/// ```
pub fn select_display_image(images: &[ImageVariant]) -> Option<&str> {
    images
        .iter()
        .find(|img| img.size == "large" || img.size == "extralarge")
        .map(|img| img.url.as_str())
        .filter(|url| !url.is_empty())
}

static BIO_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a href.*?</a>").expect("bio link pattern is valid"));

/// Strip embedded `<a href ...>...</a>` fragments from a biography and trim it.
///
/// ```rust
/// use lastfm_explorer::clean_bio;
///
/// assert_eq!(clean_bio("Some text <a href=\"x\">link</a>"), "Some text");
/// ```
pub fn clean_bio(bio: &str) -> String {
    BIO_LINK.replace_all(bio, "").trim().to_string()
}

// ================================================================================================
// EVENT SYSTEM
// ================================================================================================

/// Request information for client events.
///
/// The `api_key` query parameter is masked so events can be logged or shown
/// without leaking the credential.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestInfo {
    /// The HTTP method
    pub method: String,
    /// The full URI being requested, with the API key masked
    pub uri: String,
    /// Query parameters as key-value pairs, with the API key masked
    pub query_params: Vec<(String, String)>,
    /// Path without query parameters
    pub path: String,
}

impl RequestInfo {
    /// Create RequestInfo from a parsed URL and method
    pub fn from_url_and_method(url: &Url, method: &str) -> Self {
        let query_params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let value = if k == "api_key" {
                    "***".to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), value)
            })
            .collect();

        let mut masked = url.clone();
        if !query_params.is_empty() {
            masked
                .query_pairs_mut()
                .clear()
                .extend_pairs(query_params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Self {
            method: method.to_string(),
            uri: masked.to_string(),
            query_params,
            path: url.path().to_string(),
        }
    }

    /// The Last.fm `method` parameter, if present.
    pub fn api_method(&self) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(k, _)| k == "method")
            .map(|(_, v)| v.as_str())
    }

    /// Get a short description of the request for logging
    pub fn short_description(&self) -> String {
        match self.api_method() {
            Some(api_method) => {
                let artist = self
                    .query_params
                    .iter()
                    .find(|(k, _)| k == "artist")
                    .map(|(_, v)| v.as_str())
                    .unwrap_or("");
                format!("{} {api_method} artist={artist}", self.method)
            }
            None => format!("{} {}", self.method, self.path),
        }
    }
}

/// Event type to describe internal HTTP client activity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// Request started
    RequestStarted {
        /// Request details
        request: RequestInfo,
    },
    /// Response received (any status)
    RequestCompleted {
        /// Request details
        request: RequestInfo,
        /// HTTP status code
        status_code: u16,
        /// Duration of the request in milliseconds
        duration_ms: u64,
    },
    /// Request failed at the transport or API level
    RequestFailed {
        /// Request details
        request: RequestInfo,
        /// Normalized error message
        message: String,
    },
}

/// Type alias for the broadcast receiver
pub type ClientEventReceiver = broadcast::Receiver<ClientEvent>;

/// Type alias for the watch receiver
pub type ClientEventWatcher = watch::Receiver<Option<ClientEvent>>;

/// Shared event broadcasting state that persists across client clones
#[derive(Clone)]
pub struct SharedEventBroadcaster {
    event_tx: broadcast::Sender<ClientEvent>,
    last_event_tx: watch::Sender<Option<ClientEvent>>,
}

impl SharedEventBroadcaster {
    /// Create a new shared event broadcaster
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (last_event_tx, _) = watch::channel(None);

        Self {
            event_tx,
            last_event_tx,
        }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast_event(&self, event: ClientEvent) {
        let _ = self.event_tx.send(event.clone());
        self.last_event_tx.send_replace(Some(event));
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.event_tx.subscribe()
    }

    /// Watch the most recent event
    pub fn watch_latest(&self) -> ClientEventWatcher {
        self.last_event_tx.subscribe()
    }

    /// Get the latest event
    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.last_event_tx.borrow().clone()
    }
}

impl Default for SharedEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedEventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEventBroadcaster")
            .field("subscribers", &self.event_tx.receiver_count())
            .finish()
    }
}

// ================================================================================================
// TESTS
// ================================================================================================
