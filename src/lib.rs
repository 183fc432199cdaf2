pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod store;
pub mod r#trait;
pub mod types;

pub use client::LastFmApiClientImpl;
pub use config::ClientConfig;
pub use controller::{ActionOutcome, BrowseController, Rejection};
pub use error::{LastFmError, UNKNOWN_ERROR_MESSAGE};
pub use r#trait::LastFmApiClient;
#[cfg(feature = "mock")]
pub use r#trait::MockLastFmApiClient;
pub use store::{SearchSession, SessionStore, View};
pub use types::{
    clean_bio, select_display_image, AlbumSummary, ArtistDetail, ArtistStats, ArtistSummary, Bio,
    ClientEvent, ClientEventReceiver, ClientEventWatcher, ImageVariant, RequestInfo,
    SharedEventBroadcaster, SimilarArtist, Tag, TrackSummary,
};

pub type Result<T> = std::result::Result<T, LastFmError>;
