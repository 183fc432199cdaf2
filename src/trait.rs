use crate::{AlbumSummary, ArtistDetail, ArtistSummary, Result, TrackSummary};
use async_trait::async_trait;

/// Trait for Last.fm API operations that can be mocked for testing.
///
/// The browse controller only talks to Last.fm through this trait, so any
/// implementation (the real [`LastFmApiClientImpl`](crate::LastFmApiClientImpl),
/// a mock, a canned fixture) can drive it.
///
/// Every call is a single fresh round trip: no retries, no caching and no
/// timeout beyond what the underlying transport imposes.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockLastFmApiClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait LastFmApiClient {
    /// Search artists by name (`artist.search`), best match first.
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<ArtistSummary>>;

    /// Fetch the enriched record for one artist (`artist.getinfo`).
    async fn get_artist_detail(&self, name: &str) -> Result<ArtistDetail>;

    /// Fetch an artist's most played tracks (`artist.gettoptracks`).
    async fn get_top_tracks(&self, name: &str, limit: u32) -> Result<Vec<TrackSummary>>;

    /// Fetch an artist's most played albums (`artist.gettopalbums`).
    async fn get_top_albums(&self, name: &str, limit: u32) -> Result<Vec<AlbumSummary>>;
}
