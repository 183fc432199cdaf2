use crate::api::{
    parse_artist_info_response, parse_artist_search_response, parse_error_body,
    parse_top_albums_response, parse_top_tracks_response, ApiMethod,
};
use crate::types::{ClientEvent, ClientEventReceiver, RequestInfo, SharedEventBroadcaster};
use crate::{
    AlbumSummary, ArtistDetail, ArtistSummary, ClientConfig, LastFmApiClient, LastFmError,
    Result, TrackSummary,
};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::sync::Arc;

/// Client for the Last.fm 2.0 JSON API.
///
/// Wraps any [`HttpClient`] implementation; every operation is one GET against
/// the configured endpoint. Clones share the transport and the event
/// broadcaster.
///
/// # Examples
///
/// ```rust,no_run
/// use lastfm_explorer::{ClientConfig, LastFmApiClient, LastFmApiClientImpl, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let client = LastFmApiClientImpl::new(Box::new(http_client), ClientConfig::from_env()?);
///
///     for artist in client.search_artists("Queen", 5).await? {
///         println!("{} ({} listeners)", artist.name, artist.listeners);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LastFmApiClientImpl {
    client: Arc<dyn HttpClient + Send + Sync>,
    config: ClientConfig,
    broadcaster: Arc<SharedEventBroadcaster>,
}

impl LastFmApiClientImpl {
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, config: ClientConfig) -> Self {
        Self {
            client: Arc::from(client),
            config,
            broadcaster: Arc::new(SharedEventBroadcaster::new()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn subscribe(&self) -> ClientEventReceiver {
        self.broadcaster.subscribe()
    }

    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.broadcaster.latest_event()
    }

    /// Build the request URL for one API call.
    pub fn build_url(&self, method: ApiMethod, artist: &str, limit: Option<u32>) -> Result<Url> {
        let base = self.config.base_url.as_str();
        let separator = if base.contains('?') { '&' } else { '?' };

        let mut url = format!(
            "{base}{separator}method={}&artist={}&api_key={}&format=json",
            method.as_str(),
            urlencoding::encode(artist),
            urlencoding::encode(&self.config.api_key),
        );
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={limit}"));
        }

        url.parse::<Url>()
            .map_err(|e| LastFmError::Config(format!("invalid base URL '{base}': {e}")))
    }

    /// Issue one GET and return the body of a successful, non-error response.
    async fn get(&self, method: ApiMethod, artist: &str, limit: Option<u32>) -> Result<String> {
        let url = self.build_url(method, artist, limit)?;
        let request_info = RequestInfo::from_url_and_method(&url, "GET");
        let request_start = std::time::Instant::now();

        log::debug!("Requesting {}", request_info.short_description());
        self.broadcaster
            .broadcast_event(ClientEvent::RequestStarted {
                request: request_info.clone(),
            });

        let result = self.round_trip(url, &request_info, request_start).await;

        if let Err(e) = &result {
            log::warn!("{} failed: {e}", request_info.short_description());
            self.broadcaster.broadcast_event(ClientEvent::RequestFailed {
                request: request_info,
                message: e.user_message(),
            });
        }

        result
    }

    async fn round_trip(
        &self,
        url: Url,
        request_info: &RequestInfo,
        request_start: std::time::Instant,
    ) -> Result<String> {
        let request = Request::new(Method::Get, url);
        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;

        let status = response.status();
        self.broadcaster
            .broadcast_event(ClientEvent::RequestCompleted {
                request: request_info.clone(),
                status_code: status.into(),
                duration_ms: request_start.elapsed().as_millis() as u64,
            });
        log::debug!(
            "{} -> {} in {}ms",
            request_info.short_description(),
            u16::from(status),
            request_start.elapsed().as_millis()
        );

        let body = response
            .body_string()
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;

        // An error body with no message says less than a failing status line.
        match parse_error_body(&body) {
            Some(LastFmError::Api { message, .. })
                if message.trim().is_empty() && !status.is_success() => {}
            Some(err) => return Err(err),
            None => {}
        }

        if !status.is_success() {
            return Err(LastFmError::Http(format!(
                "{} {}",
                u16::from(status),
                status.canonical_reason()
            )));
        }

        Ok(body)
    }
}

#[async_trait(?Send)]
impl LastFmApiClient for LastFmApiClientImpl {
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<ArtistSummary>> {
        let body = self.get(ApiMethod::ArtistSearch, query, Some(limit)).await?;
        let artists = parse_artist_search_response(&body)?;
        log::debug!("Search for '{query}' returned {} artists", artists.len());
        Ok(artists)
    }

    async fn get_artist_detail(&self, name: &str) -> Result<ArtistDetail> {
        let body = self.get(ApiMethod::ArtistGetInfo, name, None).await?;
        parse_artist_info_response(&body)
    }

    async fn get_top_tracks(&self, name: &str, limit: u32) -> Result<Vec<TrackSummary>> {
        let body = self
            .get(ApiMethod::ArtistGetTopTracks, name, Some(limit))
            .await?;
        parse_top_tracks_response(&body)
    }

    async fn get_top_albums(&self, name: &str, limit: u32) -> Result<Vec<AlbumSummary>> {
        let body = self
            .get(ApiMethod::ArtistGetTopAlbums, name, Some(limit))
            .await?;
        parse_top_albums_response(&body)
    }
}

impl std::fmt::Debug for LastFmApiClientImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastFmApiClientImpl")
            .field("config", &self.config)
            .field("broadcaster", &self.broadcaster)
            .finish()
    }
}
