//! Wire types for the Last.fm 2.0 JSON API and the parsers that turn response
//! bodies into the crate's domain types.
//!
//! Last.fm's JSON is a mechanical translation of its XML: counts arrive as
//! strings or numbers depending on the method, single-element lists are
//! sometimes collapsed into a bare object, and empty lists may be an empty
//! string. The deserializers here accept all of those shapes.

use crate::types::{
    AlbumSummary, ArtistDetail, ArtistStats, ArtistSummary, Bio, ImageVariant, SimilarArtist, Tag,
    TrackSummary,
};
use crate::{LastFmError, Result};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// The four Last.fm methods this crate calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    ArtistSearch,
    ArtistGetInfo,
    ArtistGetTopTracks,
    ArtistGetTopAlbums,
}

impl ApiMethod {
    /// Value of the `method` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            ApiMethod::ArtistSearch => "artist.search",
            ApiMethod::ArtistGetInfo => "artist.getinfo",
            ApiMethod::ArtistGetTopTracks => "artist.gettoptracks",
            ApiMethod::ArtistGetTopAlbums => "artist.gettopalbums",
        }
    }
}

impl std::fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Lenient field deserializers
// =============================================================================

fn count_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn de_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

fn de_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        other => count_from_value(&other) > 0,
    })
}

fn de_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        Value::Object(_) => serde_json::from_value(value)
            .map(|item| vec![item])
            .map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Shared pieces
// =============================================================================

#[derive(Deserialize)]
pub struct ApiErrorBody {
    pub error: u32,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct ApiImage {
    #[serde(rename = "#text", default)]
    pub text: String,
    #[serde(default)]
    pub size: String,
}

impl From<ApiImage> for ImageVariant {
    fn from(img: ApiImage) -> Self {
        ImageVariant {
            url: img.text,
            size: img.size,
        }
    }
}

fn images(list: Vec<ApiImage>) -> Vec<ImageVariant> {
    list.into_iter().map(ImageVariant::from).collect()
}

#[derive(Deserialize, Default)]
pub struct ApiRankAttr {
    #[serde(default, deserialize_with = "de_count")]
    pub rank: u64,
}

impl ApiRankAttr {
    fn rank(&self) -> Option<u32> {
        u32::try_from(self.rank).ok().filter(|r| *r > 0)
    }
}

/// Detect Last.fm's `{"error": <code>, "message": "..."}` payload.
///
/// Returns `None` for anything that is not an error body, including bodies
/// that are not JSON at all.
pub fn parse_error_body(json: &str) -> Option<LastFmError> {
    let body: ApiErrorBody = serde_json::from_str(json).ok()?;
    Some(LastFmError::Api {
        code: body.error,
        message: body.message.unwrap_or_default(),
    })
}

fn parse_body<T: DeserializeOwned>(json: &str) -> Result<T> {
    if let Some(err) = parse_error_body(json) {
        return Err(err);
    }
    serde_json::from_str(json).map_err(|e| LastFmError::Parse(e.to_string()))
}

// =============================================================================
// artist.search
// =============================================================================

#[derive(Deserialize)]
pub struct ApiArtistSearchResponse {
    pub results: ApiArtistSearchResults,
}

#[derive(Deserialize)]
pub struct ApiArtistSearchResults {
    #[serde(default)]
    pub artistmatches: ApiArtistMatches,
}

#[derive(Deserialize, Default)]
pub struct ApiArtistMatches {
    #[serde(default, deserialize_with = "de_list")]
    pub artist: Vec<ApiArtist>,
}

#[derive(Deserialize)]
pub struct ApiArtist {
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de_list")]
    pub image: Vec<ApiImage>,
    #[serde(default, deserialize_with = "de_count")]
    pub listeners: u64,
    #[serde(default, deserialize_with = "de_flag")]
    pub streamable: bool,
}

pub fn parse_artist_search_response(json: &str) -> Result<Vec<ArtistSummary>> {
    let response: ApiArtistSearchResponse = parse_body(json)?;

    Ok(response
        .results
        .artistmatches
        .artist
        .into_iter()
        .map(|a| ArtistSummary {
            name: a.name,
            mbid: non_empty(a.mbid),
            url: a.url,
            images: images(a.image),
            listeners: a.listeners,
            streamable: a.streamable,
        })
        .collect())
}

// =============================================================================
// artist.getinfo
// =============================================================================

#[derive(Deserialize)]
pub struct ApiArtistInfoResponse {
    pub artist: ApiArtistInfo,
}

#[derive(Deserialize)]
pub struct ApiArtistInfo {
    pub name: String,
    #[serde(default)]
    pub mbid: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de_list")]
    pub image: Vec<ApiImage>,
    #[serde(default, deserialize_with = "de_flag")]
    pub ontour: bool,
    #[serde(default)]
    pub stats: ApiArtistStats,
    #[serde(default, deserialize_with = "de_wrapped_similar")]
    pub similar: Vec<ApiSimilarArtist>,
    #[serde(default, deserialize_with = "de_wrapped_tags")]
    pub tags: Vec<ApiTag>,
    #[serde(default)]
    pub bio: ApiBio,
}

#[derive(Deserialize, Default)]
pub struct ApiArtistStats {
    #[serde(default, deserialize_with = "de_count")]
    pub listeners: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub playcount: u64,
}

#[derive(Deserialize)]
pub struct ApiSimilarArtist {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de_list")]
    pub image: Vec<ApiImage>,
}

#[derive(Deserialize)]
pub struct ApiTag {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Default)]
pub struct ApiBio {
    #[serde(default)]
    pub links: Option<ApiBioLinks>,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Deserialize)]
pub struct ApiBioLinks {
    #[serde(default, deserialize_with = "de_list")]
    pub link: Vec<ApiBioLink>,
}

#[derive(Deserialize)]
pub struct ApiBioLink {
    #[serde(default)]
    pub href: String,
}

// `similar` and `tags` wrap their lists in one more object and degrade to ""
// when empty.
fn de_wrapped<'de, D, T>(deserializer: D, key: &str) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(mut map) = value else {
        return Ok(Vec::new());
    };
    match map.remove(key) {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        Some(item @ Value::Object(_)) => serde_json::from_value(item)
            .map(|item| vec![item])
            .map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

fn de_wrapped_similar<'de, D>(deserializer: D) -> std::result::Result<Vec<ApiSimilarArtist>, D::Error>
where
    D: Deserializer<'de>,
{
    de_wrapped(deserializer, "artist")
}

fn de_wrapped_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<ApiTag>, D::Error>
where
    D: Deserializer<'de>,
{
    de_wrapped(deserializer, "tag")
}

pub fn parse_artist_info_response(json: &str) -> Result<ArtistDetail> {
    let response: ApiArtistInfoResponse = parse_body(json)?;
    let a = response.artist;

    let link = a
        .bio
        .links
        .and_then(|links| links.link.into_iter().next())
        .map(|link| link.href)
        .filter(|href| !href.is_empty());

    Ok(ArtistDetail {
        name: a.name,
        mbid: non_empty(a.mbid),
        url: a.url,
        images: images(a.image),
        on_tour: a.ontour,
        stats: ArtistStats {
            listeners: a.stats.listeners,
            playcount: a.stats.playcount,
        },
        similar: a
            .similar
            .into_iter()
            .map(|s| SimilarArtist {
                name: s.name,
                url: s.url,
                images: images(s.image),
            })
            .collect(),
        tags: a
            .tags
            .into_iter()
            .map(|t| Tag {
                name: t.name,
                url: t.url,
            })
            .collect(),
        bio: Bio {
            summary: a.bio.summary,
            content: a.bio.content,
            published: a.bio.published,
            link,
        },
    })
}

// =============================================================================
// artist.gettoptracks
// =============================================================================

#[derive(Deserialize)]
pub struct ApiTopTracksResponse {
    pub toptracks: ApiTopTracks,
}

#[derive(Deserialize)]
pub struct ApiTopTracks {
    #[serde(default, deserialize_with = "de_list")]
    pub track: Vec<ApiTopTrack>,
}

#[derive(Deserialize)]
pub struct ApiTopTrack {
    pub name: String,
    #[serde(default, deserialize_with = "de_count")]
    pub playcount: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub listeners: u64,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "@attr", default)]
    pub attr: ApiRankAttr,
}

pub fn parse_top_tracks_response(json: &str) -> Result<Vec<TrackSummary>> {
    let response: ApiTopTracksResponse = parse_body(json)?;

    Ok(response
        .toptracks
        .track
        .into_iter()
        .map(|t| TrackSummary {
            rank: t.attr.rank(),
            name: t.name,
            playcount: t.playcount,
            listeners: t.listeners,
            url: t.url,
        })
        .collect())
}

// =============================================================================
// artist.gettopalbums
// =============================================================================

#[derive(Deserialize)]
pub struct ApiTopAlbumsResponse {
    pub topalbums: ApiTopAlbums,
}

#[derive(Deserialize)]
pub struct ApiTopAlbums {
    #[serde(default, deserialize_with = "de_list")]
    pub album: Vec<ApiTopAlbum>,
}

#[derive(Deserialize)]
pub struct ApiTopAlbum {
    pub name: String,
    #[serde(default, deserialize_with = "de_count")]
    pub playcount: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de_list")]
    pub image: Vec<ApiImage>,
    #[serde(rename = "@attr", default)]
    pub attr: ApiRankAttr,
}

pub fn parse_top_albums_response(json: &str) -> Result<Vec<AlbumSummary>> {
    let response: ApiTopAlbumsResponse = parse_body(json)?;

    Ok(response
        .topalbums
        .album
        .into_iter()
        .map(|a| AlbumSummary {
            rank: a.attr.rank(),
            name: a.name,
            playcount: a.playcount,
            url: a.url,
            images: images(a.image),
        })
        .collect())
}
