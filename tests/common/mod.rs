#![allow(dead_code)]
use http_client::{Error, HttpClient, Request, Response};
use http_types::{StatusCode, Url};
use lastfm_explorer::{ClientConfig, LastFmApiClientImpl};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const TEST_API_KEY: &str = "test_api_key";

/// A canned reply for one request.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// Respond with a status and body
    Body { status: u16, body: String },
    /// Respond only after the gate is notified
    Gated {
        status: u16,
        body: String,
        gate: Arc<Notify>,
    },
    /// Fail at the transport level
    TransportError(String),
}

impl StubReply {
    pub fn ok(body: impl Into<String>) -> Self {
        StubReply::Body {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        StubReply::Body {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Default)]
struct StubState {
    replies: HashMap<String, VecDeque<StubReply>>,
    requests: Vec<Url>,
}

/// In-memory transport keyed by the Last.fm `method` query parameter.
///
/// Replies are queued per method and consumed in order; every request URL is
/// recorded so tests can inspect parameters.
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
    state: Arc<Mutex<StubState>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: &str, reply: StubReply) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<Url> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self, method: &str) -> usize {
        self.requests()
            .iter()
            .filter(|url| query_param(url, "method").as_deref() == Some(method))
            .count()
    }

    pub fn client(&self) -> LastFmApiClientImpl {
        LastFmApiClientImpl::new(Box::new(self.clone()), ClientConfig::new(TEST_API_KEY))
    }
}

pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn respond(status: u16, body: String) -> Response {
    let mut response = Response::new(status);
    response.set_body(body);
    response
}

#[async_trait::async_trait]
impl HttpClient for StubTransport {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        let url = req.url().clone();
        let method = query_param(&url, "method").unwrap_or_default();

        let reply = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(url);
            state
                .replies
                .get_mut(&method)
                .and_then(|queue| queue.pop_front())
        };

        match reply {
            Some(StubReply::Body { status, body }) => Ok(respond(status, body)),
            Some(StubReply::Gated { status, body, gate }) => {
                gate.notified().await;
                Ok(respond(status, body))
            }
            Some(StubReply::TransportError(message)) => {
                Err(Error::from_str(StatusCode::BadGateway, message))
            }
            None => Err(Error::from_str(
                StatusCode::InternalServerError,
                format!("no stubbed reply for '{method}'"),
            )),
        }
    }
}

// =============================================================================
// Fixture bodies
// =============================================================================

pub fn search_body(names: &[&str]) -> String {
    let artists: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "name": name,
                "listeners": (1_000_000 - i * 1000).to_string(),
                "mbid": "",
                "url": format!("https://www.last.fm/music/{}", name.replace(' ', "+")),
                "streamable": "0",
                "image": [
                    {"#text": format!("https://img/{i}-s.png"), "size": "small"},
                    {"#text": format!("https://img/{i}-l.png"), "size": "large"}
                ]
            })
        })
        .collect();

    serde_json::json!({
        "results": {
            "opensearch:totalResults": names.len().to_string(),
            "artistmatches": {"artist": artists},
            "@attr": {"for": "query"}
        }
    })
    .to_string()
}

pub fn info_body(name: &str) -> String {
    serde_json::json!({
        "artist": {
            "name": name,
            "mbid": "",
            "url": format!("https://www.last.fm/music/{}", name.replace(' ', "+")),
            "image": [{"#text": "https://img/detail-l.png", "size": "large"}],
            "streamable": "0",
            "ontour": "0",
            "stats": {"listeners": "5372937", "playcount": "361582010"},
            "similar": {"artist": []},
            "tags": {"tag": [{"name": "classic rock", "url": "https://www.last.fm/tag/classic+rock"}]},
            "bio": {
                "published": "10 Feb 2006, 12:00",
                "summary": format!("{name} is a band. <a href=\"https://www.last.fm/music/x\">Read more on Last.fm</a>"),
                "content": format!("{name} is a band.")
            }
        }
    })
    .to_string()
}

pub fn tracks_body(names: &[&str]) -> String {
    let tracks: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "name": name,
                "playcount": (1000 - i).to_string(),
                "listeners": "100",
                "url": "",
                "@attr": {"rank": (i + 1).to_string()}
            })
        })
        .collect();
    serde_json::json!({"toptracks": {"track": tracks}}).to_string()
}

pub fn albums_body(names: &[&str]) -> String {
    let albums: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "name": name,
                "playcount": 1000 - i,
                "url": "",
                "image": [{"#text": "", "size": "large"}],
                "@attr": {"rank": i + 1}
            })
        })
        .collect();
    serde_json::json!({"topalbums": {"album": albums}}).to_string()
}

pub fn error_body(code: u32, message: &str) -> String {
    serde_json::json!({"error": code, "message": message, "links": []}).to_string()
}
