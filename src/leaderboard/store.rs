//! Remote score table over a PostgREST-style HTTP API
//!
//! Credentials are baked in at build time:
//! `DINO_SCORES_URL=https://xyz.example.co DINO_SCORES_KEY=... trunk build`.
//! Without them the game falls back to the local board.

use crate::consts::MAX_HIGH_SCORES;
use crate::error::GameError;

use super::{NewScore, ScoreRecord};

/// Table holding one row per saved run
pub const SCORES_TABLE: &str = "game_scores";

/// Endpoint and API key for the remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
}

impl StoreConfig {
    /// Read credentials captured at compile time
    pub fn from_env() -> Option<Self> {
        Self::from_parts(option_env!("DINO_SCORES_URL"), option_env!("DINO_SCORES_KEY"))
    }

    /// Both parts must be present and non-blank
    pub fn from_parts(url: Option<&str>, key: Option<&str>) -> Option<Self> {
        let url = url.map(str::trim).filter(|s| !s.is_empty())?;
        let key = key.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }
}

/// Client for the remote score table
#[derive(Debug, Clone)]
pub struct RemoteStore {
    config: StoreConfig,
}

impl RemoteStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, SCORES_TABLE)
    }

    /// GET URL for the best scores, highest first
    pub fn top_scores_url(&self) -> String {
        format!(
            "{}?select=*&order=score.desc&limit={}",
            self.table_url(),
            MAX_HIGH_SCORES
        )
    }

    /// POST URL for inserts
    pub fn insert_url(&self) -> String {
        self.table_url()
    }

    /// Auth and content headers sent with every request
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.config.key.clone()),
            ("Authorization", format!("Bearer {}", self.config.key)),
            ("Content-Type", "application/json".to_string()),
            ("Prefer", "return=minimal".to_string()),
        ]
    }

    /// Insert body: the API takes an array of rows
    pub fn insert_body(record: &NewScore) -> Result<String, GameError> {
        Ok(serde_json::to_string(&[record])?)
    }

    pub fn parse_records(body: &str) -> Result<Vec<ScoreRecord>, GameError> {
        Ok(serde_json::from_str(body)?)
    }

    pub async fn fetch_top_scores(&self) -> Result<Vec<ScoreRecord>, GameError> {
        let body = self.send("GET", &self.top_scores_url(), None).await?;
        Self::parse_records(&body)
    }

    pub async fn insert(&self, record: &NewScore) -> Result<(), GameError> {
        let body = Self::insert_body(record)?;
        self.send("POST", &self.insert_url(), Some(body)).await?;
        log::info!("Saved score {} for {}", record.score, record.player_name);
        Ok(())
    }

    /// Issue one request through the browser's fetch and return the body text
    #[cfg(target_arch = "wasm32")]
    async fn send(&self, method: &str, url: &str, body: Option<String>) -> Result<String, GameError> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, RequestMode, Response};

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(&body));
        }

        let request = Request::new_with_str_and_init(url, &opts)?;
        let headers = request.headers();
        for (name, value) in self.headers() {
            headers.set(name, &value)?;
        }

        let window = web_sys::window().ok_or_else(|| GameError::Store("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()
            .map_err(|_| GameError::Store("fetch did not yield a Response".into()))?;

        if !response.ok() {
            return Err(GameError::Store(format!(
                "{} {} returned HTTP {}",
                method,
                url,
                response.status()
            )));
        }

        let text = JsFuture::from(response.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn send(&self, method: &str, url: &str, _body: Option<String>) -> Result<String, GameError> {
        Err(GameError::Store(format!(
            "{} {}: remote store is only reachable from the browser build",
            method, url
        )))
    }
}
