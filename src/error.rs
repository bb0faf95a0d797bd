//! Error types
//!
//! Nothing inside the tick loop can fail. Errors come from setup (canvas,
//! graphics device) and from the score store, which callers soft-fail on.

/// Errors raised outside the simulation
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Rendering surface or graphics device unavailable at mount
    #[error("Setup failed: {0}")]
    Setup(String),

    /// Score store transport or HTTP failure
    #[error("Score store error: {0}")]
    Store(String),

    /// Malformed JSON from storage or the network
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Player name rejected before saving
    #[error("Invalid player name: {0}")]
    InvalidName(String),

    /// Tuning override rejected
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GameError {
    /// Browser API failures surface as opaque JS values; keep their debug text.
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GameError::Store(format!("{:?}", value))
    }
}
