use thiserror::Error;

/// Ways a single extract fetch can fail. The passage builder treats every
/// variant as a zero-yield attempt.
#[derive(Error, Debug)]
pub enum FetchError {
    #[cfg(feature = "network")]
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no pages")]
    NoPages,

    #[error("network support is disabled in this build")]
    Disabled,

    #[error("source exhausted")]
    Exhausted,
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        match self {
            #[cfg(feature = "network")]
            FetchError::Network(err) => err.is_timeout(),
            _ => false,
        }
    }
}
