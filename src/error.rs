use thiserror::Error;

/// Failure taxonomy for the CMS client. No variant is retried; callers either
/// surface the failure (proxy route) or degrade to an empty result (pages).
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("configuration error: {0}")]
    Configuration(&'static str),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
