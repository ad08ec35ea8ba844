use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoLibraryError {
    #[error("no authenticated remote library connection for this user")]
    NotConnected,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Remote library returned an error: {0}")]
    RemoteServer(String),
}
