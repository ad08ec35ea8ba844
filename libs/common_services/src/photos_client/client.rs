use super::error::PhotoLibraryError;
use super::interfaces::{AlbumsPage, MediaItemsPage, MediaSearchQuery, RemoteMediaItem};
use crate::database::UserStore;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use sqlx::SqlitePool;
use url::Url;

/// The remote photo library, as far as the importer is concerned. The HTTP
/// implementation talks to the real API; tests substitute an in-memory fake.
#[async_trait]
pub trait PhotoLibrary: Send + Sync {
    async fn search_media_items(
        &self,
        query: &MediaSearchQuery,
    ) -> Result<MediaItemsPage, PhotoLibraryError>;

    async fn list_shared_albums(
        &self,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<AlbumsPage, PhotoLibraryError>;

    async fn get_media_item(&self, external_id: &str)
    -> Result<RemoteMediaItem, PhotoLibraryError>;

    async fn download_content(&self, url: &str) -> Result<Vec<u8>, PhotoLibraryError>;
}

/// Builds a library connection for a given acting user. Keeps credentials
/// per call instead of mutating a shared client, so queue jobs running for
/// different users never see each other's session.
#[async_trait]
pub trait PhotoLibraryProvider: Send + Sync {
    async fn connect(
        &self,
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Box<dyn PhotoLibrary>, PhotoLibraryError>;
}

#[derive(Clone)]
pub struct HttpLibraryProvider {
    http_client: Client,
    base_url: Url,
}

impl HttpLibraryProvider {
    #[must_use]
    pub fn new(http_client: Client, base_url: Url) -> Self {
        Self {
            http_client,
            base_url,
        }
    }
}

#[async_trait]
impl PhotoLibraryProvider for HttpLibraryProvider {
    /// Loads the user's stored token blob and builds a client around it.
    /// A missing row, an unauthenticated connection, or a token blob that
    /// carries an error key all mean the account was never connected (or the
    /// grant was revoked) and the caller should report that upstream.
    async fn connect(
        &self,
        pool: &SqlitePool,
        user_id: i64,
    ) -> Result<Box<dyn PhotoLibrary>, PhotoLibraryError> {
        let account = UserStore::find_remote_account(pool, user_id)
            .await
            .map_err(|e| PhotoLibraryError::RemoteServer(e.to_string()))?
            .ok_or(PhotoLibraryError::NotConnected)?;

        if !account.authenticated || account.access_token.is_empty() {
            return Err(PhotoLibraryError::NotConnected);
        }

        let token_blob: Value = serde_json::from_str(&account.access_token)
            .map_err(|_| PhotoLibraryError::NotConnected)?;
        if token_blob.get("error").is_some_and(|e| !e.is_null()) {
            return Err(PhotoLibraryError::NotConnected);
        }
        let access_token = token_blob
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(PhotoLibraryError::NotConnected)?;

        Ok(Box::new(HttpPhotoLibrary {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            access_token: access_token.to_owned(),
        }))
    }
}

pub struct HttpPhotoLibrary {
    http_client: Client,
    base_url: Url,
    access_token: String,
}

impl HttpPhotoLibrary {
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PhotoLibraryError> {
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PhotoLibraryError::RemoteServer(error_text));
        }
        Ok(response)
    }
}

#[async_trait]
impl PhotoLibrary for HttpPhotoLibrary {
    async fn search_media_items(
        &self,
        query: &MediaSearchQuery,
    ) -> Result<MediaItemsPage, PhotoLibraryError> {
        let response = self
            .http_client
            .post(self.endpoint("/v1/mediaItems:search"))
            .bearer_auth(&self.access_token)
            .json(query)
            .send()
            .await?;

        Ok(Self::check_status(response).await?.json().await?)
    }

    async fn list_shared_albums(
        &self,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<AlbumsPage, PhotoLibraryError> {
        let mut url = self.endpoint("/v1/sharedAlbums");
        url.query_pairs_mut()
            .append_pair("pageSize", &page_size.to_string());
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", token);
        }

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Ok(Self::check_status(response).await?.json().await?)
    }

    async fn get_media_item(
        &self,
        external_id: &str,
    ) -> Result<RemoteMediaItem, PhotoLibraryError> {
        let response = self
            .http_client
            .get(self.endpoint(&format!("/v1/mediaItems/{external_id}")))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Ok(Self::check_status(response).await?.json().await?)
    }

    /// Fetches raw content bytes. Content URLs are pre-signed by the remote
    /// side, so no bearer token is attached here.
    async fn download_content(&self, url: &str) -> Result<Vec<u8>, PhotoLibraryError> {
        let response = self.http_client.get(url).send().await?;
        let bytes = Self::check_status(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}
