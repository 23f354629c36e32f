use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{HeaderValue, CONTENT_LENGTH, USER_AGENT};
use reqwest::{header::HeaderMap, Client, Response};
use serde::Serialize;
use url::Url;

use common::item::Item;
use common::source::{FetchError, ItemSource};

use super::blob::BlobReader;
use super::error::RemoteError;
use super::{DEFAULT_AUTH_URL, DEFAULT_STORAGE_URL};
use crate::state::{AppConfig, REFRESH_TOKEN_ENV};

const TOKEN_PATH: &str = "/token/json/2/user/new";
const DOCS_PATH: &str = "/document-storage/json/2/docs";
const GOOG_HASH_HEADER: &str = "x-goog-hash";

const TOKEN_STEP: &str = "token exchange";
const DOCS_STEP: &str = "item fetch";

/// Where to reach the remote and how to authenticate
#[derive(Debug, Clone, Default)]
pub struct RemoteConfig {
    pub refresh_token: Option<String>,
    pub auth_url: Option<Url>,
    pub storage_url: Option<Url>,
}

impl From<&AppConfig> for RemoteConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            refresh_token: config.refresh_token.clone(),
            auth_url: config.auth_url.clone(),
            storage_url: config.storage_url.clone(),
        }
    }
}

/// Size and checksum of an item's blob
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlobDetails {
    pub size: Option<u64>,
    /// Hex-encoded MD5
    pub md5: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RemoteClient {
    token_url: Url,
    docs_url: Url,
    refresh_token: Option<String>,
    client: Client,
}

impl RemoteClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let auth_url = match &config.auth_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_AUTH_URL)?,
        };
        let storage_url = match &config.storage_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_STORAGE_URL)?,
        };

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("rmfs/", env!("CARGO_PKG_VERSION"))),
        );
        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            token_url: auth_url.join(TOKEN_PATH)?,
            docs_url: storage_url.join(DOCS_PATH)?,
            refresh_token: config.refresh_token.clone(),
            client,
        })
    }

    /// Exchange the device refresh token for a user token
    pub async fn user_token(&self) -> Result<String, FetchError> {
        let refresh_token = self
            .refresh_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                FetchError::Unauthenticated(format!(
                    "no refresh token configured (set {} or refresh_token in the config)",
                    REFRESH_TOKEN_ENV
                ))
            })?;

        let response = self
            .client
            .post(self.token_url.clone())
            .bearer_auth(refresh_token)
            .send()
            .await
            .map_err(|e| transport(TOKEN_STEP, e))?;
        let body = Self::success_body(TOKEN_STEP, response).await?;

        let token = body.trim();
        if token.is_empty() {
            return Err(FetchError::Unauthenticated(
                "token exchange returned an empty token".to_string(),
            ));
        }
        Ok(token.to_string())
    }

    /// List every item visible to `user_token`
    pub async fn list_items(&self, user_token: &str) -> Result<Vec<Item>, FetchError> {
        let response = self
            .client
            .get(self.docs_url.clone())
            .query(&[("withBlob", "true")])
            .bearer_auth(user_token)
            .send()
            .await
            .map_err(|e| transport(DOCS_STEP, e))?;
        let body = Self::success_body(DOCS_STEP, response).await?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            step: DOCS_STEP,
            message: e.to_string(),
        })
    }

    /// Fetch size and MD5 of an item's blob with a HEAD request
    pub async fn head_blob(&self, item: &Item) -> Result<BlobDetails, RemoteError> {
        if item.blob_url.is_empty() {
            return Err(RemoteError::NoBlob(item.id.clone()));
        }

        let response = Self::checked(self.client.head(&item.blob_url).send().await?).await?;

        let headers = response.headers();
        let md5 = parse_goog_md5(
            headers
                .get_all(GOOG_HASH_HEADER)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        );
        let size = headers
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        Ok(BlobDetails { size, md5 })
    }

    /// Download the raw bytes of an item's blob
    pub async fn download_blob(&self, item: &Item) -> Result<Vec<u8>, RemoteError> {
        if item.blob_url.is_empty() {
            return Err(RemoteError::NoBlob(item.id.clone()));
        }

        let response = Self::checked(self.client.get(&item.blob_url).send().await?).await?;
        let body = response.bytes().await?;
        tracing::debug!("downloaded {} bytes for item {}", body.len(), item.id);

        Ok(body.to_vec())
    }

    async fn checked(response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::HttpStatus(status, body))
    }

    async fn success_body(step: &'static str, response: Response) -> Result<String, FetchError> {
        let status = response.status();
        let body = response.text().await.map_err(|e| transport(step, e))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(FetchError::Status {
                step,
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl ItemSource for RemoteClient {
    async fn fetch_all_items(&self) -> Result<Vec<Item>, FetchError> {
        let user_token = self.user_token().await?;
        self.list_items(&user_token).await
    }
}

#[async_trait]
impl BlobReader for RemoteClient {
    async fn head_blob(&self, item: &Item) -> Result<BlobDetails, RemoteError> {
        RemoteClient::head_blob(self, item).await
    }

    async fn download_blob(&self, item: &Item) -> Result<Vec<u8>, RemoteError> {
        RemoteClient::download_blob(self, item).await
    }
}

fn transport(step: &'static str, error: reqwest::Error) -> FetchError {
    FetchError::Transport {
        step,
        message: error.to_string(),
    }
}

/// Extract the hex MD5 from `x-goog-hash` header values
///
/// Each value holds comma-separated `<algo>=<base64>` pairs, e.g.
/// `crc32c=n03x6A==,md5=1B2M2Y8AsgTpgAmY7PhCfg==`.
pub fn parse_goog_md5<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    values
        .into_iter()
        .flat_map(|value| value.split(','))
        .filter_map(|part| part.trim().strip_prefix("md5="))
        .find_map(|encoded| base64::engine::general_purpose::STANDARD.decode(encoded).ok())
        .map(hex::encode)
}
