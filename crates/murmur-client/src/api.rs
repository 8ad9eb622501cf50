use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use murmur_types::{BlockRequest, MessageRequest, NicknameRequest, Resource, Token, UserId};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::token::TokenStore;

/// A completed HTTP exchange whose status was not 400 or 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    /// Decode the body as JSON, whatever the status.
    pub fn json<T: DeserializeOwned>(&self, resource: Resource) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| Error::Malformed {
            resource: resource.name(),
            source,
        })
    }

    /// Fail with the body as the error text unless the status is `expected`.
    pub fn expect_status(self, expected: StatusCode) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(Error::Status {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Thin wrapper over the four `api/*` resources.
///
/// Every call except account creation sends the stored token, when there
/// is one, as the raw `Authorization` header value.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base: config.server_url.clone(),
            tokens,
        })
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    // -- Reads --

    /// `GET` a list resource with the stored token.
    pub async fn fetch(&self, resource: Resource) -> Result<Reply> {
        let token = self.tokens.get()?;
        self.send::<()>(Method::GET, resource, None, token.as_ref()).await
    }

    /// `GET api/auth` with an explicit token. A 200 reply carries the nickname.
    pub async fn verify(&self, token: Option<&Token>) -> Result<Reply> {
        self.send::<()>(Method::GET, Resource::Auth, None, token).await
    }

    // -- Users --

    /// `POST api/users`. Sent without credentials; a 201 reply body is the new token.
    pub async fn create_account(&self, nickname: &str) -> Result<Reply> {
        let body = NicknameRequest {
            nickname: nickname.to_string(),
        };
        self.send(Method::POST, Resource::Users, Some(&body), None).await
    }

    pub async fn rename(&self, nickname: &str) -> Result<Reply> {
        let body = NicknameRequest {
            nickname: nickname.to_string(),
        };
        self.send_authed(Method::PATCH, Resource::Users, &body).await
    }

    // -- Messages --

    pub async fn send_message(&self, content: &str) -> Result<Reply> {
        let body = MessageRequest {
            content: content.to_string(),
        };
        self.send_authed(Method::POST, Resource::Messages, &body).await
    }

    // -- Blocks --

    pub async fn block(&self, identifier: UserId) -> Result<Reply> {
        self.send_authed(Method::POST, Resource::Blocks, &BlockRequest { identifier })
            .await
    }

    pub async fn unblock(&self, identifier: UserId) -> Result<Reply> {
        self.send_authed(Method::DELETE, Resource::Blocks, &BlockRequest { identifier })
            .await
    }

    async fn send_authed<B: Serialize>(
        &self,
        method: Method,
        resource: Resource,
        body: &B,
    ) -> Result<Reply> {
        let token = self.tokens.get()?;
        self.send(method, resource, Some(body), token.as_ref()).await
    }

    /// Issue one request. 400 and 404 become [`Error::Rejected`]; every
    /// other status is handed back for the caller to interpret.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        resource: Resource,
        body: Option<&B>,
        token: Option<&Token>,
    ) -> Result<Reply> {
        let url = self.base.join(resource.path()).map_err(|e| Error::Config {
            key: "MURMUR_SERVER_URL",
            reason: e.to_string(),
        })?;

        let mut req = self.http.request(method, url);
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, token.as_str());
        }
        if let Some(body) = body {
            // Also sets Content-Type: application/json.
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        match status {
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Err(Error::Rejected { status, body }),
            _ => Ok(Reply { status, body }),
        }
    }
}
