// src/sheets/auth.rs
//! Service-account OAuth2 (JWT bearer grant) for the Sheets API

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::{Result, SheetsError};
use crate::app_log;
use crate::types::response::TokenResponse;

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
// Refresh a little before Google's stated expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// The fields of a service-account JSON key this client needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self> {
        let key: Self = serde_json::from_str(json)
            .map_err(|e| SheetsError::Auth(format!("Failed to parse credentials JSON: {}", e)))?;
        app_log!(info, "Successfully parsed credentials JSON");
        Ok(key)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    client: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, client: reqwest::Client) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetsError::Auth(format!("Invalid private key: {}", e)))?;

        Ok(Self {
            key,
            encoding_key,
            client,
            token: Mutex::new(None),
        })
    }

    pub fn claims(&self, issued_at: i64) -> Claims {
        Claims {
            iss: self.key.client_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: self.key.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }

    fn signed_assertion(&self) -> Result<String> {
        let claims = self.claims(Utc::now().timestamp());
        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| SheetsError::Auth(format!("Failed to sign assertion: {}", e)))
    }

    /// Bearer token for API calls, exchanged once and reused until near expiry.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.signed_assertion()?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Auth(format!(
                "Token exchange failed with status {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SheetsError::Parse(format!("Invalid token response: {}", e)))?;

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(3600));
        let expires_at = Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at,
        });

        app_log!(debug, "Obtained Sheets access token for {}", self.key.client_email);
        Ok(token.access_token)
    }
}
