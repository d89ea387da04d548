use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};

/// Authenticated user information extracted from JWT.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    /// Subject id from the OIDC provider.
    pub sub: String,
    pub email: Option<String>,
}

impl AuthUser {
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            email: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,
    #[error("Invalid Authorization header format")]
    InvalidFormat,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("JWKS fetch error: {0}")]
    JwksFetchError(String),
    #[error("Key not found for kid: {0}")]
    KeyNotFound(String),
}

/// JWKS key set response.
#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    n: Option<String>,
    e: Option<String>,
}

/// JWT claims.
///
/// `exp` and `iss` are checked by `jsonwebtoken` on the raw payload.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OidcConfig {
    jwks_uri: String,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get("authorization")
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidFormat)
}

/// Shortest gap between two key set fetches triggered by unknown `kid`s.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Client for fetching and caching JWKS keys.
///
/// A token signed with a key id missing from the cache triggers one refetch
/// of the key set, at most once per refresh interval, so rotated keys are
/// picked up without a restart.
pub struct JwksClient {
    http_client: Client,
    jwks_uri: String,
    keys: Arc<RwLock<HashMap<String, DecodingKey>>>,
    issuer: String,
    last_refresh: Mutex<Instant>,
    min_refresh_interval: Duration,
}

impl JwksClient {
    pub async fn new(issuer: &str) -> Result<Self, AuthError> {
        let http_client = Client::new();

        // Fetch OIDC configuration to get JWKS URI
        let config_url = format!(
            "{}/.well-known/openid-configuration",
            issuer.trim_end_matches('/')
        );
        let config: OidcConfig = http_client
            .get(&config_url)
            .send()
            .await
            .map_err(|e| AuthError::JwksFetchError(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::JwksFetchError(e.to_string()))?;

        let client = Self {
            http_client,
            jwks_uri: config.jwks_uri,
            keys: Arc::new(RwLock::new(HashMap::new())),
            issuer: issuer.to_string(),
            last_refresh: Mutex::new(Instant::now()),
            min_refresh_interval: MIN_REFRESH_INTERVAL,
        };

        client.refresh_keys().await?;

        Ok(client)
    }

    /// Override how often an unknown `kid` may trigger a key set refetch.
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    async fn refresh_keys(&self) -> Result<(), AuthError> {
        tracing::info!("Fetching JWKS from {}", self.jwks_uri);

        let response: JwksResponse = self
            .http_client
            .get(&self.jwks_uri)
            .send()
            .await
            .map_err(|e| AuthError::JwksFetchError(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::JwksFetchError(e.to_string()))?;

        let mut keys = self.keys.write().await;
        keys.clear();

        for jwk in response.keys {
            if jwk.kty == "RSA" {
                if let (Some(n), Some(e)) = (&jwk.n, &jwk.e) {
                    match DecodingKey::from_rsa_components(n, e) {
                        Ok(key) => {
                            keys.insert(jwk.kid.clone(), key);
                        }
                        Err(e) => {
                            tracing::warn!("Failed to parse RSA key {}: {}", jwk.kid, e);
                        }
                    }
                }
            }
        }

        tracing::info!("Loaded {} JWKS keys", keys.len());
        Ok(())
    }

    /// Authenticate a request by validating the Bearer token.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
        let token = bearer_token(headers)?;

        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("Missing kid in token header".to_string()))?;

        let key = self.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_aud = false;

        let token_data = decode::<Claims>(token, &key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(AuthUser {
            sub: token_data.claims.sub,
            email: token_data.claims.email,
        })
    }

    /// Cached key for `kid`, refetching the key set once if it is unknown.
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        if let Some(key) = self.keys.read().await.get(kid) {
            return Ok(key.clone());
        }

        if self.refresh_if_stale().await? {
            if let Some(key) = self.keys.read().await.get(kid) {
                return Ok(key.clone());
            }
        }

        Err(AuthError::KeyNotFound(kid.to_string()))
    }

    /// Refetch the key set unless that happened within the refresh interval.
    /// Returns whether a refetch took place.
    async fn refresh_if_stale(&self) -> Result<bool, AuthError> {
        let mut last_refresh = self.last_refresh.lock().await;
        if last_refresh.elapsed() < self.min_refresh_interval {
            return Ok(false);
        }

        self.refresh_keys().await?;
        *last_refresh = Instant::now();
        Ok(true)
    }

    /// The visitor behind a request, if they presented a valid token.
    ///
    /// No header means anonymous. A bad token is logged and also treated
    /// as anonymous, so public pages still render.
    pub async fn current_user(&self, headers: &HeaderMap) -> Option<AuthUser> {
        match self.authenticate(headers).await {
            Ok(user) => Some(user),
            Err(AuthError::MissingHeader) => None,
            Err(e) => {
                tracing::warn!("Ignoring unusable credentials: {}", e);
                None
            }
        }
    }
}
