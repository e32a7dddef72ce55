//! REST client for the face/emotion detection API.
//!
//! The scoring code only sees [`EmotionDetector`]; the HTTP details
//! (OAuth client-credentials token, base64 form payload) stay in
//! [`BaiduVisionClient`]. Tests plug in their own detector.

use crate::config::VisionConfig;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Tokens are refreshed this long before the server-side expiry.
const TOKEN_REFRESH_MARGIN_SECS: u64 = 60;

/// `error_code` the detect endpoint returns for an image without a face
/// ("pic not has face"). It is a normal outcome, not a service failure.
const NO_FACE_ERROR_CODE: i64 = 222202;

/// What the scoring core needs from one image analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceAnalysis {
    pub face_count: u32,
    /// Emotion label of the first face (empty when no face was found).
    pub emotion: String,
    pub confidence: f64,
}

/// Errors from the vision API layer.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The OAuth token endpoint refused the credentials.
    #[error("access token request failed: {0}")]
    Token(String),

    /// The detect endpoint answered with a non-zero `error_code`.
    #[error("vision API error ({code}): {message}")]
    Api { code: i64, message: String },

    /// A face was reported without the emotion attribute we asked for.
    #[error("vision API response is missing emotion data")]
    MissingEmotion,
}

/// Detects faces in an image and classifies the first face's emotion.
#[async_trait]
pub trait EmotionDetector: Send + Sync {
    async fn detect_face(&self, image: &[u8]) -> Result<FaceAnalysis, VisionError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    error_msg: String,
    result: Option<DetectResult>,
}

#[derive(Debug, Deserialize)]
struct DetectResult {
    face_num: u32,
    #[serde(default)]
    face_list: Vec<FaceEntry>,
}

#[derive(Debug, Deserialize)]
struct FaceEntry {
    emotion: Option<Classification>,
}

#[derive(Debug, Deserialize)]
struct Classification {
    #[serde(rename = "type")]
    label: String,
    probability: f64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// HTTP client for a Baidu-style face detection endpoint.
pub struct BaiduVisionClient {
    client: reqwest::Client,
    config: VisionConfig,
    token: Mutex<Option<CachedToken>>,
}

impl BaiduVisionClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config,
            token: Mutex::new(None),
        })
    }

    /// Return a cached access token, exchanging credentials when it is
    /// missing or about to expire.
    async fn access_token(&self) -> Result<String, VisionError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let response: TokenResponse = self
            .client
            .post(format!("{}/oauth/2.0/token", self.config.base_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.api_key.as_str()),
                ("client_secret", self.config.secret_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(VisionError::Token(format!(
                "{} - {}",
                error,
                response.error_description.unwrap_or_default()
            )));
        }
        let value = response
            .access_token
            .ok_or_else(|| VisionError::Token("response carried no access_token".to_string()))?;

        let ttl = response
            .expires_in
            .unwrap_or(0)
            .saturating_sub(TOKEN_REFRESH_MARGIN_SECS);
        *cached = Some(CachedToken {
            value: value.clone(),
            expires_at: Instant::now() + Duration::from_secs(ttl),
        });
        tracing::debug!(ttl_secs = ttl, "Obtained vision API access token");

        Ok(value)
    }
}

#[async_trait]
impl EmotionDetector for BaiduVisionClient {
    async fn detect_face(&self, image: &[u8]) -> Result<FaceAnalysis, VisionError> {
        let access_token = self.access_token().await?;
        let encoded = STANDARD.encode(image);

        let response: DetectResponse = self
            .client
            .post(format!("{}/rest/2.0/face/v3/detect", self.config.base_url))
            .query(&[("access_token", access_token.as_str())])
            .form(&[
                ("image", encoded.as_str()),
                ("image_type", "BASE64"),
                ("face_field", "emotion"),
                ("max_face_num", "1"),
            ])
            .send()
            .await?
            .json()
            .await?;

        into_analysis(response)
    }
}

impl FaceAnalysis {
    fn no_face() -> Self {
        Self {
            face_count: 0,
            emotion: String::new(),
            confidence: 0.0,
        }
    }
}

/// Reduce a detect response to the first face's emotion.
fn into_analysis(response: DetectResponse) -> Result<FaceAnalysis, VisionError> {
    match response.error_code {
        0 => {}
        NO_FACE_ERROR_CODE => return Ok(FaceAnalysis::no_face()),
        code => {
            return Err(VisionError::Api {
                code,
                message: response.error_msg,
            })
        }
    }

    let Some(result) = response.result else {
        return Ok(FaceAnalysis::no_face());
    };

    match result.face_list.into_iter().next() {
        Some(face) if result.face_num > 0 => {
            let emotion = face.emotion.ok_or(VisionError::MissingEmotion)?;
            Ok(FaceAnalysis {
                face_count: result.face_num,
                emotion: emotion.label,
                confidence: emotion.probability,
            })
        }
        _ => Ok(FaceAnalysis::no_face()),
    }
}
