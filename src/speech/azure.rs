use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::constants::{NO_SPEECH_DETECTED, TRANSCRIPT_READY_FALLBACK};
use crate::speech::{JobStatus, SpeechClient, SpeechError};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const TRANSCRIPTION_LOCALE: &str = "en-GB";

/// Client for the Azure Speech batch transcription REST API (v3.1).
///
/// Jobs are identified by the trailing segment of the `self` URL returned on
/// submission; results are a files listing whose `Transcription` entry links
/// to a JSON document of recognized phrases.
pub struct AzureSpeechClient {
    http: reqwest::Client,
    key: Option<String>,
    region: Option<String>,
}

impl AzureSpeechClient {
    pub fn new(key: Option<String>, region: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            key,
            region,
        }
    }

    fn credentials(&self) -> Result<(&str, &str), SpeechError> {
        match (self.key.as_deref(), self.region.as_deref()) {
            (Some(key), Some(region)) => Ok((key, region)),
            _ => Err(SpeechError::NotConfigured),
        }
    }

    fn transcriptions_url(region: &str) -> String {
        format!("https://{region}.api.cognitive.microsoft.com/speechtotext/v3.1/transcriptions")
    }
}

#[async_trait]
impl SpeechClient for AzureSpeechClient {
    async fn submit(&self, content_url: &str) -> Result<String, SpeechError> {
        let (key, region) = self.credentials()?;

        let request = json!({
            "contentUrls": [content_url],
            "properties": {
                "wordLevelTimestampsEnabled": true,
                "punctuationMode": "DictatedAndAutomatic",
                "profanityFilterMode": "Masked",
            },
            "locale": TRANSCRIPTION_LOCALE,
            "displayName": format!("Transcription-{}", Utc::now().timestamp_millis()),
        });

        let response = self
            .http
            .post(Self::transcriptions_url(region))
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED && status != StatusCode::ACCEPTED {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Protocol(format!(
                "submission rejected with {status}: {body}"
            )));
        }

        let payload: Value = response.json().await?;
        let transcription_id = payload
            .get("self")
            .and_then(Value::as_str)
            .and_then(|url| url.rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| SpeechError::Protocol("missing self link".to_string()))?;

        Ok(transcription_id)
    }

    async fn status(&self, transcription_id: &str) -> Result<JobStatus, SpeechError> {
        let (key, region) = self.credentials()?;

        let url = format!(
            "{}/{transcription_id}",
            Self::transcriptions_url(region)
        );
        let payload: Value = self
            .http
            .get(url)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .send()
            .await?
            .json()
            .await
            .map_err(|_| SpeechError::Protocol("could not parse status response".to_string()))?;

        let status = match payload.get("status").and_then(Value::as_str) {
            Some("Succeeded") => JobStatus::Succeeded {
                files_url: payload
                    .pointer("/links/files")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            Some("Failed") => JobStatus::Failed {
                message: payload
                    .pointer("/properties/error/message")
                    .and_then(Value::as_str)
                    .unwrap_or("Transcription failed")
                    .to_string(),
            },
            _ => JobStatus::Running,
        };
        Ok(status)
    }

    async fn transcript(&self, files_url: &str) -> Result<String, SpeechError> {
        let (key, _) = self.credentials()?;

        let files: Value = self
            .http
            .get(files_url)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .send()
            .await?
            .json()
            .await?;

        let content_url = files
            .get("values")
            .and_then(Value::as_array)
            .and_then(|values| {
                values
                    .iter()
                    .find(|file| file.get("kind").and_then(Value::as_str) == Some("Transcription"))
            })
            .and_then(|file| file.pointer("/links/contentUrl"))
            .and_then(Value::as_str);

        let Some(content_url) = content_url else {
            return Ok(TRANSCRIPT_READY_FALLBACK.to_string());
        };

        let content: Value = self
            .http
            .get(content_url)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .send()
            .await?
            .json()
            .await?;

        let text = content
            .get("combinedRecognizedPhrases")
            .and_then(Value::as_array)
            .map(|phrases| {
                phrases
                    .iter()
                    .filter_map(|p| p.get("display").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_SPEECH_DETECTED.to_string());

        Ok(text)
    }
}
