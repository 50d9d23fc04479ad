//! SIP transfer RPC client
//!
//! Calls the media server's `TransferSIPParticipant` RPC over HTTP with
//! basic auth.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use phone_agent_config::TransferConfig;

use crate::executor::{CallTransport, TransferOptions};
use crate::TransferError;

const TRANSFER_PATH: &str = "/twirp/livekit.SIP/TransferSIPParticipant";

/// Connection details for the SIP RPC endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SipCredentials {
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl SipCredentials {
    /// Collect credentials from settings; blank values count as missing
    pub fn from_config(config: &TransferConfig) -> Result<Self, TransferError> {
        let field = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let url = field(&config.sip_url);
        let api_key = field(&config.api_key);
        let api_secret = field(&config.api_secret);

        match (url, api_key, api_secret) {
            (Some(url), Some(api_key), Some(api_secret)) => Ok(Self {
                url,
                api_key,
                api_secret,
            }),
            (url, api_key, api_secret) => {
                let missing: Vec<&str> = [
                    ("sip_url", url.is_none()),
                    ("api_key", api_key.is_none()),
                    ("api_secret", api_secret.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(TransferError::MissingCredentials(missing.join(", ")))
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct TransferRequest<'a> {
    room_name: &'a str,
    participant_identity: &'a str,
    transfer_to: &'a str,
    play_dialtone: bool,
}

/// HTTP client for SIP participant transfer
pub struct SipTransferClient {
    client: Client,
    credentials: SipCredentials,
    endpoint: String,
}

impl SipTransferClient {
    pub fn new(credentials: SipCredentials) -> Self {
        let endpoint = format!("{}{}", credentials.url.trim_end_matches('/'), TRANSFER_PATH);
        Self {
            client: Client::new(),
            credentials,
            endpoint,
        }
    }

    pub fn from_config(config: &TransferConfig) -> Result<Self, TransferError> {
        SipCredentials::from_config(config).map(Self::new)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CallTransport for SipTransferClient {
    async fn transfer(
        &self,
        room: &str,
        participant: &str,
        address: &str,
        options: TransferOptions,
    ) -> Result<(), TransferError> {
        let request = TransferRequest {
            room_name: room,
            participant_identity: participant,
            transfer_to: address,
            play_dialtone: options.play_dialtone,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.credentials.api_key, Some(&self.credentials.api_secret))
            .json(&request)
            .send()
            .await
            .map_err(|e| TransferError::Execution(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransferError::Execution(format!(
                "SIP transfer rejected ({}): {}",
                status, body
            )));
        }

        tracing::debug!(room = %room, address = %address, "SIP transfer accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: Option<&str>, key: Option<&str>, secret: Option<&str>) -> TransferConfig {
        TransferConfig {
            sip_url: url.map(String::from),
            api_key: key.map(String::from),
            api_secret: secret.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_credentials_complete() {
        let creds =
            SipCredentials::from_config(&config(Some("https://sip.example"), Some("k"), Some("s")))
                .unwrap();
        assert_eq!(creds.url, "https://sip.example");
        assert_eq!(creds.api_key, "k");
    }

    #[test]
    fn test_missing_credentials_are_listed() {
        match SipCredentials::from_config(&config(Some("https://sip.example"), Some(" "), None)) {
            Err(TransferError::MissingCredentials(missing)) => {
                assert_eq!(missing, "api_key, api_secret");
            },
            other => panic!("expected missing credentials, got {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_path() {
        let client = SipTransferClient::new(SipCredentials {
            url: "https://sip.example/".to_string(),
            api_key: "k".to_string(),
            api_secret: "s".to_string(),
        });
        assert_eq!(
            client.endpoint(),
            "https://sip.example/twirp/livekit.SIP/TransferSIPParticipant"
        );
    }
}
