//! Call Transfer Executor
//!
//! Waits for the live caller, then hands the call to the transport's
//! transfer primitive. Both steps are bounded by the configured timeout.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use phone_agent_config::constants::transfer::DEFAULT_TIMEOUT_MS;
use phone_agent_config::TransferConfig;
use phone_agent_core::CallControl;

use crate::sip::SipTransferClient;
use crate::TransferError;

/// Options passed to the transfer primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    pub play_dialtone: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self { play_dialtone: true }
    }
}

/// Telephony transfer primitive
#[async_trait]
pub trait CallTransport: Send + Sync {
    async fn transfer(
        &self,
        room: &str,
        participant: &str,
        address: &str,
        options: TransferOptions,
    ) -> Result<(), TransferError>;
}

/// Executes a resolved transfer on the live call
pub struct TransferExecutor {
    call: Arc<dyn CallControl>,
    /// `Err` carries why the transport could not be built
    transport: Result<Arc<dyn CallTransport>, String>,
    options: TransferOptions,
    timeout: Duration,
}

impl TransferExecutor {
    pub fn new(call: Arc<dyn CallControl>, transport: Arc<dyn CallTransport>) -> Self {
        Self {
            call,
            transport: Ok(transport),
            options: TransferOptions::default(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Executor backed by the SIP transfer client
    ///
    /// Missing credentials do not fail here; every transfer attempt reports
    /// `MissingCredentials` instead, so the call itself keeps going.
    pub fn sip(call: Arc<dyn CallControl>, config: &TransferConfig) -> Self {
        let transport = SipTransferClient::from_config(config)
            .map(|client| Arc::new(client) as Arc<dyn CallTransport>)
            .map_err(|e| {
                tracing::warn!(error = %e, "SIP transfer client unavailable");
                e.to_string()
            });

        Self {
            call,
            transport,
            options: TransferOptions {
                play_dialtone: config.play_dialtone,
            },
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_options(mut self, options: TransferOptions) -> Self {
        self.options = options;
        self
    }

    /// Bound applied to each transfer stage
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Transfer the live participant to `address`
    pub async fn execute(&self, address: &str) -> Result<(), TransferError> {
        let transport = self
            .transport
            .as_ref()
            .map_err(|reason| TransferError::MissingCredentials(reason.clone()))?;

        let timeout_ms = self.timeout.as_millis() as u64;

        let participant = tokio::time::timeout(self.timeout, self.call.wait_for_participant())
            .await
            .map_err(|_| TransferError::Timeout {
                stage: "wait_for_participant",
                timeout_ms,
            })?
            .map_err(|e| TransferError::Execution(e.to_string()))?;

        let room = self.call.room_name();
        tracing::info!(
            room = %room,
            participant = %participant.identity,
            address = %address,
            "Transferring call"
        );

        tokio::time::timeout(
            self.timeout,
            transport.transfer(&room, &participant.identity, address, self.options),
        )
        .await
        .map_err(|_| TransferError::Timeout {
            stage: "transfer",
            timeout_ms,
        })?
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;
    use phone_agent_core::{Participant, Result as CoreResult};

    /// Call with a participant that shows up after `delay`
    pub(crate) struct FakeCall {
        pub delay: Duration,
    }

    #[async_trait]
    impl CallControl for FakeCall {
        fn room_name(&self) -> String {
            "room-1".to_string()
        }

        fn participant_count(&self) -> usize {
            1
        }

        async fn wait_for_participant(&self) -> CoreResult<Participant> {
            tokio::time::sleep(self.delay).await;
            Ok(Participant::new("caller-1"))
        }

        async fn generate_reply(&self, _instructions: &str) -> CoreResult<()> {
            Ok(())
        }

        async fn wait_for_playout(&self) -> CoreResult<()> {
            Ok(())
        }

        async fn switch_voice(&self, _language_code: &str, _voice: &str) -> CoreResult<()> {
            Ok(())
        }

        async fn delete_room(&self) -> CoreResult<()> {
            Ok(())
        }

        async fn disconnect(&self) -> CoreResult<()> {
            Ok(())
        }
    }

    /// Records transfer calls; optionally fails them
    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        pub calls: Mutex<Vec<(String, String, String, bool)>>,
        pub fail: bool,
    }

    #[async_trait]
    impl CallTransport for RecordingTransport {
        async fn transfer(
            &self,
            room: &str,
            participant: &str,
            address: &str,
            options: TransferOptions,
        ) -> Result<(), TransferError> {
            self.calls.lock().push((
                room.to_string(),
                participant.to_string(),
                address.to_string(),
                options.play_dialtone,
            ));
            if self.fail {
                return Err(TransferError::Execution("SIP 486 busy".to_string()));
            }
            Ok(())
        }
    }

    fn call(delay_ms: u64) -> Arc<dyn CallControl> {
        Arc::new(FakeCall {
            delay: Duration::from_millis(delay_ms),
        })
    }

    #[tokio::test]
    async fn test_execute_transfers_live_participant() {
        let transport = Arc::new(RecordingTransport::default());
        let executor = TransferExecutor::new(call(0), transport.clone());

        executor.execute("tel:365").await.unwrap();

        let calls = transport.calls.lock();
        assert_eq!(
            calls[0],
            (
                "room-1".to_string(),
                "caller-1".to_string(),
                "tel:365".to_string(),
                true
            )
        );
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = Arc::new(RecordingTransport {
            fail: true,
            ..Default::default()
        });
        let executor = TransferExecutor::new(call(0), transport);

        assert!(matches!(
            executor.execute("tel:365").await,
            Err(TransferError::Execution(_))
        ));
    }

    #[tokio::test]
    async fn test_waiting_for_participant_times_out() {
        let transport = Arc::new(RecordingTransport::default());
        let executor = TransferExecutor::new(call(500), transport.clone())
            .with_timeout(Duration::from_millis(20));

        match executor.execute("tel:365").await {
            Err(TransferError::Timeout { stage, timeout_ms }) => {
                assert_eq!(stage, "wait_for_participant");
                assert_eq!(timeout_ms, 20);
            },
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(transport.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credentials_reported_on_execute() {
        let executor = TransferExecutor::sip(call(0), &TransferConfig::default());
        assert!(matches!(
            executor.execute("tel:365").await,
            Err(TransferError::MissingCredentials(_))
        ));
    }
}
