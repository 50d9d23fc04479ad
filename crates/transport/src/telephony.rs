//! Telephony service
//!
//! Owns the current routing profiles. Profiles are swapped wholesale when
//! configuration reloads; readers always see one complete list.

use parking_lot::RwLock;
use std::sync::Arc;

use phone_agent_config::TelephonyProfile;

use crate::executor::TransferExecutor;
use crate::resolver::{resolve_destination, TransferTarget};
use crate::TransferError;

pub struct TelephonyService {
    profiles: RwLock<Arc<Vec<TelephonyProfile>>>,
}

impl TelephonyService {
    pub fn new(profiles: Vec<TelephonyProfile>) -> Self {
        Self {
            profiles: RwLock::new(Arc::new(profiles)),
        }
    }

    /// Replace the profile list; last write wins
    pub fn update_profiles(&self, profiles: Vec<TelephonyProfile>) {
        tracing::info!(profiles = profiles.len(), "Telephony profiles updated");
        *self.profiles.write() = Arc::new(profiles);
    }

    pub fn profiles(&self) -> Arc<Vec<TelephonyProfile>> {
        self.profiles.read().clone()
    }

    pub fn resolve(&self, target: &TransferTarget) -> Option<String> {
        resolve_destination(target, &self.profiles())
    }

    /// Resolve `target` and transfer the call there
    ///
    /// Returns the address the call was handed to.
    pub async fn transfer(
        &self,
        target: &TransferTarget,
        executor: &TransferExecutor,
    ) -> Result<String, TransferError> {
        let Some(address) = self.resolve(target) else {
            tracing::warn!(?target, "No transfer destination resolved");
            metrics::counter!("phone_agent_transfers_total", "outcome" => "no_destination")
                .increment(1);
            return Err(TransferError::NoDestination);
        };

        match executor.execute(&address).await {
            Ok(()) => {
                metrics::counter!("phone_agent_transfers_total", "outcome" => "success")
                    .increment(1);
                tracing::info!(address = %address, "Call transferred");
                Ok(address)
            },
            Err(e) => {
                metrics::counter!("phone_agent_transfers_total", "outcome" => "failure")
                    .increment(1);
                tracing::error!(address = %address, error = %e, "Call transfer failed");
                Err(e)
            },
        }
    }
}
