//! Call transfer for the phone agent
//!
//! - `resolver`: maps a caller's transfer request onto the configured
//!   routing profiles
//! - `telephony`: holds the current profile list (hot-swappable) and ties
//!   resolution to execution
//! - `executor`: waits for the live participant and invokes the transport
//! - `sip`: HTTP client for the SIP transfer RPC

pub mod executor;
pub mod resolver;
pub mod sip;
pub mod telephony;

pub use executor::{CallTransport, TransferExecutor, TransferOptions};
pub use resolver::{resolve_destination, TransferTarget};
pub use sip::{SipCredentials, SipTransferClient};
pub use telephony::TelephonyService;

use thiserror::Error;

/// Transfer errors
///
/// None of these end the call; the transfer action turns them into a spoken
/// apology.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("No valid transfer destination found")]
    NoDestination,

    #[error("Transfer credentials missing: {0}")]
    MissingCredentials(String),

    #[error("Transfer failed: {0}")]
    Execution(String),

    #[error("Transfer timed out during {stage} after {timeout_ms}ms")]
    Timeout {
        stage: &'static str,
        timeout_ms: u64,
    },
}

impl From<TransferError> for phone_agent_core::Error {
    fn from(err: TransferError) -> Self {
        phone_agent_core::Error::Transfer(err.to_string())
    }
}
