//! Call control surface
//!
//! Implemented by the telephony session that hosts the conversation. The
//! agent uses it to wait for the caller, steer speech output and tear the
//! call down; it never touches media.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A remote participant in the call room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub identity: String,
}

impl Participant {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

/// Live call handle
#[async_trait]
pub trait CallControl: Send + Sync {
    /// Name of the room hosting the call
    fn room_name(&self) -> String;

    /// Number of remote participants currently in the room
    fn participant_count(&self) -> usize;

    /// Wait until a live remote participant is present
    async fn wait_for_participant(&self) -> Result<Participant>;

    /// Ask the conversational engine to speak a reply
    async fn generate_reply(&self, instructions: &str) -> Result<()>;

    /// Wait until queued speech has finished playing
    async fn wait_for_playout(&self) -> Result<()>;

    /// Switch the synthesized voice and language
    async fn switch_voice(&self, language_code: &str, voice: &str) -> Result<()>;

    /// Delete the room, ending the call for everyone
    async fn delete_room(&self) -> Result<()>;

    /// Leave the room
    async fn disconnect(&self) -> Result<()>;
}
