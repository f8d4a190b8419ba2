use serde::{Deserialize, Serialize};

use super::id_types::{ParticipantId, ParticipantUniqueId};

/// A currently connected participant.
///
/// Created on join, destroyed on leave; derived resources (badges etc.)
/// are owned by whoever reacts to the registry events, not here.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub unique_id: ParticipantUniqueId,
    /// Whether this entry is the local peer's own participant.
    pub is_self: bool,
}

/// What a client announces about itself when joining.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct ParticipantClientInfo {
    pub unique_id: ParticipantUniqueId,
    pub is_self: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantDropReason {
    /// Graceful disconnect
    Disconnect,
    /// Timeout
    Timeout,
    /// Kicked, e.g. by the host
    Kicked,
}
