use serde::{Deserialize, Serialize};

use crate::types::id_types::ParticipantId;
use crate::types::participant::{Participant, ParticipantDropReason};

/// Membership change raised by the player registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RegistryEvent {
    Joined {
        id: ParticipantId,
    },
    /// Carries the removed participant so subscribers can release
    /// any per-participant resources they derived from it.
    Left {
        participant: Participant,
        reason: ParticipantDropReason,
    },
}

/// Gameplay events the host feeds into the active mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ModeEvent {
    Eliminated {
        victim: ParticipantId,
        /// `None` for deaths without another participant involved
        /// (world deaths), which no mode scores.
        by: Option<ParticipantId>,
    },
}
