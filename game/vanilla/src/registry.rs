pub mod registry {
    use metadata::collections::collections::FxLinkedHashMap;
    use mode_interface::events::RegistryEvent;
    use mode_interface::types::id_gen::IdGenerator;
    use mode_interface::types::id_types::ParticipantId;
    use mode_interface::types::participant::{
        Participant, ParticipantClientInfo, ParticipantDropReason,
    };

    /// The set of currently connected participants, in join order.
    ///
    /// Join/leave raise [`RegistryEvent`]s into a pending queue that
    /// the mode lifecycle drains once per tick. The registry owns no
    /// per-participant derived resources; releasing those is up to the
    /// event consumers.
    #[derive(Debug, Default)]
    pub struct PlayerRegistry {
        participants: FxLinkedHashMap<ParticipantId, Participant>,
        id_gen: IdGenerator,

        pending_events: Vec<RegistryEvent>,
    }

    impl PlayerRegistry {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn join(&mut self, info: ParticipantClientInfo) -> ParticipantId {
            let id: ParticipantId = self.id_gen.next_id();
            self.participants.insert(
                id,
                Participant {
                    id,
                    unique_id: info.unique_id,
                    is_self: info.is_self,
                },
            );
            log::info!(target: "registry", "participant {id} joined (unique id {})", info.unique_id);
            self.pending_events.push(RegistryEvent::Joined { id });
            id
        }

        pub fn leave(
            &mut self,
            id: &ParticipantId,
            reason: ParticipantDropReason,
        ) -> Option<Participant> {
            let participant = self.participants.remove(id)?;
            log::info!(target: "registry", "participant {id} left ({reason:?})");
            self.pending_events.push(RegistryEvent::Left {
                participant,
                reason,
            });
            Some(participant)
        }

        pub fn get(&self, id: &ParticipantId) -> Option<&Participant> {
            self.participants.get(id)
        }

        pub fn contains(&self, id: &ParticipantId) -> bool {
            self.participants.contains_key(id)
        }

        /// Participants in join order.
        pub fn participants(&self) -> impl Iterator<Item = &Participant> {
            self.participants.values()
        }

        /// The local peer's own participant, if joined.
        pub fn local(&self) -> Option<&Participant> {
            self.participants.values().find(|p| p.is_self)
        }

        pub fn len(&self) -> usize {
            self.participants.len()
        }

        pub fn is_empty(&self) -> bool {
            self.participants.is_empty()
        }

        pub fn take_events(&mut self) -> Vec<RegistryEvent> {
            std::mem::take(&mut self.pending_events)
        }

        pub fn clear_events(&mut self) {
            self.pending_events.clear();
        }
    }

}
