pub mod mode {
    use metadata::notifier::notifier::MetadataChange;
    use metadata::store::store::MetadataStore;
    use mode_interface::avatar::AvatarConditioner;
    use mode_interface::events::ModeEvent;
    use mode_interface::notification::Notifier;
    use mode_interface::presentation::BadgePresenter;
    use mode_interface::types::game::GameTickType;
    use mode_interface::types::id_types::ParticipantId;
    use mode_interface::types::participant::{Participant, ParticipantDropReason};

    use crate::registry::registry::PlayerRegistry;

    /// Options for creating a mode.
    #[derive(Debug, Default)]
    pub struct ModeCreateOptions {
        /// serde_json serialized mode config, leniently parsed
        /// (invalid bytes fall back to the defaults).
        pub config: Option<Vec<u8>>,
        /// Seed for mode internal randomness (team shuffles);
        /// supplied by the host, fixed in tests.
        pub rng_seed: u64,
    }

    /// Everything the host owns that the active mode works against.
    ///
    /// Built fresh for every lifecycle call; the mode never holds on
    /// to any of it (no process-wide singletons).
    pub struct ModeHost<'a> {
        pub metadata: &'a mut MetadataStore,
        pub registry: &'a mut PlayerRegistry,
        pub badges: &'a mut dyn BadgePresenter,
        pub notifications: &'a mut dyn Notifier,
        pub avatars: &'a mut dyn AvatarConditioner,
    }

    /// Control requests a mode files during a hook, applied by the
    /// lifecycle after the hook returns.
    #[derive(Debug, Default)]
    pub(crate) struct ModeControl {
        pub(crate) stop_requested: bool,
        pub(crate) pending_triggers: Vec<String>,
    }

    /// The per-hook view of the world handed to every [`GameMode`]
    /// callback.
    pub struct ModeContext<'a, 'b> {
        pub host: &'a mut ModeHost<'b>,
        /// Ticks passed since round start.
        pub ticks_passed: GameTickType,

        control: &'a mut ModeControl,
    }

    impl<'a, 'b> ModeContext<'a, 'b> {
        pub(crate) fn new(
            host: &'a mut ModeHost<'b>,
            ticks_passed: GameTickType,
            control: &'a mut ModeControl,
        ) -> Self {
            Self {
                host,
                ticks_passed,
                control,
            }
        }

        pub fn is_authoritative(&self) -> bool {
            self.host.metadata.is_authoritative()
        }

        /// Asks the lifecycle to stop the round once the current hook
        /// returned. Teardown then runs unconditionally.
        pub fn request_stop(&mut self) {
            self.control.stop_requested = true;
        }

        /// Fires the named trigger event, at most once per round per
        /// name. Delivery happens after the current hook returned.
        pub fn request_trigger(&mut self, name: impl Into<String>) {
            self.control.pending_triggers.push(name.into());
        }
    }

    /// A game mode plugged into the lifecycle state machine.
    ///
    /// All hooks are optional; the default implementations do nothing,
    /// mirroring a mode that only cares about a subset of the flow.
    pub trait GameMode {
        fn name(&self) -> &str;

        /// Round setup. On the authority this is where shared state is
        /// reset and initial assignments are written.
        fn on_start(&mut self, _ctx: &mut ModeContext) {}

        /// Round teardown: summary, notifications, releasing every
        /// per-round resource. Runs on every exit path.
        fn on_stop(&mut self, _ctx: &mut ModeContext) {}

        /// Once per tick while the round is active.
        fn on_tick(&mut self, _ctx: &mut ModeContext) {}

        /// A named trigger fired through the lifecycle.
        fn on_trigger(&mut self, _ctx: &mut ModeContext, _name: &str) {}

        /// A gameplay event fed in by the host for this tick.
        fn on_event(&mut self, _ctx: &mut ModeContext, _ev: &ModeEvent) {}

        /// A replicated metadata change. Fired for every change while
        /// the round is active; the mode filters by its own key
        /// prefixes.
        fn on_metadata_changed(&mut self, _ctx: &mut ModeContext, _change: &MetadataChange) {}

        fn on_participant_joined(&mut self, _ctx: &mut ModeContext, _id: ParticipantId) {}

        fn on_participant_left(
            &mut self,
            _ctx: &mut ModeContext,
            _participant: &Participant,
            _reason: &ParticipantDropReason,
        ) {
        }
    }
}
