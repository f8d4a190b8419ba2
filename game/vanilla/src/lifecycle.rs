pub mod lifecycle {
    use metadata::notifier::notifier::{MetadataChangeQueue, ObserverHandle};
    use mode_interface::events::{ModeEvent, RegistryEvent};
    use mode_interface::types::game::GameTickType;
    use rustc_hash::FxHashSet;
    use thiserror::Error;

    use crate::mode::mode::{GameMode, ModeContext, ModeControl, ModeHost};

    pub const TICKS_PER_SECOND: GameTickType = 50;

    /// The lifecycle state of the one active mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ModeState {
        Idle,
        Active {
            /// How long the round is running.
            ticks_passed: GameTickType,
        },
        /// Teardown is running; reached from `Active` only and always
        /// followed by `Idle` within the same call.
        Stopping,
    }

    impl ModeState {
        fn name(&self) -> &'static str {
            match self {
                Self::Idle => "idle",
                Self::Active { .. } => "active",
                Self::Stopping => "stopping",
            }
        }
    }

    #[derive(Error, Debug)]
    pub enum LifecycleError {
        #[error("`{op}` is not a valid transition while the mode is {state}")]
        InvalidTransition {
            op: &'static str,
            state: &'static str,
        },
    }

    /// The state machine a [`GameMode`] plugs into:
    /// `Idle` -> `start()` -> `Active` -> `stop()` -> `Stopping` ->
    /// `Idle`.
    ///
    /// Owned by the host's top level coordinator and driven once per
    /// tick; exactly one instance is active at a time. The host hands
    /// in its world as a [`ModeHost`] on every call.
    pub struct ModeLifecycle<M: GameMode> {
        mode: M,
        state: ModeState,

        /// Names already fired this round (at most once per round).
        fired_triggers: FxHashSet<String>,
        control: ModeControl,

        /// Records replicated changes while the round is active,
        /// drained into the mode once per tick.
        changes: MetadataChangeQueue,
        change_sub: Option<ObserverHandle>,
    }

    impl<M: GameMode> ModeLifecycle<M> {
        pub fn new(mode: M) -> Self {
            Self {
                mode,
                state: ModeState::Idle,
                fired_triggers: Default::default(),
                control: Default::default(),
                changes: Default::default(),
                change_sub: None,
            }
        }

        pub fn state(&self) -> ModeState {
            self.state
        }

        pub fn is_active(&self) -> bool {
            matches!(self.state, ModeState::Active { .. })
        }

        pub fn mode(&self) -> &M {
            &self.mode
        }

        /// Starts a round.
        ///
        /// Fails if the machine is not `Idle`. The caller must not
        /// retry without checking the state first.
        pub fn start(&mut self, host: &mut ModeHost) -> Result<(), LifecycleError> {
            if !matches!(self.state, ModeState::Idle) {
                return Err(LifecycleError::InvalidTransition {
                    op: "start",
                    state: self.state.name(),
                });
            }

            log::info!(target: "mode", "starting {}", self.mode.name());
            self.fired_triggers.clear();
            self.control = Default::default();
            self.changes.clear();
            // subscription lives exactly as long as the round
            self.change_sub = Some(self.changes.subscribe_to(host.metadata.notifier()));
            // participants present right now are handled by on_start
            host.registry.clear_events();

            self.state = ModeState::Active { ticks_passed: 0 };
            let mut ctx = ModeContext::new(host, 0, &mut self.control);
            self.mode.on_start(&mut ctx);
            self.drain_triggers(host, 0);

            if self.control.stop_requested {
                self.perform_stop(host);
            }
            Ok(())
        }

        /// One cooperative tick. Does nothing unless `Active`.
        ///
        /// `events` are the gameplay events of this tick.
        pub fn update(&mut self, host: &mut ModeHost, events: &[ModeEvent]) {
            let ModeState::Active { ticks_passed } = &mut self.state else {
                return;
            };
            *ticks_passed += 1;
            let ticks = *ticks_passed;

            for ev in host.registry.take_events() {
                let mut ctx = ModeContext::new(host, ticks, &mut self.control);
                match ev {
                    RegistryEvent::Joined { id } => {
                        self.mode.on_participant_joined(&mut ctx, id);
                    }
                    RegistryEvent::Left {
                        participant,
                        reason,
                    } => {
                        self.mode.on_participant_left(&mut ctx, &participant, &reason);
                    }
                }
            }

            for ev in events {
                let mut ctx = ModeContext::new(host, ticks, &mut self.control);
                self.mode.on_event(&mut ctx, ev);
            }

            for change in self.changes.take() {
                let mut ctx = ModeContext::new(host, ticks, &mut self.control);
                self.mode.on_metadata_changed(&mut ctx, &change);
            }

            {
                let mut ctx = ModeContext::new(host, ticks, &mut self.control);
                self.mode.on_tick(&mut ctx);
            }
            self.drain_triggers(host, ticks);

            if self.control.stop_requested {
                self.perform_stop(host);
            }
        }

        /// Stops the round. Can be called at any time while `Active`,
        /// regardless of in-flight timers; teardown runs
        /// unconditionally.
        pub fn stop(&mut self, host: &mut ModeHost) -> Result<(), LifecycleError> {
            if !matches!(self.state, ModeState::Active { .. }) {
                return Err(LifecycleError::InvalidTransition {
                    op: "stop",
                    state: self.state.name(),
                });
            }
            self.perform_stop(host);
            Ok(())
        }

        /// Fires a named trigger from outside, at most once per round
        /// per name. Returns whether it actually fired.
        pub fn try_trigger(&mut self, host: &mut ModeHost, name: &str) -> bool {
            let ModeState::Active { ticks_passed } = self.state else {
                return false;
            };
            if !self.fired_triggers.insert(name.to_string()) {
                return false;
            }
            {
                let mut ctx = ModeContext::new(host, ticks_passed, &mut self.control);
                self.mode.on_trigger(&mut ctx, name);
            }
            self.drain_triggers(host, ticks_passed);
            if self.control.stop_requested {
                self.perform_stop(host);
            }
            true
        }

        fn drain_triggers(&mut self, host: &mut ModeHost, ticks: GameTickType) {
            while !self.control.pending_triggers.is_empty() {
                let names = std::mem::take(&mut self.control.pending_triggers);
                for name in names {
                    if self.fired_triggers.insert(name.clone()) {
                        let mut ctx = ModeContext::new(host, ticks, &mut self.control);
                        self.mode.on_trigger(&mut ctx, &name);
                    }
                }
            }
        }

        fn perform_stop(&mut self, host: &mut ModeHost) {
            let ticks_passed = match self.state {
                ModeState::Active { ticks_passed } => ticks_passed,
                _ => 0,
            };
            self.state = ModeState::Stopping;
            log::info!(target: "mode", "stopping {}", self.mode.name());

            {
                let mut ctx = ModeContext::new(host, ticks_passed, &mut self.control);
                self.mode.on_stop(&mut ctx);
            }

            if let Some(handle) = self.change_sub.take() {
                host.metadata.notifier().unsubscribe(handle);
            }
            self.changes.clear();
            self.control = Default::default();
            self.state = ModeState::Idle;
        }
    }
}
