pub mod team_deathmatch {
    use metadata::collections::collections::FxLinkedHashMap;
    use metadata::key::key::MetadataKey;
    use metadata::notifier::notifier::MetadataChange;
    use metadata::value::value::{MetadataDecode, MetadataValue};
    use mode_interface::events::ModeEvent;
    use mode_interface::notification::ModeNotification;
    use mode_interface::types::game::{GameTickCooldown, GameTickType};
    use mode_interface::types::id_types::{ParticipantId, ParticipantUniqueId};
    use mode_interface::types::participant::{Participant, ParticipantDropReason};
    use mode_interface::types::team::Team;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::config::ConfigTdm;
    use crate::lifecycle::lifecycle::TICKS_PER_SECOND;
    use crate::mode::mode::{GameMode, ModeContext, ModeCreateOptions};

    pub const TEAM_SCORE_PREFIX: &str = "tdm.score";
    pub const PLAYER_TEAM_PREFIX: &str = "tdm.team";

    pub const ONE_MINUTE_LEFT: &str = "one_minute_left";

    /// The per-team score entry, e.g. `tdm.score.A`.
    pub fn score_key(team: Team) -> MetadataKey {
        MetadataKey::new(TEAM_SCORE_PREFIX).child(team)
    }

    /// The per-participant team entry, keyed by the long-lived unique
    /// id so it survives reconnects, e.g. `tdm.team.4711`.
    pub fn team_key(unique_id: ParticipantUniqueId) -> MetadataKey {
        MetadataKey::new(PLAYER_TEAM_PREFIX).child(unique_id)
    }

    /// Team deathmatch: two teams, score on cross-team eliminations,
    /// round ends on a timer, higher score wins.
    ///
    /// The authority assigns teams by strict alternation from the last
    /// assigned team, starting with [`Team::B`]; there is deliberately
    /// no balancing by team size, late joiners get whatever the
    /// alternation yields.
    pub struct TeamDeathmatch {
        config: ConfigTdm,
        /// Fires one minute before the round time is up.
        one_minute_warning: GameTickCooldown,
        /// Fires when the round time is up.
        round_end: GameTickCooldown,

        last_team: Team,
        local_team: Team,

        /// Teams of the badges currently shown for other participants.
        badge_teams: FxLinkedHashMap<ParticipantId, Team>,

        rng: StdRng,
    }

    impl TeamDeathmatch {
        pub fn new(options: ModeCreateOptions) -> Self {
            let config: ConfigTdm = options
                .config
                .and_then(|config| serde_json::from_slice(&config).ok())
                .unwrap_or_default();
            Self {
                config,
                one_minute_warning: Default::default(),
                round_end: Default::default(),
                last_team: Team::None,
                local_team: Team::None,
                badge_teams: Default::default(),
                rng: StdRng::seed_from_u64(options.rng_seed),
            }
        }

        /// The one configuration-menu setting of this mode.
        pub fn set_round_length(&mut self, minutes: u32) {
            self.config.round_mins = minutes;
        }

        pub fn round_minutes(&self) -> u32 {
            self.config.clamped_round_mins()
        }

        pub fn local_team(&self) -> Team {
            self.local_team
        }

        fn team_of(&self, ctx: &ModeContext, id: &ParticipantId) -> Team {
            ctx.host
                .registry
                .get(id)
                .map(|p| ctx.host.metadata.decoded(&team_key(p.unique_id)))
                .unwrap_or_default()
        }

        fn score_of(&self, ctx: &ModeContext, team: Team) -> i64 {
            ctx.host.metadata.decoded(&score_key(team))
        }

        fn set_score(&mut self, ctx: &mut ModeContext, team: Team, score: i64) {
            ctx.host.metadata.try_set(score_key(team), score.into());
        }

        fn assign_team(&mut self, ctx: &mut ModeContext, id: ParticipantId) {
            let Some(participant) = ctx.host.registry.get(&id).copied() else {
                return;
            };
            // strict alternation from the last assigned team
            let new_team = if self.last_team == Team::B {
                Team::A
            } else {
                Team::B
            };
            ctx.host
                .metadata
                .try_set(team_key(participant.unique_id), MetadataValue::tag(new_team));
            self.last_team = new_team;
        }

        fn set_teams(&mut self, ctx: &mut ModeContext) {
            let mut ids: Vec<ParticipantId> =
                ctx.host.registry.participants().map(|p| p.id).collect();
            ids.shuffle(&mut self.rng);

            for id in ids {
                self.assign_team(ctx, id);
            }
        }

        fn reset_teams(&mut self, ctx: &mut ModeContext) {
            self.last_team = Team::None;

            let unique_ids: Vec<ParticipantUniqueId> =
                ctx.host.registry.participants().map(|p| p.unique_id).collect();
            for unique_id in unique_ids {
                ctx.host
                    .metadata
                    .try_set(team_key(unique_id), MetadataValue::tag(Team::None));
            }

            self.set_score(ctx, Team::A, 0);
            self.set_score(ctx, Team::B, 0);
        }

        fn notify(ctx: &mut ModeContext, title: &str, message: String, popup_length_secs: f32) {
            ctx.host.notifications.send(ModeNotification {
                title: title.into(),
                message,
                popup_length_secs,
                is_popup: true,
            });
        }
    }

    impl GameMode for TeamDeathmatch {
        fn name(&self) -> &str {
            "Team Deathmatch"
        }

        fn on_start(&mut self, ctx: &mut ModeContext) {
            let total = self.config.clamped_round_mins() as GameTickType * 60 * TICKS_PER_SECOND;
            self.one_minute_warning = total.saturating_sub(60 * TICKS_PER_SECOND).into();
            self.round_end = total.into();

            if ctx.is_authoritative() {
                self.set_teams(ctx);
                // scores start from a clean slate
                self.set_score(ctx, Team::A, 0);
                self.set_score(ctx, Team::B, 0);
            }

            ctx.host.avatars.set_mortality(true);
            ctx.host.avatars.set_ammo(1000);
        }

        fn on_stop(&mut self, ctx: &mut ModeContext) {
            let score_a = self.score_of(ctx, Team::A);
            let score_b = self.score_of(ctx, Team::B);

            let message = if score_a > score_b {
                format!(
                    "WINNER: {}! (Score: {score_a})\nLoser: {} (Score: {score_b})\n{}",
                    Team::A.label(),
                    Team::B.label(),
                    if self.local_team == Team::A {
                        "You Won!"
                    } else {
                        "You Lost..."
                    }
                )
            } else if score_b > score_a {
                format!(
                    "WINNER: {}! (Score: {score_b})\nLoser: {} (Score: {score_a})\n{}",
                    Team::B.label(),
                    Team::A.label(),
                    if self.local_team == Team::B {
                        "You Won!"
                    } else {
                        "You Lost..."
                    }
                )
            } else {
                format!("Tie! (Both Scores: ({score_a}))")
            };
            Self::notify(ctx, "Team Deathmatch Completed", message, 6.0);

            ctx.host.avatars.reset_mortality();
            ctx.host.avatars.set_ammo(0);

            if ctx.is_authoritative() {
                self.reset_teams(ctx);
            }

            self.badge_teams.clear();
            ctx.host.badges.clear();

            self.one_minute_warning = Default::default();
            self.round_end = Default::default();
            self.local_team = Team::None;
        }

        fn on_tick(&mut self, ctx: &mut ModeContext) {
            for (id, team) in self.badge_teams.iter() {
                // only the own team's badges are visible
                ctx.host
                    .badges
                    .set_badge_visible(*id, *team == self.local_team);
            }
            ctx.host.badges.update_positions();

            if ctx.is_authoritative() {
                if self.one_minute_warning.tick() == Some(true) {
                    ctx.request_trigger(ONE_MINUTE_LEFT);
                }
                if self.round_end.tick() == Some(true) {
                    ctx.request_stop();
                }
            }
        }

        fn on_trigger(&mut self, ctx: &mut ModeContext, name: &str) {
            if name == ONE_MINUTE_LEFT {
                Self::notify(ctx, "Team Deathmatch Timer", "One minute left!".into(), 2.0);
            }
        }

        fn on_event(&mut self, ctx: &mut ModeContext, ev: &ModeEvent) {
            let ModeEvent::Eliminated { victim, by } = ev;
            if !ctx.is_authoritative() {
                return;
            }
            let Some(killer) = by else {
                return;
            };
            if killer == victim {
                return;
            }

            let killer_team = self.team_of(ctx, killer);
            let victim_team = self.team_of(ctx, victim);
            if killer_team != Team::None && killer_team != victim_team {
                let score = self.score_of(ctx, killer_team);
                self.set_score(ctx, killer_team, score + 1);
            }
        }

        fn on_metadata_changed(&mut self, ctx: &mut ModeContext, change: &MetadataChange) {
            if change.key.has_prefix(&MetadataKey::new(TEAM_SCORE_PREFIX)) {
                let Some(score) = i64::decode(&change.new) else {
                    return;
                };
                if self.local_team != Team::None
                    && change.key == score_key(self.local_team)
                    && score != 0
                {
                    Self::notify(
                        ctx,
                        "Team Deathmatch Point",
                        format!("{}'s score is {score}!", self.local_team.label()),
                        0.7,
                    );
                }
            } else if change.key.has_prefix(&MetadataKey::new(PLAYER_TEAM_PREFIX)) {
                let Some(team) = Team::decode(&change.new) else {
                    return;
                };
                if team == Team::None {
                    return;
                }

                // find the participant this entry belongs to
                let Some(participant) = ctx
                    .host
                    .registry
                    .participants()
                    .find(|p| team_key(p.unique_id) == change.key)
                    .copied()
                else {
                    return;
                };

                if participant.is_self {
                    self.local_team = team;
                    Self::notify(
                        ctx,
                        "Team Deathmatch Assignment",
                        format!("Your team is: {}", team.label()),
                        5.0,
                    );
                } else {
                    self.badge_teams.insert(participant.id, team);
                    ctx.host.badges.show_badge(participant.id, team);
                }
            }
        }

        fn on_participant_joined(&mut self, ctx: &mut ModeContext, id: ParticipantId) {
            if ctx.is_authoritative() {
                self.assign_team(ctx, id);
            }
        }

        fn on_participant_left(
            &mut self,
            ctx: &mut ModeContext,
            participant: &Participant,
            _reason: &ParticipantDropReason,
        ) {
            // release the derived badge, the registry does not own it
            self.badge_teams.remove(&participant.id);
            ctx.host.badges.remove_badge(participant.id);
        }
    }
}
