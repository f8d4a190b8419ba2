//! No-op collaborator implementations, useful for headless servers
//! and tests.

use crate::avatar::AvatarConditioner;
use crate::notification::{ModeNotification, Notifier};
use crate::presentation::BadgePresenter;
use crate::types::id_types::ParticipantId;
use crate::types::team::Team;

#[derive(Debug, Default)]
pub struct DummyBadges;

impl BadgePresenter for DummyBadges {
    fn show_badge(&mut self, _id: ParticipantId, _team: Team) {}
    fn set_badge_visible(&mut self, _id: ParticipantId, _visible: bool) {}
    fn update_positions(&mut self) {}
    fn remove_badge(&mut self, _id: ParticipantId) {}
    fn clear(&mut self) {}
}

#[derive(Debug, Default)]
pub struct DummyNotifier;

impl Notifier for DummyNotifier {
    fn send(&mut self, _notification: ModeNotification) {}
}

#[derive(Debug, Default)]
pub struct DummyAvatars;

impl AvatarConditioner for DummyAvatars {
    fn set_mortality(&mut self, _mortal: bool) {}
    fn reset_mortality(&mut self) {}
    fn set_ammo(&mut self, _ammo: u32) {}
}
