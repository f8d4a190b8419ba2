use crate::types::id_types::ParticipantId;
use crate::types::team::Team;

/// World-space team badge presentation, implemented by the rendering
/// layer. The core only issues side-effecting calls; it never reads
/// state back.
///
/// Badges are per-round resources: everything shown during a round
/// must be gone again after [`BadgePresenter::clear`].
pub trait BadgePresenter {
    /// Creates the badge for a participant, or re-themes an existing
    /// one if the participant was reassigned.
    fn show_badge(&mut self, id: ParticipantId, team: Team);
    fn set_badge_visible(&mut self, id: ParticipantId, visible: bool);
    /// Repositions all badges onto their participants, once per tick.
    fn update_positions(&mut self);
    fn remove_badge(&mut self, id: ParticipantId);
    fn clear(&mut self);
}
