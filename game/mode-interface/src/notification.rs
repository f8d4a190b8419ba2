/// A toast/popup surfaced to the local player.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeNotification {
    pub title: String,
    pub message: String,
    pub popup_length_secs: f32,
    pub is_popup: bool,
}

/// Notification presentation, implemented by the UI layer.
/// Fire-and-forget, no acknowledgment.
pub trait Notifier {
    fn send(&mut self, notification: ModeNotification);
}
