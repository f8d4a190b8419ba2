pub mod avatar;
pub mod dummy;
pub mod events;
pub mod notification;
pub mod presentation;
pub mod types;
