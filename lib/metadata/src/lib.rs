#![allow(clippy::module_inception)]

pub mod collections;
pub mod key;
pub mod notifier;
pub mod store;
pub mod sync;
pub mod value;
