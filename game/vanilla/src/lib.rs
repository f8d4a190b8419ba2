#![allow(clippy::module_inception)]

pub mod config;
pub mod lifecycle;
pub mod mode;
pub mod modes;
pub mod registry;
