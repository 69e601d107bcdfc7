// Library for tests to access modules

pub mod config;
pub mod contrast;
pub mod counters;
pub mod delta;
pub mod detector;
pub mod display;
pub mod engine;
pub mod hotkey;
pub mod logging;
pub mod models;
pub mod placement;
pub mod platform;
pub mod policy;
pub mod render;
