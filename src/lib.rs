pub mod body;
pub mod config;
pub mod control;
pub mod geometry;
pub mod logging;
pub mod recorder;
pub mod source;
