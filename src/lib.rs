#![forbid(unsafe_code)]

pub mod config;
pub mod group_key;
pub mod logging;
pub mod normalize;
pub mod query;
pub mod records;
pub mod render;
pub mod rooms;
pub mod source;
pub mod stats;
pub mod utils;
