pub mod animation;
pub mod config;
pub mod geometry;
pub mod input;
pub mod sheet;
