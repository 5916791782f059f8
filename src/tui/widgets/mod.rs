//! TUI widgets

pub mod acceptance;
pub mod common;
pub mod editors;
pub mod help;
pub mod landing;
pub mod languages;
pub mod spinner;
pub mod tabs;
pub mod users;
