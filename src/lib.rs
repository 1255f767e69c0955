//! Extract, inspect, and manage color palettes from images.

pub mod cli;
pub mod color;
pub mod extract;
pub mod library;
pub mod palette;
pub mod tui;
