//! Lookup of annotation features around variant positions.

pub mod window;

pub use window::{find_overlapping_features, scan_window, WindowScan};
