//! Bezel template analysis module
//!
//! Locates the transparent screen region of a device bezel template and turns
//! its alpha channel into a binary mask for the screenshot.

mod scan;
mod locator;
mod mask;
pub mod types;

pub use scan::{ScanDirection, find_index, find_transition};
pub use locator::locate_bezel_frame;
pub use mask::{build_screen_mask, clean_template};
pub use types::{Band, BezelFrame};
