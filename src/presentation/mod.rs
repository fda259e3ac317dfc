//! Presentation layer for the timer screen.
//!
//! - `format`: countdown label and ring progress math
//! - `view`: renderer-agnostic screen model (label, progress, icon, colors)
//! - `display`: terminal renderer

pub mod display;
pub mod format;
pub mod view;

pub use display::{Display, OutputMode};
pub use format::{format_time, progress_fraction};
pub use view::{ActionIcon, PhasePalette, Rgb, ScreenModel};
