//! Commit history graph rendering.
//!
//! A [`PlotCommitList`] assigns lanes to a walked history; a [`PlotRenderer`]
//! paints one plotted commit per row onto any [`Surface`], color-coding ref
//! labels by namespace and reporting the width each row used.

pub mod config;
pub mod error;
pub mod git;
pub mod plot;
pub mod refs;
pub mod renderer;
pub mod ui;
pub mod views;

pub use config::Settings;
pub use error::{Error, Result};
pub use plot::{PlotCommit, PlotCommitList, PlotLane};
pub use refs::{RefCategory, classify};
pub use renderer::{DisplayList, PlotRenderer, RasterSurface, RenderConfig, Surface};
