//! A paint-bucket engine: flood fill over a rendered raster, traced back
//! into vector paths.
//!
//! The engine fills a region of a rendered image starting from one or more
//! seed points, using a scanline expansion with a memoized color comparator
//! and an optional "autogap" dilation that bridges anti-aliasing seams. The
//! resulting pixel mask is handed to a tracing engine and inserted into the
//! document as one or more paths.
//!
//! Rendering, tracing, path offsetting and the document tree itself are
//! collaborators behind traits; see [`render::Render`], [`vectorize::Trace`],
//! [`vectorize::Offset`] and [`document::Edit`].
#![allow(clippy::collapsible_if)]
#![allow(clippy::single_match)]
#![warn(rust_2018_idioms)]
#[macro_use]
extern crate log;

#[macro_use]
pub mod util;
pub mod color;
pub mod compare;
pub mod document;
pub mod fill;
pub mod geom;
pub mod mask;
pub mod message;
pub mod pixels;
pub mod render;
pub mod settings;
pub mod tool;
pub mod vectorize;

pub use color::Rgba8;
pub use compare::Channel;
pub use fill::FloodFill;
pub use message::{Message, MessageStack, MessageType};
pub use settings::Settings;
pub use tool::{flood_fill, FillEvent, FillOutcome};
