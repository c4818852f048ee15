//! The renderer collaborator seam.

use crate::color::Rgba8;
use crate::geom::Rect;
use crate::pixels::Raster;

/// The visible portion of the document, in document coordinates, and the
/// current zoom in raster pixels per document unit.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    pub rect: Rect<f64>,
    pub zoom: f64,
}

/// Renders the document into an off-screen raster. The render must be free
/// of side effects on the live document.
pub trait Render {
    /// Produce a `width` × `height` raster covering `region` (document
    /// coordinates, row 0 at `region.max.y`), composited over the page
    /// background color.
    fn render(&self, region: Rect<f64>, width: usize, height: usize, background: Rgba8)
        -> Raster;
}
