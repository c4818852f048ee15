//! The paint-bucket gesture: render, fill, trace, insert, one undo step.
//!
//! The whole operation is synchronous and runs on the caller's thread; the
//! editor is expected to show a busy cursor for its duration. On a hard
//! failure nothing is committed.

use nonempty::NonEmpty;

use crate::compare::{Channel, ChannelComparator};
use crate::document::Edit;
use crate::fill::{self, FloodFill};
use crate::geom::{Point2D, Transform};
use crate::message::{MessageStack, MessageType};
use crate::render::{Render, Viewport};
use crate::settings::Settings;
use crate::vectorize::{self, Offset, Trace};

/// How much of the area around the viewport is rendered along with it, so
/// fillable regions just off screen can be included in the fill.
pub const RENDER_PADDING: f64 = 1.6;

/// Maximum channel threshold preference.
pub const MAX_THRESHOLD: u64 = 100;

/// Maximum autogap radius preference.
pub const MAX_AUTOGAP: u64 = 3;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The document has no bounding box at all; there is nothing to fill
    /// and no buffers are allocated.
    #[error("area is not bounded, cannot fill")]
    Unbounded,
    #[error(transparent)]
    Fill(#[from] fill::Error),
    #[error("tracing failed: {0}")]
    Vectorize(#[source] anyhow::Error),
}

/// One fill gesture. For a click, `points` holds the single click point;
/// for an area or touch fill, the rubberband stroke supplies them. All
/// points are in document coordinates.
#[derive(Clone, Debug)]
pub struct FillEvent {
    pub points: NonEmpty<Point2D<f64>>,
    /// Union the new path with the current selection instead of replacing
    /// it.
    pub union_with_selection: bool,
    /// Sample the fill color from the first point only; the rest of the
    /// stroke just adds starting pixels.
    pub touch: bool,
}

/// What a committed fill produced.
#[derive(Copy, Clone, Debug)]
pub struct FillOutcome {
    /// Number of paths inserted into the document.
    pub paths: usize,
    /// The fill ran into the edge of the rendered area; only the visible
    /// part of the document was considered.
    pub boundary_reached: bool,
}

/// Perform a flood fill. Renders the document around the viewport, runs the
/// scanline fill from the event's seed points, traces the result and inserts
/// it into the document inside a single undo transaction.
#[allow(clippy::too_many_arguments)]
pub fn flood_fill<D: Edit>(
    doc: &mut D,
    renderer: &dyn Render,
    tracer: &dyn Trace,
    offsetter: &dyn Offset,
    settings: &Settings,
    viewport: &Viewport,
    event: &FillEvent,
    messages: &mut MessageStack,
) -> Result<FillOutcome, Error> {
    let bbox = doc.bounds().ok_or(Error::Unbounded)?;
    let zoom = viewport.zoom;

    let region = viewport.rect.inflate(RENDER_PADDING);
    let width = (region.width() * zoom).ceil() as usize;
    let height = (region.height() * zoom).ceil() as usize;

    // A zero-area viewport renders nothing.
    if width == 0 || height == 0 {
        return Ok(FillOutcome {
            paths: 0,
            boundary_reached: false,
        });
    }

    let channel = Channel::from_index(settings["fill/channels"].to_u64());
    let threshold = settings["fill/threshold"].to_u64().min(MAX_THRESHOLD) as u32;
    let radius = settings["fill/autogap"].to_u64().min(MAX_AUTOGAP) as usize;
    let offset = settings["fill/offset"].to_f64();
    let union = event.union_with_selection || settings["fill/union"].to_bool();
    let background = settings["background"].to_rgba8();

    let raster = renderer.render(region, width, height, background);

    debug!(
        "fill: {}x{} raster, {} seed point(s), channel {:?}, threshold {}",
        width,
        height,
        event.points.len(),
        channel,
        threshold
    );

    // Document coordinates to raster rows/columns; row 0 is the region's
    // top edge.
    let seeds: Vec<Point2D<usize>> = event
        .points
        .iter()
        .map(|p| {
            let x = (p.x - region.min.x) * zoom;
            let y = (region.max.y - p.y) * zoom;

            Point2D::new(
                (x.max(0.0) as usize).min(width - 1),
                (y.max(0.0) as usize).min(height - 1),
            )
        })
        .collect();

    let fill = FloodFill::new(
        &raster,
        ChannelComparator::new(channel, threshold, background),
        background,
        radius,
        region,
        bbox,
    )
    .run(&seeds, event.touch)?;

    let fill = match fill {
        Some(fill) => fill,
        None => {
            return Ok(FillOutcome {
                paths: 0,
                boundary_reached: false,
            })
        }
    };

    if fill.boundary_reached {
        messages.flash(
            MessageType::Warning,
            "Only the visible part of the bounded area was filled. \
             If you want to fill all of the area, undo, zoom out, and fill again.",
        );
    }

    // Gray-map pixels back into document coordinates, undoing the zoom and
    // the vertical flip.
    let transform = Transform {
        sx: 1.0 / zoom,
        sy: -1.0 / zoom,
        tx: region.min.x + fill.bounds.min.x as f64 / zoom,
        ty: region.max.y - fill.bounds.min.y as f64 / zoom,
    };

    let paths = vectorize::vectorize(
        doc,
        tracer,
        offsetter,
        &fill,
        settings["fill/style"].to_str(),
        transform,
        offset * zoom,
        union,
        messages,
    )
    .map_err(Error::Vectorize)?;

    doc.commit("Fill bounded area");

    Ok(FillOutcome {
        paths,
        boundary_reached: fill.boundary_reached,
    })
}
