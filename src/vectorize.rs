//! Turns the colored fill mask into vector paths and places them in the
//! document.

use crate::document::Edit;
use crate::fill::{Bounds, Fill};
use crate::geom::Transform;
use crate::mask::TraceMap;
use crate::message::{MessageStack, MessageType};

/// A binary image handed to the tracing engine: `true` is black (filled).
pub struct GrayMap {
    pub width: usize,
    pub height: usize,

    cells: Vec<bool>,
}

impl GrayMap {
    /// Build the gray map over exactly the trace bounds, not the whole
    /// padded render buffer.
    pub fn new(mask: &TraceMap, bounds: &Bounds) -> Self {
        let (width, height) = (bounds.width(), bounds.height());
        let mut cells = Vec::with_capacity(width * height);

        for y in bounds.min.y..=bounds.max.y {
            for x in bounds.min.x..=bounds.max.x {
                cells.push(mask.is_colored(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[x + y * self.width]
    }

    /// Whether the map contains any black pixel at all.
    pub fn is_blank(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }
}

/// One path produced by the tracing engine.
#[derive(Clone, Debug)]
pub struct Traced {
    /// SVG path data, in gray-map pixel coordinates.
    pub data: String,
    /// Number of path nodes, reported to the user.
    pub node_count: usize,
}

/// A potrace-style tracing engine.
pub trait Trace {
    fn trace(&self, map: &GrayMap) -> anyhow::Result<Vec<Traced>>;
}

/// A polygon-offset library: grow or shrink path data by a distance, with
/// rounded joins. Returns `None` when the offset collapses the path to
/// nothing.
pub trait Offset {
    fn offset(&self, data: &str, amount: f64) -> anyhow::Result<Option<String>>;
}

/// Trace the fill mask and insert the resulting paths into the document.
/// `transform` maps gray-map pixel coordinates into document coordinates;
/// `offset` is the configured inset/outset in raster pixels (zero to use
/// the traced outline as-is). Returns the number of paths inserted.
#[allow(clippy::too_many_arguments)]
pub fn vectorize<D: Edit>(
    doc: &mut D,
    tracer: &dyn Trace,
    offsetter: &dyn Offset,
    fill: &Fill,
    style: &str,
    transform: Transform,
    offset: f64,
    union_with_selection: bool,
    messages: &mut MessageStack,
) -> anyhow::Result<usize> {
    let map = GrayMap::new(&fill.mask, &fill.bounds);
    if map.is_blank() {
        return Ok(0);
    }
    let results = tracer.trace(&map)?;
    let mut inserted = 0;

    for result in results {
        let data = if offset != 0.0 {
            match offsetter.offset(&result.data, offset)? {
                Some(data) => data,
                None => {
                    messages.flash(MessageType::Warning, "Too much inset, the result is empty.");
                    continue;
                }
            }
        } else {
            result.data
        };

        let node = doc.insert_path(&data, style, transform);

        if union_with_selection {
            messages.flash(
                MessageType::Info,
                format!(
                    "Area filled, path with {} node(s) created and unioned with selection.",
                    result.node_count
                ),
            );
            doc.selection_add(node);
            doc.selection_union();
        } else {
            messages.flash(
                MessageType::Info,
                format!("Area filled, path with {} node(s) created.", result.node_count),
            );
            doc.selection_set(node);
        }
        inserted += 1;
    }
    Ok(inserted)
}
