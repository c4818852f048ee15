//! The scanline flood-fill driver.
//!
//! The algorithm expands horizontally from each queued point, looking for
//! paintable pixels above and below. A vertical neighbor is queued only when
//! its paintability transitions from blocked to open, so the same span is
//! not queued once per step. With a nonzero autogap radius, painting a pixel
//! paints a whole block around it and reports which directions are blocked
//! by unpaintable neighbors, closing hairline gaps between shape outlines.

use std::collections::VecDeque;

use crate::color::Rgba8;
use crate::compare::{Comparator, Seed};
use crate::geom::{Point2D, Rect};
use crate::mask::TraceMap;
use crate::pixels::Raster;

/// Queue length above which a grown queue is re-sorted. The exact value is a
/// throughput heuristic, not a correctness constraint.
const SORT_SIZE_THRESHOLD: usize = 5;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The fill escaped the rendered buffer in a direction where the document
    /// continues past it, or exhausted its step budget. Nothing is committed;
    /// the user should zoom out and fill again.
    #[error("area is not bounded, cannot fill")]
    Unbounded,
}

/// Horizontal scan directions permitted after painting a pixel or an
/// autogap block.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Directions(u8);

impl Directions {
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(2);
    pub const UP: Self = Self(4);
    pub const DOWN: Self = Self(8);
    pub const ALL: Self = Self(15);
    pub const NONE: Self = Self(0);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

/// Running min/max of all painted pixels, used to size the trace region
/// tightly instead of tracing the whole padded render buffer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Bounds {
    pub min: Point2D<usize>,
    pub max: Point2D<usize>,
}

impl Bounds {
    fn singleton(p: Point2D<usize>) -> Self {
        Self { min: p, max: p }
    }

    fn touch(&mut self, x: usize, y: usize) {
        self.min.x = self.min.x.min(x);
        self.min.y = self.min.y.min(y);
        self.max.x = self.max.x.max(x);
        self.max.y = self.max.y.max(y);
    }

    /// Grow by `pad` on all sides, clamped to a `width` × `height` buffer.
    fn padded(self, pad: usize, width: usize, height: usize) -> Self {
        Self {
            min: Point2D::new(self.min.x.saturating_sub(pad), self.min.y.saturating_sub(pad)),
            max: Point2D::new(
                (self.max.x + pad).min(width - 1),
                (self.max.y + pad).min(height - 1),
            ),
        }
    }

    pub fn width(&self) -> usize {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> usize {
        self.max.y - self.min.y + 1
    }
}

/// The result of a completed fill: the colored mask, the padded trace
/// bounds, and whether the fill ran into the rendered buffer's edge where
/// the document also ends.
pub struct Fill {
    pub mask: TraceMap,
    pub bounds: Bounds,
    pub boundary_reached: bool,
}

enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// One flood-fill pass over a rendered raster. All buffers are owned by the
/// pass and live exactly as long as it does.
pub struct FloodFill<'a, C> {
    raster: &'a Raster,
    trace: TraceMap,
    queue: VecDeque<Point2D<usize>>,
    cmp: C,
    seed: Seed,
    background: Rgba8,
    radius: usize,

    /// Document-space region covered by the raster.
    rendered: Rect<f64>,
    /// The document's bounding box.
    bbox: Rect<f64>,

    max_queue: usize,
    steps: usize,
    bounds: Option<Bounds>,
    boundary_reached: bool,
}

impl<'a, C: Comparator> FloodFill<'a, C> {
    /// `rendered` is the document-space rectangle the raster covers, with
    /// raster row 0 at `rendered.max.y`; `bbox` is the document's bounding
    /// box, used to tell a harmless buffer edge from a truncated fill.
    pub fn new(
        raster: &'a Raster,
        cmp: C,
        background: Rgba8,
        radius: usize,
        rendered: Rect<f64>,
        bbox: Rect<f64>,
    ) -> Self {
        Self {
            raster,
            trace: TraceMap::new(raster.width, raster.height),
            queue: VecDeque::new(),
            cmp,
            seed: Seed::new(background, background),
            background,
            radius,
            rendered,
            bbox,
            max_queue: raster.width * raster.height / 4,
            steps: 0,
            bounds: None,
            boundary_reached: false,
        }
    }

    /// Run the fill from the given seed points (raster coordinates). For a
    /// touch fill, only the first point samples the seed color; the rest are
    /// queued as additional starting pixels. Otherwise each point samples
    /// its own color and starts its own pass, skipping points that an
    /// earlier pass already covered.
    ///
    /// Returns `None` if no pixel was painted at all.
    pub fn run(
        mut self,
        points: &[Point2D<usize>],
        touch: bool,
    ) -> Result<Option<Fill>, Error> {
        let mut colors: VecDeque<Point2D<usize>> = VecDeque::new();

        for (i, &p) in points.iter().enumerate() {
            if touch && i > 0 {
                self.push_back(p);
            } else {
                colors.push_back(p);
            }
        }

        let mut first = true;

        while let Some(p) = colors.pop_front() {
            if self.trace.is_checked(p.x, p.y) || self.trace.is_colored(p.x, p.y) {
                continue;
            }
            let color = match self.raster.get(p.x, p.y) {
                Some(color) => color,
                None => continue,
            };

            // A new seed color makes every cached paintability decision
            // stale.
            if !first {
                self.trace.invalidate_paintability();
            }
            first = false;

            self.seed = Seed::new(color, self.background);
            // Each color pass gets the full step budget.
            self.steps = 0;
            self.push_front(p);
            self.drain()?;
        }

        Ok(self.bounds.map(|bounds| Fill {
            bounds: bounds.padded(self.radius + 1, self.raster.width, self.raster.height),
            boundary_reached: self.boundary_reached,
            mask: self.trace,
        }))
    }

    /// Process the work queue until it is empty.
    fn drain(&mut self) -> Result<(), Error> {
        let mut last_len = self.queue.len();

        loop {
            // Periodically re-sort a growing queue so scanline passes start
            // from one corner of the buffer and cover contiguous runs,
            // shrinking the queue faster. Block painting makes the reorder
            // invalid, so this only applies without autogap.
            if self.radius == 0 {
                let len = self.queue.len();
                if len > SORT_SIZE_THRESHOLD && len > last_len {
                    self.queue
                        .make_contiguous()
                        .sort_unstable_by(|a, b| b.y.cmp(&a.y).then(b.x.cmp(&a.x)));
                }
                last_len = len;
            }

            let p = match self.queue.pop_front() {
                Some(p) => p,
                None => break,
            };

            // The same pixel can be queued from two directions before either
            // is dequeued; duplicates are discarded without spending a step,
            // so the budget only counts scanline passes.
            if self.trace.is_checked(p.x, p.y) {
                continue;
            }
            self.steps += 1;
            if self.steps > self.max_queue {
                return Err(Error::Unbounded);
            }
            self.trace.mark_checked(p.x, p.y);

            if p.y == 0 {
                self.edge(Edge::Top)?;
            }
            if p.y == self.raster.height - 1 {
                self.edge(Edge::Bottom)?;
            }

            self.scan(p, true)?;

            // Expand rightwards from the unchecked right-hand neighbor; the
            // leftward pass covered `p` itself. A queued neighbor is scanned
            // here too, and discarded as checked when its turn comes.
            if p.x + 1 < self.raster.width && !self.trace.is_checked(p.x + 1, p.y) {
                self.trace.mark_checked(p.x + 1, p.y);
                self.scan(Point2D::new(p.x + 1, p.y), false)?;
            }
        }
        Ok(())
    }

    /// Expand horizontally from `start` while pixels remain paintable,
    /// spawning vertical continuations along the way.
    fn scan(&mut self, start: Point2D<usize>, left: bool) -> Result<(), Error> {
        let y = start.y;
        let mut x = start.x;

        let top = y.checked_sub(1);
        let bottom = (y + 1 < self.raster.height).then_some(y + 1);

        // Track whether the row above/below is mid-span: a vertical neighbor
        // is queued only when it transitions from blocked to open, so each
        // span above or below is queued exactly once.
        let mut painting_top = false;
        let mut painting_bottom = false;
        let mut initial = true;

        loop {
            if !self.paintable(x, y) {
                return Ok(());
            }

            let dirs = self.paint(x, y);

            if self.radius == 0 {
                self.trace.mark_checked(x, y);
            }

            if let Some(ty) = top {
                if dirs.contains(Directions::UP) {
                    self.spawn(x, ty, initial, &mut painting_top);
                }
            }
            if let Some(ty) = bottom {
                if dirs.contains(Directions::DOWN) {
                    self.spawn(x, ty, initial, &mut painting_bottom);
                }
            }
            initial = false;

            if left {
                if !dirs.contains(Directions::LEFT) {
                    return Ok(());
                }
                if x == 0 {
                    return self.edge(Edge::Left);
                }
                x -= 1;
            } else {
                if !dirs.contains(Directions::RIGHT) {
                    return Ok(());
                }
                if x + 1 == self.raster.width {
                    return self.edge(Edge::Right);
                }
                x += 1;
            }
        }
    }

    /// Queue a vertical continuation at (x, ty) when its paintability opens
    /// up.
    fn spawn(&mut self, x: usize, ty: usize, initial: bool, painting: &mut bool) {
        if self.trace.is_queued(x, ty) {
            return;
        }
        let open = self.paintable(x, ty);

        if initial {
            *painting = !open;
        }
        if open && !*painting {
            *painting = true;
            self.push_back(Point2D::new(x, ty));
        } else if !open {
            *painting = false;
        }
    }

    /// Whether the pixel can join the fill, computed at most once per pixel
    /// per seed color.
    fn paintable(&mut self, x: usize, y: usize) -> bool {
        if self.trace.paintability_known(x, y) {
            return self.trace.is_paintable(x, y);
        }
        let px = match self.raster.get(x, y) {
            Some(px) => px,
            None => return false,
        };

        if self.cmp.matches(px, &self.seed) {
            self.trace.mark_paintable(x, y);
            true
        } else {
            self.trace.mark_not_paintable(x, y);
            false
        }
    }

    /// Paint a pixel, or with a nonzero autogap radius, the square block
    /// around it. Returns the directions the scan may continue in: a
    /// direction is blocked if any neighbor strictly on that side of the
    /// block failed classification.
    fn paint(&mut self, x: usize, y: usize) -> Directions {
        if self.radius == 0 {
            self.trace.mark_colored(x, y);
            self.touch(x, y);

            return Directions::ALL;
        }

        let mut dirs = Directions::ALL;

        for ty in y.saturating_sub(self.radius)..=(y + self.radius).min(self.raster.height - 1) {
            for tx in x.saturating_sub(self.radius)..=(x + self.radius).min(self.raster.width - 1)
            {
                if self.trace.is_colored(tx, ty) {
                    continue;
                }
                if self.paintable(tx, ty) {
                    self.trace.mark_colored(tx, ty);
                    self.touch(tx, ty);
                } else {
                    if tx < x {
                        dirs.remove(Directions::LEFT);
                    }
                    if tx > x {
                        dirs.remove(Directions::RIGHT);
                    }
                    if ty < y {
                        dirs.remove(Directions::UP);
                    }
                    if ty > y {
                        dirs.remove(Directions::DOWN);
                    }
                }
            }
        }
        dirs
    }

    /// The fill's frontier left the rendered buffer. If the document's
    /// bounding box continues past the rendered region on that side, the
    /// fill cannot be judged complete and is aborted; otherwise the buffer
    /// edge coincides with the document edge and the fill proceeds with a
    /// warning. Raster row 0 corresponds to the rendered region's maximum Y.
    fn edge(&mut self, edge: Edge) -> Result<(), Error> {
        let escapes = match edge {
            Edge::Left => self.bbox.min.x < self.rendered.min.x,
            Edge::Right => self.bbox.max.x > self.rendered.max.x,
            Edge::Top => self.bbox.max.y > self.rendered.max.y,
            Edge::Bottom => self.bbox.min.y < self.rendered.min.y,
        };

        if escapes {
            Err(Error::Unbounded)
        } else {
            self.boundary_reached = true;
            Ok(())
        }
    }

    fn touch(&mut self, x: usize, y: usize) {
        match &mut self.bounds {
            Some(bounds) => bounds.touch(x, y),
            None => self.bounds = Some(Bounds::singleton(Point2D::new(x, y))),
        }
    }

    /// Append a point to the work queue, respecting the QUEUED bit and the
    /// queue capacity. A push that would overflow the queue is dropped; the
    /// step counter aborts such fills before they can miss pixels silently.
    fn push_back(&mut self, p: Point2D<usize>) {
        if !self.trace.is_queued(p.x, p.y) && self.queue.len() < self.max_queue {
            self.queue.push_back(p);
            self.trace.mark_queued(p.x, p.y);
        }
    }

    /// Prepend a point to the work queue; used for fresh seed points so they
    /// are expanded before any pending continuations.
    fn push_front(&mut self, p: Point2D<usize>) {
        if !self.trace.is_queued(p.x, p.y) && self.queue.len() < self.max_queue {
            self.queue.push_front(p);
            self.trace.mark_queued(p.x, p.y);
        }
    }
}
