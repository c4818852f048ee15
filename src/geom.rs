use std::fmt;

/// A 2D point.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Point2D<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point2D<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn map<S, F>(self, f: F) -> Point2D<S>
    where
        F: Fn(T) -> S,
    {
        Point2D {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Point2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T> From<(T, T)> for Point2D<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// A rectangle given by its minimum and maximum corners.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rect<T> {
    pub min: Point2D<T>,
    pub max: Point2D<T>,
}

impl<T: Copy> Rect<T> {
    pub fn new(min: impl Into<Point2D<T>>, max: impl Into<Point2D<T>>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

impl Rect<f64> {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Scale the rectangle around its center by the given factor.
    pub fn inflate(&self, factor: f64) -> Self {
        let dx = self.width() * (factor - 1.0) / 2.0;
        let dy = self.height() * (factor - 1.0) / 2.0;

        Self::new(
            (self.min.x - dx, self.min.y - dy),
            (self.max.x + dx, self.max.y + dy),
        )
    }
}

/// An axis-aligned scale followed by a translation. This is the only affine
/// shape the engine needs: mapping between raster rows/columns and document
/// coordinates, including the vertical flip (negative `sy`).
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            sx: 1.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn apply(&self, p: Point2D<f64>) -> Point2D<f64> {
        Point2D::new(self.sx * p.x + self.tx, self.sy * p.y + self.ty)
    }

    pub fn inverse(&self) -> Self {
        Self {
            sx: 1.0 / self.sx,
            sy: 1.0 / self.sy,
            tx: -self.tx / self.sx,
            ty: -self.ty / self.sy,
        }
    }
}
