//! End-to-end fill gesture tests, with the renderer, tracer, offsetter and
//! document replaced by recording stubs.

use nonempty::NonEmpty;

use paintbucket::color::Rgba8;
use paintbucket::document::{Edit, NodeId};
use paintbucket::fill;
use paintbucket::geom::{Point2D, Rect, Transform};
use paintbucket::message::{MessageStack, MessageType};
use paintbucket::pixels::Raster;
use paintbucket::render::{Render, Viewport};
use paintbucket::settings::{Settings, Value};
use paintbucket::tool::{self, FillEvent};
use paintbucket::vectorize::{GrayMap, Offset, Trace, Traced};

/// Rasterizes a set of black rectangles (document coordinates, half-open)
/// over the background, with row 0 at the region's top edge.
struct SceneRender {
    walls: Vec<Rect<f64>>,
}

impl Render for SceneRender {
    fn render(
        &self,
        region: Rect<f64>,
        width: usize,
        height: usize,
        background: Rgba8,
    ) -> Raster {
        let mut raster = Raster::solid(background, width, height);

        for py in 0..height {
            for px in 0..width {
                let x = region.min.x + (px as f64 + 0.5);
                let y = region.max.y - (py as f64 + 0.5);

                if self
                    .walls
                    .iter()
                    .any(|w| w.min.x <= x && x < w.max.x && w.min.y <= y && y < w.max.y)
                {
                    raster.set(px, py, Rgba8::BLACK);
                }
            }
        }
        raster
    }
}

/// Emits one rectangular path around the bounding box of the black pixels,
/// in gray-map coordinates, so tests can assert on the exact output.
struct BoxTracer;

impl Trace for BoxTracer {
    fn trace(&self, map: &GrayMap) -> anyhow::Result<Vec<Traced>> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;

        for y in 0..map.height {
            for x in 0..map.width {
                if map.get(x, y) {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
        }
        let (x0, y0, x1, y1) = bounds.ok_or_else(|| anyhow::anyhow!("blank gray map"))?;

        Ok(vec![Traced {
            data: format!("M {} {} H {} V {} H {} Z", x0, y0, x1 + 1, y1 + 1, x0),
            node_count: 4,
        }])
    }
}

struct NoopOffset;

impl Offset for NoopOffset {
    fn offset(&self, data: &str, _amount: f64) -> anyhow::Result<Option<String>> {
        Ok(Some(data.to_owned()))
    }
}

/// An offsetter whose inset always swallows the whole path.
struct CollapsingOffset;

impl Offset for CollapsingOffset {
    fn offset(&self, _data: &str, _amount: f64) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

#[derive(Default)]
struct Doc {
    bbox: Option<Rect<f64>>,
    paths: Vec<(String, String, Transform)>,
    selected: Vec<NodeId>,
    unions: usize,
    commits: Vec<String>,
}

impl Edit for Doc {
    fn bounds(&self) -> Option<Rect<f64>> {
        self.bbox
    }

    fn insert_path(&mut self, data: &str, style: &str, transform: Transform) -> NodeId {
        self.paths.push((data.to_owned(), style.to_owned(), transform));
        self.paths.len() as NodeId
    }

    fn selection_set(&mut self, node: NodeId) {
        self.selected.clear();
        self.selected.push(node);
    }

    fn selection_add(&mut self, node: NodeId) {
        self.selected.push(node);
    }

    fn selection_union(&mut self) {
        self.unions += 1;
    }

    fn commit(&mut self, label: &str) {
        self.commits.push(label.to_owned());
    }
}

fn viewport() -> Viewport {
    Viewport {
        rect: Rect::new((0.0, 0.0), (100.0, 100.0)),
        zoom: 1.0,
    }
}

fn click(x: f64, y: f64) -> FillEvent {
    FillEvent {
        points: NonEmpty::new(Point2D::new(x, y)),
        union_with_selection: false,
        touch: false,
    }
}

/// A 2-unit-thick square outline from (39, 39) to (61, 61).
fn ring() -> Vec<Rect<f64>> {
    vec![
        Rect::new((39.0, 39.0), (61.0, 41.0)),
        Rect::new((39.0, 59.0), (61.0, 61.0)),
        Rect::new((39.0, 39.0), (41.0, 61.0)),
        Rect::new((59.0, 39.0), (61.0, 61.0)),
    ]
}

#[test]
fn test_fill_whole_document_warns_about_boundary() {
    let mut doc = Doc {
        bbox: Some(Rect::new((10.0, 10.0), (90.0, 90.0))),
        ..Doc::default()
    };
    let renderer = SceneRender { walls: vec![] };
    let mut messages = MessageStack::new();

    let outcome = tool::flood_fill(
        &mut doc,
        &renderer,
        &BoxTracer,
        &NoopOffset,
        &Settings::default(),
        &viewport(),
        &click(50.0, 50.0),
        &mut messages,
    )
    .unwrap();

    assert_eq!(outcome.paths, 1);
    assert!(outcome.boundary_reached);

    // The fill covered the whole padded render buffer, which is 160x160 for
    // a 100x100 viewport.
    let (data, style, transform) = &doc.paths[0];
    assert_eq!(data, "M 0 0 H 160 V 160 H 0 Z");
    assert_eq!(style, "fill:#000000");
    assert_eq!(transform.sx, 1.0);
    assert_eq!(transform.sy, -1.0);
    assert!((transform.tx + 30.0).abs() < 1e-9);
    assert!((transform.ty - 130.0).abs() < 1e-9);

    assert_eq!(doc.selected, vec![1]);
    assert_eq!(doc.commits, vec![String::from("Fill bounded area")]);
    assert!(messages
        .iter()
        .any(|m| m.message_type() == MessageType::Warning
            && m.to_string().starts_with("Only the visible part")));
}

#[test]
fn test_fill_enclosed_region_inserts_tight_path() {
    let mut doc = Doc {
        bbox: Some(Rect::new((10.0, 10.0), (90.0, 90.0))),
        ..Doc::default()
    };
    let renderer = SceneRender { walls: ring() };
    let mut messages = MessageStack::new();

    let outcome = tool::flood_fill(
        &mut doc,
        &renderer,
        &BoxTracer,
        &NoopOffset,
        &Settings::default(),
        &viewport(),
        &click(50.0, 50.0),
        &mut messages,
    )
    .unwrap();

    assert_eq!(outcome.paths, 1);
    assert!(!outcome.boundary_reached);

    // The ring interior is 18 raster pixels across; with one pixel of trace
    // padding the gray map is 20x20 and the filled box sits at (1, 1).
    let (data, _, transform) = &doc.paths[0];
    assert_eq!(data, "M 1 1 H 19 V 19 H 1 Z");
    assert!((transform.tx - 40.0).abs() < 1e-9);
    assert!((transform.ty - 60.0).abs() < 1e-9);

    assert!(messages
        .iter()
        .all(|m| m.message_type() == MessageType::Info));
    assert_eq!(doc.commits.len(), 1);
}

#[test]
fn test_zero_area_viewport_is_a_noop() {
    let mut doc = Doc {
        bbox: Some(Rect::new((10.0, 10.0), (90.0, 90.0))),
        ..Doc::default()
    };
    let renderer = SceneRender { walls: vec![] };
    let mut messages = MessageStack::new();
    let viewport = Viewport {
        rect: Rect::new((50.0, 50.0), (50.0, 50.0)),
        zoom: 1.0,
    };

    let outcome = tool::flood_fill(
        &mut doc,
        &renderer,
        &BoxTracer,
        &NoopOffset,
        &Settings::default(),
        &viewport,
        &click(50.0, 50.0),
        &mut messages,
    )
    .unwrap();

    assert_eq!(outcome.paths, 0);
    assert!(doc.paths.is_empty());
    assert!(doc.commits.is_empty());
}

#[test]
fn test_empty_document_is_rejected() {
    let mut doc = Doc::default();
    let renderer = SceneRender { walls: vec![] };
    let mut messages = MessageStack::new();

    let result = tool::flood_fill(
        &mut doc,
        &renderer,
        &BoxTracer,
        &NoopOffset,
        &Settings::default(),
        &viewport(),
        &click(50.0, 50.0),
        &mut messages,
    );

    assert!(matches!(result, Err(tool::Error::Unbounded)));
    assert!(doc.paths.is_empty());
    assert!(doc.commits.is_empty());
}

#[test]
fn test_document_larger_than_view_aborts() {
    // The document extends far past the rendered region, so an unbounded
    // fill cannot be told apart from a bounded one and must fail.
    let mut doc = Doc {
        bbox: Some(Rect::new((-1000.0, -1000.0), (1000.0, 1000.0))),
        ..Doc::default()
    };
    let renderer = SceneRender { walls: vec![] };
    let mut messages = MessageStack::new();

    let result = tool::flood_fill(
        &mut doc,
        &renderer,
        &BoxTracer,
        &NoopOffset,
        &Settings::default(),
        &viewport(),
        &click(50.0, 50.0),
        &mut messages,
    );

    assert!(matches!(
        result,
        Err(tool::Error::Fill(fill::Error::Unbounded))
    ));
    assert!(doc.paths.is_empty());
    assert!(doc.commits.is_empty());
}

#[test]
fn test_union_with_selection() {
    let mut doc = Doc {
        bbox: Some(Rect::new((10.0, 10.0), (90.0, 90.0))),
        ..Doc::default()
    };
    let renderer = SceneRender { walls: ring() };
    let mut messages = MessageStack::new();

    let event = FillEvent {
        union_with_selection: true,
        ..click(50.0, 50.0)
    };
    let outcome = tool::flood_fill(
        &mut doc,
        &renderer,
        &BoxTracer,
        &NoopOffset,
        &Settings::default(),
        &viewport(),
        &event,
        &mut messages,
    )
    .unwrap();

    assert_eq!(outcome.paths, 1);
    assert_eq!(doc.unions, 1);
    assert_eq!(doc.selected, vec![1]);
    assert!(messages
        .iter()
        .any(|m| m.to_string().contains("unioned with selection")));
}

#[test]
fn test_inset_collapsing_path_warns() {
    let mut doc = Doc {
        bbox: Some(Rect::new((10.0, 10.0), (90.0, 90.0))),
        ..Doc::default()
    };
    let renderer = SceneRender { walls: ring() };
    let mut settings = Settings::default();
    settings.set("fill/offset", Value::Float(-4.0)).unwrap();
    let mut messages = MessageStack::new();

    let outcome = tool::flood_fill(
        &mut doc,
        &renderer,
        &BoxTracer,
        &CollapsingOffset,
        &settings,
        &viewport(),
        &click(50.0, 50.0),
        &mut messages,
    )
    .unwrap();

    assert_eq!(outcome.paths, 0);
    assert!(doc.paths.is_empty());
    assert!(messages
        .iter()
        .any(|m| m.message_type() == MessageType::Warning
            && m.to_string() == "Too much inset, the result is empty."));
}
