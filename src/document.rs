//! The document-tree collaborator seam. The engine never touches the XML
//! tree directly; it asks the editor to insert paths, manage the selection
//! and close the undo transaction.

use crate::geom::{Rect, Transform};

/// Identifies a node created in the document tree.
pub type NodeId = u64;

/// Mutating access to the document under edit.
pub trait Edit {
    /// The document's visual bounding box, or `None` for an empty document.
    fn bounds(&self) -> Option<Rect<f64>>;

    /// Create a `<path>` element in the current layer with the given path
    /// data, style, and node transform, and return its id. The transform
    /// carries the path out of raster space into the layer's coordinate
    /// system.
    fn insert_path(&mut self, data: &str, style: &str, transform: Transform) -> NodeId;

    /// Replace the selection with the given node.
    fn selection_set(&mut self, node: NodeId);

    /// Add the node to the current selection.
    fn selection_add(&mut self, node: NodeId);

    /// Union all selected paths into one.
    fn selection_union(&mut self);

    /// Close the undo transaction wrapping the whole fill, so the operation
    /// is a single undo step.
    fn commit(&mut self, label: &str);
}
