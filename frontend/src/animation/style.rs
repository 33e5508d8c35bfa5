use kurbo::{Point, Rect, Vec2};

/// Logical role of an element the animator writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Header,
    Container,
    Section,
    Icon(usize),
    Segment(usize),
    Clone(usize),
}

/// Translation in px plus a uniform scale around the element's centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { x: 0.0, y: 0.0, scale: 1.0 };

    pub fn translate(x: f64, y: f64) -> Self {
        Transform { x, y, scale: 1.0 }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Transform { scale, ..self }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

/// Where the animator's output goes.
///
/// The DOM implementation lives in `dom::surface`; tests record calls.
/// Writes to an element the sink does not know about are ignored.
pub trait StyleSink {
    fn set_transform(&mut self, element: ElementId, transform: Transform);
    fn set_opacity(&mut self, element: ElementId, opacity: f64);
    /// Absolute top-left position in page coordinates. Only clones use this.
    fn set_position(&mut self, element: ElementId, top_left: Point);
    fn set_background(&mut self, element: ElementId, color: &str);
    /// Creates the clone of icon `index`, `size` px square, detached from the icon container.
    fn create_clone(&mut self, index: usize, size: f64);
    fn remove_clone(&mut self, index: usize);
}

/// Live geometry the animator cannot compute itself.
///
/// Rects are viewport-relative, like `getBoundingClientRect`.
pub trait GeometryProvider {
    /// Layout rect of the icon container without any animator transform applied.
    fn container_rect(&self) -> Rect;
    /// Current on-screen rect of icon `index`, including the container transform.
    fn icon_rect(&self, index: usize) -> Option<Rect>;
    fn placeholder_rect(&self, index: usize) -> Option<Rect>;
    /// Page scroll offset, added to viewport coordinates to get page coordinates.
    fn scroll_offset(&self) -> Vec2;
}
