//! Test doubles for the style sink and geometry provider.

use std::collections::{BTreeMap, BTreeSet};

use kurbo::{Point, Rect, Vec2};

use super::style::{ElementId, GeometryProvider, StyleSink, Transform};

#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Transform(ElementId, Transform),
    Opacity(ElementId, f64),
    Position(ElementId, Point),
    Background(ElementId, String),
    CreateClone(usize),
    RemoveClone(usize),
}

/// Keeps the last value written per element plus the raw write log.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub transforms: BTreeMap<ElementId, Transform>,
    pub opacities: BTreeMap<ElementId, f64>,
    pub positions: BTreeMap<ElementId, Point>,
    pub backgrounds: BTreeMap<ElementId, String>,
    pub live_clones: BTreeSet<usize>,
    pub created: usize,
    pub removed: usize,
    pub writes: Vec<Write>,
}

impl RecordingSink {
    pub fn transform(&self, element: ElementId) -> Transform {
        self.transforms.get(&element).copied().unwrap_or_default()
    }

    pub fn opacity(&self, element: ElementId) -> f64 {
        self.opacities.get(&element).copied().unwrap_or(1.0)
    }

    pub fn background(&self) -> Option<&str> {
        self.backgrounds.get(&ElementId::Section).map(String::as_str)
    }
}

impl StyleSink for RecordingSink {
    fn set_transform(&mut self, element: ElementId, transform: Transform) {
        self.transforms.insert(element, transform);
        self.writes.push(Write::Transform(element, transform));
    }

    fn set_opacity(&mut self, element: ElementId, opacity: f64) {
        self.opacities.insert(element, opacity);
        self.writes.push(Write::Opacity(element, opacity));
    }

    fn set_position(&mut self, element: ElementId, top_left: Point) {
        self.positions.insert(element, top_left);
        self.writes.push(Write::Position(element, top_left));
    }

    fn set_background(&mut self, element: ElementId, color: &str) {
        self.backgrounds.insert(element, color.to_string());
        self.writes.push(Write::Background(element, color.to_string()));
    }

    fn create_clone(&mut self, index: usize, _size: f64) {
        self.live_clones.insert(index);
        self.created += 1;
        self.writes.push(Write::CreateClone(index));
    }

    fn remove_clone(&mut self, index: usize) {
        self.live_clones.remove(&index);
        self.positions.remove(&ElementId::Clone(index));
        self.opacities.remove(&ElementId::Clone(index));
        self.removed += 1;
        self.writes.push(Write::RemoveClone(index));
    }
}

/// Geometry that never moves, whatever the sink was told.
#[derive(Debug, Clone)]
pub struct FixedGeometry {
    pub container: Rect,
    pub icons: Vec<Rect>,
    pub placeholders: Vec<Rect>,
    pub scroll: Vec2,
}

impl GeometryProvider for FixedGeometry {
    fn container_rect(&self) -> Rect {
        self.container
    }

    fn icon_rect(&self, index: usize) -> Option<Rect> {
        self.icons.get(index).copied()
    }

    fn placeholder_rect(&self, index: usize) -> Option<Rect> {
        self.placeholders.get(index).copied()
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }
}
