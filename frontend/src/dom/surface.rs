use std::rc::Rc;

use kurbo::{Point, Rect, Size, Vec2};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use super::elements::{class, HeroElements};
use crate::animation::style::{ElementId, GeometryProvider, StyleSink, Transform};

/// Writes animator output straight onto inline styles.
pub struct DomSink {
    document: Document,
    elements: Rc<HeroElements>,
    clones: Vec<Option<HtmlElement>>,
}

impl DomSink {
    pub fn new(document: Document, elements: Rc<HeroElements>) -> Self {
        DomSink {
            document,
            elements,
            clones: Vec::new(),
        }
    }

    fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        match id {
            ElementId::Header => self.elements.header.as_ref(),
            ElementId::Container => self.elements.container.as_ref(),
            ElementId::Section => self.elements.root.as_ref(),
            ElementId::Icon(i) => self.elements.icons.get(i),
            ElementId::Segment(i) => self.elements.segments.get(i),
            ElementId::Clone(i) => self.clones.get(i).and_then(Option::as_ref),
        }
    }

    fn set_style(&self, id: ElementId, property: &str, value: &str) {
        if let Some(element) = self.element(id) {
            let _ = element.style().set_property(property, value);
        }
    }
}

impl StyleSink for DomSink {
    fn set_transform(&mut self, element: ElementId, transform: Transform) {
        self.set_style(element, "transform", &transform_css(element, transform));
    }

    fn set_opacity(&mut self, element: ElementId, opacity: f64) {
        self.set_style(element, "opacity", &opacity.to_string());
    }

    fn set_position(&mut self, element: ElementId, top_left: Point) {
        self.set_style(element, "left", &format!("{}px", top_left.x));
        self.set_style(element, "top", &format!("{}px", top_left.y));
    }

    fn set_background(&mut self, element: ElementId, color: &str) {
        self.set_style(element, "background-color", color);
    }

    fn create_clone(&mut self, index: usize, size: f64) {
        let Some(icon) = self.elements.icons.get(index) else {
            return;
        };
        let Some(body) = self.document.body() else {
            return;
        };
        let Ok(node) = icon.clone_node_with_deep(true) else {
            return;
        };
        let Ok(clone) = node.dyn_into::<HtmlElement>() else {
            return;
        };

        clone.set_class_name(class::CLONE);
        let style = clone.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("width", &format!("{}px", size));
        let _ = style.set_property("height", &format!("{}px", size));
        let _ = style.set_property("transform", "none");
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property("display", "flex");
        let _ = body.append_child(&clone);

        if self.clones.len() <= index {
            self.clones.resize(index + 1, None);
        }
        self.clones[index] = Some(clone);
    }

    fn remove_clone(&mut self, index: usize) {
        if let Some(clone) = self.clones.get_mut(index).and_then(Option::take) {
            clone.remove();
        }
    }
}

/// CSS transform for an element. The header is centred with percentages.
pub fn transform_css(element: ElementId, transform: Transform) -> String {
    match element {
        ElementId::Header => format!("translate(-50%, calc(-50% + {}px))", transform.y),
        _ => format!(
            "translate({}px, {}px) scale({})",
            transform.x, transform.y, transform.scale
        ),
    }
}

/// Live layout queries against the page.
pub struct DomGeometry {
    window: Window,
    elements: Rc<HeroElements>,
}

impl DomGeometry {
    pub fn new(window: Window, elements: Rc<HeroElements>) -> Self {
        DomGeometry { window, elements }
    }

    pub fn viewport(&self) -> Size {
        viewport_size(&self.window)
    }

    /// The container's transform as currently computed by the browser.
    fn container_matrix(&self, container: &Element) -> CssMatrix {
        self.window
            .get_computed_style(container)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("transform").ok())
            .and_then(|value| CssMatrix::parse(&value))
            .unwrap_or(CssMatrix::IDENTITY)
    }
}

impl GeometryProvider for DomGeometry {
    fn container_rect(&self) -> Rect {
        let Some(container) = self.elements.container.as_ref() else {
            return Rect::ZERO;
        };
        let on_screen = client_rect(container);
        let matrix = self.container_matrix(container);

        // transform-origin is the centre, so scale leaves the centre in place
        let center = on_screen.center() - matrix.translate;
        let size = Size::new(
            unscale(on_screen.width(), matrix.scale_x),
            unscale(on_screen.height(), matrix.scale_y),
        );
        Rect::from_center_size(center, size)
    }

    fn icon_rect(&self, index: usize) -> Option<Rect> {
        self.elements.icons.get(index).map(|icon| client_rect(icon))
    }

    fn placeholder_rect(&self, index: usize) -> Option<Rect> {
        self.elements.placeholders.get(index).map(client_rect)
    }

    fn scroll_offset(&self) -> Vec2 {
        Vec2::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }
}

pub fn viewport_size(window: &Window) -> Size {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(width, height)
}

pub fn client_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
}

fn unscale(length: f64, scale: f64) -> f64 {
    if scale.abs() > f64::EPSILON {
        length / scale.abs()
    } else {
        0.0
    }
}

/// The parts of a computed `transform` value the geometry queries need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssMatrix {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate: Vec2,
}

impl CssMatrix {
    pub const IDENTITY: CssMatrix = CssMatrix {
        scale_x: 1.0,
        scale_y: 1.0,
        translate: Vec2::ZERO,
    };

    /// Parses `none`, `matrix(a, b, c, d, e, f)` and `matrix3d(...)`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value == "none" || value.is_empty() {
            return Some(CssMatrix::IDENTITY);
        }

        let (name, rest) = value.split_once('(')?;
        let args: Vec<f64> = rest
            .strip_suffix(')')?
            .split(',')
            .map(|n| n.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;

        match (name.trim(), args.len()) {
            ("matrix", 6) => Some(CssMatrix {
                scale_x: args[0],
                scale_y: args[3],
                translate: Vec2::new(args[4], args[5]),
            }),
            ("matrix3d", 16) => Some(CssMatrix {
                scale_x: args[0],
                scale_y: args[5],
                translate: Vec2::new(args[12], args[13]),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_keeps_its_centring_offset() {
        assert_eq!(
            transform_css(ElementId::Header, Transform::translate(0.0, -25.0)),
            "translate(-50%, calc(-50% + -25px))"
        );
    }

    #[test]
    fn other_elements_translate_then_scale() {
        let css = transform_css(
            ElementId::Container,
            Transform { x: 12.5, y: -300.0, scale: 0.5 },
        );
        assert_eq!(css, "translate(12.5px, -300px) scale(0.5)");
    }

    #[test]
    fn parses_2d_and_3d_matrices() {
        assert_eq!(CssMatrix::parse("none"), Some(CssMatrix::IDENTITY));

        let m = CssMatrix::parse("matrix(0.5, 0, 0, 0.5, 100, -260)").unwrap();
        assert_eq!(m.scale_x, 0.5);
        assert_eq!(m.translate, Vec2::new(100.0, -260.0));

        let m3 = CssMatrix::parse(
            "matrix3d(2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1, 0, 4, 5, 0, 1)",
        )
        .unwrap();
        assert_eq!(m3.scale_y, 2.0);
        assert_eq!(m3.translate, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn rejects_unknown_transform_functions() {
        assert_eq!(CssMatrix::parse("rotate(45deg)"), None);
        assert_eq!(CssMatrix::parse("matrix(1, 0, 0)"), None);
    }
}
