use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::{HeroConfig, CONFIG_SCRIPT_ID};

/// Class names shared by the page markup and the DOM queries.
pub mod class {
    pub const HERO_TRACK: &str = "hero-track";
    pub const HERO: &str = "hero";
    pub const HEADER: &str = "hero-header";
    pub const ICON_CONTAINER: &str = "animated-icons";
    pub const ICON: &str = "animated-icon";
    pub const TEXT_SEGMENT: &str = "text-segment";
    pub const PLACEHOLDER: &str = "placeholder-icon";
    pub const CLONE: &str = "duplicate-icon";
    pub const TECHNOLOGIES: &str = "technologies-section";
    pub const PROJECTS_INNER: &str = "projects-inner";
}

/// Every node the hero animation touches. Anything absent from the page is `None` or empty.
pub struct HeroElements {
    pub track: Option<HtmlElement>,
    pub root: Option<HtmlElement>,
    pub header: Option<HtmlElement>,
    pub container: Option<HtmlElement>,
    pub icons: Vec<HtmlElement>,
    pub segments: Vec<HtmlElement>,
    pub placeholders: Vec<Element>,
}

impl HeroElements {
    pub fn query(document: &Document) -> Self {
        HeroElements {
            track: query_html(document, class::HERO_TRACK),
            root: query_html(document, class::HERO),
            header: query_html(document, class::HEADER),
            container: query_html(document, class::ICON_CONTAINER),
            icons: query_all(document, class::ICON)
                .into_iter()
                .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
                .collect(),
            segments: query_all(document, class::TEXT_SEGMENT)
                .into_iter()
                .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
                .collect(),
            placeholders: query_all(document, class::PLACEHOLDER),
        }
    }
}

pub struct SectionElements {
    pub technologies: Option<HtmlElement>,
    pub projects_inner: Option<HtmlElement>,
}

impl SectionElements {
    pub fn query(document: &Document) -> Self {
        SectionElements {
            technologies: query_html(document, class::TECHNOLOGIES),
            projects_inner: query_html(document, class::PROJECTS_INNER),
        }
    }
}

/// Reads the optional JSON override block, falling back to the defaults.
pub fn read_config(document: &Document) -> HeroConfig {
    document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content())
        .map(|raw| HeroConfig::from_json_or_default(&raw))
        .unwrap_or_default()
}

pub fn query_html(document: &Document, class_name: &str) -> Option<HtmlElement> {
    document
        .query_selector(&format!(".{}", class_name))
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

fn query_all(document: &Document, class_name: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(&format!(".{}", class_name)) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
