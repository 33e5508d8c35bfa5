use web_sys::{HtmlElement, Window};

use super::elements::SectionElements;
use super::surface::client_rect;
use crate::animation::driver::ScrollEffect;
use crate::animation::triggers::{ScrollRegion, SectionPin, SlideTween};

/// The technologies pin and the projects slide, both keyed to the
/// technologies section scrolling past the top of the viewport.
pub struct SectionTriggers {
    window: Window,
    elements: SectionElements,
    pin: Option<(HtmlElement, SectionPin)>,
    slide: Option<(HtmlElement, SlideTween)>,
}

impl SectionTriggers {
    pub fn measure(window: Window, elements: SectionElements) -> Self {
        let mut triggers = SectionTriggers {
            window,
            elements,
            pin: None,
            slide: None,
        };
        triggers.remeasure();
        triggers
    }

    pub fn is_active(&self) -> bool {
        self.pin.is_some()
    }

    fn remeasure(&mut self) {
        let Some(technologies) = self.elements.technologies.clone() else {
            self.pin = None;
            self.slide = None;
            return;
        };

        // measure the flow position, not wherever the pin last pushed it
        let _ = technologies.style().remove_property("transform");
        let scroll = self.window.scroll_y().unwrap_or(0.0);
        let rect = client_rect(&technologies);
        let region = ScrollRegion::new(rect.y0 + scroll, rect.height());

        self.slide = self
            .elements
            .projects_inner
            .clone()
            .map(|inner| (inner, SlideTween::from_above(region)));
        self.pin = Some((technologies, SectionPin { region }));
    }
}

impl ScrollEffect for SectionTriggers {
    fn on_frame(&mut self, scroll: f64, _dt_seconds: f64) {
        if let Some((section, pin)) = &self.pin {
            let _ = section
                .style()
                .set_property("transform", &format!("translateY({}px)", pin.offset(scroll)));
        }
        if let Some((inner, slide)) = &self.slide {
            let _ = inner
                .style()
                .set_property("transform", &format!("translateY({}%)", slide.y_percent(scroll)));
        }
    }

    fn rebuild(&mut self) {
        self.remeasure();
    }
}
