use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Math;
use web_sys::{Document, Window};

use super::elements::{read_config, HeroElements, SectionElements};
use super::sections::SectionTriggers;
use super::surface::{client_rect, viewport_size, DomGeometry, DomSink};
use crate::animation::animator::ProgressAnimator;
use crate::animation::driver::{FrameLoop, HeroDriver, ScrollEffect};
use crate::animation::layout::HeroLayout;
use crate::animation::reveal::RevealOrder;
use crate::animation::scrub::Scrub;
use crate::animation::triggers::ScrollRegion;
use crate::config::HeroConfig;

const RESIZE_DEBOUNCE_MS: u32 = 200;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Hooks the hero animation and the section triggers up to the page.
///
/// Each effect attaches only if its elements exist. Runs one update per
/// animation frame until dropped. Dropping cancels the frame loop, detaches
/// the resize listener and removes any icon clones.
pub struct ScrollBinding {
    window: Window,
    frames: Rc<RefCell<FrameLoop>>,
    frame: FrameCallback,
    frame_handle: Rc<Cell<Option<i32>>>,
    resize: Closure<dyn FnMut()>,
    pending_resize: Rc<RefCell<Option<Timeout>>>,
}

impl ScrollBinding {
    pub fn attach(window: Window) -> Option<Self> {
        let document = window.document()?;
        let config = read_config(&document);

        let mut frames = FrameLoop::default();
        match HeroEffect::attach(&window, &document, config) {
            Some(hero) => frames.push(Box::new(hero)),
            None => warn!("no hero section on this page, hero animation skipped"),
        }
        let sections = SectionTriggers::measure(window.clone(), SectionElements::query(&document));
        if sections.is_active() {
            frames.push(Box::new(sections));
        }
        if frames.is_empty() {
            return None;
        }
        let frames = Rc::new(RefCell::new(frames));

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let frame_handle = Rc::new(Cell::new(None));
        {
            let frames = frames.clone();
            let next = frame.clone();
            let handle = frame_handle.clone();
            let window = window.clone();
            *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
                let scroll = window.scroll_y().unwrap_or(0.0);
                frames.borrow_mut().tick(timestamp, scroll);
                if let Some(callback) = next.borrow().as_ref() {
                    handle.set(window.request_animation_frame(callback.as_ref().unchecked_ref()).ok());
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let pending_resize = Rc::new(RefCell::new(None));
        let resize = {
            let weak = Rc::downgrade(&frames);
            let pending = pending_resize.clone();
            Closure::wrap(Box::new(move || schedule_rebuild(&weak, &pending)) as Box<dyn FnMut()>)
        };
        let _ = window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());

        if let Some(callback) = frame.borrow().as_ref() {
            frame_handle.set(window.request_animation_frame(callback.as_ref().unchecked_ref()).ok());
        }

        Some(ScrollBinding {
            window,
            frames,
            frame,
            frame_handle,
            resize,
            pending_resize,
        })
    }
}

impl Drop for ScrollBinding {
    fn drop(&mut self) {
        if let Some(handle) = self.frame_handle.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
        self.frame.borrow_mut().take();
        self.pending_resize.borrow_mut().take();
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());

        self.frames.borrow_mut().detach();
        info!("scroll effects detached");
    }
}

fn schedule_rebuild(frames: &Weak<RefCell<FrameLoop>>, pending: &Rc<RefCell<Option<Timeout>>>) {
    let frames = frames.clone();
    let timeout = Timeout::new(RESIZE_DEBOUNCE_MS, move || {
        if let Some(frames) = frames.upgrade() {
            frames.borrow_mut().rebuild();
        }
    });
    // replacing the pending timeout cancels it
    *pending.borrow_mut() = Some(timeout);
}

/// The pinned hero animation, re-measured against the DOM on resize.
struct HeroEffect {
    window: Window,
    config: HeroConfig,
    elements: Rc<HeroElements>,
    driver: HeroDriver<DomSink, DomGeometry>,
}

impl HeroEffect {
    fn attach(window: &Window, document: &Document, config: HeroConfig) -> Option<Self> {
        let elements = Rc::new(HeroElements::query(document));
        elements.root.as_ref()?;

        let layout = measure_layout(window, &elements, &config);
        let reveal = reveal_order(&config, elements.segments.len());
        let driver = HeroDriver::new(
            ProgressAnimator::new(layout, reveal),
            DomSink::new(document.clone(), elements.clone()),
            DomGeometry::new(window.clone(), elements.clone()),
            hero_region(window, &elements, &config),
            Scrub::new(config.scrub_seconds),
        );

        info!(
            "hero animation attached: {} icons, {} text segments",
            elements.icons.len(),
            elements.segments.len()
        );
        Some(HeroEffect {
            window: window.clone(),
            config,
            elements,
            driver,
        })
    }
}

impl ScrollEffect for HeroEffect {
    fn on_frame(&mut self, scroll: f64, dt_seconds: f64) {
        self.driver.on_frame(scroll, dt_seconds);
    }

    fn rebuild(&mut self) {
        let layout = measure_layout(&self.window, &self.elements, &self.config);
        let region = hero_region(&self.window, &self.elements, &self.config);
        self.driver.relayout(layout, region);
        info!(
            "hero layout rebuilt for {:?}, icons target {}px",
            self.driver.geometry().viewport(),
            self.driver.animator().layout().target_icon_size
        );
    }

    fn detach(&mut self) {
        self.driver.detach();
    }
}

/// Configured order if it fits the page, else a fresh shuffle for this session.
fn reveal_order(config: &HeroConfig, segment_count: usize) -> RevealOrder {
    if let Some(ranks) = config.reveal_order.clone() {
        match RevealOrder::from_ranks(ranks) {
            Some(order) if order.len() == segment_count => return order,
            _ => warn!(
                "configured reveal order is not a permutation of {} segments, shuffling instead",
                segment_count
            ),
        }
    }
    let seed = config
        .reveal_seed
        .unwrap_or_else(|| RevealOrder::seed_from_draws(Math::random(), Math::random()));
    RevealOrder::seeded(segment_count, seed)
}

fn measure_layout(window: &Window, elements: &HeroElements, config: &HeroConfig) -> HeroLayout {
    // offsetWidth ignores the transforms the animator has applied
    let natural_width = elements
        .icons
        .first()
        .map_or(0.0, |icon| icon.offset_width() as f64);
    HeroLayout::measure(
        config,
        viewport_size(window),
        natural_width,
        elements.icons.len(),
        elements.segments.len(),
    )
}

/// Scroll span over which the hero stays pinned, sizing the track to match.
fn hero_region(window: &Window, elements: &HeroElements, config: &HeroConfig) -> ScrollRegion {
    let viewport = viewport_size(window);
    let length = viewport.height * config.pin_viewports;
    let Some(track) = elements.track.as_ref() else {
        return ScrollRegion::new(0.0, length);
    };

    let _ = track
        .style()
        .set_property("height", &format!("{}px", viewport.height + length));
    let top = client_rect(track).y0 + window.scroll_y().unwrap_or(0.0);
    ScrollRegion::new(top, length)
}
