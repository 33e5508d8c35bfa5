use super::animator::ProgressAnimator;
use super::layout::HeroLayout;
use super::phase::Phase;
use super::scrub::Scrub;
use super::style::{GeometryProvider, StyleSink};
use super::triggers::ScrollRegion;

/// A page effect advanced once per animation frame from the scroll position.
///
/// Effects are independent: one missing from the page never stops another.
pub trait ScrollEffect {
    fn on_frame(&mut self, scroll: f64, dt_seconds: f64);

    /// Re-measures after the viewport changed.
    fn rebuild(&mut self) {}

    /// Removes anything the effect added to the page.
    fn detach(&mut self) {}
}

/// The effects driven by one animation-frame ticker.
#[derive(Default)]
pub struct FrameLoop {
    effects: Vec<Box<dyn ScrollEffect>>,
    last_timestamp: Option<f64>,
}

impl FrameLoop {
    pub fn push(&mut self, effect: Box<dyn ScrollEffect>) {
        self.effects.push(effect);
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Runs every effect for the frame stamped `timestamp_ms`.
    pub fn tick(&mut self, timestamp_ms: f64, scroll: f64) {
        let dt = self
            .last_timestamp
            .map_or(0.0, |last| ((timestamp_ms - last) / 1000.0).max(0.0));
        self.last_timestamp = Some(timestamp_ms);
        for effect in &mut self.effects {
            effect.on_frame(scroll, dt);
        }
    }

    pub fn rebuild(&mut self) {
        for effect in &mut self.effects {
            effect.rebuild();
        }
        self.last_timestamp = None;
    }

    pub fn detach(&mut self) {
        for effect in &mut self.effects {
            effect.detach();
        }
    }
}

/// Feeds scrubbed hero progress into the animator, skipping unchanged frames.
pub struct HeroDriver<S, G> {
    animator: ProgressAnimator,
    sink: S,
    geometry: G,
    region: ScrollRegion,
    scrub: Scrub,
    last_applied: Option<f64>,
}

impl<S: StyleSink, G: GeometryProvider> HeroDriver<S, G> {
    pub fn new(animator: ProgressAnimator, sink: S, geometry: G, region: ScrollRegion, scrub: Scrub) -> Self {
        HeroDriver {
            animator,
            sink,
            geometry,
            region,
            scrub,
            last_applied: None,
        }
    }

    pub fn animator(&self) -> &ProgressAnimator {
        &self.animator
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Swaps in a new layout and pin region; the next frame re-renders.
    pub fn relayout(&mut self, layout: HeroLayout, region: ScrollRegion) {
        self.animator.relayout(layout, &mut self.sink);
        self.region = region;
        self.last_applied = None;
    }

    /// Renders a frame if the scrubbed progress moved, returning the phase drawn.
    pub fn advance(&mut self, scroll: f64, dt_seconds: f64) -> Option<Phase> {
        self.scrub.set_target(self.region.fraction(scroll));
        let progress = self.scrub.advance(dt_seconds);
        if self.last_applied == Some(progress) {
            return None;
        }
        self.last_applied = Some(progress);
        Some(self.animator.update(progress, &mut self.sink, &self.geometry))
    }

    pub fn dispose(&mut self) -> bool {
        self.animator.dispose_clones(&mut self.sink)
    }
}

impl<S: StyleSink, G: GeometryProvider> ScrollEffect for HeroDriver<S, G> {
    fn on_frame(&mut self, scroll: f64, dt_seconds: f64) {
        self.advance(scroll, dt_seconds);
    }

    fn detach(&mut self) {
        self.dispose();
    }
}
