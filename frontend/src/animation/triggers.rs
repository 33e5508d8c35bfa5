use super::tween::{clamp01, lerp};

/// Span of page scroll positions, in px, that drives an effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRegion {
    pub start: f64,
    pub end: f64,
}

impl ScrollRegion {
    pub fn new(start: f64, length: f64) -> Self {
        ScrollRegion {
            start,
            end: start + length.max(0.0),
        }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// How far `scroll` is through the region, clamped to [0, 1].
    pub fn fraction(&self, scroll: f64) -> f64 {
        let length = self.length();
        if length <= 0.0 {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        clamp01((scroll - self.start) / length)
    }

    pub fn contains(&self, scroll: f64) -> bool {
        scroll >= self.start && scroll < self.end
    }
}

/// Keeps a section stuck to the viewport top while its region scrolls by.
///
/// No spacer is inserted: the section is pushed down by exactly the
/// distance scrolled, and snaps back to its flow position outside the region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPin {
    pub region: ScrollRegion,
}

impl SectionPin {
    pub fn offset(&self, scroll: f64) -> f64 {
        if self.region.contains(scroll) {
            scroll - self.region.start
        } else {
            0.0
        }
    }
}

/// Linear vertical slide, in percent of the element's own height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTween {
    pub region: ScrollRegion,
    pub from_percent: f64,
    pub to_percent: f64,
}

impl SlideTween {
    /// Slides in from one full height above its resting place.
    pub fn from_above(region: ScrollRegion) -> Self {
        SlideTween {
            region,
            from_percent: -100.0,
            to_percent: 0.0,
        }
    }

    pub fn y_percent(&self, scroll: f64) -> f64 {
        lerp(self.from_percent, self.to_percent, self.region.fraction(scroll))
    }
}
