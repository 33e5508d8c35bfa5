/// Upper bound (inclusive) of the intro phase.
pub const INTRO_END: f64 = 0.3;
/// Upper bound (inclusive) of the header fade inside the intro phase.
pub const HEADER_END: f64 = 0.15;
pub const CONVERGE_END: f64 = 0.6;
pub const DISPERSE_END: f64 = 0.75;
pub const REVEAL_END: f64 = 1.0;

/// One of the four contiguous slices of the pinned hero scroll.
///
/// Every boundary belongs to the earlier phase, so `0.3` is still
/// [`Phase::Intro`] and `0.3 + ε` is [`Phase::Converge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Converge,
    Disperse,
    Reveal,
}

impl Phase {
    pub fn at(progress: f64) -> Self {
        if progress <= INTRO_END {
            Phase::Intro
        } else if progress <= CONVERGE_END {
            Phase::Converge
        } else if progress <= DISPERSE_END {
            Phase::Disperse
        } else {
            Phase::Reveal
        }
    }

    pub fn range(self) -> (f64, f64) {
        match self {
            Phase::Intro => (0.0, INTRO_END),
            Phase::Converge => (INTRO_END, CONVERGE_END),
            Phase::Disperse => (CONVERGE_END, DISPERSE_END),
            Phase::Reveal => (DISPERSE_END, REVEAL_END),
        }
    }

    /// Progress normalised to this phase's own range.
    pub fn local(self, progress: f64) -> f64 {
        let (start, end) = self.range();
        (progress - start) / (end - start)
    }

    /// Whether the clone set lives while this phase is active.
    pub fn keeps_clones(self) -> bool {
        matches!(self, Phase::Disperse | Phase::Reveal)
    }
}
