/// Gap below which the smoothed value snaps onto its target.
const SNAP: f64 = 1e-4;

/// Eases an applied progress value toward the raw scroll progress.
///
/// Roughly `lag_seconds` after the target stops moving the value has
/// caught up. A zero lag follows the target directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Scrub {
    lag_seconds: f64,
    target: f64,
    current: Option<f64>,
}

impl Scrub {
    pub fn new(lag_seconds: f64) -> Self {
        Scrub {
            lag_seconds: lag_seconds.max(0.0),
            target: 0.0,
            current: None,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Moves the value toward the target. The first call snaps.
    pub fn advance(&mut self, dt_seconds: f64) -> f64 {
        let next = match self.current {
            None => self.target,
            Some(_) if self.lag_seconds == 0.0 => self.target,
            Some(current) => {
                let dt = dt_seconds.max(0.0);
                let factor = 1.0 - (-4.0 * dt / self.lag_seconds).exp();
                let eased = current + (self.target - current) * factor;
                if (self.target - eased).abs() < SNAP {
                    self.target
                } else {
                    eased
                }
            }
        };
        self.current = Some(next);
        next
    }

    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.current == Some(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_advance_snaps_to_target() {
        let mut scrub = Scrub::new(1.0);
        scrub.set_target(0.4);
        assert_eq!(scrub.advance(0.016), 0.4);
        assert!(scrub.is_settled());
    }

    #[test]
    fn lags_behind_then_catches_up() {
        let mut scrub = Scrub::new(1.0);
        scrub.advance(0.0);
        scrub.set_target(1.0);

        let first = scrub.advance(1.0 / 60.0);
        assert!(first > 0.0 && first < 0.1, "{first}");

        let mut value = first;
        for _ in 0..180 {
            value = scrub.advance(1.0 / 60.0);
        }
        assert_eq!(value, 1.0);
        assert!(scrub.is_settled());
    }

    #[test]
    fn zero_lag_follows_directly() {
        let mut scrub = Scrub::new(0.0);
        scrub.advance(0.0);
        scrub.set_target(0.7);
        assert_eq!(scrub.advance(0.001), 0.7);
    }

    #[test]
    fn moves_backwards_too() {
        let mut scrub = Scrub::new(0.5);
        scrub.set_target(0.9);
        scrub.advance(0.0);
        scrub.set_target(0.1);
        let value = scrub.advance(0.05);
        assert!(value < 0.9 && value > 0.1);
    }
}
