//! Inter-iteration pacing

use std::time::Duration;

use rand::Rng;

/// Delay a virtual user applies between iterations.
#[derive(Debug, Clone, Copy)]
pub enum Pacing {
    /// Constant delay
    Fixed(Duration),
    /// Uniformly random delay in `[min, max]`
    Uniform { min: Duration, max: Duration },
}

impl Pacing {
    /// Delay to apply before the next iteration.
    pub fn next_delay(&self) -> Duration {
        match *self {
            Pacing::Fixed(delay) => delay,
            Pacing::Uniform { min, max } => {
                let lo = min.as_millis() as u64;
                let hi = max.as_millis() as u64;
                Duration::from_millis(rand::thread_rng().gen_range(lo..=hi))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_pacing_is_constant() {
        let pacing = Pacing::Fixed(Duration::from_millis(100));
        for _ in 0..10 {
            assert_eq!(pacing.next_delay(), Duration::from_millis(100));
        }
    }

    #[test]
    fn uniform_pacing_stays_in_bounds() {
        let min = Duration::from_millis(1000);
        let max = Duration::from_millis(1400);
        let pacing = Pacing::Uniform { min, max };
        for _ in 0..1000 {
            let delay = pacing.next_delay();
            assert!(delay >= min, "delay {:?} below minimum", delay);
            assert!(delay <= max, "delay {:?} above maximum", delay);
        }
    }

    #[test]
    fn degenerate_uniform_range_is_fixed() {
        let d = Duration::from_millis(250);
        let pacing = Pacing::Uniform { min: d, max: d };
        assert_eq!(pacing.next_delay(), d);
    }
}
