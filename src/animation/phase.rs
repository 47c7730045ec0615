//! Show phases and their elapsed-time clocks

/// Stage of one run. Phases only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnimationPhase {
    Growing,
    Blooming,
    Translating,
    Done,
}

impl AnimationPhase {
    /// Phase that follows this one; `Translating` is skipped when `translate` is false
    pub fn next(self, translate: bool) -> AnimationPhase {
        match self {
            AnimationPhase::Growing => AnimationPhase::Blooming,
            AnimationPhase::Blooming if translate => AnimationPhase::Translating,
            AnimationPhase::Blooming | AnimationPhase::Translating | AnimationPhase::Done => {
                AnimationPhase::Done
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationPhase::Growing => "growing",
            AnimationPhase::Blooming => "blooming",
            AnimationPhase::Translating => "translating",
            AnimationPhase::Done => "done",
        }
    }
}

/// Elapsed-time clock for one phase.
///
/// The start timestamp is latched on the first frame the phase sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseClock {
    /// Phase length in seconds
    pub duration: f64,
    start_ms: Option<f64>,
}

impl PhaseClock {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            start_ms: None,
        }
    }

    /// Raw progress `min(1, elapsed / duration)` at frame timestamp `now_ms`
    pub fn progress(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        if self.duration <= 0.0 {
            return 1.0;
        }
        let elapsed = (now_ms - start).max(0.0) / 1000.0;
        (elapsed / self.duration).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_latches_first_frame() {
        let mut clock = PhaseClock::new(2.0);
        assert_eq!(clock.progress(5000.0), 0.0);
        assert!((clock.progress(6000.0) - 0.5).abs() < 1e-12);
        assert_eq!(clock.progress(9000.0), 1.0);
    }

    #[test]
    fn test_clock_ignores_time_going_backwards() {
        let mut clock = PhaseClock::new(1.0);
        clock.progress(1000.0);
        assert_eq!(clock.progress(500.0), 0.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut clock = PhaseClock::new(0.0);
        assert_eq!(clock.progress(42.0), 1.0);
    }

    #[test]
    fn test_phase_order() {
        assert_eq!(AnimationPhase::Growing.next(true), AnimationPhase::Blooming);
        assert_eq!(AnimationPhase::Blooming.next(true), AnimationPhase::Translating);
        assert_eq!(AnimationPhase::Blooming.next(false), AnimationPhase::Done);
        assert_eq!(AnimationPhase::Translating.next(true), AnimationPhase::Done);
        assert_eq!(AnimationPhase::Done.next(true), AnimationPhase::Done);
        assert!(AnimationPhase::Growing < AnimationPhase::Blooming);
        assert!(AnimationPhase::Translating < AnimationPhase::Done);
    }
}
