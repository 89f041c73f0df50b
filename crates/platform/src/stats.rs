use std::time::{Duration, Instant};

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Counts frames and reports average frame time once per interval.
#[derive(Clone, Copy, Debug)]
pub struct FrameStats {
    window_start: Instant,
    frames: u32,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
        }
    }

    /// Record a frame; returns milliseconds per frame when an interval closes.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        if now.duration_since(self.window_start) < REPORT_INTERVAL {
            return None;
        }
        let ms = 1000.0 / f64::from(self.frames);
        self.frames = 0;
        self.window_start += REPORT_INTERVAL;
        Some(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let t0 = Instant::now();
        let mut stats = FrameStats::new(t0);
        for i in 1..50 {
            assert_eq!(stats.tick(t0 + Duration::from_millis(i * 20)), None);
        }
        let ms = stats.tick(t0 + Duration::from_millis(1000)).expect("interval closed");
        assert!((ms - 20.0).abs() < 1e-9);
        assert_eq!(stats.tick(t0 + Duration::from_millis(1010)), None);
    }
}
