/// Quiet period before a resize is applied, in seconds.
pub const RESIZE_DEBOUNCE_SECS: f64 = 0.25;

/// Fires once after `wait` seconds without a new trigger.
#[derive(Clone, Debug)]
pub struct Debouncer {
    wait: f64,
    deadline: Option<f64>,
}

impl Debouncer {
    pub fn new(wait: f64) -> Self {
        Self { wait, deadline: None }
    }

    /// (Re)start the quiet period. A pending deadline is superseded.
    pub fn trigger(&mut self, now: f64) {
        self.deadline = Some(now + self.wait);
    }

    /// True exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Seconds until the pending deadline, for scheduling a repaint.
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.deadline.map(|d| (d - now).max(0.0))
    }
}

/// Watches the container width and reports it once it settles.
#[derive(Clone, Debug)]
pub struct ResizeHandler {
    debouncer: Debouncer,
    observed: Option<f32>,
    applied: Option<f32>,
}

impl ResizeHandler {
    pub fn new(wait: f64) -> Self {
        Self {
            debouncer: Debouncer::new(wait),
            observed: None,
            applied: None,
        }
    }

    /// Note the width applied at mount time, so it does not count as a change.
    pub fn set_applied(&mut self, width: f32) {
        self.applied = Some(width);
        self.observed = Some(width);
    }

    /// Feed the current container width. Only changes restart the timer.
    pub fn observe(&mut self, width: f32, now: f64) {
        if self.observed.map_or(true, |w| (w - width).abs() >= 0.5) {
            self.observed = Some(width);
            self.debouncer.trigger(now);
        }
    }

    /// The width to apply, once the quiet period has passed.
    pub fn poll(&mut self, now: f64) -> Option<f32> {
        if !self.debouncer.poll(now) {
            return None;
        }
        let width = self.observed?;
        if self.applied == Some(width) {
            return None;
        }
        self.applied = Some(width);
        Some(width)
    }

    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.debouncer.remaining(now)
    }
}

impl Default for ResizeHandler {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_SECS)
    }
}
