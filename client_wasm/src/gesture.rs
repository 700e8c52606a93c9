//! Pinch-to-zoom tracking
//!
//! Display-only: the tracked scale transforms how the field is drawn and
//! how screen points map back to field coordinates. It never touches the
//! simulation.

pub const MIN_SCALE: f32 = 1.0;
pub const MAX_SCALE: f32 = 3.0;

/// Tracks active touch contacts and the pinch scale factor
#[derive(Debug, Clone, Copy)]
pub struct PinchTracker {
    contacts: u32,
    start_dist: Option<f32>,
    start_scale: f32,
    scale: f32,
}

impl PinchTracker {
    pub fn new() -> Self {
        Self {
            contacts: 0,
            start_dist: None,
            start_scale: MIN_SCALE,
            scale: MIN_SCALE,
        }
    }

    /// Touch start: update the contact count; two contacts arm a pinch.
    /// `dist` is the span between the first two touches, if present.
    pub fn begin(&mut self, contacts: u32, dist: Option<f32>) {
        self.contacts = contacts;
        if contacts >= 2 {
            self.start_dist = dist.filter(|d| *d > 0.0);
            self.start_scale = self.scale;
        }
    }

    /// Touch move with an armed pinch rescales around the starting span
    pub fn moved(&mut self, dist: f32) {
        if let Some(start) = self.start_dist {
            self.scale = (self.start_scale * dist / start).clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    /// Touch end: drop below two contacts and the pinch disarms
    pub fn end(&mut self, contacts: u32) {
        self.contacts = contacts;
        if contacts < 2 {
            self.start_dist = None;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Live contact count, shared with the multi-touch tap guard
    pub fn contacts(&self) -> u32 {
        self.contacts
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_pinching(&self) -> bool {
        self.start_dist.is_some()
    }

    /// Map a canvas point to field percent, undoing the display zoom
    /// (which scales about the canvas center).
    pub fn to_field_pct(&self, x_px: f32, y_px: f32, edge_px: f32) -> (f32, f32) {
        let center = edge_px / 2.0;
        let fx = center + (x_px - center) / self.scale;
        let fy = center + (y_px - center) / self.scale;
        (fx / edge_px * 100.0, fy / edge_px * 100.0)
    }
}

impl Default for PinchTracker {
    fn default() -> Self {
        Self::new()
    }
}
