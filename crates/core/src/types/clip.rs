//! The playback sub-interval defined by a marker

/// Span substituted when stored bounds are inverted or collapsed
pub const FALLBACK_SPAN_SECONDS: f64 = 10.0;

/// A `[start, end]` sub-interval of a recording, in seconds
///
/// Construction guarantees `end > start`, so the span is always positive and
/// progress fractions are well defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    start: f64,
    end: f64,
}

impl Clip {
    /// Builds a clip from already-persisted bounds.
    ///
    /// Stored data is untrusted: a negative start is floored at zero and an
    /// `end <= start` pair is repaired to `start + 10`. The authoring form
    /// rejects such input outright; this repair applies only when a playback
    /// request is constructed from storage.
    pub fn from_stored(start: f64, end: f64) -> Self {
        let start = if start.is_finite() { start.max(0.0) } else { 0.0 };
        let end = if end.is_finite() && end > start {
            end
        } else {
            start + FALLBACK_SPAN_SECONDS
        };
        Self { start, end }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Clip length in seconds, always positive
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// Clamps an absolute position into the clip
    pub fn clamp(&self, t: f64) -> f64 {
        t.clamp(self.start, self.end)
    }

    /// Progress through the clip at position `t`, always in `[0, 1]`
    pub fn fraction_of(&self, t: f64) -> f64 {
        ((t - self.start) / self.span()).clamp(0.0, 1.0)
    }

    /// Absolute position at a progress fraction, clamped to the clip
    pub fn time_at_fraction(&self, fraction: f64) -> f64 {
        self.start + fraction.clamp(0.0, 1.0) * self.span()
    }
}
