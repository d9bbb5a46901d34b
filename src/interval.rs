//! Interval arithmetic for ray and edge parameter ranges.

/// Interval `[min, max]` for range checking.
///
/// Which ends are open depends on the query: [`contains`](Self::contains) is
/// closed, [`surrounds`](Self::surrounds) is open, [`admits`](Self::admits)
/// is closed below and open above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f32,
    /// Maximum value of the interval
    pub max: f32,
}

impl Interval {
    /// Unit interval, the valid range of a segment parameter.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Create a new interval with given min and max values
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interval from `min` to positive infinity.
    pub fn above(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// `min <= x < max`.
    ///
    /// Used for nearest-hit searches: shrinking `max` to the best distance so
    /// far means an equally distant later candidate is rejected.
    pub fn admits(&self, x: f32) -> bool {
        self.min <= x && x < self.max
    }

    /// Same interval with a new upper bound.
    pub fn with_max(self, max: f32) -> Self {
        Self { max, ..self }
    }
}
