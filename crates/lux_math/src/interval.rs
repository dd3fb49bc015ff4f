/// A closed range of `f32` values.
///
/// Hit queries use the open test ([`Interval::surrounds`]) so that hits
/// exactly at the bounds are rejected; output quantization uses
/// [`Interval::clamp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// The unit interval [0, 1], the displayable range of a color channel.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Same lower bound, new upper bound.
    ///
    /// Used by nearest-hit scans to shrink the search range to the closest
    /// hit found so far.
    #[inline]
    pub fn with_max(self, max: f32) -> Self {
        Self { min: self.min, max }
    }

    /// Returns true if x is within [min, max] (inclusive).
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within (min, max).
    #[inline]
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to [min, max]. NaN maps to `min`.
    #[inline]
    pub fn clamp(&self, x: f32) -> f32 {
        if x.is_nan() {
            return self.min;
        }
        x.max(self.min).min(self.max)
    }
}
