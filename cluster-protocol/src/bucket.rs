//! Speed buckets
//!
//! Speed is quantized before it crosses the bus. Bucket `i` covers the
//! interval `(SPEED_BREAKPOINTS[i], SPEED_BREAKPOINTS[i + 1]]`, with bucket 0
//! also holding a standstill. The slave uses the lower breakpoint of a bucket
//! to position its needles.

/// Number of speed buckets
pub const BUCKET_COUNT: usize = 20;

/// Speed breakpoints in mph, one per bucket
///
/// 45 mph is deliberately absent; the gauge faces were printed without it.
pub const SPEED_BREAKPOINTS: [u8; BUCKET_COUNT] = [
    0, 5, 10, 15, 20, 25, 30, 35, 40, 50, 55, 60, 65, 70, 75, 80, 85, 90, 95, 100,
];

/// Validated speed bucket index (0–19)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedBucket(u8);

impl SpeedBucket {
    /// Lowest bucket (standstill)
    pub const MIN: Self = Self(0);

    /// Highest bucket
    pub const MAX: Self = Self(BUCKET_COUNT as u8 - 1);

    /// Create a bucket, rejecting indices past the table
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < BUCKET_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Create a bucket, saturating indices past the table
    pub const fn clamped(index: u8) -> Self {
        if (index as usize) < BUCKET_COUNT {
            Self(index)
        } else {
            Self::MAX
        }
    }

    /// Quantize a speed in mph
    ///
    /// Zero (and anything not above zero, NaN included) is bucket 0. Otherwise
    /// the bucket is the interval whose upper breakpoint is the first one at
    /// or above `mph`; speeds past the last breakpoint saturate.
    pub fn from_mph(mph: f32) -> Self {
        if mph.is_nan() || mph <= 0.0 {
            return Self::MIN;
        }
        // Bucket 0 has no lower neighbour, so the scan starts at 1
        for upper in 1..BUCKET_COUNT {
            if mph <= SPEED_BREAKPOINTS[upper] as f32 {
                return Self((upper - 1) as u8);
            }
        }
        Self::MAX
    }

    /// Bucket index
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Lower breakpoint of this bucket in mph
    pub const fn breakpoint_mph(self) -> u8 {
        SPEED_BREAKPOINTS[self.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standstill_is_bucket_zero() {
        assert_eq!(SpeedBucket::from_mph(0.0), SpeedBucket::MIN);
        assert_eq!(SpeedBucket::from_mph(-3.0), SpeedBucket::MIN);
        assert_eq!(SpeedBucket::from_mph(f32::NAN), SpeedBucket::MIN);
    }

    #[test]
    fn test_interval_edges() {
        assert_eq!(SpeedBucket::from_mph(0.5).index(), 0);
        assert_eq!(SpeedBucket::from_mph(5.0).index(), 0);
        assert_eq!(SpeedBucket::from_mph(5.1).index(), 1);
        assert_eq!(SpeedBucket::from_mph(37.0).index(), 7);
        assert_eq!(SpeedBucket::from_mph(45.0).index(), 8);
        assert_eq!(SpeedBucket::from_mph(72.0).index(), 13);
        assert_eq!(SpeedBucket::from_mph(100.0).index(), 18);
        assert_eq!(SpeedBucket::from_mph(140.0).index(), 19);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(SpeedBucket::new(19).is_some());
        assert!(SpeedBucket::new(20).is_none());
        assert_eq!(SpeedBucket::clamped(42), SpeedBucket::MAX);
    }

    #[test]
    fn test_breakpoint_lookup() {
        assert_eq!(SpeedBucket::clamped(7).breakpoint_mph(), 35);
        assert_eq!(SpeedBucket::clamped(9).breakpoint_mph(), 50);
        assert_eq!(SpeedBucket::MAX.breakpoint_mph(), 100);
    }
}
