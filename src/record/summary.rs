/// Reduced view of a latency series, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl LatencySummary {
    /// Reduces a series of elapsed times. Returns `None` for an empty series.
    #[must_use]
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let (first, rest) = samples.split_first()?;
        let mut min = *first;
        let mut max = *first;
        let mut sum = *first;
        for sample in rest {
            min = min.min(*sample);
            max = max.max(*sample);
            sum += *sample;
        }
        let avg = sum / samples.len() as f64;
        // Rounding in the sum can push the mean just past the extremes.
        Some(Self {
            avg: avg.clamp(min, max),
            min,
            max,
        })
    }
}
