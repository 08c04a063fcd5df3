#[allow(unused_imports)]
use micromath::F32Ext;

/// Order statistics over a slice of scalar readings.
///
/// `N` bounds the scratch buffer used for sorting; values past `N` are
/// ignored, so callers size it to the window capacity.
pub trait OrderStatistics {
    /// Value at quantile `q` using the linear index `floor((n - 1) * q)` over
    /// the ascending sort. No interpolation between neighbours.
    fn quantile<const N: usize>(&self, q: f64) -> Option<f32>;

    /// Upper median: the element at `n / 2` of the ascending sort.
    fn median<const N: usize>(&self) -> Option<f32>;
}

impl OrderStatistics for [f32] {
    fn quantile<const N: usize>(&self, q: f64) -> Option<f32> {
        let sorted = sorted::<N>(self);
        if sorted.is_empty() {
            return None;
        }

        let last = sorted.len() - 1;
        // Truncation is the floor here, the product is never negative.
        let index = ((last as f64) * q.clamp(0.0, 1.0)) as usize;
        Some(sorted[index.min(last)])
    }

    fn median<const N: usize>(&self) -> Option<f32> {
        let sorted = sorted::<N>(self);
        if sorted.is_empty() {
            return None;
        }
        Some(sorted[sorted.len() / 2])
    }
}

fn sorted<const N: usize>(values: &[f32]) -> heapless::Vec<f32, N> {
    let mut sorted: heapless::Vec<f32, N> = heapless::Vec::new();
    for v in values {
        sorted.push(*v).ok();
    }
    // Total order: NaN sorts past +inf instead of breaking the sort.
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    sorted
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Population standard deviation around a precomputed mean.
pub fn std_dev(values: &[f32], mean: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }

    let variance = values
        .iter()
        .map(|&x| (x - mean) * (x - mean))
        .sum::<f32>()
        / values.len() as f32;

    variance.sqrt()
}
