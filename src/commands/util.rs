use std::f32::consts::PI;

pub(crate) fn min_max(values: &[f32]) -> (f32, f32) {
    let mut iter = values.iter().copied().filter(|value| value.is_finite());
    let first = iter.next().unwrap_or(0.0);
    iter.fold((first, first), |(min, max), value| {
        (min.min(value), max.max(value))
    })
}

/// Sampled Gaussian truncated at 3σ and normalized to sum 1. `sigma` is in voxels.
pub(crate) fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (sigma * 3.0).ceil().max(1.0) as i32;
    let kernel = (-radius..=radius)
        .map(|offset| {
            let distance = offset as f32;
            (-(distance * distance) / (2.0 * sigma * sigma)).exp() / (sigma * (2.0 * PI).sqrt())
        })
        .collect::<Vec<_>>();
    let sum = kernel.iter().sum::<f32>().max(f32::EPSILON);
    kernel.into_iter().map(|value| value / sum).collect()
}

/// Mean and sample standard deviation of `values`.
pub(crate) fn mean_std(values: impl Iterator<Item = f32>) -> Option<(f32, f32)> {
    let (count, sum, sum_sq) = values.fold((0usize, 0.0_f64, 0.0_f64), |(n, s, sq), v| {
        (n + 1, s + f64::from(v), sq + f64::from(v) * f64::from(v))
    });
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;
    let variance = if count > 1 {
        ((sum_sq - sum * sum / count as f64) / (count - 1) as f64).max(0.0)
    } else {
        0.0
    };
    Some((mean as f32, variance.sqrt() as f32))
}
