use serde::Serialize;

/// Dataset-wide statistics behind an outlier pass, over every cell of every source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divides by `count`).
    pub std_dev: f64,
}

/// Power of two at or just below the largest magnitude, so scaled values stay
/// within `[-2, 2]` and dividing by it is exact.
fn moment_scale(max_abs: f64) -> f64 {
    if max_abs == 0.0 {
        return 1.0;
    }
    let exp = max_abs.log2().floor().clamp(-1022.0, 1023.0) as i32;
    2f64.powi(exp)
}

impl DatasetStats {
    /// Compute statistics over the finite values. `None` when there are none.
    ///
    /// Mean and variance are accumulated on scaled values, so cells near
    /// `f64::MAX` still give finite results.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut vals: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if vals.is_empty() {
            return None;
        }

        let count = vals.len();
        let n = count as f64;
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let scale = moment_scale(min.abs().max(max.abs()));
        let scaled_mean = vals.iter().map(|v| v / scale).sum::<f64>() / n;
        let scaled_var = vals
            .iter()
            .map(|v| (v / scale - scaled_mean).powi(2))
            .sum::<f64>()
            / n;

        vals.sort_by(|a, b| a.total_cmp(b));
        let median = if count % 2 == 0 {
            vals[count / 2 - 1] / 2.0 + vals[count / 2] / 2.0
        } else {
            vals[count / 2]
        };

        Some(DatasetStats {
            count,
            min,
            max,
            mean: scaled_mean * scale,
            median,
            std_dev: scaled_var.sqrt() * scale,
        })
    }

    /// Whether `value` lies more than `threshold` standard deviations from the mean.
    pub fn deviates(&self, value: f64, threshold: f64) -> bool {
        // halved so neither the distance nor the limit can overflow
        let distance = (value / 2.0 - self.mean / 2.0).abs();
        distance > threshold * (self.std_dev / 2.0)
    }

    /// Multi-line summary for the alert log.
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}:\n  Cells: {}\n  Min: {:.3}\n  Max: {:.3}\n  Mean: {:.3}\n  Median: {:.3}\n  \
             Std Dev: {:.3}\n",
            label, self.count, self.min, self.max, self.mean, self.median, self.std_dev
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_std_dev() {
        let stats = DatasetStats::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.std_dev, 2.0);
        assert_eq!(stats.median, 4.5);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn empty_and_non_finite_input() {
        assert!(DatasetStats::compute(&[]).is_none());
        assert!(DatasetStats::compute(&[f64::NAN]).is_none());
        let stats = DatasetStats::compute(&[1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn uniform_values_have_zero_spread() {
        let stats = DatasetStats::compute(&[7.0; 5]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        let zeros = DatasetStats::compute(&[0.0; 3]).unwrap();
        assert_eq!(zeros.mean, 0.0);
        assert_eq!(zeros.std_dev, 0.0);
    }

    #[test]
    fn huge_values_stay_finite() {
        let stats = DatasetStats::compute(&[1e308, 1e308, 1.0]).unwrap();
        assert!(stats.mean.is_finite());
        assert!(stats.std_dev.is_finite());
        assert!((stats.mean / 1e308 - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.median, 1e308);

        let wide = DatasetStats::compute(&[f64::MAX, f64::MAX]).unwrap();
        assert_eq!(wide.median, f64::MAX);
        assert_eq!(wide.std_dev, 0.0);
    }

    #[test]
    fn deviation_check_survives_opposite_extremes() {
        let stats = DatasetStats::compute(&[-1.5e308, 1.5e308]).unwrap();
        assert_eq!(stats.mean, 0.0);
        assert!(stats.deviates(1.5e308, 0.5));
        assert!(!stats.deviates(1.0e308, 1.0));
    }

    #[test]
    fn report_lists_every_field() {
        let report = DatasetStats::compute(&[1.0, 3.0]).unwrap().report("Revenue");
        assert!(report.starts_with("Revenue:\n"));
        assert!(report.contains("Cells: 2"));
        assert!(report.contains("Mean: 2.000"));
        assert!(report.contains("Std Dev: 1.000"));
    }
}
