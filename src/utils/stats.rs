//! Small-sample summary statistics for the dashboard comparisons.

/// Two-sided 95% critical values of Student's t for 1..=30 degrees of freedom.
const T_975: [f64; 30] = [
    12.706_204_7,
    4.302_652_7,
    3.182_446_3,
    2.776_445_1,
    2.570_581_8,
    2.446_911_9,
    2.364_624_3,
    2.306_004_1,
    2.262_157_2,
    2.228_138_9,
    2.200_985_2,
    2.178_812_8,
    2.160_368_7,
    2.144_786_7,
    2.131_449_5,
    2.119_905_3,
    2.109_815_6,
    2.100_922_0,
    2.093_024_1,
    2.085_963_4,
    2.079_613_8,
    2.073_873_1,
    2.068_657_6,
    2.063_898_6,
    2.059_538_6,
    2.055_529_4,
    2.051_830_5,
    2.048_407_1,
    2.045_229_6,
    2.042_272_5,
];

const Z_975: f64 = 1.959_963_985;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanInterval {
    pub samples: usize,
    pub mean: f64,
    /// Half-width of the 95% confidence interval around `mean`.
    pub half_width: f64,
}

/// Critical value t(0.975, df). Tabulated up to 30 degrees of freedom,
/// Cornish-Fisher expansion around the normal quantile beyond that.
pub fn t_critical_975(df: usize) -> f64 {
    if df == 0 {
        return f64::INFINITY;
    }
    if df <= T_975.len() {
        return T_975[df - 1];
    }
    let z = Z_975;
    let n = df as f64;
    let g1 = (z.powi(3) + z) / 4.0;
    let g2 = (5.0 * z.powi(5) + 16.0 * z.powi(3) + 3.0 * z) / 96.0;
    let g3 = (3.0 * z.powi(7) + 19.0 * z.powi(5) + 17.0 * z.powi(3) - 15.0 * z) / 384.0;
    z + g1 / n + g2 / n.powi(2) + g3 / n.powi(3)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Mean and t-interval half-width. A single sample has zero width.
pub fn mean_confidence_interval(values: &[f64]) -> Option<MeanInterval> {
    let m = mean(values)?;
    let half_width = match sample_std_dev(values) {
        Some(sd) => {
            let n = values.len();
            t_critical_975(n - 1) * sd / (n as f64).sqrt()
        }
        None => 0.0,
    };
    Some(MeanInterval {
        samples: values.len(),
        mean: m,
        half_width,
    })
}
