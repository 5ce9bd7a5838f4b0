use std::time::Duration;

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

pub fn as_millis_f64(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}

pub fn from_millis_f64(ms: f64) -> Duration {
    Duration::from_nanos((ms.max(0.0) * 1_000_000.0).round() as u64)
}

/// `SS.ff` seconds with hundredths, as shown next to each recall
pub fn format_secs(d: Duration) -> String {
    format!("{:.2}s", d.as_secs_f64())
}

/// `MM:SS` where minutes keep counting past an hour
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1200., 800., 1000.]), Some(1000.0));
        assert_eq!(mean(&[42.0]), Some(42.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(std_dev(&[500., 500., 500.]), Some(0.0));
        assert_eq!(std_dev(&[]), None);

        let sd = std_dev(&[1000., 2000., 3000.]).unwrap();
        assert!((sd - 816.496580927726).abs() < 1e-9);
    }

    #[test]
    fn test_millis_roundtrip() {
        let d = Duration::from_millis(1_234);
        assert_eq!(as_millis_f64(d), 1234.0);
        assert_eq!(from_millis_f64(1234.0), d);
        assert_eq!(from_millis_f64(-5.0), Duration::ZERO);
    }

    #[test]
    fn test_format_secs() {
        assert_eq!(format_secs(Duration::from_millis(2_346)), "2.35s");
        assert_eq!(format_secs(Duration::ZERO), "0.00s");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(Duration::from_secs(125)), "02:05");
        assert_eq!(format_clock(Duration::from_secs(3_725)), "62:05");
        assert_eq!(format_clock(Duration::ZERO), "00:00");
    }
}
