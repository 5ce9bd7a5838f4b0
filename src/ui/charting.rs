use mnemo::NumberPerformance;

/// Points of (presentation order starting at 1, response seconds)
pub fn response_coords(performances: &[NumberPerformance]) -> Vec<(f64, f64)> {
    performances
        .iter()
        .enumerate()
        .map(|(i, p)| ((i + 1) as f64, p.response_ms() / 1000.0))
        .collect()
}

/// Compute X (numbers shown) and Y (seconds) bounds for the results chart
pub fn compute_chart_params(coords: &[(f64, f64)]) -> (f64, f64) {
    let slowest = coords.iter().map(|&(_, secs)| secs).fold(0.0, f64::max);

    let count = match coords.last() {
        Some(x) => x.0,
        None => 1.0,
    };

    // a flat line needs room above it
    let y_max = if slowest <= 0.0 { 1.0 } else { (slowest * 10.0).ceil() / 10.0 };

    (count.max(2.0), y_max)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.1}")
    }
}
