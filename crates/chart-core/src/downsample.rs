// File: crates/chart-core/src/downsample.rs
// Summary: LTTB downsampling for long XY series.

fn is_finite(p: &(f64, f64)) -> bool {
    p.0.is_finite() && p.1.is_finite()
}

/// Largest-Triangle-Three-Buckets downsampling for XY series.
/// Returns about `threshold` points preserving overall shape.
///
/// Non-finite samples are gaps: each finite run is downsampled on its own
/// budget share (at least its two endpoints) and one non-finite sample is
/// kept between consecutive runs, so a stroked polyline still breaks there.
pub fn lttb(points: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    if threshold == 0 { return Vec::new(); }
    if points.iter().all(is_finite) {
        return lttb_run(points, threshold);
    }

    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < points.len() {
        if !is_finite(&points[i]) { i += 1; continue; }
        let start = i;
        while i < points.len() && is_finite(&points[i]) { i += 1; }
        runs.push((start, i));
    }
    let finite: usize = runs.iter().map(|(s, e)| e - s).sum();
    let budget = threshold.saturating_sub(runs.len().saturating_sub(1));

    let mut out = Vec::with_capacity(threshold);
    for (k, &(start, end)) in runs.iter().enumerate() {
        if k > 0 {
            // First gap sample after the previous run.
            out.push(points[runs[k - 1].1]);
        }
        let run = &points[start..end];
        let share = (budget as f64 * run.len() as f64 / finite as f64).round() as usize;
        out.extend(lttb_run(run, share.max(run.len().min(2))));
    }
    out
}

fn lttb_run(points: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    if threshold == 0 || n == 0 { return Vec::new(); }
    if threshold >= n || n <= 2 { return points.to_vec(); }
    if threshold == 1 { return vec![points[0]]; }
    if threshold == 2 { return vec![points[0], points[n - 1]]; }

    let bucket_size = (n - 2) as f64 / (threshold - 2) as f64;
    let mut sampled = Vec::with_capacity(threshold);
    // Always include first
    sampled.push(points[0]);

    // index of the point picked from the previous bucket
    let mut a = 0usize;

    for i in 0..(threshold - 2) {
        let start = (1.0 + (i as f64) * bucket_size).floor() as usize;
        let end = (1.0 + ((i + 1) as f64) * bucket_size).floor().min((n - 1) as f64) as usize;

        // Average of the next bucket; the last bucket looks at the final point.
        let next_end = (1.0 + ((i + 2) as f64) * bucket_size).floor().min(n as f64) as usize;
        let next = &points[end..next_end.max(end + 1).min(n)];
        let (sum_x, sum_y) = next.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.0, sy + p.1));
        let avg_x = sum_x / next.len() as f64;
        let avg_y = sum_y / next.len() as f64;

        let (a_x, a_y) = points[a];
        let mut max_area = -1.0f64;
        let mut max_idx = start;
        for k in start..end.max(start + 1) {
            // Triangle area via cross product magnitude
            let area = ((a_x - points[k].0) * (avg_y - a_y) - (a_x - avg_x) * (points[k].1 - a_y)).abs();
            if area > max_area {
                max_area = area;
                max_idx = k;
            }
        }
        sampled.push(points[max_idx]);
        a = max_idx;
    }

    // Always include last
    sampled.push(points[n - 1]);
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_endpoints_and_size() {
        let pts: Vec<(f64, f64)> = (0..1000).map(|i| (i as f64, (i as f64 * 0.05).sin())).collect();
        let out = lttb(&pts, 100);
        assert_eq!(out.len(), 100);
        assert_eq!(out.first(), pts.first());
        assert_eq!(out.last(), pts.last());
        assert!(out.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn short_input_passes_through() {
        let pts = vec![(0.0, 1.0), (1.0, 2.0), (2.0, 0.5)];
        assert_eq!(lttb(&pts, 10), pts);
        assert!(lttb(&pts, 0).is_empty());
    }

    #[test]
    fn keeps_spike() {
        let mut pts: Vec<(f64, f64)> = (0..500).map(|i| (i as f64, 0.0)).collect();
        pts[250].1 = 3.0;
        let out = lttb(&pts, 50);
        assert!(out.iter().any(|p| p.1 == 3.0));
    }

    #[test]
    fn nan_gap_survives_downsampling() {
        let mut pts: Vec<(f64, f64)> = (0..4000).map(|i| (i as f64, (i as f64 * 0.01).sin())).collect();
        pts[2001].1 = f64::NAN;
        let out = lttb(&pts, 1832);
        assert!(out.len() < pts.len());
        assert!(out.len() <= 1833);

        let gaps: Vec<usize> = (0..out.len()).filter(|&i| out[i].1.is_nan()).collect();
        assert_eq!(gaps.len(), 1, "exactly one separator between the two runs");
        let g = gaps[0];
        assert_eq!(out[g].0, 2001.0);
        // Both sides end on the samples next to the gap.
        assert_eq!(out[g - 1], pts[2000]);
        assert_eq!(out[g + 1], pts[2002]);
        assert_eq!(out.first(), pts.first());
        assert_eq!(out.last(), pts.last());
    }

    #[test]
    fn runs_of_gaps_collapse_to_one_separator() {
        let mut pts: Vec<(f64, f64)> = (0..300).map(|i| (i as f64, 1.0)).collect();
        for p in &mut pts[100..110] { p.1 = f64::NAN; }
        pts[0].1 = f64::INFINITY;
        let out = lttb(&pts, 40);
        assert_eq!(out.iter().filter(|p| !p.1.is_finite()).count(), 1);
        assert_eq!(out[0], pts[1]);
        assert_eq!(out.last(), pts.last());
    }

    #[test]
    fn all_non_finite_yields_nothing_to_stroke() {
        let pts = vec![(0.0, f64::NAN); 50];
        assert!(lttb(&pts, 10).is_empty());
    }
}
