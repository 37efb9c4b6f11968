//! Local-maxima detection over smoothed signals.

/// Indices of plateau-tolerant local maxima.
///
/// Index `i` is a peak when `v[i] > v[i-1] && v[i] >= v[i+1]`, so the first
/// sample of a flat-topped peak counts. Only interior indices qualify;
/// series shorter than three samples have no peaks.
pub fn find_peaks(values: &[f64]) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }
    (1..values.len() - 1)
        .filter(|&i| values[i] > values[i - 1] && values[i] >= values[i + 1])
        .collect()
}

/// Index of the maximum value, first occurrence on ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, max)) if v <= max => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sharp_peak() {
        let values = [0.0, 1.0, 3.0, 1.0, 0.0];
        assert_eq!(find_peaks(&values), vec![2]);
    }

    #[test]
    fn test_plateau_keeps_leading_edge() {
        let values = [0.0, 2.0, 2.0, 2.0, 0.0];
        assert_eq!(find_peaks(&values), vec![1]);
    }

    #[test]
    fn test_monotonic_series_has_no_peaks() {
        assert!(find_peaks(&[1.0, 2.0, 3.0, 4.0]).is_empty());
        assert!(find_peaks(&[4.0, 3.0, 2.0, 1.0]).is_empty());
    }

    #[test]
    fn test_endpoints_never_qualify() {
        let values = [5.0, 1.0, 1.0, 6.0];
        assert!(find_peaks(&values).is_empty());
    }

    #[test]
    fn test_multiple_peaks_in_scan_order() {
        let values = [0.0, 3.0, 0.0, 5.0, 0.0, 2.0, 0.0];
        assert_eq!(find_peaks(&values), vec![1, 3, 5]);
    }

    #[test]
    fn test_argmax_first_on_ties() {
        assert_eq!(argmax(&[1.0, 4.0, 4.0, 2.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }
}
