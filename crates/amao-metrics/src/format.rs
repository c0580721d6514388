//! Number formatting for metric cards
//!
//! Every helper accepts any input: non-finite values render as zero instead
//! of surfacing `NaN` on a card.

/// Reduction from `before` to `after` in percent.
///
/// Returns 0 when `before` is not positive or the result is not finite.
pub fn reduction_pct(before: f64, after: f64) -> f64 {
    if before.is_nan() || before <= 0.0 {
        return 0.0;
    }
    let pct = (before - after) / before * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

/// Compact polygon count: `980`, `4.5K`, `245K`, `1.9M`
pub fn format_polygons(count: u64) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=9_999 => format!("{:.1}K", count as f64 / 1_000.0),
        10_000..=999_999 => format!("{:.0}K", count as f64 / 1_000.0),
        _ => format!("{:.1}M", count as f64 / 1_000_000.0),
    }
}

/// Byte size with binary units: `512 B`, `1.5 KB`, `12.0 MB`, `1.2 GB`
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let size = bytes as f64;
    if size < KB {
        format!("{} B", bytes)
    } else if size < MB {
        format!("{:.1} KB", size / KB)
    } else if size < GB {
        format!("{:.1} MB", size / MB)
    } else {
        format!("{:.1} GB", size / GB)
    }
}

/// Megabyte value as shown on stage cards
pub fn format_mb(mb: f64) -> String {
    let mb = if mb.is_finite() { mb.max(0.0) } else { 0.0 };
    format!("{:.1} MB", mb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction_pct() {
        assert_eq!(reduction_pct(200.0, 50.0), 75.0);
        assert_eq!(reduction_pct(100.0, 100.0), 0.0);
        assert_eq!(reduction_pct(100.0, 150.0), -50.0);
    }

    #[test]
    fn test_reduction_pct_guards() {
        assert_eq!(reduction_pct(0.0, 10.0), 0.0);
        assert_eq!(reduction_pct(-5.0, 10.0), 0.0);
        assert_eq!(reduction_pct(f64::NAN, 10.0), 0.0);
        assert_eq!(reduction_pct(10.0, f64::NAN), 0.0);
        assert_eq!(reduction_pct(f64::INFINITY, 10.0), 0.0);
    }

    #[test]
    fn test_format_polygons() {
        assert_eq!(format_polygons(980), "980");
        assert_eq!(format_polygons(4_500), "4.5K");
        assert_eq!(format_polygons(245_000), "245K");
        assert_eq!(format_polygons(1_850_000), "1.9M");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(12 * 1024 * 1024), "12.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_format_mb() {
        assert_eq!(format_mb(48.0), "48.0 MB");
        assert_eq!(format_mb(f64::NAN), "0.0 MB");
        assert_eq!(format_mb(-1.0), "0.0 MB");
    }
}
