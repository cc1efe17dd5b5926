//! Utility functions for rendering UI components

pub fn format_duration(secs: f64) -> String {
    let total_seconds = if secs.is_finite() && secs > 0.0 { secs as u64 } else { 0 };
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(65.9), "1:05");
        assert_eq!(format_duration(f64::NAN), "0:00");
    }

    #[test]
    fn truncates_long_titles() {
        assert_eq!(truncate_string("Al-Baqarah", 20), "Al-Baqarah");
        assert_eq!(truncate_string("Supplication after the Adhan", 10), "Supplic...");
    }
}
