//! Display formatting helpers

/// Format seconds as zero-padded `mm:ss`; minutes grow past two digits
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
