/// Render a duration in milliseconds as `"{minutes}min {seconds}s"`.
#[must_use]
pub fn format_elapsed(ms: u64) -> String {
    let total_secs = ms / 1_000;
    format!("{}min {}s", total_secs / 60, total_secs % 60)
}

/// Render a per-question timer value as `mm:ss`.
#[must_use]
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1_000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
