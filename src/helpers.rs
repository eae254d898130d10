use std::time::Duration;

/// Renders an elapsed duration as zero-padded `mm:ss`, flooring to whole
/// seconds. Minutes widen past two digits rather than wrapping.
pub fn format_time(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Parses a `mm:ss` string back into a duration. Returns `None` for
/// anything that is not two colon-separated numbers with seconds < 60.
pub fn parse_time(text: &str) -> Option<Duration> {
    let (minutes, seconds) = text.split_once(':')?;
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    Some(Duration::from_secs(minutes * 60 + seconds))
}
