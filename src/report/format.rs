/// Splits a duration in seconds into whole hours and remaining whole minutes
pub fn hours_minutes(seconds: f64) -> (u64, u64) {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    (hours, minutes)
}

/// Formats one report line: `"  2 hours  5 minutes | Name"`
pub fn format_record_line(seconds: f64, game_name: &str) -> String {
    let (hours, minutes) = hours_minutes(seconds);
    format!("{:3} hours {:2} minutes | {}", hours, minutes, game_name)
}
