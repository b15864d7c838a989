use chrono::{DateTime, Utc};

/// Short play-time label for a number of seconds
///
/// Examples:
/// - 0 seconds: "0s"
/// - 45 seconds: "45s"
/// - 60 seconds: "1min"
/// - 125 seconds: "2min 05s"
pub fn format_seconds(seconds: u32) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    match (minutes, rest) {
        (0, s) => format!("{}s", s),
        (m, 0) => format!("{}min", m),
        (m, s) => format!("{}min {:02}s", m, s),
    }
}

/// Calendar date as shown to Brazilian readers, "dd/mm/yyyy"
pub fn format_date_br(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// How long ago a past moment was, relative to `now`
///
/// Examples:
/// - Under a minute, or in the future: "agora"
/// - 1 minute ago: "há 1 minuto"
/// - 3 hours ago: "há 3 horas"
/// - 1 day ago: "ontem"
/// - 4 days ago: "há 4 dias"
/// - 30 days or more: the date itself, "20/05/2025"
pub fn format_time_ago(past: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(past);

    if elapsed.num_seconds() < 60 {
        "agora".to_string()
    } else if elapsed.num_minutes() < 60 {
        let mins = elapsed.num_minutes();
        format!("há {} minuto{}", mins, if mins == 1 { "" } else { "s" })
    } else if elapsed.num_hours() < 24 {
        let hours = elapsed.num_hours();
        format!("há {} hora{}", hours, if hours == 1 { "" } else { "s" })
    } else if elapsed.num_days() == 1 {
        "ontem".to_string()
    } else if elapsed.num_days() < 30 {
        format!("há {} dias", elapsed.num_days())
    } else {
        format_date_br(past)
    }
}
