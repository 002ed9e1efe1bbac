use super::{Schedule, ScheduleRule};

const DAY_ABBR: [&str; 7] = ["Lu", "Ma", "Mi", "Ju", "Vi", "Sa", "Do"];

/// 1 = Monday through 7 = Sunday; 0 is Sunday too.
fn day_abbr(day: i64) -> &'static str {
    DAY_ABBR[((day.rem_euclid(7) + 6) % 7) as usize]
}

fn day_range(from: i64, to: i64) -> String {
    if from == to {
        day_abbr(from).to_string()
    } else {
        format!("{}–{}", day_abbr(from), day_abbr(to))
    }
}

/// "13:00:00" -> "13:00", "9:5" -> "09:05".
fn hhmm(time: &str) -> String {
    let mut parts = time.split(':');
    let hours = parts.next().unwrap_or("0");
    let minutes = parts.next().unwrap_or("0");
    format!("{:0>2}:{:0>2}", hours, minutes)
}

/// One line of opening hours: rules first, then single-day slots, duplicates
/// dropped, joined with " · ".
///
/// `Lu–Vi 13:00–16:00 · Sa 13:00–23:30`
pub fn opening_hours(rules: &[ScheduleRule], schedules: &[Schedule]) -> String {
    let rule_labels = rules.iter().map(|r| {
        format!(
            "{} {}–{}",
            day_range(r.day_from, r.day_to),
            hhmm(&r.open_time),
            hhmm(&r.close_time)
        )
    });
    let slot_labels = schedules
        .iter()
        .map(|s| format!("{} {}–{}", day_abbr(s.day), hhmm(&s.open), hhmm(&s.close)));

    let mut parts: Vec<String> = Vec::new();
    for label in rule_labels.chain(slot_labels) {
        if !parts.contains(&label) {
            parts.push(label);
        }
    }
    parts.join(" · ")
}
