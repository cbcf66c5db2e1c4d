use chrono::TimeDelta;

pub fn format_age(age: TimeDelta) -> String {
    if age < TimeDelta::zero() {
        return format!("-{}", format_age(-age));
    }

    let days = age.num_days();
    let hours = age.num_hours() % 24;
    let minutes = age.num_minutes() % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
