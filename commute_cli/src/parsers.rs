use commute_planner::{
    departure::{LeaveByTime, Meridiem},
    input::LocationRow,
};
use jiff::civil::Date;

/// `address`, `address|label` or `address|label|#color`.
pub fn parse_location(input: &str) -> Result<LocationRow, String> {
    let mut parts = input.split('|').map(str::trim);

    let address = parts.next().unwrap_or_default();
    if address.is_empty() {
        return Err(String::from("Address must not be empty"));
    }

    let mut row = LocationRow::new(address);
    if let Some(label) = parts.next().filter(|label| !label.is_empty()) {
        row = row.with_label(label);
    }
    if let Some(color) = parts.next().filter(|color| !color.is_empty()) {
        if !is_hex_color(color) {
            return Err(format!("Invalid color: {}", color));
        }
        row = row.with_color(color);
    }

    Ok(row)
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Either `auto` (one hour from now) or `YYYY-MM-DD H:MM AM|PM`.
pub fn parse_leave_by(input: &str) -> Result<LeaveByArg, String> {
    if input.eq_ignore_ascii_case("auto") {
        return Ok(LeaveByArg::Auto);
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let [date, time, meridiem] = parts.as_slice() else {
        return Err(String::from(
            "Invalid leave-by time, expected \"YYYY-MM-DD H:MM AM|PM\" or \"auto\"",
        ));
    };

    let date: Date = date.parse().map_err(|_| format!("Invalid date: {}", date))?;

    let (hour, minute) = time
        .split_once(':')
        .ok_or_else(|| format!("Invalid time: {}", time))?;
    let hour: u8 = hour.parse().map_err(|_| format!("Invalid hour: {}", hour))?;
    let minute: u8 = minute
        .parse()
        .map_err(|_| format!("Invalid minute: {}", minute))?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(format!("Invalid time: {}", time));
    }

    let meridiem = match meridiem.to_ascii_uppercase().as_str() {
        "AM" => Meridiem::Am,
        "PM" => Meridiem::Pm,
        other => return Err(format!("Invalid AM/PM marker: {}", other)),
    };

    Ok(LeaveByArg::At(LeaveByTime {
        date,
        hour,
        minute,
        meridiem,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveByArg {
    Auto,
    At(LeaveByTime),
}
