//! 12-hour clock strings ("5:23 AM") as supplied by the data sources.

use thiserror::Error;

/// A clock string that does not have the `H:MM AM/PM` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed clock string '{input}': {reason}")]
pub struct FormatError {
    pub input: String,
    pub reason: &'static str,
}

impl FormatError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Decodes `"H:MM AM"` / `"HH:MM pm"` into a 24-hour `(hour, minute)`.
///
/// PM adds twelve hours except at 12 PM; 12 AM becomes hour 0.
pub fn parse_clock(text: &str) -> Result<(u32, u32), FormatError> {
    let trimmed = text.trim();
    let (clock, marker) = trimmed
        .split_once(' ')
        .ok_or_else(|| FormatError::new(text, "expected a space before AM/PM"))?;
    let (hour, minute) = clock
        .split_once(':')
        .ok_or_else(|| FormatError::new(text, "expected ':' between hour and minute"))?;

    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::new(text, "hour is not a number"));
    }
    if minute.len() != 2 || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::new(text, "minute is not a two-digit number"));
    }

    let hour: u32 = hour
        .parse()
        .map_err(|_| FormatError::new(text, "hour is not a number"))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| FormatError::new(text, "minute is not a number"))?;

    if !(1..=12).contains(&hour) {
        return Err(FormatError::new(text, "hour must be between 1 and 12"));
    }
    if minute > 59 {
        return Err(FormatError::new(text, "minute must be between 0 and 59"));
    }

    let hour = match marker.to_ascii_uppercase().as_str() {
        "AM" if hour == 12 => 0,
        "AM" => hour,
        "PM" if hour == 12 => 12,
        "PM" => hour + 12,
        _ => return Err(FormatError::new(text, "marker must be AM or PM")),
    };

    Ok((hour, minute))
}

/// Inverse of [`parse_clock`]: `(13, 5)` becomes `"1:05 PM"`.
pub fn format_clock(hour: u32, minute: u32) -> String {
    let marker = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, minute, marker)
}

/// Display form of a stored time string. Passes the 12-hour text through
/// unchanged.
pub fn display_time(raw: &str) -> String {
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("5:23 AM", 5, 23 ; "single digit morning")]
    #[test_case("05:23 AM", 5, 23 ; "padded morning")]
    #[test_case("1:33 PM", 13, 33 ; "afternoon")]
    #[test_case("12:00 PM", 12, 0 ; "noon")]
    #[test_case("12:15 AM", 0, 15 ; "after midnight")]
    #[test_case("9:32 pm", 21, 32 ; "lowercase marker")]
    #[test_case("11:59 Pm", 23, 59 ; "mixed case marker")]
    fn parses_valid_clock_strings(input: &str, hour: u32, minute: u32) {
        assert_eq!(parse_clock(input), Ok((hour, minute)));
    }

    #[test_case("5:23AM" ; "missing space")]
    #[test_case("5.23 AM" ; "wrong separator")]
    #[test_case("x:23 AM" ; "non numeric hour")]
    #[test_case("5:2x AM" ; "non numeric minute")]
    #[test_case("5:3 AM" ; "one digit minute")]
    #[test_case("5:23 XM" ; "bad marker")]
    #[test_case("13:00 PM" ; "hour out of range")]
    #[test_case("0:30 AM" ; "zero hour")]
    #[test_case("5:60 AM" ; "minute out of range")]
    #[test_case("--:--" ; "placeholder")]
    #[test_case("" ; "empty")]
    fn rejects_malformed_clock_strings(input: &str) {
        let err = parse_clock(input).unwrap_err();
        assert_eq!(err.input, input);
    }

    #[test]
    fn format_clock_handles_noon_and_midnight() {
        assert_eq!(format_clock(0, 5), "12:05 AM");
        assert_eq!(format_clock(12, 0), "12:00 PM");
        assert_eq!(format_clock(21, 32), "9:32 PM");
    }

    #[test]
    fn display_time_is_identity() {
        assert_eq!(display_time("5:23 AM"), "5:23 AM");
    }
}
