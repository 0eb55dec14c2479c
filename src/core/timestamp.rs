use chrono::NaiveDateTime;

use super::error::ParseError;

const INPUT_FORMAT: &str = "%d/%m/%Y %H:%M";
pub const OUTPUT_FORMAT: &str = "%m/%d/%y %H:%M";

const DATE_LEN: usize = 10; // DD/MM/YYYY
const TIME_LEN: usize = 5; // HH:MM

/// True for lines starting with `DD/MM/YYYY`, as printed by `date /t`.
pub fn is_date_line(line: &str) -> bool {
    let b = line.as_bytes();
    b.len() >= DATE_LEN
        && (b'0'..=b'3').contains(&b[0])
        && b[1].is_ascii_digit()
        && b[2] == b'/'
        && (b'0'..=b'1').contains(&b[3])
        && b[4].is_ascii_digit()
        && b[5] == b'/'
        && b[6..DATE_LEN].iter().all(u8::is_ascii_digit)
}

/// True for lines starting with `HH:MM`, as printed by `time /t`.
pub fn is_time_line(line: &str) -> bool {
    let b = line.as_bytes();
    b.len() >= TIME_LEN
        && (b'0'..=b'2').contains(&b[0])
        && b[1].is_ascii_digit()
        && b[2] == b':'
        && b[3..TIME_LEN].iter().all(u8::is_ascii_digit)
}

/// Combines a date line and the time line paired with it.
///
/// Only the leading `DD/MM/YYYY` and `HH:MM` of each line are read; both
/// lines must already have passed [`is_date_line`] / [`is_time_line`].
pub fn combine(
    line_number: usize,
    date_line: &str,
    time_line: &str,
) -> Result<NaiveDateTime, ParseError> {
    let (Some(date), Some(time)) = (date_line.get(..DATE_LEN), time_line.get(..TIME_LEN))
    else {
        return Err(ParseError::TimestampParse {
            line: line_number,
            reason: format!("'{}' '{}' is not a date and a time", date_line, time_line),
        });
    };
    let combined = format!("{} {}", date, time);
    NaiveDateTime::parse_from_str(&combined, INPUT_FORMAT).map_err(|e| {
        ParseError::TimestampParse {
            line: line_number,
            reason: format!("'{}': {}", combined, e),
        }
    })
}
