//! Line-delimited wire format.
//!
//! The feed protocol is one sample per line of plain text. Two spellings
//! are accepted:
//! - a JSON object with `time`, `setpoint`, and `measured` keys (the
//!   format the feed server emits; unknown keys are ignored, `time` and
//!   `setpoint` may be absent)
//! - delimited numeric fields: `time,setpoint,measured`, or a single bare
//!   `measured` value (commas or whitespace)
//!
//! Anything else is malformed and the line is discarded by the caller.
//! Non-finite numbers are treated as malformed as well.

use serde::Deserialize;

/// A successfully parsed feed line. Missing fields are filled in by the
/// receiver (receive counter for time, configured setpoint).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedLine {
    pub time: Option<f64>,
    pub setpoint: Option<f64>,
    pub measured: f64,
}

#[derive(Debug, Deserialize)]
struct JsonLine {
    time: Option<f64>,
    setpoint: Option<f64>,
    measured: f64,
}

/// Parse one trimmed, non-empty feed line. Returns `None` if malformed.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    if line.starts_with('{') {
        return parse_json(line);
    }
    parse_fields(line)
}

fn parse_json(line: &str) -> Option<ParsedLine> {
    let rec: JsonLine = serde_json::from_str(line).ok()?;
    let parsed = ParsedLine {
        time: rec.time,
        setpoint: rec.setpoint,
        measured: rec.measured,
    };
    all_finite(&parsed).then_some(parsed)
}

fn parse_fields(line: &str) -> Option<ParsedLine> {
    let fields: Vec<f64> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .map(|f| f.parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;

    let parsed = match fields.as_slice() {
        [measured] => ParsedLine {
            time: None,
            setpoint: None,
            measured: *measured,
        },
        [time, setpoint, measured] => ParsedLine {
            time: Some(*time),
            setpoint: Some(*setpoint),
            measured: *measured,
        },
        _ => return None,
    };
    all_finite(&parsed).then_some(parsed)
}

fn all_finite(p: &ParsedLine) -> bool {
    p.measured.is_finite()
        && p.time.map_or(true, f64::is_finite)
        && p.setpoint.map_or(true, f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_value_is_a_measurement() {
        let p = parse_line("1.5").unwrap();
        assert_eq!(p.measured, 1.5);
        assert_eq!(p.time, None);
        assert_eq!(p.setpoint, None);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(parse_line("abc"), None);
        assert_eq!(parse_line("1.5,abc,2.0"), None);
        assert_eq!(parse_line("1.0,2.0"), None); // two fields is ambiguous
        assert_eq!(parse_line("{not json"), None);
        assert_eq!(parse_line("nan"), None);
        assert_eq!(parse_line("inf"), None);
    }

    #[test]
    fn skip_semantics_over_a_line_sequence() {
        // "1.5", "abc", "2.0" must yield exactly the 1.5 and 2.0 samples.
        let values: Vec<f64> = ["1.5", "abc", "2.0"]
            .iter()
            .filter_map(|l| parse_line(l))
            .map(|p| p.measured)
            .collect();
        assert_eq!(values, vec![1.5, 2.0]);
    }

    #[test]
    fn three_fields_are_time_setpoint_measured() {
        let p = parse_line("0.4, 50.0, 48.5").unwrap();
        assert_eq!(p.time, Some(0.4));
        assert_eq!(p.setpoint, Some(50.0));
        assert_eq!(p.measured, 48.5);

        // Whitespace-delimited works too
        let p = parse_line("0.4 50.0 48.5").unwrap();
        assert_eq!(p.measured, 48.5);
    }

    #[test]
    fn json_object_with_extra_keys() {
        let p = parse_line(r#"{"time":0.1,"setpoint":50.0,"measured":49.0,"error":1.0}"#).unwrap();
        assert_eq!(p.time, Some(0.1));
        assert_eq!(p.setpoint, Some(50.0));
        assert_eq!(p.measured, 49.0);
    }

    #[test]
    fn json_measured_only() {
        let p = parse_line(r#"{"measured":12.25}"#).unwrap();
        assert_eq!(p.time, None);
        assert_eq!(p.measured, 12.25);
    }

    #[test]
    fn json_without_measured_is_malformed() {
        assert_eq!(parse_line(r#"{"time":0.1}"#), None);
    }
}
