//! History export.

use pend_sim::Sample;

/// Render the session history as CSV (`time_s,setpoint,measured,error`).
pub fn history_to_csv(samples: &[Sample]) -> String {
    let mut csv = String::from("time_s,setpoint,measured,error\n");
    for s in samples {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            s.time, s.setpoint, s.measured, s.error
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_only_when_empty() {
        assert_eq!(history_to_csv(&[]), "time_s,setpoint,measured,error\n");
    }

    #[test]
    fn one_row_per_sample() {
        let samples = vec![Sample::at(0.0, 50.0, 48.0), Sample::at(0.1, 50.0, 49.0)];
        let csv = history_to_csv(&samples);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "0,50,48,2");
        assert_eq!(lines[2], "0.1,50,49,1");
    }
}
