use chrono::{SecondsFormat, Utc};

/// Split a comma-separated CLI value, dropping blanks.
pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// RFC 3339 stamp printed in report headers.
pub fn report_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current wall clock in milliseconds, used for the `now` seed keyword.
pub fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" 1, ,2..4,  now ");
        assert_eq!(parts, vec!["1", "2..4", "now"]);
    }

    #[test]
    fn report_stamp_is_utc() {
        assert!(report_stamp().ends_with('Z'));
    }
}
