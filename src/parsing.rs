use std::num::ParseIntError;
use thiserror::Error;

use crate::types::CertRecord;

/// Number of positional columns a checker row must carry.
pub const RECORD_FIELDS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected at least {} fields, found {found}: {content:?}", RECORD_FIELDS)]
    MissingFields {
        line: usize,
        found: usize,
        content: String,
    },
    #[error("line {line}: days left {value:?} is not an integer")]
    InvalidDaysLeft {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

pub fn status_to_bool(status: &str) -> bool {
    status == "Valid"
}

/// Parses the full checker output. The first non-empty line is the header.
pub fn parse_checker_output(raw: &str) -> Result<Vec<CertRecord>, ParseError> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .skip(1)
        .map(|(idx, line)| parse_record_line(idx + 1, line))
        .collect()
}

pub fn parse_record_line(line_no: usize, line: &str) -> Result<CertRecord, ParseError> {
    let fields: Vec<&str> = line
        .split('\t')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    if fields.len() < RECORD_FIELDS {
        return Err(ParseError::MissingFields {
            line: line_no,
            found: fields.len(),
            content: line.to_string(),
        });
    }

    let days_left = fields[3]
        .parse::<i64>()
        .map_err(|source| ParseError::InvalidDaysLeft {
            line: line_no,
            value: fields[3].to_string(),
            source,
        })?;

    Ok(CertRecord {
        host: fields[0].to_string(),
        common_name: fields[1].to_string(),
        valid: status_to_bool(fields[2]),
        days_left,
        expire_date: fields[4].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Host\tCN\tStatus\tDaysLeft\tExpire\n\
a.example.com\ta.example.com\tValid\t5\t2024-01-01\n\
b.example.com\tb.example.com\tValid\t90\t2024-06-01\n";

    #[test]
    fn test_parse_sample_output() {
        let records = parse_checker_output(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            CertRecord {
                host: "a.example.com".to_string(),
                common_name: "a.example.com".to_string(),
                valid: true,
                days_left: 5,
                expire_date: "2024-01-01".to_string(),
            }
        );
        assert_eq!(records[1].days_left, 90);
    }

    #[test]
    fn test_status_to_bool() {
        assert!(status_to_bool("Valid"));
        for status in ["valid", "VALID", "INVALID", "Invalid", "", " Valid"] {
            assert!(!status_to_bool(status), "Failed for status: {:?}", status);
        }
    }

    #[test]
    fn test_header_only_and_empty_output() {
        assert_eq!(parse_checker_output(""), Ok(vec![]));
        assert_eq!(parse_checker_output("\n\n"), Ok(vec![]));
        assert_eq!(parse_checker_output("Host\tCN\tStatus\tDaysLeft\tExpire\n"), Ok(vec![]));
    }

    #[test]
    fn test_blank_lines_and_padding_are_ignored() {
        let raw = "\n\nHost\tCN\tStatus\tDaysLeft\tExpire\n\n\
  a.example.com \t\t a.example.com\t Valid \t\t-3\t 2023-12-01 00:00 UTC \r\n\n";
        let records = parse_checker_output(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].host, "a.example.com");
        assert!(records[0].valid);
        assert_eq!(records[0].days_left, -3);
        assert_eq!(records[0].expire_date, "2023-12-01 00:00 UTC");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let record = parse_record_line(2, "h\tcn\tExpired\t0\t2024-01-01\textra").unwrap();
        assert!(!record.valid);
        assert_eq!(record.expire_date, "2024-01-01");
    }

    #[test]
    fn test_missing_fields_is_fatal() {
        let raw = "Host\tCN\tStatus\tDaysLeft\tExpire\n\
a.example.com\ta.example.com\tValid\t5\t2024-01-01\n\
b.example.com\tb.example.com\tValid\t \t\n";
        let err = parse_checker_output(raw).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingFields {
                line: 3,
                found: 3,
                content: "b.example.com\tb.example.com\tValid\t \t".to_string(),
            }
        );
        assert!(err.to_string().contains(&format!("expected at least {} fields, found 3", RECORD_FIELDS)));
    }

    #[test]
    fn test_whitespace_only_line_is_not_empty() {
        let raw = "Host\tCN\tStatus\tDaysLeft\tExpire\n   \n";
        assert!(matches!(
            parse_checker_output(raw),
            Err(ParseError::MissingFields { line: 2, found: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_days_left_is_fatal() {
        let err = parse_record_line(4, "h\tcn\tValid\tsoon\t2024-01-01").unwrap_err();
        match &err {
            ParseError::InvalidDaysLeft { line, value, .. } => {
                assert_eq!(*line, 4);
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        assert_eq!(parse_checker_output(SAMPLE), parse_checker_output(SAMPLE));
    }
}
