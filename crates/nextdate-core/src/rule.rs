//! Recurrence rules and their compact text form.
//!
//! A rule is written as a one-letter kind tag followed by its parameters:
//!
//! | rule               | meaning                                              |
//! |--------------------|------------------------------------------------------|
//! | `d 7`              | every 7 days (1..=400)                               |
//! | `w 1,3`            | on Mondays and Wednesdays (1 = Monday … 7 = Sunday)  |
//! | `m 1,-1`           | on the first and last day of every month             |
//! | `m 15 3,9`         | on the 15th of March and September                   |
//! | `y`                | every year on the anchor's month and day             |

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;

pub const MAX_INTERVAL_DAYS: u32 = 400;

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecurrenceRule {
    /// Every `interval_days` days after the anchor.
    Daily { interval_days: u32 },
    /// On the given ISO weekdays.
    Weekly { weekdays: BTreeSet<u32> },
    /// On the given days of month, optionally only in the given months.
    /// Negative days count back from the end of the month.
    Monthly {
        days: BTreeSet<i32>,
        months: Option<BTreeSet<u32>>,
    },
    /// On the anchor's anniversary.
    Yearly,
}

impl RecurrenceRule {
    /// Parses a rule from its text form.
    pub fn parse(spec: &str) -> Result<Self, ParseError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(ParseError::Empty);
        }

        let (kind, body) = match spec.split_once(char::is_whitespace) {
            Some((kind, body)) => (kind, body.trim()),
            None => (spec, ""),
        };

        let rule = match kind {
            "d" => {
                let body = require_body(body, "day")?;
                let interval_days = parse_number(body, "interval")?;
                check_range(interval_days, 1, i64::from(MAX_INTERVAL_DAYS), "interval", "1..=400")?;
                Self::Daily {
                    interval_days: interval_days as u32,
                }
            }
            "w" => {
                let body = require_body(body, "week")?;
                let weekdays = parse_list(body, "weekday", 1, 7, "1..=7")?
                    .into_iter()
                    .map(|d| d as u32)
                    .collect();
                Self::Weekly { weekdays }
            }
            "m" => {
                let body = join_list_items(require_body(body, "month")?);
                let lists: Vec<&str> = body.split_whitespace().collect();
                if lists.len() > 2 {
                    return Err(ParseError::TooManyLists(lists.len()));
                }
                let days = parse_list(lists[0], "day", -31, 31, "-31..=-1 or 1..=31")?;
                if days.contains(&0) {
                    return Err(ParseError::OutOfRange {
                        field: "day",
                        value: 0,
                        range: "-31..=-1 or 1..=31",
                    });
                }
                let months = lists
                    .get(1)
                    .map(|list| parse_list(list, "month", 1, 12, "1..=12"))
                    .transpose()?
                    .map(|months| months.into_iter().map(|m| m as u32).collect());
                Self::Monthly {
                    days: days.into_iter().map(|d| d as i32).collect(),
                    months,
                }
            }
            "y" => {
                if !body.is_empty() {
                    debug!(body, "ignoring parameters of yearly rule");
                }
                Self::Yearly
            }
            other => return Err(ParseError::UnsupportedKind(other.to_string())),
        };

        debug!(%rule, "parsed repeat rule");
        Ok(rule)
    }

    /// Returns the one-letter kind tag.
    pub fn kind(&self) -> char {
        match self {
            Self::Daily { .. } => 'd',
            Self::Weekly { .. } => 'w',
            Self::Monthly { .. } => 'm',
            Self::Yearly => 'y',
        }
    }
}

fn require_body<'a>(body: &'a str, kind: &'static str) -> Result<&'a str, ParseError> {
    if body.is_empty() {
        Err(ParseError::MissingBody { kind })
    } else {
        Ok(body)
    }
}

fn parse_number(token: &str, field: &'static str) -> Result<i64, ParseError> {
    token.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field,
        token: token.to_string(),
    })
}

fn check_range(
    value: i64,
    min: i64,
    max: i64,
    field: &'static str,
    range: &'static str,
) -> Result<(), ParseError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ParseError::OutOfRange { field, value, range })
    }
}

/// Drops whitespace around commas so `1, 3 4` reads as the lists `1,3` and `4`.
fn join_list_items(body: &str) -> String {
    body.split(',').map(str::trim).collect::<Vec<_>>().join(",")
}

/// Parses a comma-separated list of integers, each within `min..=max`.
fn parse_list(
    list: &str,
    field: &'static str,
    min: i64,
    max: i64,
    range: &'static str,
) -> Result<BTreeSet<i64>, ParseError> {
    list.split(',')
        .map(|token| {
            let value = parse_number(token, field)?;
            check_range(value, min, max, field, range)?;
            Ok(value)
        })
        .collect()
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily { interval_days } => write!(f, "d {interval_days}"),
            Self::Weekly { weekdays } => {
                f.write_str("w ")?;
                write_list(f, weekdays)
            }
            Self::Monthly { days, months } => {
                f.write_str("m ")?;
                write_list(f, days)?;
                if let Some(months) = months {
                    f.write_str(" ")?;
                    write_list(f, months)?;
                }
                Ok(())
            }
            Self::Yearly => f.write_str("y"),
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecurrenceRule {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecurrenceRule> for String {
    fn from(rule: RecurrenceRule) -> Self {
        rule.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<T: Ord + Copy>(items: &[T]) -> BTreeSet<T> {
        items.iter().copied().collect()
    }

    mod daily {
        use super::*;

        #[test]
        fn parses_interval() {
            assert_eq!(
                RecurrenceRule::parse("d 7"),
                Ok(RecurrenceRule::Daily { interval_days: 7 })
            );
            assert_eq!(
                RecurrenceRule::parse("d 400"),
                Ok(RecurrenceRule::Daily { interval_days: 400 })
            );
        }

        #[test]
        fn rejects_out_of_range() {
            for spec in ["d 0", "d 401", "d -1"] {
                assert!(
                    matches!(
                        RecurrenceRule::parse(spec),
                        Err(ParseError::OutOfRange { field: "interval", .. })
                    ),
                    "{spec}"
                );
            }
        }

        #[test]
        fn rejects_missing_or_garbage() {
            assert_eq!(
                RecurrenceRule::parse("d"),
                Err(ParseError::MissingBody { kind: "day" })
            );
            assert!(matches!(
                RecurrenceRule::parse("d seven"),
                Err(ParseError::InvalidNumber { .. })
            ));
            assert!(matches!(
                RecurrenceRule::parse("d 1,2"),
                Err(ParseError::InvalidNumber { .. })
            ));
        }
    }

    mod weekly {
        use super::*;

        #[test]
        fn parses_sorted_unique_set() {
            assert_eq!(
                RecurrenceRule::parse("w 7,1,3,1"),
                Ok(RecurrenceRule::Weekly {
                    weekdays: set(&[1, 3, 7])
                })
            );
        }

        #[test]
        fn rejects_out_of_range_weekday() {
            assert_eq!(
                RecurrenceRule::parse("w 1,8"),
                Err(ParseError::OutOfRange {
                    field: "weekday",
                    value: 8,
                    range: "1..=7"
                })
            );
            assert!(RecurrenceRule::parse("w 0").is_err());
        }

        #[test]
        fn rejects_empty_item() {
            assert!(matches!(
                RecurrenceRule::parse("w 1,,3"),
                Err(ParseError::InvalidNumber { field: "weekday", .. })
            ));
            assert!(matches!(
                RecurrenceRule::parse("w"),
                Err(ParseError::MissingBody { kind: "week" })
            ));
        }
    }

    mod monthly {
        use super::*;

        #[test]
        fn parses_days_only() {
            assert_eq!(
                RecurrenceRule::parse("m 1,-1,15"),
                Ok(RecurrenceRule::Monthly {
                    days: set(&[-1, 1, 15]),
                    months: None
                })
            );
        }

        #[test]
        fn parses_days_and_months() {
            assert_eq!(
                RecurrenceRule::parse("m  -2   12,1"),
                Ok(RecurrenceRule::Monthly {
                    days: set(&[-2]),
                    months: Some(set(&[1, 12]))
                })
            );
        }

        #[test]
        fn spaces_after_commas_like_weekly() {
            assert_eq!(
                RecurrenceRule::parse("w 1, 3"),
                Ok(RecurrenceRule::Weekly {
                    weekdays: set(&[1, 3])
                })
            );
            assert_eq!(
                RecurrenceRule::parse("m 1, -1"),
                Ok(RecurrenceRule::Monthly {
                    days: set(&[-1, 1]),
                    months: None
                })
            );
            assert_eq!(
                RecurrenceRule::parse("m 1 ,15  3, 9"),
                Ok(RecurrenceRule::Monthly {
                    days: set(&[1, 15]),
                    months: Some(set(&[3, 9]))
                })
            );
            assert!(matches!(
                RecurrenceRule::parse("m 1,"),
                Err(ParseError::InvalidNumber { field: "day", .. })
            ));
        }

        #[test]
        fn rejects_bad_values() {
            assert!(RecurrenceRule::parse("m 0").is_err());
            assert!(RecurrenceRule::parse("m 32").is_err());
            assert!(RecurrenceRule::parse("m -32").is_err());
            assert!(RecurrenceRule::parse("m 1 13").is_err());
            assert!(RecurrenceRule::parse("m 1 0").is_err());
            assert_eq!(
                RecurrenceRule::parse("m 1 2 3"),
                Err(ParseError::TooManyLists(3))
            );
            assert_eq!(
                RecurrenceRule::parse("m"),
                Err(ParseError::MissingBody { kind: "month" })
            );
        }
    }

    mod yearly {
        use super::*;

        #[test]
        fn parses_and_ignores_body() {
            assert_eq!(RecurrenceRule::parse("y"), Ok(RecurrenceRule::Yearly));
            assert_eq!(RecurrenceRule::parse(" y 5 "), Ok(RecurrenceRule::Yearly));
        }
    }

    #[test]
    fn rejects_unknown_kind_and_empty() {
        assert_eq!(
            RecurrenceRule::parse("x 5"),
            Err(ParseError::UnsupportedKind("x".to_string()))
        );
        assert_eq!(
            RecurrenceRule::parse("daily"),
            Err(ParseError::UnsupportedKind("daily".to_string()))
        );
        assert_eq!(RecurrenceRule::parse(""), Err(ParseError::Empty));
        assert_eq!(RecurrenceRule::parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn error_messages() {
        let messages: Vec<String> = ["", "x 5", "w", "d 401", "w 1,a", "m 1 2 3"]
            .into_iter()
            .map(|spec| RecurrenceRule::parse(spec).unwrap_err().to_string())
            .collect();
        insta::assert_snapshot!(messages.join("\n"), @r#"
        empty repeat rule
        unsupported repeat kind: x
        rule for week should be defined
        interval value 401 is out of range 1..=400
        invalid number "a" in weekday
        monthly rule takes at most two lists, got 3
        "#);
    }

    #[test]
    fn display_is_canonical() {
        let cases = [
            ("d 3", "d 3"),
            ("w 3,1", "w 1,3"),
            ("m -1,1", "m -1,1"),
            ("m 15 9,3", "m 15 3,9"),
            ("y", "y"),
        ];
        for (input, canonical) in cases {
            let rule = RecurrenceRule::parse(input).unwrap();
            assert_eq!(rule.to_string(), canonical);
            assert_eq!(RecurrenceRule::parse(canonical).unwrap(), rule);
        }
    }

    #[test]
    fn serde_uses_text_form() {
        let rule: RecurrenceRule = serde_json::from_str("\"w 5,2\"").unwrap();
        assert_eq!(serde_json::to_string(&rule).unwrap(), "\"w 2,5\"");
        assert!(serde_json::from_str::<RecurrenceRule>("\"q\"").is_err());
    }

    #[test]
    fn kind_tag() {
        assert_eq!(RecurrenceRule::Yearly.kind(), 'y');
        assert_eq!(RecurrenceRule::parse("m 3").unwrap().kind(), 'm');
    }
}
