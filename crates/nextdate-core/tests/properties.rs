//! Property sweeps over a few years of reference dates for every rule kind.

use std::collections::BTreeSet;

use nextdate_core::{CalendarDate, EvalError, RecurrenceRule, resolve_day};

fn date(y: i32, m: u32, d: u32) -> CalendarDate {
    CalendarDate::from_ymd(y, m, d).unwrap()
}

/// Every day from 2023-01-01 through 2025-12-31, stepping by `step`.
fn references(step: u64) -> impl Iterator<Item = CalendarDate> {
    let end = date(2025, 12, 31);
    std::iter::successors(Some(date(2023, 1, 1)), move |d| d.add_days(step))
        .take_while(move |d| *d <= end)
}

fn rule(spec: &str) -> RecurrenceRule {
    RecurrenceRule::parse(spec).unwrap()
}

#[test]
fn daily_is_after_reference_and_in_phase() {
    let anchors = [date(2022, 12, 25), date(2024, 2, 29), date(2026, 1, 1)];
    for n in [1, 2, 7, 30, 400] {
        let rule = rule(&format!("d {n}"));
        for reference in references(5) {
            for anchor in anchors {
                let next = rule.next_after(reference, anchor).unwrap();
                assert!(next > reference, "d {n} {reference} {anchor} -> {next}");
                assert_eq!(next.days_since(anchor).rem_euclid(n), 0);
                // Nothing earlier in phase lies after both the reference and the anchor.
                let previous = next.days_since(anchor) - n;
                if previous > 0 {
                    assert!(anchor.add_days(previous as u64).unwrap() <= reference);
                }
            }
        }
    }
}

#[test]
fn yearly_is_smallest_anniversary_after_reference() {
    for anchor in [date(2020, 2, 29), date(2021, 12, 31), date(2022, 7, 4)] {
        for reference in references(3) {
            let next = rule("y").next_after(reference, anchor).unwrap();
            assert!(next > reference);
            assert_eq!(next.month(), anchor.month());
            if anchor.month() == 2 && anchor.day() == 29 {
                let leap = next.month_length() == 29;
                assert_eq!(next.day(), if leap { 29 } else { 28 });
            } else {
                assert_eq!(next.day(), anchor.day());
            }
            let one_year_earlier = next.year() - 1;
            if one_year_earlier > anchor.year() {
                let earlier = anchor.add_years((one_year_earlier - anchor.year()) as u32).unwrap();
                assert!(earlier <= reference);
            }
        }
    }
}

#[test]
fn weekly_hits_first_matching_weekday() {
    for spec in ["w 1", "w 1,3", "w 2,4,6", "w 7", "w 1,2,3,4,5,6,7", "w 5,6"] {
        let rule = rule(spec);
        let RecurrenceRule::Weekly { weekdays } = &rule else {
            unreachable!()
        };
        for reference in references(1) {
            for anchor in [reference, date(2024, 6, 15)] {
                let next = rule.next_after(reference, anchor).unwrap();
                let start = anchor.max(reference);
                assert!(next > reference);
                assert!(next > start);
                assert!(next.days_since(start) <= 7);
                assert!(weekdays.contains(&next.iso_weekday()), "{spec} {reference} -> {next}");
                let mut day = start.succ().unwrap();
                while day < next {
                    assert!(!weekdays.contains(&day.iso_weekday()));
                    day = day.succ().unwrap();
                }
            }
        }
    }
}

#[test]
fn monthly_hits_first_matching_day() {
    for spec in ["m 1", "m -1", "m 15,-2", "m 31", "m 29 2", "m 1,-1 3,6,9,12", "m 30,-3 1,2"] {
        let rule = rule(spec);
        let RecurrenceRule::Monthly { days, months } = &rule else {
            unreachable!()
        };
        let matches = |d: CalendarDate| {
            let length = d.month_length();
            let day_ok = days
                .iter()
                .any(|&wanted| resolve_day(wanted, length) == Some(d.day()));
            let month_ok = months.as_ref().is_none_or(|m| m.contains(&d.month()));
            day_ok && month_ok
        };
        for reference in references(4) {
            let next = rule.next_after(reference, reference).unwrap();
            assert!(next > reference);
            assert!(matches(next), "{spec} {reference} -> {next}");
            let mut day = reference.succ().unwrap();
            while day < next {
                assert!(!matches(day), "{spec} {reference} skipped {day}");
                day = day.succ().unwrap();
            }
        }
    }
}

#[test]
fn feeding_result_back_never_regresses() {
    for spec in ["d 3", "w 2,5", "m 10,-1", "m 31 1,3", "y"] {
        let rule = rule(spec);
        for reference in references(11) {
            let first = rule.next_after(reference, reference).unwrap();
            let second = rule.next_after(reference, first).unwrap();
            assert!(second > first, "{spec} {reference}: {first} then {second}");
            let series: Vec<CalendarDate> = rule
                .occurrences(reference, reference)
                .take(6)
                .map(Result::unwrap)
                .collect();
            assert!(series.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(series[0], first);
        }
    }
}

#[test]
fn unsatisfiable_monthly_rules() {
    for spec in ["m 31 4,6,9,11", "m 30 2", "m -31 2,4", "m 31,-31 6"] {
        let result = rule(spec).next_after(date(2024, 1, 1), date(2024, 1, 1));
        assert!(
            matches!(result, Err(EvalError::Unsatisfiable { .. })),
            "{spec}: {result:?}"
        );
    }
}

#[test]
fn rules_are_shareable_across_threads() {
    let rule = rule("m 1,15");
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rule = rule.clone();
            std::thread::spawn(move || {
                let reference = date(2024, 1 + i, 10);
                rule.next_after(reference, reference).unwrap()
            })
        })
        .collect();
    let results: BTreeSet<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().to_string())
        .collect();
    assert_eq!(
        results,
        BTreeSet::from(
            ["20240115", "20240215", "20240315", "20240415"].map(String::from)
        )
    );
}
