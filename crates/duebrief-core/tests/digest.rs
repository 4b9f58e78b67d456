//! Integration tests for digest assembly.
//!
//! These exercise the full pipeline — sort, classify, group, label,
//! render — against a fixed reference instant, the way the binary drives
//! it for each assignee.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, Local, TimeZone};
use duebrief_core::{Bucket, Digest, DueItem};
use proptest::prelude::*;

fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap()
}

/// Monday morning reference instant used across the scenario tests.
fn monday_morning() -> DateTime<Local> {
    local(2024, 6, 10, 9, 0)
}

#[test]
fn weekly_scenario_renders_expected_report() {
    let items = vec![
        DueItem::card("A", local(2024, 6, 9, 10, 0)),
        DueItem::from_annotated("B (from \"C\")", local(2024, 6, 10, 8, 0)),
        DueItem::card("D", local(2024, 6, 14, 10, 0)),
        DueItem::card("E", local(2024, 6, 20, 10, 0)),
    ];

    let digest = Digest::build(items, monday_morning());

    let expected = "\
**Overdue**
  🃏 A

**Today (06/10)**
  ✔ B (🃏 C)

**This Week**
  Fri 06/14:
    🃏 D

**Future**
  🃏 E (Thu 06/20)";
    assert_eq!(digest.to_text(), expected);
}

#[test]
fn weekly_scenario_html_matches_text() {
    let items = vec![
        DueItem::card("A", local(2024, 6, 9, 10, 0)),
        DueItem::from_annotated("B (from \"C\")", local(2024, 6, 10, 8, 0)),
        DueItem::card("D", local(2024, 6, 14, 10, 0)),
        DueItem::card("E", local(2024, 6, 20, 10, 0)),
    ];

    let digest = Digest::build(items, monday_morning());
    let text = digest.to_text();
    let html = digest.to_html();

    // Headers are bolded, the wrapper is a monospace <pre>, and the
    // line content is otherwise identical to the text report.
    assert!(html.contains("<b>Overdue</b>"));
    assert!(html.contains("<b>This Week</b>"));
    let inner = html
        .strip_prefix("<pre style=\"font-family: monospace\">")
        .and_then(|s| s.strip_suffix("</pre>"))
        .map(|s| s.replace("<b>", "**").replace("</b>", "**"))
        .unwrap();
    assert_eq!(inner, text);
}

#[test]
fn input_order_never_leaks_into_the_report() {
    // The same items in two arrival orders produce identical reports;
    // the global sort is the sole ordering authority.
    let a = DueItem::card("A", local(2024, 6, 12, 9, 0));
    let b = DueItem::card("B", local(2024, 6, 11, 9, 0));
    let c = DueItem::card("C", local(2024, 6, 13, 9, 0));

    let one = Digest::build(vec![a.clone(), b.clone(), c.clone()], monday_morning());
    let two = Digest::build(vec![c, a, b], monday_morning());
    assert_eq!(one.to_text(), two.to_text());
}

proptest! {
    /// Every timestamp within ±120 days of the reference instant lands
    /// in exactly one bucket, and that bucket's own invariant holds.
    #[test]
    fn classification_is_total(offset_secs in -10_368_000i64..10_368_000i64) {
        let now = monday_morning();
        let due = now + Duration::seconds(offset_secs);

        match Bucket::classify(due, now) {
            Bucket::Overdue => {
                prop_assert!(due < now);
                prop_assert_ne!(due.date_naive(), now.date_naive());
            }
            Bucket::Today => prop_assert_eq!(due.date_naive(), now.date_naive()),
            Bucket::ThisWeek { day } => {
                prop_assert_eq!(day, due.date_naive());
                prop_assert!(day > now.date_naive());
            }
            Bucket::Future => prop_assert!(due.date_naive() > now.date_naive()),
        }
    }
}
