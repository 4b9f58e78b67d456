//! Digest assembly: sorting, grouping, and section rendering.

use chrono::{DateTime, Local, NaiveDate};

use crate::bucket::Bucket;
use crate::html;
use crate::item::DueItem;

/// One-level indent for flat-listed items and day sub-headers.
const INDENT: &str = "  ";

/// Two-level indent for items under a day sub-header.
const INDENT2: &str = "    ";

/// One rendered section block of a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section heading, carrying the doubled-asterisk bold convention.
    pub header: String,
    /// Rendered item lines, already indented.
    pub lines: Vec<String>,
}

impl Section {
    fn new(header: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            header: header.into(),
            lines,
        }
    }
}

/// The assembled report for one assignee.
///
/// Sections appear in fixed order — Overdue, Today, This Week, Future —
/// and only when non-empty. Built fresh on every run and never mutated
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Digest {
    /// Non-empty section blocks in display order.
    pub sections: Vec<Section>,
}

impl Digest {
    /// Buckets, orders, and labels one assignee's due items against the
    /// reference instant.
    ///
    /// The global stable sort by due timestamp is the sole ordering
    /// authority: it fixes item order inside every bucket and day-group,
    /// keeps equal timestamps in input order, and guarantees day-groups
    /// are created in ascending date order during the single grouping
    /// pass.
    #[must_use]
    pub fn build(mut items: Vec<DueItem>, now: DateTime<Local>) -> Self {
        items.sort_by_key(|item| item.due);

        let mut overdue = Vec::new();
        let mut today = Vec::new();
        let mut week: Vec<(NaiveDate, Vec<String>)> = Vec::new();
        let mut future = Vec::new();

        for item in &items {
            match Bucket::classify(item.due, now) {
                Bucket::Overdue => overdue.push(format!("{INDENT}{}", item.label())),
                Bucket::Today => today.push(format!("{INDENT}{}", item.label())),
                Bucket::ThisWeek { day } => {
                    let line = format!("{INDENT2}{}", item.label());
                    if let Some((_, lines)) = week.iter_mut().find(|(d, _)| *d == day) {
                        lines.push(line);
                    } else {
                        week.push((day, vec![line]));
                    }
                }
                Bucket::Future => future.push(format!(
                    "{INDENT}{} ({})",
                    item.label(),
                    item.due.format("%a %m/%d")
                )),
            }
        }

        let mut sections = Vec::new();
        if !overdue.is_empty() {
            sections.push(Section::new("**Overdue**", overdue));
        }
        if !today.is_empty() {
            sections.push(Section::new(
                format!("**Today ({})**", now.format("%m/%d")),
                today,
            ));
        }
        if !week.is_empty() {
            let mut lines = Vec::new();
            for (day, items) in week {
                lines.push(format!("{INDENT}{}:", day.format("%a %m/%d")));
                lines.extend(items);
            }
            sections.push(Section::new("**This Week**", lines));
        }
        if !future.is_empty() {
            sections.push(Section::new("**Future**", future));
        }

        Self { sections }
    }

    /// Returns true if no section survived assembly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Renders the plain-text report.
    ///
    /// Adjacent sections are separated by one blank line; the first
    /// emitted section has no leading blank.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.sections
            .iter()
            .map(|section| {
                let mut block = section.header.clone();
                for line in &section.lines {
                    block.push('\n');
                    block.push_str(line);
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders the HTML report from the plain-text form.
    #[must_use]
    pub fn to_html(&self) -> String {
        html::render_html(&self.to_text())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap()
    }

    #[test]
    fn empty_input_builds_empty_digest() {
        let digest = Digest::build(Vec::new(), local(2024, 6, 10, 9, 0));
        assert!(digest.is_empty());
        assert_eq!(digest.to_text(), "");
    }

    #[test]
    fn empty_sections_are_suppressed() {
        let now = local(2024, 6, 10, 9, 0);
        let digest = Digest::build(
            vec![DueItem::card("Only today", local(2024, 6, 10, 12, 0))],
            now,
        );
        let text = digest.to_text();
        assert!(text.contains("**Today (06/10)**"));
        assert!(!text.contains("**Overdue**"));
        assert!(!text.contains("**This Week**"));
        assert!(!text.contains("**Future**"));
    }

    #[test]
    fn first_section_has_no_leading_blank() {
        let now = local(2024, 6, 10, 9, 0);
        let digest = Digest::build(
            vec![DueItem::card("Late", local(2024, 6, 8, 12, 0))],
            now,
        );
        assert!(digest.to_text().starts_with("**Overdue**"));
    }

    #[test]
    fn items_sorted_within_buckets() {
        let now = local(2024, 6, 10, 9, 0);
        let digest = Digest::build(
            vec![
                DueItem::card("Second", local(2024, 6, 8, 12, 0)),
                DueItem::card("First", local(2024, 6, 7, 12, 0)),
            ],
            now,
        );
        let text = digest.to_text();
        let first = text.find("First").unwrap();
        let second = text.find("Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let now = local(2024, 6, 10, 9, 0);
        let due = local(2024, 6, 8, 12, 0);
        let digest = Digest::build(
            vec![DueItem::card("Alpha", due), DueItem::card("Beta", due)],
            now,
        );
        let text = digest.to_text();
        assert!(text.find("Alpha").unwrap() < text.find("Beta").unwrap());
    }

    #[test]
    fn day_groups_ascend_and_merge() {
        let now = local(2024, 6, 10, 9, 0);
        let digest = Digest::build(
            vec![
                DueItem::card("Later in week", local(2024, 6, 14, 10, 0)),
                DueItem::card("Midweek A", local(2024, 6, 12, 9, 0)),
                DueItem::card("Midweek B", local(2024, 6, 12, 15, 0)),
            ],
            now,
        );
        let text = digest.to_text();
        let wed = text.find("Wed 06/12:").unwrap();
        let fri = text.find("Fri 06/14:").unwrap();
        assert!(wed < fri);
        // Both Wednesday items sit under the single Wednesday sub-header.
        assert_eq!(text.matches("Wed 06/12:").count(), 1);
        assert!(text.find("Midweek A").unwrap() < text.find("Midweek B").unwrap());
    }

    #[test]
    fn future_lines_carry_their_date() {
        let now = local(2024, 6, 10, 9, 0);
        let digest = Digest::build(
            vec![DueItem::card("Far out", local(2024, 6, 20, 10, 0))],
            now,
        );
        assert!(digest.to_text().contains("  🃏 Far out (Thu 06/20)"));
    }
}
