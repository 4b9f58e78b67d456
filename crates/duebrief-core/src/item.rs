//! Due item model and label rendering.

use chrono::{DateTime, Local};

/// Marker glyph for top-level cards.
pub const CARD_MARKER: &str = "🃏";

/// Marker glyph for checklist entries.
pub const CHECK_MARKER: &str = "✔";

/// Placeholder parent name for checklist entries whose card is unknown.
const UNKNOWN_PARENT: &str = "Unknown";

/// Kind of work unit a due item represents.
///
/// Affects only the rendered label, never bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A top-level card on a board.
    Card,
    /// A checklist entry nested inside a card.
    ChecklistItem,
}

/// One unit of work with a deadline, ready for digest formatting.
///
/// The due timestamp is always present: the collector only constructs
/// `DueItem`s from records that carry one, so the "item without a due
/// date" contract violation cannot reach the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueItem {
    /// The item's own name, with no embedded annotations.
    pub text: String,
    /// Name of the containing card, for checklist entries.
    pub parent: Option<String>,
    /// When the item is due, in the runtime's local time.
    pub due: DateTime<Local>,
    /// Whether this is a card or a checklist entry.
    pub kind: ItemKind,
}

impl DueItem {
    /// Creates a due item for a top-level card.
    #[must_use]
    pub fn card(text: impl Into<String>, due: DateTime<Local>) -> Self {
        Self {
            text: text.into(),
            parent: None,
            due,
            kind: ItemKind::Card,
        }
    }

    /// Creates a due item for a checklist entry with its card's name.
    #[must_use]
    pub fn checklist_item(
        text: impl Into<String>,
        parent: impl Into<String>,
        due: DateTime<Local>,
    ) -> Self {
        Self {
            text: text.into(),
            parent: Some(parent.into()),
            due,
            kind: ItemKind::ChecklistItem,
        }
    }

    /// Creates a checklist due item from legacy annotated text.
    ///
    /// Upstream sources that embed the parent card in the item text as
    /// `name (from "Card")` are split into the name and the structured
    /// parent field. Text without the annotation is kept verbatim and the
    /// parent is left unset, which renders with the `Unknown` placeholder;
    /// this conversion is total and never fails.
    #[must_use]
    pub fn from_annotated(text: &str, due: DateTime<Local>) -> Self {
        let (text, parent) = split_annotated(text);
        Self {
            text,
            parent,
            due,
            kind: ItemKind::ChecklistItem,
        }
    }

    /// Renders the single display line for this item.
    ///
    /// Cards render as `🃏 <text>`; checklist entries as
    /// `✔ <text> (🃏 <parent>)`, so both shapes end with consistent
    /// card context.
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            ItemKind::Card => format!("{CARD_MARKER} {}", self.text),
            ItemKind::ChecklistItem => {
                let parent = self.parent.as_deref().unwrap_or(UNKNOWN_PARENT);
                format!("{CHECK_MARKER} {} ({CARD_MARKER} {parent})", self.text)
            }
        }
    }
}

/// Splits `name (from "Card")` into the name and the card.
///
/// The annotation must close the string; a stray `(from "...` elsewhere in
/// the text is left alone.
fn split_annotated(text: &str) -> (String, Option<String>) {
    const OPEN: &str = " (from \"";
    const CLOSE: &str = "\")";

    if let Some(start) = text.rfind(OPEN) {
        let inner = &text[start + OPEN.len()..];
        if let Some(parent) = inner.strip_suffix(CLOSE) {
            if !parent.is_empty() {
                return (text[..start].to_string(), Some(parent.to_string()));
            }
        }
    }
    (text.to_string(), None)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 12, 9, 0, 0).single().unwrap()
    }

    mod label_tests {
        use super::*;

        #[test]
        fn card_label() {
            let item = DueItem::card("Ship release", due());
            assert_eq!(item.label(), "🃏 Ship release");
        }

        #[test]
        fn checklist_label_with_parent() {
            let item = DueItem::checklist_item("Write notes", "Release", due());
            assert_eq!(item.label(), "✔ Write notes (🃏 Release)");
        }

        #[test]
        fn checklist_label_without_parent() {
            let item = DueItem::from_annotated("Write notes", due());
            assert_eq!(item.label(), "✔ Write notes (🃏 Unknown)");
        }
    }

    mod annotation_tests {
        use super::*;

        #[test]
        fn round_trip() {
            let item = DueItem::from_annotated("Write notes (from \"Release\")", due());
            assert_eq!(item.text, "Write notes");
            assert_eq!(item.parent.as_deref(), Some("Release"));
            assert_eq!(item.label(), "✔ Write notes (🃏 Release)");
        }

        #[test]
        fn missing_annotation_falls_back() {
            let item = DueItem::from_annotated("No annotation here", due());
            assert_eq!(item.text, "No annotation here");
            assert!(item.parent.is_none());
        }

        #[test]
        fn annotation_must_close_the_string() {
            let item = DueItem::from_annotated("Odd (from \"X\") trailing", due());
            assert_eq!(item.text, "Odd (from \"X\") trailing");
            assert!(item.parent.is_none());
        }

        #[test]
        fn empty_parent_is_rejected() {
            let item = DueItem::from_annotated("Name (from \"\")", due());
            assert!(item.parent.is_none());
        }

        #[test]
        fn last_annotation_wins() {
            let item =
                DueItem::from_annotated("Step (from \"Old\") (from \"New\")", due());
            assert_eq!(item.text, "Step (from \"Old\")");
            assert_eq!(item.parent.as_deref(), Some("New"));
        }
    }
}
