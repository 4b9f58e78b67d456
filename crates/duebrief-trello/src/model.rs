//! Trello wire models.
//!
//! Field names follow the API's camelCase JSON; timestamps are ISO 8601
//! and parse into UTC instants.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A card on a board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Card identifier.
    pub id: String,
    /// Card name.
    pub name: String,
    /// Due timestamp, when set.
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    /// Members assigned to the card.
    #[serde(default)]
    pub id_members: Vec<String>,
    /// Checklists attached to the card.
    #[serde(default)]
    pub id_checklists: Vec<String>,
}

/// A checklist with its entries, as returned by the checklist resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    /// Checklist identifier.
    pub id: String,
    /// Checklist name.
    pub name: String,
    /// Entries in board order. The listing carries names only; due and
    /// assignee live on the per-item resource.
    #[serde(default)]
    pub check_items: Vec<CheckItemSummary>,
}

/// A checklist entry as listed inside its checklist.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItemSummary {
    /// Entry identifier.
    pub id: String,
    /// Entry name.
    pub name: String,
}

/// The full record of a checklist entry, fetched per item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    /// Entry identifier.
    pub id: String,
    /// Entry name.
    pub name: String,
    /// Due timestamp, when set.
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    /// The single assigned member, when set.
    #[serde(default)]
    pub id_member: Option<String>,
}

/// A board member.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name, when public.
    #[serde(default)]
    pub full_name: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn card_with_due_and_members() {
        let card: Card = serde_json::from_str(
            r#"{
                "id": "c1",
                "name": "Ship release",
                "due": "2024-06-14T10:00:00.000Z",
                "idMembers": ["m1", "m2"],
                "idChecklists": ["k1"]
            }"#,
        )
        .unwrap();
        assert_eq!(card.name, "Ship release");
        assert!(card.due.is_some());
        assert_eq!(card.id_members, vec!["m1", "m2"]);
        assert_eq!(card.id_checklists, vec!["k1"]);
    }

    #[test]
    fn card_with_null_due() {
        let card: Card =
            serde_json::from_str(r#"{"id": "c1", "name": "No deadline", "due": null}"#).unwrap();
        assert!(card.due.is_none());
        assert!(card.id_members.is_empty());
    }

    #[test]
    fn check_item_without_assignee() {
        let item: CheckItem = serde_json::from_str(
            r#"{"id": "i1", "name": "Draft", "due": "2024-06-12T09:00:00.000Z"}"#,
        )
        .unwrap();
        assert!(item.due.is_some());
        assert!(item.id_member.is_none());
    }

    #[test]
    fn checklist_entries_default_to_empty() {
        let checklist: Checklist =
            serde_json::from_str(r#"{"id": "k1", "name": "Launch"}"#).unwrap();
        assert!(checklist.check_items.is_empty());
    }

    #[test]
    fn member_full_name_is_optional() {
        let member: Member =
            serde_json::from_str(r#"{"id": "m1", "username": "sam"}"#).unwrap();
        assert_eq!(member.username, "sam");
        assert!(member.full_name.is_none());
    }
}
