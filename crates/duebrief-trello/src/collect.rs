//! Due-item collection and per-member partitioning.

use std::collections::BTreeMap;

use chrono::Local;
use duebrief_core::DueItem;
use tracing::{debug, warn};

use crate::client::TrelloClient;
use crate::error::Result;

/// A due item paired with the member it is assigned to.
#[derive(Debug, Clone)]
pub struct AssignedItem {
    /// Assignee's member identifier.
    pub member_id: String,
    /// The due item, ready for the formatter.
    pub item: DueItem,
}

/// Walks the configured boards and collects every card and checklist
/// entry that carries both a due timestamp and an assignee.
///
/// Collection is an explicit fold into one immutable list; grouping per
/// member happens afterwards in [`partition_by_member`]. A card assigned
/// to several members contributes one item per member. A checklist that
/// cannot be fetched is logged and skipped so one broken resource does
/// not sink the whole run; a failing board fetch is a configuration
/// problem and propagates.
///
/// # Errors
///
/// Returns an error if a board's card listing cannot be fetched.
pub async fn collect_due_items(
    client: &TrelloClient,
    board_ids: &[String],
) -> Result<Vec<AssignedItem>> {
    let mut collected = Vec::new();

    for board_id in board_ids {
        let cards = client.board_cards(board_id).await?;
        debug!(board = %board_id, cards = cards.len(), "fetched board cards");

        for card in &cards {
            debug!(
                card = %card.name,
                members = card.id_members.len(),
                due = ?card.due,
                "fetched card"
            );

            if let Some(due) = card.due {
                for member_id in &card.id_members {
                    collected.push(AssignedItem {
                        member_id: member_id.clone(),
                        item: DueItem::card(card.name.clone(), due.with_timezone(&Local)),
                    });
                }
            }

            for checklist_id in &card.id_checklists {
                let checklist = match client.checklist(checklist_id).await {
                    Ok(checklist) => checklist,
                    Err(error) => {
                        warn!(%checklist_id, card = %card.name, %error, "skipping checklist");
                        continue;
                    }
                };

                for entry in &checklist.check_items {
                    let detail = match client.check_item(&card.id, &entry.id).await {
                        Ok(detail) => detail,
                        Err(error) => {
                            warn!(item = %entry.name, card = %card.name, %error, "skipping checklist item");
                            continue;
                        }
                    };

                    if let (Some(due), Some(member_id)) = (detail.due, detail.id_member) {
                        collected.push(AssignedItem {
                            member_id,
                            item: DueItem::checklist_item(
                                detail.name,
                                card.name.clone(),
                                due.with_timezone(&Local),
                            ),
                        });
                    }
                }
            }
        }
    }

    Ok(collected)
}

/// Groups collected items per member as a pure partitioning step.
///
/// A `BTreeMap` keeps member iteration deterministic, so delivery order
/// does not depend on fetch order.
#[must_use]
pub fn partition_by_member(items: Vec<AssignedItem>) -> BTreeMap<String, Vec<DueItem>> {
    let mut by_member: BTreeMap<String, Vec<DueItem>> = BTreeMap::new();
    for assigned in items {
        by_member
            .entry(assigned.member_id)
            .or_default()
            .push(assigned.item);
    }
    by_member
}
