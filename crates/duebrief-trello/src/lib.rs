//! # duebrief-trello
//!
//! Trello REST collector for due cards and checklist items.
//!
//! The collector walks a configured set of boards, pulls every card and
//! the full record of every checklist entry, and keeps the items that
//! carry both a due timestamp and an assignee. The result is a flat,
//! immutable list of assigned due items that a pure partitioning step
//! groups per member — the digest formatter downstream never talks to
//! the network.
//!
//! ## Quick Start
//!
//! ```ignore
//! use duebrief_trello::{TrelloClient, collect_due_items, partition_by_member};
//!
//! let client = TrelloClient::new("api-key", "api-token");
//! let items = collect_due_items(&client, &boards).await?;
//! for (member_id, items) in partition_by_member(items) {
//!     // one digest per member
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod collect;
mod error;
pub mod model;

pub use client::TrelloClient;
pub use collect::{AssignedItem, collect_due_items, partition_by_member};
pub use error::{Error, Result};
pub use model::{Card, CheckItem, CheckItemSummary, Checklist, Member};
