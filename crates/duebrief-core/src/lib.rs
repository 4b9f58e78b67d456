//! # duebrief-core
//!
//! Due-item aggregation and time-bucketed digest formatting.
//!
//! This crate is the pure center of duebrief: given one assignee's due
//! items and a reference instant, it buckets them by due date
//! (Overdue / Today / This Week / Future), orders and labels them, and
//! renders a plain-text report plus an HTML variant suitable for email
//! delivery.
//!
//! ## Design
//!
//! - **No I/O and no failure paths.** Every operation here is a pure
//!   function of its inputs. Items without a due timestamp are filtered
//!   out by the collector and are unrepresentable in [`DueItem`].
//! - **Injected reference instant.** Bucketing never reads the ambient
//!   clock; callers capture "now" once per run and pass it in, so the
//!   whole pipeline is deterministic and testable.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::{Local, TimeZone};
//! use duebrief_core::{Digest, DueItem};
//!
//! let now = Local.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).single().unwrap();
//! let due = Local.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).single().unwrap();
//!
//! let digest = Digest::build(vec![DueItem::card("Ship release notes", due)], now);
//! assert!(digest.to_text().contains("**This Week**"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod bucket;
pub mod digest;
pub mod html;
pub mod item;

pub use bucket::Bucket;
pub use digest::{Digest, Section};
pub use html::render_html;
pub use item::{DueItem, ItemKind};
