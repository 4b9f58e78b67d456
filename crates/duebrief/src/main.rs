//! duebrief — Trello due-item digest mailer.
//!
//! One run: collect due cards and checklist items from the configured
//! boards, partition them per assignee, render each assignee's
//! time-bucketed digest, and email it. Recurrence belongs to an
//! external scheduler.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
mod delivery;

use anyhow::Context;
use chrono::Local;
use duebrief_core::Digest;
use duebrief_smtp::{Address, OutgoingMessage};
use duebrief_trello::{TrelloClient, collect_due_items, partition_by_member};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

/// Subject line for every digest email.
const SUBJECT: &str = "📝 Your Trello Tasks for Today";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duebrief=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("starting duebrief run");

    let config = Config::load()?;
    let client = TrelloClient::new(&config.trello.key, &config.trello.token);

    let items = collect_due_items(&client, &config.trello.boards)
        .await
        .context("collecting due items from Trello")?;
    info!(items = items.len(), "collected assigned due items");

    let mut by_member = partition_by_member(items);

    // One reference instant for the whole run, so every digest buckets
    // against the same "now".
    let now = Local::now();
    let from =
        Address::new(&config.smtp.from).context("invalid sender address in config")?;

    let mut delivered = 0_usize;
    let mut failed = 0_usize;

    for recipient in &config.recipients {
        let Some(items) = by_member.remove(&recipient.member_id) else {
            info!(member = %recipient.member_id, "no items found for user; skipping email");
            continue;
        };

        let digest = Digest::build(items, now);
        if digest.is_empty() {
            info!(member = %recipient.member_id, "no items found for user; skipping email");
            continue;
        }

        let to = match Address::new(&recipient.email) {
            Ok(to) => to,
            Err(error) => {
                warn!(member = %recipient.member_id, email = %recipient.email, %error,
                      "invalid recipient address; skipping");
                failed += 1;
                continue;
            }
        };

        let message = OutgoingMessage::new(from.clone(), to, SUBJECT, digest.to_text())
            .with_from_name(&config.smtp.from_name)
            .with_html(digest.to_html());

        // One recipient's delivery failure never blocks the others.
        match delivery::send(&config.smtp, &message).await {
            Ok(()) => {
                info!(member = %recipient.member_id, email = %recipient.email, "digest delivered");
                delivered += 1;
            }
            Err(error) => {
                error!(member = %recipient.member_id, email = %recipient.email, %error,
                       "digest delivery failed; continuing");
                failed += 1;
            }
        }
    }

    for (member_id, items) in by_member {
        let username = client
            .member(&member_id)
            .await
            .map_or_else(|_| "unknown".to_string(), |member| member.username);
        warn!(%member_id, %username, items = items.len(),
              "due items for member with no configured email");
    }

    info!(delivered, failed, "run complete");
    Ok(())
}
