//! Typed Trello REST client.

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::model::{Card, CheckItem, Checklist, Member};

/// Production API base.
const API_BASE: &str = "https://api.trello.com/1";

/// Thin client over the Trello REST API.
///
/// The API key and token are opaque configuration and ride along as
/// query parameters on every request, which is Trello's authentication
/// scheme. No retries: a failed request surfaces to the caller.
#[derive(Debug, Clone)]
pub struct TrelloClient {
    http: reqwest::Client,
    base_url: String,
    key: String,
    token: String,
}

impl TrelloClient {
    /// Creates a client for the production API.
    #[must_use]
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: API_BASE.to_string(),
            key: key.into(),
            token: token.into(),
        }
    }

    /// Overrides the API base URL. Intended for tests against a local
    /// stand-in server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Lists a board's cards with the fields the collector needs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    pub async fn board_cards(&self, board_id: &str) -> Result<Vec<Card>> {
        self.get_json(
            &format!("/boards/{board_id}/cards"),
            &[("fields", "name,due,idMembers,idChecklists")],
        )
        .await
    }

    /// Fetches a checklist with its entry listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    pub async fn checklist(&self, checklist_id: &str) -> Result<Checklist> {
        self.get_json(
            &format!("/checklists/{checklist_id}"),
            &[("fields", "name"), ("checkItem_fields", "name")],
        )
        .await
    }

    /// Fetches the full record of one checklist entry.
    ///
    /// The checklist listing omits due and assignee; this per-item
    /// resource carries both.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    pub async fn check_item(&self, card_id: &str, item_id: &str) -> Result<CheckItem> {
        self.get_json(&format!("/cards/{card_id}/checkItem/{item_id}"), &[])
            .await
    }

    /// Fetches a member's public profile, for logging and diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    pub async fn member(&self, member_id: &str) -> Result<Member> {
        self.get_json(
            &format!("/members/{member_id}"),
            &[("fields", "username,fullName")],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.key.as_str()), ("token", self.token.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status.as_u16(), body));
        }

        Ok(response.json().await?)
    }
}
