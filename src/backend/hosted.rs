//! Client for a hosted PostgREST-style database service.
//!
//! Table reads go through `/rest/v1/<table>` with filter query parameters
//! (`column=eq.value`, `column=is.null`, `order=column.desc`). Aggregates are
//! requested as embedded selects (`votes(count)`), which come back as
//! `[{"count": n}]`. Sessions are resolved against `/auth/v1`.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{Backend, BackendError, PostQuery};
use crate::board::models::{
    AggregateCount, Board, NewPost, Project, RawPost, User, Viewer, VoteTally,
};

const POST_SELECT: &str =
    "id,title,description,author_email,status,created_at,votes(count),comments(count)";

/// Error payload returned by PostgREST.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: String,
}

#[derive(Debug, Deserialize)]
struct VoteCountRow {
    #[serde(default)]
    votes: Vec<AggregateCount>,
}

/// Hosted backend client.
#[derive(Debug, Clone)]
pub struct HostedBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HostedBackend {
    /// Create a client for the service at `base_url` using the public API key.
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn rest(&self, method: Method, table: &str) -> RequestBuilder {
        self.rest_as(method, table, None)
    }

    /// Table request authorised as `viewer`, or with the public key alone.
    fn rest_as(&self, method: Method, table: &str, viewer: Option<&Viewer>) -> RequestBuilder {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        let bearer = viewer.map_or(self.api_key.as_str(), |v| v.access_token.as_str());
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    fn auth(&self, method: Method, path: &str, access_token: &str) -> RequestBuilder {
        let url = format!("{}/auth/v1/{path}", self.base_url);
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        debug!(table, ?params, "Querying hosted backend");
        let response = self.rest(Method::GET, table).query(params).send().await?;
        decode(check(response).await?).await
    }

    async fn vote_count(&self, post_id: &str) -> Result<i64, BackendError> {
        let rows: Vec<VoteCountRow> = self
            .fetch_rows(
                "posts",
                &[
                    ("select", "votes(count)".to_string()),
                    ("id", format!("eq.{post_id}")),
                ],
            )
            .await?;

        Ok(rows
            .first()
            .and_then(|row| row.votes.first())
            .map_or(0, |agg| agg.count))
    }
}

/// PostgREST parameters for a post listing query.
#[must_use]
pub fn post_query_params(query: &PostQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("select", POST_SELECT.to_string()),
        ("board_id", format!("eq.{}", query.board_id)),
    ];

    if query.exclude_duplicates {
        params.push(("duplicate_of", "is.null".to_string()));
    }

    if let Some(status) = query.status {
        params.push(("status", format!("eq.{status}")));
    }

    if let Some(order) = query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order", format!("{}.{direction}", order.column.as_str())));
    }

    params
}

/// Turn a non-success response into a query error.
async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message.or(b.msg))
        .unwrap_or(body);

    Err(BackendError::Query {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl Backend for HostedBackend {
    async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>, BackendError> {
        let rows: Vec<Project> = self
            .fetch_rows(
                "projects",
                &[
                    ("select", "id,name,slug".to_string()),
                    ("slug", format!("eq.{slug}")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn board_for_project(&self, project_id: &str) -> Result<Option<Board>, BackendError> {
        let rows: Vec<Board> = self
            .fetch_rows(
                "boards",
                &[
                    ("select", "id".to_string()),
                    ("project_id", format!("eq.{project_id}")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<RawPost>, BackendError> {
        self.fetch_rows("posts", &post_query_params(query)).await
    }

    async fn create_post(
        &self,
        post: &NewPost,
        viewer: Option<&Viewer>,
    ) -> Result<String, BackendError> {
        let response = self
            .rest_as(Method::POST, "posts", viewer)
            .query(&[("select", "id")])
            .header("Prefer", "return=representation")
            .json(post)
            .send()
            .await?;

        let rows: Vec<IdRow> = decode(check(response).await?).await?;
        rows.into_iter()
            .next()
            .map(|row| row.id)
            .ok_or_else(|| BackendError::Decode("insert returned no rows".to_string()))
    }

    async fn toggle_vote(
        &self,
        post_id: &str,
        viewer: &Viewer,
    ) -> Result<VoteTally, BackendError> {
        let lookup = self
            .rest_as(Method::GET, "votes", Some(viewer))
            .query(&[
                ("select", "id".to_string()),
                ("post_id", format!("eq.{post_id}")),
                ("user_id", format!("eq.{}", viewer.user.id)),
            ])
            .send()
            .await?;
        let existing: Vec<IdRow> = decode(check(lookup).await?).await?;

        let user_voted = if let Some(vote) = existing.first() {
            let response = self
                .rest_as(Method::DELETE, "votes", Some(viewer))
                .query(&[("id", format!("eq.{}", vote.id))])
                .send()
                .await?;
            check(response).await?;
            false
        } else {
            let response = self
                .rest_as(Method::POST, "votes", Some(viewer))
                .json(&json!({ "post_id": post_id, "user_id": viewer.user.id }))
                .send()
                .await?;
            check(response).await?;
            true
        };

        let vote_count = self.vote_count(post_id).await?;
        Ok(VoteTally {
            vote_count,
            user_voted,
        })
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<User>, BackendError> {
        let response = self.auth(Method::GET, "user", access_token).send().await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        decode(check(response).await?).await.map(Some)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let response = self.auth(Method::POST, "logout", access_token).send().await?;
        if let Err(e) = check(response).await {
            warn!(error = %e, "Hosted sign-out rejected");
            return Err(e);
        }
        Ok(())
    }
}
