//! Data access for projects, boards, posts, votes and sessions.
//!
//! The board page talks to the backend only through [`Backend`]. Two
//! implementations exist: [`hosted::HostedBackend`] for a PostgREST-style
//! hosted database service and [`sqlite::SqliteBackend`] for a local
//! SQLite file.

pub mod hosted;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::board::models::{
    Board, NewPost, PostStatus, Project, RawPost, SortBy, StatusFilter, User, Viewer, VoteTally,
};

pub use hosted::HostedBackend;
pub use sqlite::SqliteBackend;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered but reported a failed query.
    #[error("query failed ({status}): {message}")]
    Query { status: u16, message: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Whether this failure is outside the backend's normal error reporting
    /// (network trouble, malformed payloads) rather than a failed query.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}

/// Column a post listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    VoteCount,
    CreatedAt,
}

impl OrderColumn {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VoteCount => "vote_count",
            Self::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostOrder {
    pub column: OrderColumn,
    pub ascending: bool,
}

/// A post listing query for a single board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub board_id: String,
    /// Skip rows whose `duplicate_of` is set.
    pub exclude_duplicates: bool,
    /// Status equality predicate, if any.
    pub status: Option<PostStatus>,
    /// `None` leaves ordering to the backend.
    pub order: Option<PostOrder>,
}

impl PostQuery {
    /// Build the board listing query for the given filter and sort.
    #[must_use]
    pub fn for_board(board_id: &str, filter: StatusFilter, sort: SortBy) -> Self {
        let order = match sort {
            SortBy::Votes => Some(PostOrder {
                column: OrderColumn::VoteCount,
                ascending: false,
            }),
            SortBy::Newest => Some(PostOrder {
                column: OrderColumn::CreatedAt,
                ascending: false,
            }),
            SortBy::Oldest => Some(PostOrder {
                column: OrderColumn::CreatedAt,
                ascending: true,
            }),
            SortBy::Unordered => None,
        };

        Self {
            board_id: board_id.to_string(),
            exclude_duplicates: true,
            status: filter.status(),
            order,
        }
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Look up a project by exact slug.
    async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>, BackendError>;

    /// Look up the board belonging to a project.
    async fn board_for_project(&self, project_id: &str) -> Result<Option<Board>, BackendError>;

    /// List posts with their vote and comment aggregates.
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<RawPost>, BackendError>;

    /// Persist a new post, returning its id. Anonymous when `viewer` is `None`.
    async fn create_post(
        &self,
        post: &NewPost,
        viewer: Option<&Viewer>,
    ) -> Result<String, BackendError>;

    /// Add the viewer's vote if absent, remove it otherwise.
    async fn toggle_vote(&self, post_id: &str, viewer: &Viewer)
        -> Result<VoteTally, BackendError>;

    /// Resolve a session access token to a user.
    async fn current_user(&self, access_token: &str) -> Result<Option<User>, BackendError>;

    /// Invalidate a session access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_filter_adds_no_status_predicate() {
        let query = PostQuery::for_board("b1", StatusFilter::All, SortBy::Votes);
        assert_eq!(query.status, None);
        assert!(query.exclude_duplicates);
        assert_eq!(query.board_id, "b1");
    }

    #[test]
    fn status_filter_adds_equality_predicate() {
        let query = PostQuery::for_board(
            "b1",
            StatusFilter::Only(PostStatus::Planned),
            SortBy::Votes,
        );
        assert_eq!(query.status, Some(PostStatus::Planned));
    }

    #[test]
    fn sort_maps_to_order() {
        let order = |sort| PostQuery::for_board("b1", StatusFilter::All, sort).order;

        assert_eq!(
            order(SortBy::Votes),
            Some(PostOrder {
                column: OrderColumn::VoteCount,
                ascending: false
            })
        );
        assert_eq!(
            order(SortBy::Newest),
            Some(PostOrder {
                column: OrderColumn::CreatedAt,
                ascending: false
            })
        );
        assert_eq!(
            order(SortBy::Oldest),
            Some(PostOrder {
                column: OrderColumn::CreatedAt,
                ascending: true
            })
        );
        assert_eq!(order(SortBy::Unordered), None);
    }

    #[test]
    fn unexpected_classification() {
        assert!(BackendError::Decode("bad json".into()).is_unexpected());
        assert!(!BackendError::Query {
            status: 400,
            message: "bad filter".into()
        }
        .is_unexpected());
        assert!(!BackendError::Database(sqlx::Error::RowNotFound).is_unexpected());
    }
}
