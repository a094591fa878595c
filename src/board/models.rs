use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A feedback project, addressed by its slug in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// The feedback board belonging to a project (one per project).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    pub id: String,
}

/// Workflow status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Open,
    Planned,
    InProgress,
    Done,
    Declined,
}

impl PostStatus {
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::Planned,
        Self::InProgress,
        Self::Done,
        Self::Declined,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Declined => "declined",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::Declined => "Declined",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown post status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for PostStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A post as displayed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub author_email: Option<String>,
    pub status: PostStatus,
    pub created_at: String,
    pub vote_count: i64,
    pub comment_count: i64,
    /// Always `false` on the board listing; per-user vote state is not joined.
    pub user_voted: bool,
}

/// One row of an aggregate count, e.g. `votes(count)` -> `[{"count": 3}]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCount {
    pub count: i64,
}

/// A post row as returned by the backend, with nested aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    pub status: PostStatus,
    pub created_at: String,
    #[serde(default)]
    pub votes: Option<Vec<AggregateCount>>,
    #[serde(default)]
    pub comments: Option<Vec<AggregateCount>>,
}

/// Status filter applied server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PostStatus),
}

impl StatusFilter {
    /// Parse a query value. Anything that isn't a known status means `all`.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<PostStatus>().ok())
            .map_or(Self::All, Self::Only)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<PostStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(*status),
        }
    }
}

/// Ordering of the post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Votes,
    Newest,
    Oldest,
    /// Unrecognised sort value; the backend's default order applies.
    Unordered,
}

impl SortBy {
    /// Parse a query value. Absent means `votes`, unknown means unordered.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("" | "votes") => Self::Votes,
            Some("newest") => Self::Newest,
            Some("oldest") => Self::Oldest,
            Some(_) => Self::Unordered,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Votes => "votes",
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Unordered => "unordered",
        }
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in user together with the access token of their session.
///
/// Writes are made on the viewer's behalf so the backend can check them
/// against the session rather than trusting the submitted user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user: User,
    pub access_token: String,
}

/// A post submission ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub board_id: String,
    pub title: String,
    pub description: Option<String>,
    pub author_email: Option<String>,
    pub status: PostStatus,
}

/// Vote state of a post after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    pub vote_count: i64,
    pub user_voted: bool,
}
