//! Local SQLite backend.
//!
//! Mirrors the hosted service's data shapes so the board page cannot tell
//! the two apart: aggregate counts come back as single-element `[{count}]`
//! arrays.

mod migrations;
pub mod queries;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::{Backend, BackendError, PostQuery};
use crate::board::models::{
    AggregateCount, Board, NewPost, PostStatus, Project, RawPost, User, Viewer, VoteTally,
};
use queries::PostRow;

#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Open (or create) the database file, running migrations if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or migrations fail.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        let backend = Self { pool };
        backend.run_migrations().await?;

        Ok(backend)
    }

    async fn run_migrations(&self) -> Result<()> {
        migrations::run(&self.pool).await?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl TryFrom<PostRow> for RawPost {
    type Error = BackendError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<PostStatus>()
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            author_email: row.author_email,
            status,
            created_at: row.created_at,
            votes: Some(vec![AggregateCount {
                count: row.vote_count,
            }]),
            comments: Some(vec![AggregateCount {
                count: row.comment_count,
            }]),
        })
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>, BackendError> {
        Ok(queries::get_project_by_slug(&self.pool, slug).await?)
    }

    async fn board_for_project(&self, project_id: &str) -> Result<Option<Board>, BackendError> {
        Ok(queries::get_board_for_project(&self.pool, project_id).await?)
    }

    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<RawPost>, BackendError> {
        queries::list_posts(&self.pool, query)
            .await?
            .into_iter()
            .map(RawPost::try_from)
            .collect()
    }

    async fn create_post(
        &self,
        post: &NewPost,
        _viewer: Option<&Viewer>,
    ) -> Result<String, BackendError> {
        Ok(queries::insert_post(&self.pool, post).await?)
    }

    async fn toggle_vote(
        &self,
        post_id: &str,
        viewer: &Viewer,
    ) -> Result<VoteTally, BackendError> {
        let (vote_count, user_voted) =
            queries::toggle_vote(&self.pool, post_id, &viewer.user.id).await?;
        Ok(VoteTally {
            vote_count,
            user_voted,
        })
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<User>, BackendError> {
        Ok(queries::get_user_by_session(&self.pool, access_token).await?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        Ok(queries::delete_session(&self.pool, access_token).await?)
    }
}
