use chrono::{Duration, SecondsFormat, Utc};
use rand::RngCore;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::backend::PostQuery;
use crate::board::models::{Board, NewPost, Project, User};

/// A post row with its aggregate counts computed in SQL.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub author_email: Option<String>,
    pub status: String,
    pub created_at: String,
    pub vote_count: i64,
    pub comment_count: i64,
}

/// Random hex identifier.
fn new_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Insert a project, returning its ID.
pub async fn insert_project(pool: &SqlitePool, name: &str, slug: &str) -> sqlx::Result<String> {
    let id = new_id();
    sqlx::query("INSERT INTO projects (id, name, slug) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await?;
    Ok(id)
}

/// Insert the board for a project, returning its ID.
pub async fn insert_board(pool: &SqlitePool, project_id: &str) -> sqlx::Result<String> {
    let id = new_id();
    sqlx::query("INSERT INTO boards (id, project_id) VALUES (?, ?)")
        .bind(&id)
        .bind(project_id)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn get_project_by_slug(pool: &SqlitePool, slug: &str) -> sqlx::Result<Option<Project>> {
    sqlx::query_as("SELECT id, name, slug FROM projects WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn get_board_for_project(
    pool: &SqlitePool,
    project_id: &str,
) -> sqlx::Result<Option<Board>> {
    sqlx::query_as("SELECT id FROM boards WHERE project_id = ?")
        .bind(project_id)
        .fetch_optional(pool)
        .await
}

/// Insert a post stamped with the current time.
pub async fn insert_post(pool: &SqlitePool, post: &NewPost) -> sqlx::Result<String> {
    insert_post_at(pool, post, &now_timestamp()).await
}

/// Insert a post with an explicit creation timestamp.
pub async fn insert_post_at(
    pool: &SqlitePool,
    post: &NewPost,
    created_at: &str,
) -> sqlx::Result<String> {
    let id = new_id();
    sqlx::query(
        r"
        INSERT INTO posts (id, board_id, title, description, author_email, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(&id)
    .bind(&post.board_id)
    .bind(&post.title)
    .bind(&post.description)
    .bind(&post.author_email)
    .bind(post.status.as_str())
    .bind(created_at)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Mark a post as a duplicate of another.
pub async fn mark_duplicate(pool: &SqlitePool, post_id: &str, original_id: &str) -> sqlx::Result<()> {
    sqlx::query("UPDATE posts SET duplicate_of = ? WHERE id = ?")
        .bind(original_id)
        .bind(post_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_comment(
    pool: &SqlitePool,
    post_id: &str,
    author_email: Option<&str>,
    body: &str,
) -> sqlx::Result<String> {
    let id = new_id();
    sqlx::query("INSERT INTO comments (id, post_id, author_email, body) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(post_id)
        .bind(author_email)
        .bind(body)
        .execute(pool)
        .await?;
    Ok(id)
}

/// List posts for a board with vote and comment counts.
pub async fn list_posts(pool: &SqlitePool, query: &PostQuery) -> sqlx::Result<Vec<PostRow>> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        r"
        SELECT p.id, p.title, p.description, p.author_email, p.status, p.created_at,
               (SELECT COUNT(*) FROM votes v WHERE v.post_id = p.id) AS vote_count,
               (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
        FROM posts p
        WHERE p.board_id = ",
    );
    builder.push_bind(query.board_id.clone());

    if query.exclude_duplicates {
        builder.push(" AND p.duplicate_of IS NULL");
    }

    if let Some(status) = query.status {
        builder.push(" AND p.status = ");
        builder.push_bind(status.as_str());
    }

    if let Some(order) = query.order {
        let direction = if order.ascending { "ASC" } else { "DESC" };
        builder.push(format!(" ORDER BY {} {direction}", order.column.as_str()));
    }

    builder.build_query_as::<PostRow>().fetch_all(pool).await
}

/// Add or remove a user's vote. Returns the new count and whether the user
/// now has a vote on the post.
pub async fn toggle_vote(
    pool: &SqlitePool,
    post_id: &str,
    user_id: &str,
) -> sqlx::Result<(i64, bool)> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM votes WHERE post_id = ? AND user_id = ?")
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let voted = if deleted == 0 {
        sqlx::query("INSERT INTO votes (id, post_id, user_id) VALUES (?, ?, ?)")
            .bind(new_id())
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        true
    } else {
        false
    };

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes WHERE post_id = ?")
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok((count, voted))
}

pub async fn create_user(pool: &SqlitePool, email: Option<&str>) -> sqlx::Result<String> {
    let id = new_id();
    sqlx::query("INSERT INTO users (id, email) VALUES (?, ?)")
        .bind(&id)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(id)
}

/// Create a session token valid for `ttl`.
pub async fn create_session(
    pool: &SqlitePool,
    user_id: &str,
    ttl: Duration,
) -> sqlx::Result<String> {
    let token = new_id();
    let expires_at = (Utc::now() + ttl).to_rfc3339_opts(SecondsFormat::Secs, true);
    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Look up the user owning an unexpired session.
pub async fn get_user_by_session(pool: &SqlitePool, token: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as(
        r"
        SELECT u.id, u.email
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ? AND s.expires_at > ?
        ",
    )
    .bind(token)
    .bind(now_timestamp())
    .fetch_optional(pool)
    .await
}

pub async fn delete_session(pool: &SqlitePool, token: &str) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}
