//! Post cards and the empty-list placeholder.

use chrono::DateTime;
use maud::{html, Markup, Render};

use super::badge::{CommentCount, StatusBadge};
use super::vote::VoteButton;
use crate::board::{Post, Route};

const EXCERPT_CHARS: usize = 200;

/// Shorten `text` to at most `max` characters, adding an ellipsis when cut.
#[must_use]
pub fn excerpt(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}\u{2026}", text[..idx].trim_end()),
        None => text.to_string(),
    }
}

/// Render a stored timestamp as a short date, or as-is if it doesn't parse.
#[must_use]
pub fn display_date(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

/// A single post in the board list.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub post: &'a Post,
    pub slug: &'a str,
    /// Query string (with leading `?`) preserved across the vote redirect
    pub return_query: &'a str,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub const fn new(post: &'a Post, slug: &'a str) -> Self {
        Self {
            post,
            slug,
            return_query: "",
        }
    }

    #[must_use]
    pub const fn return_query(mut self, query: &'a str) -> Self {
        self.return_query = query;
        self
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let href = Route::Post {
            slug: self.slug.to_string(),
            post_id: post.id.clone(),
        }
        .href();
        let vote_action = format!("{href}/vote{}", self.return_query);

        html! {
            article class="post-card" id={ "post-" (post.id) } {
                (VoteButton::new(&vote_action, post.vote_count, post.user_voted))
                div class="post-body" {
                    h3 class="post-title" {
                        a href=(href) { (post.title) }
                    }
                    @if let Some(description) = post.description.as_deref().filter(|d| !d.is_empty()) {
                        p class="post-excerpt" { (excerpt(description, EXCERPT_CHARS)) }
                    }
                    footer class="post-meta" {
                        (StatusBadge::new(post.status))
                        " "
                        (CommentCount(post.comment_count))
                        @if let Some(author) = &post.author_email {
                            " \u{00B7} "
                            span class="post-author" { (author) }
                        }
                        " \u{00B7} "
                        time datetime=(post.created_at) { (display_date(&post.created_at)) }
                    }
                }
            }
        }
    }
}

/// Placeholder shown when the list has nothing to display.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub message: &'a str,
    pub hint: Option<&'a str>,
}

impl EmptyState<'static> {
    /// The board has no posts at all.
    #[must_use]
    pub const fn no_posts() -> Self {
        Self {
            message: "No posts yet",
            hint: Some("Be the first to share an idea."),
        }
    }

    /// Posts exist but none match the search term.
    #[must_use]
    pub const fn no_matches() -> Self {
        Self {
            message: "No posts match your search",
            hint: Some("Try a different search term or filter."),
        }
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="empty-state" {
                p { strong { (self.message) } }
                @if let Some(hint) = self.hint {
                    p { small { (hint) } }
                }
            }
        }
    }
}
