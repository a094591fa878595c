//! Badge components for post status and counts.

use maud::{html, Markup, Render};

use crate::board::PostStatus;

/// A status badge showing where a post is in the workflow.
#[derive(Debug, Clone, Copy)]
pub struct StatusBadge {
    pub status: PostStatus,
}

impl StatusBadge {
    #[must_use]
    pub const fn new(status: PostStatus) -> Self {
        Self { status }
    }

    /// Get the CSS class for this status.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.status {
            PostStatus::Open => "status-open",
            PostStatus::Planned => "status-planned",
            PostStatus::InProgress => "status-in-progress",
            PostStatus::Done => "status-done",
            PostStatus::Declined => "status-declined",
        }
    }
}

impl Render for StatusBadge {
    fn render(&self) -> Markup {
        html! {
            span class={ "badge " (self.css_class()) } {
                (self.status.label())
            }
        }
    }
}

/// Comment count indicator.
#[derive(Debug, Clone, Copy)]
pub struct CommentCount(pub i64);

impl Render for CommentCount {
    fn render(&self) -> Markup {
        let label = if self.0 == 1 { "comment" } else { "comments" };
        html! {
            span class="comment-count" title="Comments" {
                "\u{1F4AC} " (self.0) " " (label)
            }
        }
    }
}
