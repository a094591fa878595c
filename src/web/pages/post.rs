//! Single post view.

use maud::{html, Markup};

use crate::board::{PageState, Post, Route, Toast, User};
use crate::components::card::display_date;
use crate::components::{BaseLayout, CommentCount, StatusBadge, VoteButton};

#[must_use]
pub fn render_post_page(
    state: &PageState,
    post: &Post,
    user: Option<&User>,
    toasts: &[Toast],
) -> Markup {
    let board_name = state
        .project
        .as_ref()
        .map_or(state.slug.as_str(), |p| p.name.as_str());
    let board_href = Route::Board {
        slug: state.slug.clone(),
    }
    .href();
    let vote_action = format!(
        "{}/vote",
        Route::Post {
            slug: state.slug.clone(),
            post_id: post.id.clone(),
        }
        .href()
    );

    let content = html! {
        p class="breadcrumb" {
            a href=(board_href) { "\u{2190} " (board_name) }
        }
        article class="post-detail" id={ "post-" (post.id) } {
            (VoteButton::new(&vote_action, post.vote_count, post.user_voted))
            div class="post-body" {
                h1 class="post-title" { (post.title) }
                p class="post-meta" {
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
                @match post.description.as_deref().filter(|d| !d.is_empty()) {
                    Some(description) => {
                        p class="post-description" { (description) }
                    }
                    None => {
                        p class="post-description empty" { "No description." }
                    }
                }
            }
        }
    };

    BaseLayout::new(&post.title, user)
        .with_board(&state.slug)
        .with_toasts(toasts)
        .render(content)
}
