//! Roadmap: planned, in-progress and shipped posts side by side.

use maud::{html, Markup, Render};

use crate::board::{PageState, PostStatus, Toast, User};
use crate::components::{BaseLayout, PostCard};

/// Statuses shown as roadmap columns, in order.
pub const ROADMAP_COLUMNS: [PostStatus; 3] =
    [PostStatus::Planned, PostStatus::InProgress, PostStatus::Done];

#[must_use]
pub fn render_roadmap_page(state: &PageState, user: Option<&User>, toasts: &[Toast]) -> Markup {
    let name = state
        .project
        .as_ref()
        .map_or(state.slug.as_str(), |p| p.name.as_str());
    let title = format!("{name} roadmap");

    let content = html! {
        h1 { (title) }
        div class="roadmap" {
            @for status in ROADMAP_COLUMNS {
                (render_column(state, status))
            }
        }
    };

    BaseLayout::new(&title, user)
        .with_board(&state.slug)
        .with_toasts(toasts)
        .render(content)
}

fn render_column(state: &PageState, status: PostStatus) -> Markup {
    let posts: Vec<_> = state.posts.iter().filter(|p| p.status == status).collect();

    html! {
        section class={ "roadmap-column status-" (status.as_str()) } {
            h2 { (status.label()) " " small { "(" (posts.len()) ")" } }
            @if posts.is_empty() {
                p class="empty-state" { "Nothing here yet" }
            } @else {
                @for post in posts {
                    (PostCard::new(post, &state.slug).render())
                }
            }
        }
    }
}
