//! Vote toggle rendered as a small POST form.

use maud::{html, Markup, Render};

/// Upvote button showing the current count.
///
/// Posts to `action`; the handler toggles the vote and renders the board again.
#[derive(Debug, Clone)]
pub struct VoteButton<'a> {
    pub action: &'a str,
    pub vote_count: i64,
    pub voted: bool,
}

impl<'a> VoteButton<'a> {
    #[must_use]
    pub const fn new(action: &'a str, vote_count: i64, voted: bool) -> Self {
        Self {
            action,
            vote_count,
            voted,
        }
    }
}

impl Render for VoteButton<'_> {
    fn render(&self) -> Markup {
        let label = if self.voted { "Remove vote" } else { "Upvote" };
        let pressed = if self.voted { "true" } else { "false" };

        html! {
            form class="vote" action=(self.action) method="post" {
                button.vote-button.voted[self.voted]
                    type="submit"
                    aria-pressed=(pressed)
                    aria-label=(label)
                    title=(label)
                {
                    span class="vote-arrow" { "\u{25B2}" }
                    span class="vote-count" { (self.vote_count) }
                }
            }
        }
    }
}
