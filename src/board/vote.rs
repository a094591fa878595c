//! Vote control: persists a vote toggle and reports back to the page.

use tracing::{error, info};

use super::models::Viewer;
use super::state::{PageEvent, Toast, VoteChange};
use crate::backend::Backend;

pub const SIGN_IN_TO_VOTE: &str = "Sign in to vote";
pub const VOTE_FAILED: &str = "Failed to update vote";

/// Toggle the viewer's vote on a post.
///
/// Returns the event the page should apply: a [`PageEvent::VoteChanged`]
/// patch on success, otherwise a notification request.
pub async fn cast_vote(
    backend: &dyn Backend,
    post_id: &str,
    viewer: Option<&Viewer>,
) -> PageEvent {
    let Some(viewer) = viewer else {
        return PageEvent::Notify(Toast::info(SIGN_IN_TO_VOTE));
    };

    match backend.toggle_vote(post_id, viewer).await {
        Ok(tally) => {
            info!(
                post_id,
                user_id = %viewer.user.id,
                vote_count = tally.vote_count,
                voted = tally.user_voted,
                "Vote toggled"
            );
            PageEvent::VoteChanged(VoteChange {
                post_id: post_id.to_string(),
                vote_count: tally.vote_count,
                user_voted: tally.user_voted,
            })
        }
        Err(e) => {
            error!(post_id, error = %e, "Failed to toggle vote");
            PageEvent::Notify(Toast::error(VOTE_FAILED))
        }
    }
}
