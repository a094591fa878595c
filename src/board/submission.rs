//! Post submission form handling.

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use super::models::{NewPost, PostStatus, User, Viewer};
use crate::backend::Backend;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Title must be at most {} characters", MAX_TITLE_LEN)]
    TitleTooLong,
    #[error("Description must be at most {} characters", MAX_DESCRIPTION_LEN)]
    DescriptionTooLong,
    #[error("Failed to submit post")]
    Backend,
}

/// Raw form fields as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl SubmissionForm {
    /// Validate and turn the form into a post for `board_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank or a field is too long.
    pub fn into_new_post(
        self,
        board_id: &str,
        author: Option<&User>,
    ) -> Result<NewPost, SubmissionError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(SubmissionError::MissingTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(SubmissionError::TitleTooLong);
        }

        let description = self.description.trim();
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(SubmissionError::DescriptionTooLong);
        }

        Ok(NewPost {
            board_id: board_id.to_string(),
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            author_email: author.and_then(|u| u.email.clone()),
            status: PostStatus::Open,
        })
    }
}

/// Validate and persist a submission. Returns the new post id.
///
/// # Errors
///
/// Returns a validation error, or [`SubmissionError::Backend`] if the
/// backend rejects the insert.
pub async fn submit_post(
    backend: &dyn Backend,
    board_id: &str,
    form: SubmissionForm,
    viewer: Option<&Viewer>,
) -> Result<String, SubmissionError> {
    let post = form.into_new_post(board_id, viewer.map(|v| &v.user))?;

    match backend.create_post(&post, viewer).await {
        Ok(id) => {
            info!(post_id = %id, board_id, "Post submitted");
            Ok(id)
        }
        Err(e) => {
            error!(board_id, error = %e, "Failed to create post");
            Err(SubmissionError::Backend)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::testing::{viewer, WriteBackend};

    fn form(title: &str, description: &str) -> SubmissionForm {
        SubmissionForm {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn trims_and_defaults_to_open() {
        let user = User {
            id: "u1".to_string(),
            email: Some("me@example.com".to_string()),
        };
        let post = form("  Dark mode  ", "  ")
            .into_new_post("b1", Some(&user))
            .unwrap();

        assert_eq!(post.title, "Dark mode");
        assert_eq!(post.description, None);
        assert_eq!(post.author_email.as_deref(), Some("me@example.com"));
        assert_eq!(post.status, PostStatus::Open);
        assert_eq!(post.board_id, "b1");
    }

    #[test]
    fn rejects_blank_title() {
        assert_eq!(
            form("   ", "body").into_new_post("b1", None),
            Err(SubmissionError::MissingTitle)
        );
    }

    #[test]
    fn rejects_long_fields() {
        let long_title = "x".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(
            form(&long_title, "").into_new_post("b1", None),
            Err(SubmissionError::TitleTooLong)
        );

        let long_body = "y".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(
            form("ok", &long_body).into_new_post("b1", None),
            Err(SubmissionError::DescriptionTooLong)
        );
    }

    #[tokio::test]
    async fn submit_persists_as_viewer() {
        let backend = WriteBackend::working();
        let id = submit_post(&backend, "b1", form("Dark mode", ""), Some(&viewer()))
            .await
            .unwrap();

        assert_eq!(id, "new-post");
        let posts = backend.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author_email.as_deref(), Some("ann@example.com"));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let backend = WriteBackend::working();
        let err = submit_post(&backend, "b1", form(" ", ""), None).await;

        assert_eq!(err, Err(SubmissionError::MissingTitle));
        assert!(backend.posts().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_is_reported() {
        let backend = WriteBackend::failing();
        let err = submit_post(&backend, "b1", form("Dark mode", ""), None).await;

        assert_eq!(err, Err(SubmissionError::Backend));
        assert_eq!(err.unwrap_err().to_string(), "Failed to submit post");
    }

    #[test]
    fn anonymous_submission_has_no_author() {
        let post = form("Export", "CSV please").into_new_post("b1", None).unwrap();
        assert_eq!(post.author_email, None);
        assert_eq!(post.description.as_deref(), Some("CSV please"));
    }
}
