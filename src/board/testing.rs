//! Test doubles shared by the board unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::models::{Board, NewPost, Project, RawPost, User, Viewer, VoteTally};
use crate::backend::{Backend, BackendError, PostQuery};

pub fn viewer() -> Viewer {
    Viewer {
        user: User {
            id: "u1".to_string(),
            email: Some("ann@example.com".to_string()),
        },
        access_token: "token".to_string(),
    }
}

/// Backend that records writes, or rejects every call.
#[derive(Default)]
pub struct WriteBackend {
    fail: bool,
    votes: Mutex<Vec<(String, String)>>,
    posts: Mutex<Vec<NewPost>>,
}

impl WriteBackend {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn votes(&self) -> Vec<(String, String)> {
        self.votes.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<NewPost> {
        self.posts.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.fail {
            return Err(BackendError::Query {
                status: 500,
                message: "permission denied".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for WriteBackend {
    async fn project_by_slug(&self, _: &str) -> Result<Option<Project>, BackendError> {
        self.check().map(|()| None)
    }

    async fn board_for_project(&self, _: &str) -> Result<Option<Board>, BackendError> {
        self.check().map(|()| None)
    }

    async fn list_posts(&self, _: &PostQuery) -> Result<Vec<RawPost>, BackendError> {
        self.check().map(|()| Vec::new())
    }

    async fn create_post(
        &self,
        post: &NewPost,
        _: Option<&Viewer>,
    ) -> Result<String, BackendError> {
        self.check()?;
        self.posts.lock().unwrap().push(post.clone());
        Ok("new-post".to_string())
    }

    async fn toggle_vote(&self, post_id: &str, viewer: &Viewer) -> Result<VoteTally, BackendError> {
        self.check()?;
        let mut votes = self.votes.lock().unwrap();
        votes.push((post_id.to_string(), viewer.user.id.clone()));
        Ok(VoteTally {
            vote_count: i64::try_from(votes.len()).unwrap_or(i64::MAX),
            user_voted: true,
        })
    }

    async fn current_user(&self, _: &str) -> Result<Option<User>, BackendError> {
        self.check().map(|()| None)
    }

    async fn sign_out(&self, _: &str) -> Result<(), BackendError> {
        self.check()
    }
}
