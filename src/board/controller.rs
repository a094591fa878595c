//! Board page controller: runs the load sequence and routes events.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::mapper::map_posts;
use super::models::{Board, Project, SortBy, StatusFilter};
use super::state::{Effect, PageEvent, PageState};
use crate::backend::{Backend, BackendError, PostQuery};

/// Inputs of one run of the load sequence.
#[derive(Debug, Clone)]
struct LoadRequest {
    generation: u64,
    slug: String,
    status_filter: StatusFilter,
    sort_by: SortBy,
}

/// Stages of the load sequence. Each stage carries what the next needs.
enum Step {
    ResolvingProject,
    ResolvingBoard(Project),
    LoadingPosts(Board),
    Done,
}

/// Resolve project, then board, then posts, one after the other.
///
/// Returns the events describing what happened, in order.
async fn run_load(backend: &dyn Backend, request: &LoadRequest) -> Vec<PageEvent> {
    let generation = request.generation;
    let mut events = Vec::new();
    let mut step = Step::ResolvingProject;

    loop {
        step = match step {
            Step::ResolvingProject => match backend.project_by_slug(&request.slug).await {
                Ok(Some(project)) => {
                    events.push(PageEvent::ProjectResolved {
                        generation,
                        project: project.clone(),
                    });
                    Step::ResolvingBoard(project)
                }
                Ok(None) => {
                    debug!(slug = %request.slug, "No project with this slug");
                    events.push(PageEvent::ProjectNotFound { generation });
                    Step::Done
                }
                Err(e) if e.is_unexpected() => {
                    events.push(crashed(generation, &e));
                    Step::Done
                }
                Err(e) => {
                    warn!(slug = %request.slug, error = %e, "Project lookup failed");
                    events.push(PageEvent::ProjectNotFound { generation });
                    Step::Done
                }
            },
            Step::ResolvingBoard(project) => match backend.board_for_project(&project.id).await {
                Ok(Some(board)) => {
                    events.push(PageEvent::BoardResolved {
                        generation,
                        board_id: board.id.clone(),
                    });
                    Step::LoadingPosts(board)
                }
                Ok(None) => {
                    debug!(project_id = %project.id, "Project has no board");
                    events.push(PageEvent::BoardNotFound { generation });
                    Step::Done
                }
                Err(e) if e.is_unexpected() => {
                    events.push(crashed(generation, &e));
                    Step::Done
                }
                Err(e) => {
                    warn!(project_id = %project.id, error = %e, "Board lookup failed");
                    events.push(PageEvent::BoardNotFound { generation });
                    Step::Done
                }
            },
            Step::LoadingPosts(board) => {
                let query = PostQuery::for_board(&board.id, request.status_filter, request.sort_by);
                match backend.list_posts(&query).await {
                    Ok(rows) => {
                        debug!(board_id = %board.id, count = rows.len(), "Posts loaded");
                        events.push(PageEvent::PostsLoaded {
                            generation,
                            posts: map_posts(rows),
                        });
                    }
                    Err(e) if e.is_unexpected() => events.push(crashed(generation, &e)),
                    Err(e) => {
                        error!(board_id = %board.id, error = %e, "Error loading posts");
                        events.push(PageEvent::PostsFailed { generation });
                    }
                }
                Step::Done
            }
            Step::Done => break,
        };
    }

    events
}

fn crashed(generation: u64, e: &BackendError) -> PageEvent {
    error!(error = %e, "Unexpected failure while loading board");
    PageEvent::LoadCrashed { generation }
}

/// Drives a single board page.
pub struct BoardPage {
    backend: Option<Arc<dyn Backend>>,
    state: PageState,
    effects: Vec<Effect>,
}

impl BoardPage {
    /// `backend` is `None` when no database connection is configured.
    #[must_use]
    pub fn new(
        backend: Option<Arc<dyn Backend>>,
        slug: &str,
        status_filter: StatusFilter,
        sort_by: SortBy,
    ) -> Self {
        Self {
            backend,
            state: PageState::new(slug, status_filter, sort_by),
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PageState {
        &self.state
    }

    /// Drain pending toasts and navigation requests.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Apply an event, running the load sequence if it asks for a reload.
    pub async fn dispatch(&mut self, event: PageEvent) {
        if self.apply(event) {
            self.load().await;
        }
    }

    /// Run the load sequence for the current slug, filter and sort.
    pub async fn load(&mut self) {
        let generation = self.state.generation + 1;
        self.apply(PageEvent::LoadStarted { generation });

        let events = match &self.backend {
            None => vec![PageEvent::BackendMissing { generation }],
            Some(backend) => {
                let request = LoadRequest {
                    generation,
                    slug: self.state.slug.clone(),
                    status_filter: self.state.status_filter,
                    sort_by: self.state.sort_by,
                };
                run_load(backend.as_ref(), &request).await
            }
        };

        for event in events {
            self.apply(event);
        }
        self.apply(PageEvent::LoadFinished { generation });
    }

    /// Apply an event, queueing its effects. Returns whether a reload was
    /// requested.
    fn apply(&mut self, event: PageEvent) -> bool {
        let transition = std::mem::take(&mut self.state).apply(event);
        self.state = transition.state;

        let mut reload = false;
        for effect in transition.effects {
            match effect {
                Effect::Reload => reload = true,
                other => self.effects.push(other),
            }
        }
        reload
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::board::models::{
        AggregateCount, NewPost, PostStatus, RawPost, User, Viewer, VoteTally,
    };
    use crate::board::state::{
        LoadStage, Route, Toast, BACKEND_MISSING, BOARD_NOT_FOUND, LOAD_CRASHED,
        POSTS_LOAD_FAILED, PROJECT_NOT_FOUND,
    };

    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Outcome {
        Found,
        Missing,
        QueryError,
        Unexpected,
    }

    fn failure(outcome: Outcome) -> BackendError {
        match outcome {
            Outcome::Unexpected => BackendError::Decode("connection reset".to_string()),
            _ => BackendError::Query {
                status: 400,
                message: "bad request".to_string(),
            },
        }
    }

    /// Scripted backend that records the post queries it receives.
    struct FakeBackend {
        project: Outcome,
        board: Outcome,
        posts: Outcome,
        queries: Mutex<Vec<PostQuery>>,
    }

    impl FakeBackend {
        fn new(project: Outcome, board: Outcome, posts: Outcome) -> Arc<Self> {
            Arc::new(Self {
                project,
                board,
                posts,
                queries: Mutex::new(Vec::new()),
            })
        }

        fn queries(&self) -> Vec<PostQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>, BackendError> {
            match self.project {
                Outcome::Found => Ok(Some(Project {
                    id: "proj-1".to_string(),
                    name: "Acme".to_string(),
                    slug: slug.to_string(),
                })),
                Outcome::Missing => Ok(None),
                other => Err(failure(other)),
            }
        }

        async fn board_for_project(&self, _: &str) -> Result<Option<Board>, BackendError> {
            match self.board {
                Outcome::Found => Ok(Some(Board {
                    id: "board-1".to_string(),
                })),
                Outcome::Missing => Ok(None),
                other => Err(failure(other)),
            }
        }

        async fn list_posts(&self, query: &PostQuery) -> Result<Vec<RawPost>, BackendError> {
            self.queries.lock().unwrap().push(query.clone());
            match self.posts {
                Outcome::Found | Outcome::Missing => Ok(vec![RawPost {
                    id: "p1".to_string(),
                    title: "Dark mode".to_string(),
                    description: None,
                    author_email: None,
                    status: PostStatus::Open,
                    created_at: "2024-01-01T00:00:00Z".to_string(),
                    votes: Some(vec![AggregateCount { count: 3 }]),
                    comments: None,
                }]),
                other => Err(failure(other)),
            }
        }

        async fn create_post(
            &self,
            _: &NewPost,
            _: Option<&Viewer>,
        ) -> Result<String, BackendError> {
            Ok("new".to_string())
        }

        async fn toggle_vote(&self, _: &str, _: &Viewer) -> Result<VoteTally, BackendError> {
            Ok(VoteTally {
                vote_count: 1,
                user_voted: true,
            })
        }

        async fn current_user(&self, _: &str) -> Result<Option<User>, BackendError> {
            Ok(None)
        }

        async fn sign_out(&self, _: &str) -> Result<(), BackendError> {
            Ok(())
        }
    }

    fn page(backend: Arc<FakeBackend>, filter: StatusFilter, sort: SortBy) -> BoardPage {
        BoardPage::new(Some(backend as Arc<dyn Backend>), "acme", filter, sort)
    }

    #[tokio::test]
    async fn successful_load_maps_posts() {
        let backend = FakeBackend::new(Outcome::Found, Outcome::Found, Outcome::Found);
        let mut page = page(backend.clone(), StatusFilter::All, SortBy::Votes);
        page.load().await;

        let state = page.state();
        assert_eq!(state.stage, LoadStage::Ready);
        assert!(!state.loading);
        assert_eq!(state.board_id.as_deref(), Some("board-1"));
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.posts[0].vote_count, 3);
        assert_eq!(state.posts[0].comment_count, 0);
        assert!(page.take_effects().is_empty());

        let queries = backend.queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].exclude_duplicates);
        assert_eq!(queries[0].board_id, "board-1");
    }

    #[tokio::test]
    async fn missing_project_navigates_home_without_querying_posts() {
        let backend = FakeBackend::new(Outcome::Missing, Outcome::Found, Outcome::Found);
        let mut page = page(backend.clone(), StatusFilter::All, SortBy::Votes);
        page.load().await;

        assert_eq!(
            page.take_effects(),
            vec![
                Effect::Toast(Toast::error(PROJECT_NOT_FOUND)),
                Effect::Navigate(Route::Home)
            ]
        );
        assert!(backend.queries().is_empty());
        assert!(!page.state().loading);
    }

    #[tokio::test]
    async fn project_query_error_counts_as_not_found() {
        let backend = FakeBackend::new(Outcome::QueryError, Outcome::Found, Outcome::Found);
        let mut page = page(backend.clone(), StatusFilter::All, SortBy::Votes);
        page.load().await;

        assert!(page
            .take_effects()
            .contains(&Effect::Toast(Toast::error(PROJECT_NOT_FOUND))));
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn missing_board_keeps_project_and_skips_posts() {
        let backend = FakeBackend::new(Outcome::Found, Outcome::Missing, Outcome::Found);
        let mut page = page(backend.clone(), StatusFilter::All, SortBy::Votes);
        page.load().await;

        assert_eq!(
            page.take_effects(),
            vec![Effect::Toast(Toast::error(BOARD_NOT_FOUND))]
        );
        assert!(page.state().project.is_some());
        assert!(page.state().board_id.is_none());
        assert!(!page.state().can_submit());
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn posts_error_toasts_and_clears_loading() {
        let backend = FakeBackend::new(Outcome::Found, Outcome::Found, Outcome::QueryError);
        let mut page = page(backend, StatusFilter::All, SortBy::Votes);
        page.load().await;

        assert_eq!(
            page.take_effects(),
            vec![Effect::Toast(Toast::error(POSTS_LOAD_FAILED))]
        );
        assert!(page.state().posts.is_empty());
        assert!(!page.state().loading);
    }

    #[tokio::test]
    async fn unexpected_failure_gets_generic_toast() {
        let backend = FakeBackend::new(Outcome::Unexpected, Outcome::Found, Outcome::Found);
        let mut page = page(backend, StatusFilter::All, SortBy::Votes);
        page.load().await;

        assert_eq!(
            page.take_effects(),
            vec![Effect::Toast(Toast::error(LOAD_CRASHED))]
        );
        assert!(!page.state().loading);
    }

    #[tokio::test]
    async fn missing_backend_is_inline_error() {
        let mut page = BoardPage::new(None, "acme", StatusFilter::All, SortBy::Votes);
        page.load().await;

        assert_eq!(page.state().error.as_deref(), Some(BACKEND_MISSING));
        assert!(page.take_effects().is_empty());
        assert!(!page.state().loading);
    }

    #[tokio::test]
    async fn status_filter_and_sort_reach_the_query() {
        let backend = FakeBackend::new(Outcome::Found, Outcome::Found, Outcome::Found);
        let mut page = page(
            backend.clone(),
            StatusFilter::Only(PostStatus::Planned),
            SortBy::Newest,
        );
        page.load().await;
        page.dispatch(PageEvent::SortChanged(SortBy::Oldest)).await;

        let queries = backend.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].status, Some(PostStatus::Planned));
        assert_eq!(
            queries[0].order,
            PostQuery::for_board("board-1", StatusFilter::All, SortBy::Newest).order
        );
        assert_eq!(
            queries[1].order,
            PostQuery::for_board("board-1", StatusFilter::All, SortBy::Oldest).order
        );
    }

    #[tokio::test]
    async fn submission_triggers_full_reload() {
        let backend = FakeBackend::new(Outcome::Found, Outcome::Found, Outcome::Found);
        let mut page = page(backend.clone(), StatusFilter::All, SortBy::Votes);
        page.load().await;
        page.dispatch(PageEvent::SubmitFormOpened).await;
        assert!(page.state().submit_form_open);

        page.dispatch(PageEvent::PostSubmitted).await;

        assert_eq!(backend.queries().len(), 2);
        assert!(!page.state().submit_form_open);
        assert_eq!(page.state().generation, 2);
    }

    #[tokio::test]
    async fn search_is_local() {
        let backend = FakeBackend::new(Outcome::Found, Outcome::Found, Outcome::Found);
        let mut page = page(backend.clone(), StatusFilter::All, SortBy::Votes);
        page.load().await;
        page.dispatch(PageEvent::SearchChanged("nothing".to_string())).await;

        assert_eq!(backend.queries().len(), 1);
        assert!(page.state().visible_posts().is_empty());
        assert_eq!(page.state().posts.len(), 1);
    }
}
