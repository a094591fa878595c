//! Board page state and its transitions.
//!
//! All page state lives in one [`PageState`] value. Every change is an
//! [`PageEvent`] fed through [`PageState::apply`], which returns the next
//! state plus the side effects (toasts, navigation, reloads) the caller has
//! to carry out.

use urlencoding::encode;

use super::models::{Post, Project, SortBy, StatusFilter};

pub const PROJECT_NOT_FOUND: &str = "Project not found";
pub const BOARD_NOT_FOUND: &str = "Board not found";
pub const POSTS_LOAD_FAILED: &str = "Error loading posts";
pub const LOAD_CRASHED: &str = "Something went wrong loading this board";
pub const BACKEND_MISSING: &str = "Database connection not configured";
pub const POST_SUBMITTED: &str = "Post submitted";
pub const POST_NOT_FOUND: &str = "Post not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Unknown kinds fall back to `info`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// A transient user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

/// Navigation targets reachable from the board page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Board { slug: String },
    Post { slug: String, post_id: String },
    Settings { slug: String },
    Roadmap { slug: String },
}

impl Route {
    #[must_use]
    pub fn href(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Board { slug } => format!("/b/{}", encode(slug)),
            Self::Post { slug, post_id } => {
                format!("/b/{}/posts/{}", encode(slug), encode(post_id))
            }
            Self::Settings { slug } => format!("/b/{}/settings", encode(slug)),
            Self::Roadmap { slug } => format!("/b/{}/roadmap", encode(slug)),
        }
    }

    /// URL that also carries a toast across a redirect.
    #[must_use]
    pub fn href_with_toast(&self, toast: &Toast) -> String {
        format!(
            "{}?toast={}&toast_kind={}",
            self.href(),
            encode(&toast.message),
            toast.kind.as_str()
        )
    }
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Toast(Toast),
    Navigate(Route),
    Reload,
}

/// Where the load sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStage {
    #[default]
    Idle,
    ResolvingProject,
    ResolvingBoard,
    LoadingPosts,
    Ready,
    Failed,
}

/// A vote result reported by the vote control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteChange {
    pub post_id: String,
    pub vote_count: i64,
    pub user_voted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SlugChanged(String),
    StatusFilterChanged(StatusFilter),
    SortChanged(SortBy),
    SearchChanged(String),

    LoadStarted { generation: u64 },
    BackendMissing { generation: u64 },
    ProjectResolved { generation: u64, project: Project },
    ProjectNotFound { generation: u64 },
    BoardResolved { generation: u64, board_id: String },
    BoardNotFound { generation: u64 },
    PostsLoaded { generation: u64, posts: Vec<Post> },
    PostsFailed { generation: u64 },
    LoadCrashed { generation: u64 },
    LoadFinished { generation: u64 },

    VoteChanged(VoteChange),
    Notify(Toast),
    SubmitFormOpened,
    SubmitFormClosed,
    PostSubmitted,
}

impl PageEvent {
    /// Generation of a load-sequence event, `None` for user events.
    const fn generation(&self) -> Option<u64> {
        match self {
            Self::LoadStarted { generation }
            | Self::BackendMissing { generation }
            | Self::ProjectResolved { generation, .. }
            | Self::ProjectNotFound { generation }
            | Self::BoardResolved { generation, .. }
            | Self::BoardNotFound { generation }
            | Self::PostsLoaded { generation, .. }
            | Self::PostsFailed { generation }
            | Self::LoadCrashed { generation }
            | Self::LoadFinished { generation } => Some(*generation),
            _ => None,
        }
    }
}

/// Result of applying an event.
#[derive(Debug)]
pub struct Transition {
    pub state: PageState,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageState {
    pub slug: String,
    pub project: Option<Project>,
    pub board_id: Option<String>,
    pub posts: Vec<Post>,
    pub loading: bool,
    /// Fatal page error shown inline instead of a toast.
    pub error: Option<String>,
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub sort_by: SortBy,
    pub stage: LoadStage,
    pub submit_form_open: bool,
    /// Generation of the most recently started load.
    pub generation: u64,
}

impl PageState {
    #[must_use]
    pub fn new(slug: &str, status_filter: StatusFilter, sort_by: SortBy) -> Self {
        Self {
            slug: slug.to_string(),
            status_filter,
            sort_by,
            loading: true,
            ..Self::default()
        }
    }

    /// The submission form can only be mounted once a board is known.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.board_id.is_some()
    }

    /// A post from the loaded listing.
    #[must_use]
    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    /// Votes are only accepted for posts the board just listed.
    #[must_use]
    pub fn accepts_vote(&self, post_id: &str) -> bool {
        self.stage == LoadStage::Ready && self.post(post_id).is_some()
    }

    /// Posts narrowed by the current search term.
    #[must_use]
    pub fn visible_posts(&self) -> Vec<&Post> {
        super::search::filter_posts(&self.posts, &self.search_term)
    }

    #[must_use]
    pub fn apply(self, event: PageEvent) -> Transition {
        if let Some(generation) = event.generation() {
            let stale = match event {
                PageEvent::LoadStarted { .. } => generation <= self.generation,
                _ => generation != self.generation,
            };
            if stale {
                tracing::debug!(
                    generation,
                    current = self.generation,
                    "Dropping stale load event"
                );
                return self.unchanged();
            }
        }

        let mut state = self;
        let mut effects = Vec::new();

        match event {
            PageEvent::SlugChanged(slug) => {
                if slug != state.slug {
                    state.slug = slug;
                    state.project = None;
                    state.board_id = None;
                    effects.push(Effect::Reload);
                }
            }
            PageEvent::StatusFilterChanged(filter) => {
                if filter != state.status_filter {
                    state.status_filter = filter;
                    effects.push(Effect::Reload);
                }
            }
            PageEvent::SortChanged(sort) => {
                if sort != state.sort_by {
                    state.sort_by = sort;
                    effects.push(Effect::Reload);
                }
            }
            PageEvent::SearchChanged(term) => state.search_term = term,

            PageEvent::LoadStarted { generation } => {
                state.generation = generation;
                state.loading = true;
                state.stage = LoadStage::ResolvingProject;
            }
            PageEvent::BackendMissing { .. } => {
                state.error = Some(BACKEND_MISSING.to_string());
                state.stage = LoadStage::Failed;
            }
            PageEvent::ProjectResolved { project, .. } => {
                state.project = Some(project);
                state.stage = LoadStage::ResolvingBoard;
            }
            PageEvent::ProjectNotFound { .. } => {
                state.stage = LoadStage::Failed;
                effects.push(Effect::Toast(Toast::error(PROJECT_NOT_FOUND)));
                effects.push(Effect::Navigate(Route::Home));
            }
            PageEvent::BoardResolved { board_id, .. } => {
                state.board_id = Some(board_id);
                state.stage = LoadStage::LoadingPosts;
            }
            PageEvent::BoardNotFound { .. } => {
                state.stage = LoadStage::Failed;
                effects.push(Effect::Toast(Toast::error(BOARD_NOT_FOUND)));
            }
            PageEvent::PostsLoaded { posts, .. } => {
                state.posts = posts;
                state.stage = LoadStage::Ready;
            }
            PageEvent::PostsFailed { .. } => {
                state.stage = LoadStage::Failed;
                effects.push(Effect::Toast(Toast::error(POSTS_LOAD_FAILED)));
            }
            PageEvent::LoadCrashed { .. } => {
                state.stage = LoadStage::Failed;
                effects.push(Effect::Toast(Toast::error(LOAD_CRASHED)));
            }
            PageEvent::LoadFinished { .. } => state.loading = false,

            PageEvent::VoteChanged(change) => {
                if let Some(post) = state.posts.iter_mut().find(|p| p.id == change.post_id) {
                    post.vote_count = change.vote_count;
                    post.user_voted = change.user_voted;
                }
            }
            PageEvent::Notify(toast) => effects.push(Effect::Toast(toast)),
            PageEvent::SubmitFormOpened => state.submit_form_open = state.can_submit(),
            PageEvent::SubmitFormClosed => state.submit_form_open = false,
            PageEvent::PostSubmitted => {
                state.submit_form_open = false;
                effects.push(Effect::Toast(Toast::success(POST_SUBMITTED)));
                effects.push(Effect::Reload);
            }
        }

        Transition { state, effects }
    }

    fn unchanged(self) -> Transition {
        Transition {
            state: self,
            effects: Vec::new(),
        }
    }
}
