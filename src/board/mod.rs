//! The feedback board page: data model, load sequence and page state.

pub mod controller;
pub mod mapper;
pub mod models;
pub mod search;
pub mod state;
pub mod submission;
#[cfg(test)]
pub(crate) mod testing;
pub mod vote;

pub use controller::BoardPage;
pub use models::{
    Board, NewPost, Post, PostStatus, Project, RawPost, SortBy, StatusFilter, User,
    Viewer,
};
pub use state::{Effect, LoadStage, PageEvent, PageState, Route, Toast, ToastKind};
