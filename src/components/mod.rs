//! Maud HTML template components for the web UI.
//!
//! - `layout`: Base page layout, navigation and toasts
//! - `badge`: Post status and comment count badges
//! - `button`: Configurable button and link-button components
//! - `alert`: Alert messages and the toast stack
//! - `card`: Post cards and empty states
//! - `form`: Form elements and input components
//! - `vote`: Upvote toggle
//!
//! # Example
//!
//! ```ignore
//! use maud::{html, Markup};
//! use crate::components::{BaseLayout, Alert, Input};
//!
//! fn my_page() -> Markup {
//!     let content = html! {
//!         (Alert::info("Pick a board"))
//!         (Input::text("slug").placeholder("acme"))
//!     };
//!     BaseLayout::new("Home", None).render(content)
//! }
//! ```

pub mod alert;
pub mod badge;
pub mod button;
pub mod card;
pub mod form;
pub mod layout;
pub mod vote;

pub use alert::{Alert, AlertVariant, ToastStack};
pub use badge::{CommentCount, StatusBadge};
pub use button::{Button, ButtonVariant};
pub use card::{EmptyState, PostCard};
pub use form::{Form, FormGroup, Input, Select, SelectOption, TextArea};
pub use layout::BaseLayout;
pub use vote::VoteButton;

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
