//! Page templates, rendered with maud components.

pub mod board;
pub mod home;
pub mod post;
pub mod roadmap;
pub mod settings;

pub use board::{render_board_page, view_query, BoardPageParams};
pub use home::render_home;
pub use post::render_post_page;
pub use roadmap::render_roadmap_page;
pub use settings::render_settings_page;
