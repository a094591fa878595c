//! Client-side text search over an already fetched page of posts.

use super::models::Post;

/// Posts whose title or description contains `term`, ignoring case.
///
/// An empty term matches everything. Order is preserved and the input is
/// left untouched.
#[must_use]
pub fn filter_posts<'a>(posts: &'a [Post], term: &str) -> Vec<&'a Post> {
    if term.is_empty() {
        return posts.iter().collect();
    }

    let needle = term.to_lowercase();
    posts.iter().filter(|post| matches(post, &needle)).collect()
}

fn matches(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}
