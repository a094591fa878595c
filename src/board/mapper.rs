//! Conversion from backend rows to display posts.

use super::models::{AggregateCount, Post, RawPost};

/// Flatten an aggregate array to its first count, or 0 when missing.
fn first_count(aggregate: Option<&[AggregateCount]>) -> i64 {
    aggregate
        .and_then(<[AggregateCount]>::first)
        .map_or(0, |row| row.count)
}

/// Map a backend row to a display post.
///
/// Never fails: missing aggregates become 0. `user_voted` is always false
/// because the listing query does not join the viewer's votes.
#[must_use]
pub fn map_post(raw: RawPost) -> Post {
    let vote_count = first_count(raw.votes.as_deref());
    let comment_count = first_count(raw.comments.as_deref());

    Post {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        author_email: raw.author_email,
        status: raw.status,
        created_at: raw.created_at,
        vote_count,
        comment_count,
        user_voted: false,
    }
}

/// Map a whole page of rows, keeping backend order.
#[must_use]
pub fn map_posts(rows: Vec<RawPost>) -> Vec<Post> {
    rows.into_iter().map(map_post).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::models::PostStatus;

    fn raw(votes: Option<Vec<AggregateCount>>, comments: Option<Vec<AggregateCount>>) -> RawPost {
        RawPost {
            id: "p1".to_string(),
            title: "Dark mode".to_string(),
            description: Some("Please".to_string()),
            author_email: Some("a@example.com".to_string()),
            status: PostStatus::Planned,
            created_at: "2024-03-01T10:00:00Z".to_string(),
            votes,
            comments,
        }
    }

    #[test]
    fn takes_first_aggregate_count() {
        let post = map_post(raw(
            Some(vec![AggregateCount { count: 7 }, AggregateCount { count: 99 }]),
            Some(vec![AggregateCount { count: 2 }]),
        ));
        assert_eq!(post.vote_count, 7);
        assert_eq!(post.comment_count, 2);
    }

    #[test]
    fn absent_or_empty_aggregates_are_zero() {
        let absent = map_post(raw(None, None));
        assert_eq!((absent.vote_count, absent.comment_count), (0, 0));

        let empty = map_post(raw(Some(vec![]), Some(vec![])));
        assert_eq!((empty.vote_count, empty.comment_count), (0, 0));
    }

    #[test]
    fn user_voted_is_always_false() {
        let post = map_post(raw(Some(vec![AggregateCount { count: 1 }]), None));
        assert!(!post.user_voted);
    }

    #[test]
    fn scalar_fields_carry_through() {
        let post = map_post(raw(None, None));
        assert_eq!(post.id, "p1");
        assert_eq!(post.title, "Dark mode");
        assert_eq!(post.description.as_deref(), Some("Please"));
        assert_eq!(post.author_email.as_deref(), Some("a@example.com"));
        assert_eq!(post.status, PostStatus::Planned);
        assert_eq!(post.created_at, "2024-03-01T10:00:00Z");
    }

    #[test]
    fn map_posts_keeps_order() {
        let mut second = raw(None, None);
        second.id = "p2".to_string();
        let posts = map_posts(vec![raw(None, None), second]);
        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2"]);
    }
}
