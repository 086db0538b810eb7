use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

id_type!(UserId);
id_type!(TweetId);
id_type!(CommentId);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub author_id: UserId,
    pub author_name: String,
    // NB: identifies the parent, does not own it
    pub tweet_id: TweetId,
}

impl Comment {
    pub fn new(id: CommentId, tweet_id: TweetId, author: &User, content: &str) -> Self {
        Self {
            id,
            content: content.to_string(),
            author_id: author.id,
            author_name: author.name.clone(),
            tweet_id,
        }
    }
}

/// A posted message together with its engagement (likes and comments).
///
/// Content fields are fixed at creation; only [likes] and [comments] grow afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: TweetId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Local>,
    /// One entry per like call; the same user may appear more than once.
    pub likes: Vec<UserId>,
    pub comments: Vec<Comment>,
}

impl Tweet {
    pub fn new(id: TweetId, author: &User, content: &str, created_at: DateTime<Local>) -> Self {
        Self {
            id,
            author_id: author.id,
            author_name: author.name.clone(),
            content: content.to_string(),
            created_at,
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn author(&self) -> User {
        User::new(self.author_id, &self.author_name)
    }
}

/// Shared handle to a stored tweet.  Cloning the handle never copies the tweet, so engagement
/// added through the store is visible to every holder.
pub type TweetRef = Arc<RwLock<Tweet>>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tweet_author_round_trip() {
        let alice = User::new(UserId(1), "Alice");
        let created_at = Local.with_ymd_and_hms(2025, 1, 30, 15, 4, 5).unwrap();
        let tweet = Tweet::new(TweetId(7), &alice, "Hi Followers!!!", created_at);
        assert_eq!(tweet.author(), alice);
        assert_eq!(tweet.like_count(), 0);
        assert!(tweet.comments.is_empty());
    }

    #[test]
    fn test_ids_display_as_plain_numbers() {
        assert_eq!(TweetId(42).to_string(), "42");
        assert_eq!(serde_json::to_string(&UserId(3)).unwrap(), "3");
    }
}
