use crate::api::{Comment, Tweet, TweetId, TweetRef, UserId};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

// NB: all the synchronization and interior mutability are encapsulated here, so every method
// takes &self.  The keyed collection has one lock (writers serialized, readers shared) and each
// tweet has its own, which is what lets a snapshot share live engagement with the store.

/// Point-in-time copy of the id -> tweet association.  Membership is frozen when the snapshot is
/// taken; the tweets themselves are shared with the store.
pub type Snapshot = BTreeMap<TweetId, TweetRef>;

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub struct TweetStore {
    tweets: RwLock<HashMap<TweetId, TweetRef>>,
}

impl TweetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a fully formed tweet under its own id.  An id that is already taken is rejected and
    /// the existing tweet is kept.
    pub fn post(&self, tweet: Tweet) -> Result<TweetId> {
        let mut tweets = write(&self.tweets);
        let id = tweet.id;
        if tweets.contains_key(&id) {
            return Err(Error::DuplicateTweet(id));
        }
        info!(tweet_id = %id, "{} tweeted: {}", tweet.author_name, tweet.content);
        tweets.insert(id, Arc::new(RwLock::new(tweet)));
        Ok(id)
    }

    /// Not idempotent: every call appends another entry.
    pub fn like(&self, tweet_id: TweetId, liker_id: UserId, liker_name: &str) -> Result<()> {
        let tweet = self.get(tweet_id).ok_or(Error::TweetNotFound(tweet_id))?;
        let mut tweet = write(&tweet);
        tweet.likes.push(liker_id);
        info!(
            tweet_id = %tweet_id,
            "{liker_name} liked the tweet '{}' by {}", tweet.content, tweet.author_name
        );
        Ok(())
    }

    pub fn comment(&self, tweet_id: TweetId, comment: Comment) -> Result<()> {
        let tweet = self.get(tweet_id).ok_or(Error::TweetNotFound(tweet_id))?;
        let mut tweet = write(&tweet);
        info!(
            tweet_id = %tweet_id,
            comment_id = %comment.id,
            "{} commented '{}' on the tweet '{}' by {}",
            comment.author_name,
            comment.content,
            tweet.content,
            tweet.author_name
        );
        tweet.comments.push(comment);
        Ok(())
    }

    pub fn get(&self, tweet_id: TweetId) -> Option<TweetRef> {
        read(&self.tweets).get(&tweet_id).cloned()
    }

    pub fn snapshot(&self) -> Snapshot {
        let tweets = read(&self.tweets);
        debug!(num_tweets = tweets.len(), "taking snapshot");
        tweets
            .iter()
            .map(|(id, tweet)| (*id, tweet.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        read(&self.tweets).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CommentId, User};
    use chrono::{Local, TimeZone};

    fn tweet(id: u64, author: &User, content: &str) -> Tweet {
        let created_at = Local.with_ymd_and_hms(2025, 1, 30, 15, 4, 5).unwrap();
        Tweet::new(TweetId(id), author, content, created_at)
    }

    #[test]
    fn test_snapshot_contains_exactly_posted() {
        let alice = User::new(UserId(1), "Alice");
        let store = TweetStore::new();
        for id in [3, 1, 2] {
            assert_eq!(store.post(tweet(id, &alice, "hi")).unwrap(), TweetId(id));
        }

        let snapshot = store.snapshot();
        assert_eq!(
            snapshot.keys().copied().collect::<Vec<_>>(),
            vec![TweetId(1), TweetId(2), TweetId(3)]
        );
        for (id, tweet) in &snapshot {
            assert_eq!(read(tweet).id, *id);
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let alice = User::new(UserId(1), "Alice");
        let store = TweetStore::new();
        store.post(tweet(1, &alice, "first")).unwrap();

        let result = store.post(tweet(1, &alice, "second"));
        assert_eq!(result, Err(Error::DuplicateTweet(TweetId(1))));
        assert_eq!(store.len(), 1);
        assert_eq!(read(&store.get(TweetId(1)).unwrap()).content, "first");
    }

    #[test]
    fn test_likes_append_without_dedup() {
        let alice = User::new(UserId(1), "Alice");
        let store = TweetStore::new();
        store.post(tweet(1, &alice, "hi")).unwrap();
        store.like(TweetId(1), UserId(2), "Bob").unwrap();
        store.like(TweetId(1), UserId(2), "Bob").unwrap();

        let tweet = store.get(TweetId(1)).unwrap();
        assert_eq!(read(&tweet).likes, vec![UserId(2), UserId(2)]);
    }

    #[test]
    fn test_comments_keep_call_order() {
        let alice = User::new(UserId(1), "Alice");
        let bob = User::new(UserId(2), "Bob");
        let store = TweetStore::new();
        store.post(tweet(1, &alice, "hi")).unwrap();
        for (id, text) in [(1, "first"), (2, "second"), (3, "third")] {
            let comment = Comment::new(CommentId(id), TweetId(1), &bob, text);
            store.comment(TweetId(1), comment).unwrap();
        }

        let tweet = store.get(TweetId(1)).unwrap();
        let contents: Vec<String> = read(&tweet)
            .comments
            .iter()
            .map(|c| c.content.clone())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_tweet_leaves_store_unmodified() {
        let alice = User::new(UserId(1), "Alice");
        let store = TweetStore::new();
        store.post(tweet(1, &alice, "hi")).unwrap();

        assert_eq!(
            store.like(TweetId(9), UserId(1), "Alice"),
            Err(Error::TweetNotFound(TweetId(9)))
        );
        let comment = Comment::new(CommentId(1), TweetId(9), &alice, "hello?");
        assert_eq!(
            store.comment(TweetId(9), comment),
            Err(Error::TweetNotFound(TweetId(9)))
        );

        assert_eq!(store.len(), 1);
        let tweet = store.get(TweetId(1)).unwrap();
        assert!(read(&tweet).likes.is_empty());
        assert!(read(&tweet).comments.is_empty());
    }

    #[test]
    fn test_snapshot_shares_engagement_but_not_membership() {
        let alice = User::new(UserId(1), "Alice");
        let store = TweetStore::new();
        store.post(tweet(1, &alice, "hi")).unwrap();

        let mut snapshot = store.snapshot();
        store.like(TweetId(1), UserId(2), "Bob").unwrap();
        store.post(tweet(2, &alice, "later")).unwrap();

        assert_eq!(read(&snapshot[&TweetId(1)]).like_count(), 1);
        assert!(!snapshot.contains_key(&TweetId(2)));

        // the copy is the caller's own: dropping entries from it does not touch the store
        snapshot.clear();
        assert_eq!(store.len(), 2);
    }
}
