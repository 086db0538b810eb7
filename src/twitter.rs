use crate::api::{Comment, CommentId, Tweet, TweetId, TweetRef, User, UserId};
use crate::error::{Error, Result};
use crate::feed::{FeedMode, FeedService};
use crate::ids::IdGenerator;
use crate::store::TweetStore;
use crate::ui::RenderTimeline;
use crate::users::UserStore;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Single entry point over tweets, users and feeds.  Build one with [Twitter::new] and pass it
/// around; there is no shared global instance.
#[derive(Debug)]
pub struct Twitter {
    tweets: Arc<TweetStore>,
    users: UserStore,
    feed: FeedService,
    user_ids: IdGenerator<UserId>,
    tweet_ids: IdGenerator<TweetId>,
    comment_ids: IdGenerator<CommentId>,
}

impl Default for Twitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Twitter {
    pub fn new() -> Self {
        let tweets = Arc::new(TweetStore::new());
        let feed = FeedService::new(&tweets);
        Self {
            tweets,
            users: UserStore::new(),
            feed,
            user_ids: IdGenerator::new(),
            tweet_ids: IdGenerator::new(),
            comment_ids: IdGenerator::new(),
        }
    }

    pub fn tweets(&self) -> &TweetStore {
        &self.tweets
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn feed(&self) -> &FeedService {
        &self.feed
    }

    pub fn add_user(&self, name: &str) -> User {
        let user = User::new(self.user_ids.next(), name);
        self.users.add_user(user.clone());
        user
    }

    pub fn remove_user(&self, user_id: UserId) -> Result<User> {
        self.users.remove_user(user_id)
    }

    pub fn follow(&self, followee_id: UserId, follower_id: UserId) -> Result<()> {
        self.users.follow(followee_id, follower_id)
    }

    pub fn unfollow(&self, followee_id: UserId, follower_id: UserId) -> Result<()> {
        self.users.unfollow(followee_id, follower_id)
    }

    pub fn followers(&self, user_id: UserId) -> Result<Vec<User>> {
        self.users.followers(user_id)
    }

    /// Posts a caller-built tweet as is.  Its id is reserved so [Twitter::tweet] won't reuse it.
    pub fn post(&self, tweet: Tweet) -> Result<TweetId> {
        let tweet_id = self.tweets.post(tweet)?;
        self.tweet_ids.observe(tweet_id.0);
        Ok(tweet_id)
    }

    pub fn tweet(
        &self,
        author: &User,
        content: &str,
        created_at: DateTime<Local>,
    ) -> Result<TweetId> {
        let tweet = Tweet::new(self.tweet_ids.next(), author, content, created_at);
        self.tweets.post(tweet)
    }

    pub fn like(&self, user_id: UserId, user_name: &str, tweet_id: TweetId) -> Result<()> {
        self.tweets.like(tweet_id, user_id, user_name)
    }

    pub fn comment(&self, tweet_id: TweetId, author: &User, content: &str) -> Result<CommentId> {
        // NB: check first so a failed comment does not burn an id
        if self.tweets.get(tweet_id).is_none() {
            return Err(Error::TweetNotFound(tweet_id));
        }
        let comment = Comment::new(self.comment_ids.next(), tweet_id, author, content);
        let comment_id = comment.id;
        self.tweets.comment(tweet_id, comment)?;
        Ok(comment_id)
    }

    pub fn load_timeline(
        &self,
        mode: FeedMode,
        renderer: &mut impl RenderTimeline,
    ) -> anyhow::Result<Vec<TweetRef>> {
        let feed = self.feed.select_strategy(mode);
        self.feed.load_timeline(&feed, renderer)
    }

    pub fn load_timeline_named(
        &self,
        mode: &str,
        renderer: &mut impl RenderTimeline,
    ) -> anyhow::Result<Vec<TweetRef>> {
        let feed = self.feed.select_strategy_named(mode)?;
        self.feed.load_timeline(&feed, renderer)
    }
}
