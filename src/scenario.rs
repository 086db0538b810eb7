//! Scripted runs: a JSON description of users, follows, tweets, likes and comments that is
//! replayed against a [Twitter] in that order.
//!
//! Users are referred to by name and tweets by their position in `tweets`.  A step that cannot
//! be applied (unknown name, bad index) is logged and skipped; the rest of the script still runs.

use crate::api::{TweetId, User};
use crate::twitter::Twitter;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowStep {
    pub followee: String,
    pub follower: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweetStep {
    pub author: String,
    pub content: String,
    pub time: DateTime<Local>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LikeStep {
    pub user: String,
    pub tweet: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentStep {
    pub user: String,
    pub tweet: usize,
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub users: Vec<String>,
    pub follows: Vec<FollowStep>,
    pub tweets: Vec<TweetStep>,
    pub likes: Vec<LikeStep>,
    pub comments: Vec<CommentStep>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub tweets: Vec<Option<TweetId>>,
    pub failures: Vec<String>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let scenario = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        let scenario = serde_json::from_str(&scenario)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))?;
        Ok(scenario)
    }

    /// Alice and Bob: Bob follows Alice, likes and answers her tweet, then posts his own two
    /// years later.
    pub fn demo() -> Self {
        let at = |year| {
            Local
                .with_ymd_and_hms(year, 1, 30, 15, 4, 5)
                .single()
                .unwrap_or_else(Local::now)
        };
        Self {
            users: vec!["Alice".to_string(), "Bob".to_string()],
            follows: vec![FollowStep {
                followee: "Alice".to_string(),
                follower: "Bob".to_string(),
            }],
            tweets: vec![
                TweetStep {
                    author: "Alice".to_string(),
                    content: "Hi Followers!!!".to_string(),
                    time: at(2025),
                },
                TweetStep {
                    author: "Bob".to_string(),
                    content: "First tweet!\n".to_string(),
                    time: at(2027),
                },
            ],
            likes: vec![LikeStep {
                user: "Bob".to_string(),
                tweet: 0,
            }],
            comments: vec![CommentStep {
                user: "Bob".to_string(),
                tweet: 0,
                content: "Hi Alice :) \n".to_string(),
            }],
        }
    }

    pub fn replay(&self, twitter: &Twitter) -> ReplaySummary {
        let mut summary = ReplaySummary::default();

        for name in &self.users {
            twitter.add_user(name);
        }

        for FollowStep { followee, follower } in &self.follows {
            let result = user(twitter, followee).and_then(|followee| {
                let follower = user(twitter, follower)?;
                Ok(twitter.follow(followee.id, follower.id)?)
            });
            summary.record(
                result.with_context(|| format!("{follower} cannot follow {followee}")),
            );
        }

        for TweetStep {
            author,
            content,
            time,
        } in &self.tweets
        {
            let result = user(twitter, author)
                .and_then(|author| Ok(twitter.tweet(&author, content, *time)?))
                .with_context(|| format!("{author} cannot tweet"));
            let tweet_id = summary.record(result);
            summary.tweets.push(tweet_id);
        }

        for LikeStep { user: name, tweet } in &self.likes {
            let result = user(twitter, name).and_then(|liker| {
                let tweet_id = summary.tweet(*tweet)?;
                Ok(twitter.like(liker.id, &liker.name, tweet_id)?)
            });
            summary.record(
                result.with_context(|| format!("{name} cannot like tweet #{tweet}")),
            );
        }

        for CommentStep {
            user: name,
            tweet,
            content,
        } in &self.comments
        {
            let result = user(twitter, name).and_then(|author| {
                let tweet_id = summary.tweet(*tweet)?;
                Ok(twitter.comment(tweet_id, &author, content)?)
            });
            summary.record(
                result.with_context(|| format!("{name} cannot comment on tweet #{tweet}")),
            );
        }

        summary
    }
}

impl ReplaySummary {
    fn record<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("{err:#}");
                self.failures.push(format!("{err:#}"));
                None
            }
        }
    }

    fn tweet(&self, index: usize) -> Result<TweetId> {
        self.tweets
            .get(index)
            .copied()
            .flatten()
            .ok_or(anyhow!("No tweet #{index} in scenario"))
    }
}

fn user(twitter: &Twitter, name: &str) -> Result<User> {
    twitter
        .users()
        .find_by_name(name)
        .ok_or(anyhow!("No user named {name:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedMode;
    use crate::store;
    use crate::ui::TimelineLines;
    use std::io::Write;

    #[test]
    fn test_demo_replay() {
        let twitter = Twitter::new();
        let summary = Scenario::demo().replay(&twitter);
        assert!(summary.failures.is_empty(), "{:?}", summary.failures);
        assert_eq!(summary.tweets, vec![Some(TweetId(1)), Some(TweetId(2))]);

        let alice = twitter.users().find_by_name("Alice").unwrap();
        let followers = twitter.followers(alice.id).unwrap();
        assert_eq!(followers.len(), 1);
        assert_eq!(followers[0].name, "Bob");

        let hi = twitter.tweets().get(TweetId(1)).unwrap();
        assert_eq!(store::read(&hi).like_count(), 1);
        assert_eq!(store::read(&hi).comments.len(), 1);

        let mut lines = TimelineLines::new(120);
        twitter.load_timeline(FeedMode::Recency, &mut lines).unwrap();
        assert!(lines.lines[0].contains("@Bob First tweet!"));
        twitter
            .load_timeline(FeedMode::Popularity, &mut lines)
            .unwrap();
        assert!(lines.lines[0].contains("@Alice Hi Followers!!!"));
    }

    #[test]
    fn test_bad_steps_are_skipped() {
        let scenario = Scenario {
            users: vec!["Alice".to_string()],
            follows: vec![FollowStep {
                followee: "Alice".to_string(),
                follower: "Mallory".to_string(),
            }],
            tweets: vec![
                TweetStep {
                    author: "Nobody".to_string(),
                    content: "lost".to_string(),
                    time: Local::now(),
                },
                TweetStep {
                    author: "Alice".to_string(),
                    content: "kept".to_string(),
                    time: Local::now(),
                },
            ],
            likes: vec![
                LikeStep {
                    user: "Alice".to_string(),
                    tweet: 0,
                },
                LikeStep {
                    user: "Alice".to_string(),
                    tweet: 1,
                },
            ],
            comments: vec![CommentStep {
                user: "Alice".to_string(),
                tweet: 5,
                content: "?".to_string(),
            }],
        };

        let twitter = Twitter::new();
        let summary = scenario.replay(&twitter);
        assert_eq!(summary.tweets, vec![None, Some(TweetId(1))]);
        assert_eq!(summary.failures.len(), 4);
        assert_eq!(twitter.tweets().len(), 1);
        let kept = twitter.tweets().get(TweetId(1)).unwrap();
        assert_eq!(store::read(&kept).like_count(), 1);
    }

    #[test]
    fn test_load_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "users": ["Alice", "Bob"],
                "tweets": [{{ "author": "Bob", "content": "yo", "time": "2027-01-30T15:04:05Z" }}],
                "likes": [{{ "user": "Alice", "tweet": 0 }}]
            }}"#
        )
        .unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.users, vec!["Alice", "Bob"]);
        assert!(scenario.follows.is_empty());
        assert_eq!(scenario.tweets[0].content, "yo");
        assert_eq!(scenario.likes[0].tweet, 0);
    }
}
