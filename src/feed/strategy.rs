use crate::api::TweetRef;
use crate::store::{self, Snapshot};
use itertools::Itertools;
use std::cmp::Reverse;

/// Turns a snapshot into an ordered timeline.
///
/// Implementations must not mutate the snapshot or any tweet, and must produce the same order
/// every time they are given an unchanged snapshot.  Every tweet in the snapshot appears in the
/// result exactly once.
pub trait Rank {
    fn rank(&self, snapshot: &Snapshot) -> Vec<TweetRef>;
}

// NB: each tweet is read-locked exactly once to extract its key, then the sort runs over owned
// keys.  Comparing through the locks would re-lock on every comparison and could see a like land
// mid-sort.
fn sorted_by_key<K: Ord>(snapshot: &Snapshot, key: impl Fn(&TweetRef) -> K) -> Vec<TweetRef> {
    snapshot
        .values()
        .map(|tweet| (key(tweet), tweet))
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, tweet)| tweet.clone())
        .collect()
}

/// Most recent first; equal timestamps fall back to ascending tweet id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecencyRanked;

impl Rank for RecencyRanked {
    fn rank(&self, snapshot: &Snapshot) -> Vec<TweetRef> {
        sorted_by_key(snapshot, |tweet| {
            let tweet = store::read(tweet);
            (Reverse(tweet.created_at), tweet.id)
        })
    }
}

/// Most liked first; equal like counts fall back to ascending tweet id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopularityRanked;

impl Rank for PopularityRanked {
    fn rank(&self, snapshot: &Snapshot) -> Vec<TweetRef> {
        sorted_by_key(snapshot, |tweet| {
            let tweet = store::read(tweet);
            (Reverse(tweet.like_count()), tweet.id)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Recency(RecencyRanked),
    Popularity(PopularityRanked),
}

impl Rank for Strategy {
    fn rank(&self, snapshot: &Snapshot) -> Vec<TweetRef> {
        match self {
            Strategy::Recency(strategy) => strategy.rank(snapshot),
            Strategy::Popularity(strategy) => strategy.rank(snapshot),
        }
    }
}
