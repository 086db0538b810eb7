use crate::api::{User, UserId};
use crate::error::{Error, Result};
use crate::store::{read, write};
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;
use tracing::info;

#[derive(Debug, Default)]
struct Graph {
    users: HashMap<UserId, User>,
    // followee -> followers
    followers: HashMap<UserId, BTreeSet<UserId>>,
    // follower -> followees
    following: HashMap<UserId, BTreeSet<UserId>>,
}

impl Graph {
    fn require(&self, user_id: UserId) -> Result<&User> {
        self.users.get(&user_id).ok_or(Error::UserNotFound(user_id))
    }

    fn collect(&self, ids: Option<&BTreeSet<UserId>>) -> Vec<User> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.users.get(id).cloned())
            .collect()
    }
}

/// Users and who follows whom.  Edges are kept in both directions so either side can be listed
/// without a scan.
#[derive(Debug, Default)]
pub struct UserStore {
    graph: RwLock<Graph>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-adding an existing id replaces the stored record but keeps its edges.
    pub fn add_user(&self, user: User) {
        info!(user_id = %user.id, "{} joined", user.name);
        write(&self.graph).users.insert(user.id, user);
    }

    pub fn get(&self, user_id: UserId) -> Option<User> {
        read(&self.graph).users.get(&user_id).cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Option<User> {
        read(&self.graph)
            .users
            .values()
            .filter(|user| user.name == name)
            .min_by_key(|user| user.id)
            .cloned()
    }

    pub fn remove_user(&self, user_id: UserId) -> Result<User> {
        let mut graph = write(&self.graph);
        let user = graph
            .users
            .remove(&user_id)
            .ok_or(Error::UserNotFound(user_id))?;

        let followers = graph.followers.remove(&user_id).unwrap_or_default();
        for follower in followers {
            if let Some(followees) = graph.following.get_mut(&follower) {
                followees.remove(&user_id);
            }
        }
        let followees = graph.following.remove(&user_id).unwrap_or_default();
        for followee in followees {
            if let Some(followers) = graph.followers.get_mut(&followee) {
                followers.remove(&user_id);
            }
        }

        info!(user_id = %user_id, "{} left", user.name);
        Ok(user)
    }

    /// [follower_id] starts following [followee_id].  Following twice is a no-op.
    pub fn follow(&self, followee_id: UserId, follower_id: UserId) -> Result<()> {
        let mut graph = write(&self.graph);
        let follower = graph.require(follower_id)?.name.clone();
        let followee = graph.require(followee_id)?.name.clone();

        graph
            .followers
            .entry(followee_id)
            .or_default()
            .insert(follower_id);
        graph
            .following
            .entry(follower_id)
            .or_default()
            .insert(followee_id);

        info!("{follower} follows {followee} now");
        Ok(())
    }

    pub fn unfollow(&self, followee_id: UserId, follower_id: UserId) -> Result<()> {
        let mut graph = write(&self.graph);
        let follower = graph.require(follower_id)?.name.clone();
        let followee = graph.require(followee_id)?.name.clone();

        if let Some(followers) = graph.followers.get_mut(&followee_id) {
            followers.remove(&follower_id);
        }
        if let Some(followees) = graph.following.get_mut(&follower_id) {
            followees.remove(&followee_id);
        }

        info!("{follower} no longer follows {followee}");
        Ok(())
    }

    /// Sorted by user id.
    pub fn followers(&self, user_id: UserId) -> Result<Vec<User>> {
        let graph = read(&self.graph);
        graph.require(user_id)?;
        Ok(graph.collect(graph.followers.get(&user_id)))
    }

    /// Sorted by user id.
    pub fn following(&self, user_id: UserId) -> Result<Vec<User>> {
        let graph = read(&self.graph);
        graph.require(user_id)?;
        Ok(graph.collect(graph.following.get(&user_id)))
    }

    pub fn len(&self) -> usize {
        read(&self.graph).users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
