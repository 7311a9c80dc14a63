use serde::{Deserialize, Serialize};
use crate::models::{Comment, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

/// What a vote operation did to the post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    Added,
    Switched,
    Retracted,
    Unchanged,
}

impl Post {
    pub fn current_vote(&self, voter_id: &str) -> Option<Vote> {
        if self.upvoted_users.contains(voter_id) {
            Some(Vote::Up)
        } else if self.downvoted_users.contains(voter_id) {
            Some(Vote::Down)
        } else {
            None
        }
    }

    /// Record a vote
    ///
    /// A voter sits in at most one of the two voter sets: voting the opposite
    /// way retracts the earlier vote first, voting the same way again is a no-op.
    pub fn cast_vote(&mut self, voter_id: &str, vote: Vote) -> VoteOutcome {
        match self.current_vote(voter_id) {
            Some(current) if current == vote => VoteOutcome::Unchanged,
            Some(_) => {
                self.remove_vote(voter_id);
                self.add_vote(voter_id, vote);
                VoteOutcome::Switched
            }
            None => {
                self.add_vote(voter_id, vote);
                VoteOutcome::Added
            }
        }
    }

    pub fn retract_vote(&mut self, voter_id: &str) -> VoteOutcome {
        if self.remove_vote(voter_id) {
            VoteOutcome::Retracted
        } else {
            VoteOutcome::Unchanged
        }
    }

    /// Insert a comment, keeping comments ordered by creation time
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
        self.sort_comments();
    }

    /// Stable sort by creation time, ascending
    pub fn sort_comments(&mut self) {
        self.comments.sort_by_key(|comment| comment.created_at);
    }

    /// Comments in display order, without touching the snapshot
    pub fn sorted_comments(&self) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self.comments.iter().collect();
        comments.sort_by_key(|comment| comment.created_at);
        comments
    }

    fn add_vote(&mut self, voter_id: &str, vote: Vote) {
        match vote {
            Vote::Up => {
                self.upvoted_users.insert(voter_id.to_string());
                self.upvotes = self.upvotes.saturating_add(1);
            }
            Vote::Down => {
                self.downvoted_users.insert(voter_id.to_string());
                self.downvotes = self.downvotes.saturating_add(1);
            }
        }
    }

    fn remove_vote(&mut self, voter_id: &str) -> bool {
        if self.upvoted_users.remove(voter_id) {
            self.upvotes = self.upvotes.saturating_sub(1);
            true
        } else if self.downvoted_users.remove(voter_id) {
            self.downvotes = self.downvotes.saturating_sub(1);
            true
        } else {
            false
        }
    }
}
