use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{bounded, update_event, update_poll, Mutation, WritePolicy};
use crate::db::DocumentStore;
use crate::models::{
    event_models::Event,
    new_id,
    poll_models::{Poll, PollOption},
};
use crate::policy;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct NewPoll {
    pub event_id: String,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyEntry {
    pub text: String,
    pub count: usize,
    pub percentage: f64,
}

/// Per-option counts and shares. Every percentage is 0 while nobody has voted.
pub fn compute_tally(poll: &Poll) -> Vec<TallyEntry> {
    let total = poll.total_votes();

    poll.options
        .iter()
        .map(|option| {
            let count = option.votes.len();
            let percentage = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            TallyEntry {
                text: option.text.clone(),
                count,
                percentage,
            }
        })
        .collect()
}

fn validate(input: &NewPoll) -> AppResult<(String, Vec<String>)> {
    let question = input.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("Poll question is required".to_string()));
    }

    let options: Vec<String> = input
        .options
        .iter()
        .map(|opt| opt.trim().to_string())
        .filter(|opt| !opt.is_empty())
        .collect();

    if options.len() < 2 {
        return Err(AppError::Validation(
            "Enter at least 2 options for the user to select from".to_string(),
        ));
    }

    let mut deduped: Vec<&String> = Vec::new();
    for option in &options {
        if !deduped.contains(&option) {
            deduped.push(option);
        }
    }
    if deduped.len() != options.len() {
        return Err(AppError::Validation("Poll options must be unique".to_string()));
    }

    Ok((question.to_string(), options))
}

/// Poll creation, voting and tallies.
#[derive(Clone)]
pub struct PollEngine {
    store: Arc<dyn DocumentStore>,
    policy: WritePolicy,
}

impl PollEngine {
    pub fn new(store: Arc<dyn DocumentStore>, policy: WritePolicy) -> Self {
        Self { store, policy }
    }

    async fn load_event(&self, event_id: &str) -> AppResult<Event> {
        bounded(self.policy.store_timeout, self.store.load_event(event_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))
    }

    /// Creates the poll, then links it into the owning event.
    ///
    /// The two writes are not atomic. If linking fails the poll stays
    /// stored (and listed, since listings query polls by event) and the
    /// error is returned; [`PollEngine::reconcile_event_polls`] re-links it.
    #[tracing::instrument(skip(self, input), fields(event_id = %input.event_id))]
    pub async fn create_poll(&self, input: NewPoll, user_id: &str) -> AppResult<Poll> {
        let (question, options) = validate(&input)?;

        let event = self.load_event(&input.event_id).await?;
        policy::ensure_can_manage_polls(&event, user_id)?;

        let poll = Poll {
            id: new_id(),
            event: event.id.clone(),
            question,
            options: options.into_iter().map(PollOption::new).collect(),
            created_at: Utc::now(),
            version: 0,
        };

        bounded(self.policy.store_timeout, self.store.insert_poll(&poll)).await?;

        let linked = update_event(&self.store, self.policy, &event.id, |event| {
            if event.has_poll(&poll.id) {
                return Ok(Mutation::Unchanged);
            }
            event.polls.push(poll.id.clone());
            Ok(Mutation::Changed)
        })
        .await;

        if let Err(err) = linked {
            warn!(poll_id = %poll.id, error = %err, "poll stored but not linked to its event");
            return Err(err);
        }

        info!(poll_id = %poll.id, "poll created");
        Ok(poll)
    }

    /// Records `user_id`'s vote. A user gets one vote per poll: voting again,
    /// for the same or another option, fails with [`AppError::DuplicateVote`].
    #[tracing::instrument(skip(self))]
    pub async fn cast_vote(
        &self,
        poll_id: &str,
        option_index: i64,
        user_id: &str,
    ) -> AppResult<Poll> {
        let poll = self.get_poll(poll_id).await?;

        // Membership is append-only, so a check made now still holds at write time.
        let event = self.load_event(&poll.event).await?;
        policy::ensure_can_manage_polls(&event, user_id)?;

        let poll = update_poll(&self.store, self.policy, poll_id, |poll| {
            let len = poll.options.len();
            let index = usize::try_from(option_index)
                .ok()
                .filter(|i| *i < len)
                .ok_or(AppError::InvalidIndex {
                    index: option_index,
                    len,
                })?;
            if let Some(existing) = poll.voted_option(user_id) {
                debug!(existing, "user already voted");
                return Err(AppError::DuplicateVote {
                    poll: Box::new(poll.clone()),
                    option_index: existing,
                });
            }
            poll.options[index].votes.push(user_id.to_string());
            Ok(Mutation::Changed)
        })
        .await?;

        info!(total_votes = poll.total_votes(), "vote recorded");
        Ok(poll)
    }

    pub async fn get_poll(&self, poll_id: &str) -> AppResult<Poll> {
        bounded(self.policy.store_timeout, self.store.load_poll(poll_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Poll {} not found", poll_id)))
    }

    /// Polls owned by the event, oldest first. Derived from the polls
    /// themselves, not from `Event::polls`.
    pub async fn list_polls_for_event(&self, event_id: &str) -> AppResult<Vec<Poll>> {
        Ok(bounded(self.policy.store_timeout, self.store.find_polls_by_event(event_id)).await?)
    }

    /// Appends every poll that points at the event but is missing from its
    /// `polls` list. Creator only.
    #[tracing::instrument(skip(self))]
    pub async fn reconcile_event_polls(&self, event_id: &str, user_id: &str) -> AppResult<Event> {
        let event = self.load_event(event_id).await?;
        policy::ensure_creator(&event, user_id)?;

        let owned = self.list_polls_for_event(event_id).await?;

        let mut relinked = 0;
        let event = update_event(&self.store, self.policy, event_id, |event| {
            relinked = 0;
            for poll in &owned {
                if !event.has_poll(&poll.id) {
                    event.polls.push(poll.id.clone());
                    relinked += 1;
                }
            }
            Ok(if relinked == 0 {
                Mutation::Unchanged
            } else {
                Mutation::Changed
            })
        })
        .await?;

        if relinked > 0 {
            info!(relinked, "re-linked orphaned polls");
        }
        Ok(event)
    }
}
