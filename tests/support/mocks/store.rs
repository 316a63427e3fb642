// tests/support/mocks/store.rs
use async_trait::async_trait;
use civiccare::domain::{
    errors::{DomainError, DomainResult},
    feedback::{Feedback, FeedbackRepository, NewFeedback},
    issue::{
        Issue, IssueFilter, IssueId, IssueListCursor, IssueReadRepository, IssueStatus,
        IssueWriteRepository, NewIssue,
    },
    ledger::{StatusEntry, StatusLedger, StatusTransition},
    user::{ContactProfile, NewUser, Role, User, UserId, UserRepository, Username},
};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

#[derive(Default)]
struct State {
    users: Vec<User>,
    issues: Vec<Issue>,
    ledger: Vec<StatusEntry>,
    feedback: Vec<Feedback>,
}

/// One in-memory record store behind every repository port. Writes that touch
/// several collections happen under a single lock, like a transaction.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail_appends: AtomicBool,
    fail_inserts: AtomicBool,
}

impl InMemoryStore {
    /// Make every ledger append fail before anything is written.
    pub fn fail_ledger_appends(&self) {
        self.fail_appends.store(true, Ordering::SeqCst);
    }

    /// Make every issue insert fail before anything is written.
    pub fn fail_issue_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn issue(&self, id: i64) -> Option<Issue> {
        let state = self.state.lock().unwrap();
        state.issues.iter().find(|i| i.id.0 == id).cloned()
    }

    pub fn ledger_of(&self, id: i64) -> Vec<StatusEntry> {
        let state = self.state.lock().unwrap();
        let mut entries: Vec<StatusEntry> = state
            .ledger
            .iter()
            .filter(|e| e.issue_id.0 == id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.id);
        entries
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        let state = self.state.lock().unwrap();
        state.users.iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.state.lock().unwrap().users.len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let user = User {
            id: UserId::new(state.users.len() as i64 + 1)?,
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
            contact: new_user.contact,
            created_at: new_user.created_at,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| &u.username == username).cloned())
    }

    async fn find_by_username_and_role(
        &self,
        username: &Username,
        role: Role,
    ) -> DomainResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|u| &u.username == username && u.role == role)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn update_contact(&self, id: UserId, contact: &ContactProfile) -> DomainResult<User> {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::not_found("user not found"))?;
        user.contact = contact.clone();
        Ok(user.clone())
    }
}

#[async_trait]
impl IssueWriteRepository for InMemoryStore {
    async fn insert(&self, issue: NewIssue) -> DomainResult<Issue> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("issues table unavailable".into()));
        }
        let mut state = self.state.lock().unwrap();
        if !state.users.iter().any(|u| u.id == issue.owner_id) {
            return Err(DomainError::validation("issue owner does not exist"));
        }
        let status = issue.initial_status();
        let created = Issue {
            id: IssueId::new(state.issues.len() as i64 + 1)?,
            owner_id: issue.owner_id,
            category: issue.category,
            description: issue.description,
            location: issue.location,
            before_image: issue.before_image,
            after_image: None,
            analysis: Some(issue.analysis),
            current_status: status.clone(),
            authority_remarks: None,
            created_at: issue.created_at,
            updated_at: issue.created_at,
        };
        let entry = StatusEntry {
            id: state.ledger.len() as i64 + 1,
            issue_id: created.id,
            status,
            remarks: Some(issue.opening_remarks),
            recorded_at: issue.created_at,
        };
        state.issues.push(created.clone());
        state.ledger.push(entry);
        Ok(created)
    }
}

#[async_trait]
impl IssueReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: IssueId) -> DomainResult<Option<Issue>> {
        Ok(self.issue(id.0))
    }

    async fn list_page(
        &self,
        filter: &IssueFilter,
        limit: u32,
        cursor: Option<IssueListCursor>,
    ) -> DomainResult<(Vec<Issue>, Option<IssueListCursor>)> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<Issue> = state
            .issues
            .iter()
            .filter(|i| filter.status.as_ref().is_none_or(|s| &i.current_status == s))
            .filter(|i| filter.owner_id.is_none_or(|owner| i.owner_id == owner))
            .filter(|i| {
                cursor
                    .as_ref()
                    .is_none_or(|c| (i.created_at, i.id.0) < (c.created_at, c.issue_id.0))
            })
            .cloned()
            .collect();
        matching.sort_by_key(|i| std::cmp::Reverse((i.created_at, i.id.0)));

        let limit = limit as usize;
        let next = if matching.len() > limit {
            matching.truncate(limit);
            matching
                .last()
                .map(|last| IssueListCursor::from_parts(last.created_at, last.id))
        } else {
            None
        };
        Ok((matching, next))
    }

    async fn count(&self, status: Option<&IssueStatus>) -> DomainResult<u64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .issues
            .iter()
            .filter(|i| status.is_none_or(|s| &i.current_status == s))
            .count() as u64)
    }
}

#[async_trait]
impl StatusLedger for InMemoryStore {
    async fn append(&self, transition: StatusTransition) -> DomainResult<StatusEntry> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("ledger unavailable".into()));
        }
        let mut state = self.state.lock().unwrap();
        let next_id = state.ledger.len() as i64 + 1;
        let issue = state
            .issues
            .iter_mut()
            .find(|i| i.id == transition.issue_id)
            .ok_or_else(|| DomainError::not_found("issue not found"))?;

        let (status, recorded_at) = transition.settle(&issue.current_status, issue.updated_at);
        let entry = StatusEntry {
            id: next_id,
            issue_id: transition.issue_id,
            status,
            remarks: transition.remarks.clone(),
            recorded_at,
        };
        issue.apply_transition(&transition, &entry)?;
        state.ledger.push(entry.clone());
        Ok(entry)
    }

    async fn history(&self, issue_id: IssueId) -> DomainResult<Vec<StatusEntry>> {
        Ok(self.ledger_of(issue_id.0))
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn insert(&self, feedback: NewFeedback) -> DomainResult<Feedback> {
        let mut state = self.state.lock().unwrap();
        if !state.issues.iter().any(|i| i.id == feedback.issue_id) {
            return Err(DomainError::not_found("issue not found"));
        }
        let stored = Feedback {
            id: state.feedback.len() as i64 + 1,
            issue_id: feedback.issue_id,
            rating: feedback.rating,
            comments: feedback.comments,
            created_at: feedback.created_at,
        };
        state.feedback.push(stored.clone());
        Ok(stored)
    }

    async fn latest_for_issue(&self, issue_id: IssueId) -> DomainResult<Option<Feedback>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .feedback
            .iter()
            .filter(|f| f.issue_id == issue_id)
            .max_by_key(|f| (f.created_at, f.id))
            .cloned())
    }
}
