// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{issues::IssueCommandService, users::UserCommandService},
        ports::{
            notification::Notifier,
            report::ReportRenderer,
            security::{PasswordHasher, TokenManager},
            storage::ImageStore,
            time::Clock,
        },
        queries::{issues::IssueQueryService, users::UserQueryService},
    },
    domain::{
        feedback::FeedbackRepository,
        issue::{IssueReadRepository, IssueWriteRepository},
        ledger::StatusLedger,
        user::UserRepository,
    },
};

/// Repositories backing the services.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub issue_writes: Arc<dyn IssueWriteRepository>,
    pub issue_reads: Arc<dyn IssueReadRepository>,
    pub ledger: Arc<dyn StatusLedger>,
    pub feedback: Arc<dyn FeedbackRepository>,
}

/// Adapters for everything outside the record store.
pub struct Collaborators {
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub image_store: Arc<dyn ImageStore>,
    pub notifier: Arc<dyn Notifier>,
    pub renderer: Arc<dyn ReportRenderer>,
    pub clock: Arc<dyn Clock>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub issue_commands: Arc<IssueCommandService>,
    pub issue_queries: Arc<IssueQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(repos: Repositories, collaborators: Collaborators) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&repos.users),
            Arc::clone(&collaborators.password_hasher),
            Arc::clone(&collaborators.token_manager),
            Arc::clone(&collaborators.clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&repos.users),
            Arc::clone(&collaborators.clock),
        ));

        let issue_commands = Arc::new(IssueCommandService::new(
            Arc::clone(&repos.issue_writes),
            Arc::clone(&repos.issue_reads),
            Arc::clone(&repos.ledger),
            Arc::clone(&repos.feedback),
            Arc::clone(&repos.users),
            Arc::clone(&collaborators.image_store),
            Arc::clone(&collaborators.notifier),
            Arc::clone(&collaborators.clock),
        ));
        let issue_queries = Arc::new(IssueQueryService::new(
            Arc::clone(&repos.issue_reads),
            Arc::clone(&repos.ledger),
            Arc::clone(&repos.feedback),
            Arc::clone(&repos.users),
            Arc::clone(&collaborators.renderer),
        ));

        Self {
            user_commands,
            user_queries,
            issue_commands,
            issue_queries,
            token_manager: collaborators.token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }
}
