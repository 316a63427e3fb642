use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{ContactProfile, NewUser, User},
    value_objects::{Role, UserId, Username},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count(&self) -> DomainResult<u64>;

    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>>;

    /// Login looks users up by username and role together.
    async fn find_by_username_and_role(
        &self,
        username: &Username,
        role: Role,
    ) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn update_contact(&self, id: UserId, contact: &ContactProfile) -> DomainResult<User>;
}
