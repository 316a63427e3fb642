use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{ContactProfile, NewUser, PasswordHash, Role, User, Username},
};
use tracing::info;

pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UserCommandService {
    pub async fn register(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: RegisterUserCommand,
    ) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        validate_password(&command.password, &command.confirm_password)?;
        let contact = ContactProfile::from_raw(command.name, command.email, command.phone)?;

        let existing = self.user_repo.count().await?;
        let role = Self::determine_role(existing, actor, command.role)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let user = self
            .create_and_insert_user(username, &command.password, role, contact)
            .await?;
        info!(user_id = %user.id, role = %user.role, "user registered");

        Ok(user.into())
    }

    /// The very first account bootstraps the installation as an administrator.
    fn determine_role(
        existing: u64,
        actor: Option<&AuthenticatedUser>,
        requested: Option<Role>,
    ) -> ApplicationResult<Role> {
        if existing == 0 {
            return Ok(Role::Admin);
        }
        match requested.unwrap_or_default() {
            Role::Citizen => Ok(Role::Citizen),
            Role::Admin => {
                let requester = actor.ok_or_else(|| {
                    ApplicationError::forbidden(
                        "only administrators can register admin accounts",
                    )
                })?;
                ensure_capability(requester, "users", "create_admin")?;
                Ok(Role::Admin)
            }
        }
    }

    async fn create_and_insert_user(
        &self,
        username: Username,
        password: &str,
        role: Role,
        contact: ContactProfile,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let created_at = self.clock.now();
        let new_user = NewUser::new(username, password_hash, role, contact, created_at);
        let user = self.user_repo.insert(new_user).await?;

        Ok(user)
    }
}
