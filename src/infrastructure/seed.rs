// src/infrastructure/seed.rs
//! Demo accounts and a sample issue for local installations.
use crate::{
    application::{
        error::ApplicationResult,
        ports::{security::PasswordHasher, time::Clock},
    },
    domain::{
        issue::{
            Area, IssueCategory, IssueDescription, IssueReadRepository, IssueWriteRepository,
            Location, NewIssue, analyze,
        },
        user::{ContactProfile, NewUser, PasswordHash, Role, User, UserRepository, Username},
    },
};
use tracing::info;

pub struct DemoSeeder<'a> {
    pub users: &'a dyn UserRepository,
    pub issue_reads: &'a dyn IssueReadRepository,
    pub issue_writes: &'a dyn IssueWriteRepository,
    pub hasher: &'a dyn PasswordHasher,
    pub clock: &'a dyn Clock,
}

struct DemoAccount {
    username: &'static str,
    password: &'static str,
    role: Role,
    name: &'static str,
    email: &'static str,
}

const ADMIN: DemoAccount = DemoAccount {
    username: "admin",
    password: "admin123",
    role: Role::Admin,
    name: "System Administrator",
    email: "admin@civiccare.com",
};

const CITIZEN: DemoAccount = DemoAccount {
    username: "user",
    password: "password",
    role: Role::Citizen,
    name: "Demo User",
    email: "user@civiccare.com",
};

const SAMPLE_DESCRIPTION: &str = "Large pothole on the main road causing traffic issues.";

impl DemoSeeder<'_> {
    /// Idempotent: existing accounts are left alone and the sample issue is only
    /// created while the issue table is empty.
    pub async fn run(&self) -> ApplicationResult<()> {
        self.ensure_account(&ADMIN).await?;
        let citizen = self.ensure_account(&CITIZEN).await?;

        if self.issue_reads.count(None).await? == 0 {
            let category = IssueCategory::RoadDamage;
            let issue = self
                .issue_writes
                .insert(NewIssue {
                    owner_id: citizen.id,
                    category,
                    description: IssueDescription::new(SAMPLE_DESCRIPTION)?,
                    location: Location::new(
                        Area::new("T. Nagar")?,
                        Some("Anna Salai".into()),
                        Some("Near T. Nagar Bus Stand".into()),
                    ),
                    before_image: None,
                    analysis: analyze(category.label(), SAMPLE_DESCRIPTION),
                    opening_remarks: "Sample issue created for demo.".into(),
                    created_at: self.clock.now(),
                })
                .await?;
            info!(issue_id = %issue.id, "sample issue seeded");
        }

        Ok(())
    }

    async fn ensure_account(&self, account: &DemoAccount) -> ApplicationResult<User> {
        let username = Username::new(account.username)?;
        if let Some(existing) = self.users.find_by_username(&username).await? {
            return Ok(existing);
        }

        let hash = PasswordHash::new(self.hasher.hash(account.password).await?)?;
        let contact = ContactProfile::from_raw(
            Some(account.name.into()),
            Some(account.email.into()),
            None,
        )?;
        let user = self
            .users
            .insert(NewUser::new(
                username,
                hash,
                account.role,
                contact,
                self.clock.now(),
            ))
            .await?;
        info!(username = account.username, role = %account.role, "demo account seeded");
        Ok(user)
    }
}
