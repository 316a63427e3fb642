// src/domain/user/entity.rs
use crate::domain::errors::DomainResult;
use crate::domain::user::value_objects::{
    EmailAddress, PasswordHash, PhoneNumber, Role, UserId, Username,
};
use chrono::{DateTime, Utc};

/// Optional contact details a citizen may attach to their account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactProfile {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
}

impl ContactProfile {
    /// Build a profile from raw form input. Blank values are treated as absent.
    pub fn from_raw(
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            name: non_blank(name),
            email: non_blank(email).map(EmailAddress::new).transpose()?,
            phone: non_blank(phone).map(PhoneNumber::new).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    /// Overlay the values present in `other`; absent values keep the current ones.
    pub fn merged_with(&self, other: &ContactProfile) -> ContactProfile {
        ContactProfile {
            name: other.name.clone().or_else(|| self.name.clone()),
            email: other.email.clone().or_else(|| self.email.clone()),
            phone: other.phone.clone().or_else(|| self.phone.clone()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub contact: ContactProfile,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub contact: ContactProfile,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        username: Username,
        password_hash: PasswordHash,
        role: Role,
        contact: ContactProfile,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            password_hash,
            role,
            contact,
            created_at,
        }
    }
}
