use crate::domain::errors::DomainError;

const CNT_USER_USERNAME: &str = "users_username_key";
const CNT_USER_ROLE_CHECK: &str = "users_role_chk";
const CNT_ISSUE_OWNER: &str = "issues_user_id_fkey";
const CNT_ISSUE_DESCRIPTION_CHECK: &str = "issues_description_not_blank_chk";
const CNT_LEDGER_ISSUE: &str = "issue_status_log_issue_id_fkey";
const CNT_FEEDBACK_ISSUE: &str = "feedback_issue_id_fkey";
const CNT_FEEDBACK_RATING_CHECK: &str = "feedback_rating_range_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_USER_USERNAME => DomainError::Conflict("username already exists".into()),
                    CNT_USER_ROLE_CHECK => DomainError::Validation("unknown role".into()),
                    CNT_ISSUE_OWNER => DomainError::NotFound("reporting user not found".into()),
                    CNT_ISSUE_DESCRIPTION_CHECK => {
                        DomainError::Validation("issue description is required".into())
                    }
                    CNT_LEDGER_ISSUE | CNT_FEEDBACK_ISSUE => {
                        DomainError::NotFound("issue not found".into())
                    }
                    CNT_FEEDBACK_RATING_CHECK => {
                        DomainError::Validation("rating must be between 1 and 5".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
