// src/application/commands/issues/notifications.rs
//! Message templates sent to citizens.
use crate::{
    application::ports::notification::OutgoingMessage,
    domain::{issue::Issue, user::ContactProfile},
};

const SIGNATURE: &str = "Regards,\nChennai CivicCare AI";

fn salutation(contact: &ContactProfile) -> &str {
    contact.name.as_deref().unwrap_or("Citizen")
}

/// Confirmation for a freshly reported issue, addressed to the email given on
/// the report form. `None` when no email was supplied.
pub fn submission_message(issue: &Issue, contact: &ContactProfile) -> Option<OutgoingMessage> {
    let recipient = contact.email.as_ref()?.to_string();
    let location = &issue.location;
    let body = format!(
        "Dear {name},\n\n\
         Your issue (ID: {id}) has been submitted successfully.\n\
         Issue Type: {kind}\n\
         Location: {area}, {street} - {landmark}\n\n\
         You will receive updates as the status changes.\n\n\
         {SIGNATURE}",
        name = salutation(contact),
        id = issue.id,
        kind = issue.category,
        area = location.area,
        street = location.street.as_deref().unwrap_or("-"),
        landmark = location.landmark.as_deref().unwrap_or("-"),
    );
    Some(OutgoingMessage {
        recipient,
        subject: format!("Issue #{} Submitted - Chennai CivicCare AI", issue.id),
        body,
    })
}

/// Status change notice for the issue owner. `None` when the owner has no email.
pub fn status_update_message(
    issue: &Issue,
    owner: &ContactProfile,
    remarks: Option<&str>,
) -> Option<OutgoingMessage> {
    let recipient = owner.email.as_ref()?.to_string();
    let body = format!(
        "Dear {name},\n\n\
         The status of your issue (ID: {id}) has been updated to: {status}.\n\
         Remarks: {remarks}\n\n\
         {SIGNATURE}",
        name = salutation(owner),
        id = issue.id,
        status = issue.current_status,
        remarks = remarks.unwrap_or("No additional remarks."),
    );
    Some(OutgoingMessage {
        recipient,
        subject: format!("Issue #{} Status Updated - Chennai CivicCare AI", issue.id),
        body,
    })
}
