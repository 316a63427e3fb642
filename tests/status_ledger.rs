// tests/status_ledger.rs
use bytes::Bytes;
use chrono::Duration;
use civiccare::application::{
    error::ApplicationError, ports::storage::UploadedImage,
};
use civiccare::domain::{
    errors::DomainError,
    issue::{IssueId, IssueStatus},
    ledger::{StatusLedger, StatusTransition},
    user::Role,
};
use std::path::Path;

mod support;
use support::*;

async fn reported_issue(app: &TestApp) -> (i64, civiccare::application::dto::AuthenticatedUser) {
    let citizen = app
        .seed_user("kavya", Role::Citizen, Some("kavya@example.in"))
        .await;
    let actor = actor_for(&citizen);
    let issue = app
        .services
        .issue_commands
        .report_issue(&actor, report_command("Deep pothole near the bus stop"))
        .await
        .unwrap();
    (issue.id, actor)
}

#[tokio::test]
async fn new_issue_starts_with_one_pending_entry() {
    let app = TestApp::new();
    let (id, actor) = reported_issue(&app).await;

    let history = app
        .services
        .issue_queries
        .issue_history(&actor, id)
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, "Pending");
    assert_eq!(history[0].remarks.as_deref(), Some("Issue reported by citizen."));
    assert_eq!(app.store.issue(id).unwrap().current_status.as_str(), "Pending");
}

#[tokio::test]
async fn current_status_always_matches_the_newest_entry() {
    let app = TestApp::new();
    let (id, _) = reported_issue(&app).await;
    let admin = actor_for(&app.seed_user("ward_officer", Role::Admin, None).await);

    for (status, remarks) in [
        ("In Progress", "Crew dispatched"),
        ("On Hold", "Awaiting asphalt delivery"),
        ("Resolved", "Patched and levelled"),
    ] {
        let updated = app
            .services
            .issue_commands
            .update_status(&admin, status_command(id, Some(status), Some(remarks)))
            .await
            .unwrap();
        assert_eq!(updated.current_status, status);

        let ledger = app.store.ledger_of(id);
        let stored = app.store.issue(id).unwrap();
        assert_eq!(
            stored.current_status,
            ledger.last().unwrap().status,
            "projection drifted from the ledger"
        );
        assert_eq!(stored.authority_remarks.as_deref(), Some(remarks));
    }

    let statuses: Vec<String> = app
        .services
        .issue_queries
        .issue_history(&admin, id)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.status)
        .collect();
    assert_eq!(statuses, ["Pending", "In Progress", "On Hold", "Resolved"]);
}

#[tokio::test]
async fn history_is_oldest_first() {
    let app = TestApp::new();
    let (id, actor) = reported_issue(&app).await;
    let admin = actor_for(&app.seed_user("ward_officer", Role::Admin, None).await);
    app.services
        .issue_commands
        .update_status(&admin, status_command(id, Some("In Progress"), None))
        .await
        .unwrap();

    let history = app
        .services
        .issue_queries
        .issue_history(&actor, id)
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert!(history[0].created_at < history[1].created_at);
}

#[tokio::test]
async fn blank_status_repeats_the_current_one() {
    let app = TestApp::new();
    let (id, _) = reported_issue(&app).await;
    let admin = actor_for(&app.seed_user("ward_officer", Role::Admin, None).await);

    app.services
        .issue_commands
        .update_status(&admin, status_command(id, Some("In Progress"), None))
        .await
        .unwrap();
    let updated = app
        .services
        .issue_commands
        .update_status(&admin, status_command(id, Some("   "), Some("Barricades placed")))
        .await
        .unwrap();

    assert_eq!(updated.current_status, "In Progress");
    assert_eq!(updated.authority_remarks.as_deref(), Some("Barricades placed"));
    let ledger = app.store.ledger_of(id);
    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger[2].status.as_str(), "In Progress");
    assert_eq!(ledger[2].remarks.as_deref(), Some("Barricades placed"));
}

#[tokio::test]
async fn remarks_without_text_keep_previous_authority_remarks() {
    let app = TestApp::new();
    let (id, _) = reported_issue(&app).await;
    let admin = actor_for(&app.seed_user("ward_officer", Role::Admin, None).await);

    app.services
        .issue_commands
        .update_status(&admin, status_command(id, Some("In Progress"), Some("Crew dispatched")))
        .await
        .unwrap();
    let updated = app
        .services
        .issue_commands
        .update_status(&admin, status_command(id, Some("Resolved"), None))
        .await
        .unwrap();

    assert_eq!(updated.authority_remarks.as_deref(), Some("Crew dispatched"));
    assert!(app.store.ledger_of(id)[2].remarks.is_none());
}

#[tokio::test]
async fn citizens_cannot_change_status() {
    let app = TestApp::new();
    let (id, actor) = reported_issue(&app).await;

    let err = app
        .services
        .issue_commands
        .update_status(&actor, status_command(id, Some("Resolved"), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Forbidden(_)), "got {err:?}");
    assert_eq!(app.store.ledger_of(id).len(), 1);
    assert_eq!(app.store.issue(id).unwrap().current_status.as_str(), "Pending");
}

#[tokio::test]
async fn failed_append_leaves_issue_untouched() {
    let app = TestApp::new();
    let (id, _) = reported_issue(&app).await;
    let admin = actor_for(&app.seed_user("ward_officer", Role::Admin, None).await);
    let before = app.store.issue(id).unwrap();
    app.store.fail_ledger_appends();
    let mut command = status_command(id, Some("Resolved"), Some("Done"));
    command.after_image = Some(UploadedImage {
        file_name: "patched.png".into(),
        bytes: Bytes::from(png_bytes(4, 4)),
    });

    let err = app
        .services
        .issue_commands
        .update_status(&admin, command)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApplicationError::Domain(DomainError::Persistence(_))),
        "got {err:?}"
    );
    let after = app.store.issue(id).unwrap();
    assert_eq!(after.current_status, before.current_status);
    assert_eq!(after.authority_remarks, before.authority_remarks);
    assert_eq!(after.updated_at, before.updated_at);
    assert!(after.after_image.is_none());
    assert_eq!(app.store.ledger_of(id).len(), 1);
    assert!(app.notifier.sent().iter().all(|m| !m.subject.contains("Status Updated")));
    assert_eq!(std::fs::read_dir(app.uploads.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn unknown_issue_is_not_found() {
    let app = TestApp::new();
    let admin = actor_for(&app.seed_user("ward_officer", Role::Admin, None).await);

    let err = app
        .services
        .issue_commands
        .update_status(&admin, status_command(404, Some("Resolved"), None))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn overlong_status_is_rejected() {
    let app = TestApp::new();
    let (id, _) = reported_issue(&app).await;
    let admin = actor_for(&app.seed_user("ward_officer", Role::Admin, None).await);
    let status = "x".repeat(51);

    let err = app
        .services
        .issue_commands
        .update_status(&admin, status_command(id, Some(&status), None))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ApplicationError::Domain(DomainError::Validation(_))),
        "got {err:?}"
    );
    assert_eq!(app.store.ledger_of(id).len(), 1);
}

#[tokio::test]
async fn after_image_is_stored_with_the_transition() {
    let app = TestApp::new();
    let (id, _) = reported_issue(&app).await;
    let admin = actor_for(&app.seed_user("ward_officer", Role::Admin, None).await);
    let mut command = status_command(id, Some("Resolved"), Some("Patched"));
    command.after_image = Some(UploadedImage {
        file_name: "patched.png".into(),
        bytes: Bytes::from(png_bytes(4, 4)),
    });

    let updated = app
        .services
        .issue_commands
        .update_status(&admin, command)
        .await
        .unwrap();

    let stored = updated.after_image.expect("after image recorded");
    let path = Path::new(&stored);
    assert!(path.starts_with(app.uploads.path()));
    assert!(path.file_name().unwrap().to_string_lossy().starts_with("after_"));
    assert!(path.exists());
}

#[tokio::test]
async fn owner_is_told_about_the_new_status() {
    let app = TestApp::new();
    let (id, _) = reported_issue(&app).await;
    let admin = actor_for(&app.seed_user("ward_officer", Role::Admin, None).await);

    app.services
        .issue_commands
        .update_status(&admin, status_command(id, Some("In Progress"), None))
        .await
        .unwrap();

    let sent = app.notifier.sent();
    let last = sent.last().expect("a status notice");
    assert_eq!(last.recipient, "kavya@example.in");
    assert_eq!(last.subject, format!("Issue #{id} Status Updated - Chennai CivicCare AI"));
    assert!(last.body.contains("has been updated to: In Progress."));
    assert!(last.body.contains("Remarks: No additional remarks."));
}

#[tokio::test]
async fn clock_going_backwards_does_not_reorder_history() {
    let app = TestApp::new();
    let (id, _) = reported_issue(&app).await;
    let issue_id = IssueId::new(id).unwrap();
    let ledger: &dyn StatusLedger = &*app.store;
    let late = fixed_now() + Duration::hours(2);
    let early = fixed_now() + Duration::hours(1);

    ledger
        .append(StatusTransition::new(
            issue_id,
            Some(IssueStatus::new("In Progress").unwrap()),
            None,
            late,
        ))
        .await
        .unwrap();
    let second = ledger
        .append(StatusTransition::new(
            issue_id,
            Some(IssueStatus::new("Resolved").unwrap()),
            None,
            early,
        ))
        .await
        .unwrap();

    let history = ledger.history(issue_id).await.unwrap();
    let statuses: Vec<&str> = history.iter().map(|e| e.status.as_str()).collect();
    assert_eq!(statuses, ["Pending", "In Progress", "Resolved"]);
    assert!(history.windows(2).all(|w| w[0].recorded_at <= w[1].recorded_at));
    assert_eq!(second.recorded_at, late);

    let stored = app.store.issue(id).unwrap();
    assert_eq!(stored.current_status, history.last().unwrap().status);
    assert_eq!(stored.updated_at, late);
}

#[tokio::test]
async fn remarks_only_update_keeps_the_latest_committed_status() {
    let app = TestApp::new();
    let (id, _) = reported_issue(&app).await;
    let issue_id = IssueId::new(id).unwrap();
    let ledger: &dyn StatusLedger = &*app.store;

    // Both requests were prepared while the issue was still Pending.
    let resolve = StatusTransition::new(
        issue_id,
        Some(IssueStatus::new("Resolved").unwrap()),
        Some("Patched".into()),
        fixed_now() + Duration::minutes(5),
    );
    let remark = StatusTransition::new(
        issue_id,
        None,
        Some("Inspected by ward engineer".into()),
        fixed_now() + Duration::minutes(6),
    )
    .with_authority_remarks("Inspected by ward engineer");

    ledger.append(resolve).await.unwrap();
    let entry = ledger.append(remark).await.unwrap();

    assert_eq!(entry.status.as_str(), "Resolved");
    let stored = app.store.issue(id).unwrap();
    assert_eq!(stored.current_status.as_str(), "Resolved");
    assert_eq!(
        stored.authority_remarks.as_deref(),
        Some("Inspected by ward engineer")
    );
}
