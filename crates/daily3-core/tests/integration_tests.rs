use daily3_core::ai::commit_drafts;
use daily3_core::daily::DAILY_CAPACITY;
use daily3_core::db::{establish_connection, DbPool};
use daily3_core::error::CoreError;
use daily3_core::models::{
    NewTaskData, RemovalPolicy, ScoreVariables, TaskDraft, UpdateTaskData, UNCATEGORIZED,
};
use daily3_core::repository::{
    CategoryRepository, DailyRepository, IdentityRepository, NoteRepository,
    ReconciliationRepository, SqliteRepository, TaskRepository,
};
use tempfile::TempDir;
use uuid::Uuid;

/// Helper function to create a test database. The extra pool handle lets
/// tests manipulate rows directly (e.g. backdating completions).
async fn setup_test_db() -> (SqliteRepository, DbPool, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");

    let pool = establish_connection(&db_path.to_string_lossy())
        .await
        .expect("Failed to establish test database connection");

    (SqliteRepository::new(pool.clone()), pool, temp_dir)
}

/// Helper function to create a test task
async fn create_test_task(repo: &SqliteRepository, owner: &str, title: &str) -> daily3_core::models::Task {
    repo.create_task(
        owner,
        NewTaskData {
            title: title.to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to create test task")
}

#[tokio::test]
async fn test_create_defaults_and_score() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;

    let task = repo
        .create_task(
            "owner-a",
            NewTaskData {
                title: "  Call vendor  ".to_string(),
                ..Default::default()
            },
        )
        .await
        .expect("create failed");

    // Title trimmed, score variables defaulted to {5,5,5,5}
    assert_eq!(task.title, "Call vendor");
    assert_eq!(task.category, UNCATEGORIZED);
    assert_eq!(task.score_variables, ScoreVariables::default());
    assert_eq!(task.calculated_score, 1.0); // 25 / 25
    assert!(!task.is_daily3);
    assert!(!task.completed);
    assert_eq!(task.magic_words, "");

    let fetched = repo
        .find_task_by_id(task.id)
        .await
        .expect("lookup failed")
        .expect("task missing");
    assert_eq!(fetched.title, task.title);
    assert_eq!(fetched.calculated_score, task.calculated_score);
}

#[tokio::test]
async fn test_create_rejects_empty_title_and_missing_owner() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;

    let err = repo
        .create_task("owner-a", NewTaskData { title: "   ".to_string(), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(_)));

    let err = repo
        .create_task("", NewTaskData { title: "Task".to_string(), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::AuthRequired));
}

#[tokio::test]
async fn test_update_recomputes_score() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "owner-a", "Call vendor").await;

    let updated = repo
        .update_task(
            task.id,
            UpdateTaskData {
                score_variables: Some(ScoreVariables {
                    outcome: 8.0,
                    certainty: 9.0,
                    delay: 2.0,
                    effort: 3.0,
                }),
                ..Default::default()
            },
        )
        .await
        .expect("update failed");

    // round(8*9 / (2*3), 2) == 12.0
    assert_eq!(updated.calculated_score, 12.0);

    // Fields not in the patch are untouched
    assert_eq!(updated.title, "Call vendor");
    assert_eq!(updated.category, UNCATEGORIZED);

    // Patching an unrelated field leaves the score alone
    let patched = repo
        .update_task(
            task.id,
            UpdateTaskData {
                magic_words: Some("Just pick up the phone.".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update failed");
    assert_eq!(patched.calculated_score, 12.0);
    assert_eq!(patched.magic_words, "Just pick up the phone.");
}

#[tokio::test]
async fn test_vault_snapshot_sorted_by_score() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";

    for (title, outcome) in [("low", 1.0), ("high", 10.0), ("mid", 5.0)] {
        repo.create_task(
            owner,
            NewTaskData {
                title: title.to_string(),
                score_variables: Some(ScoreVariables {
                    outcome,
                    certainty: 10.0,
                    delay: 1.0,
                    effort: 1.0,
                }),
                ..Default::default()
            },
        )
        .await
        .expect("create failed");
    }

    let tasks = repo.find_tasks(owner).await.expect("snapshot failed");
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["high", "mid", "low"]);
}

#[tokio::test]
async fn test_owner_scoping() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    create_test_task(&repo, "owner-a", "A's task").await;
    create_test_task(&repo, "owner-b", "B's task").await;

    let a_tasks = repo.find_tasks("owner-a").await.expect("snapshot failed");
    assert_eq!(a_tasks.len(), 1);
    assert_eq!(a_tasks[0].title, "A's task");
}

#[tokio::test]
async fn test_toggle_complete_vacates_focus_slot() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "owner-a", "Call vendor").await;

    repo.set_daily3(task.id, true).await.expect("activation failed");

    let completed = repo.toggle_complete(task.id).await.expect("toggle failed");
    assert!(completed.completed);
    assert!(completed.completed_at.is_some());
    assert!(!completed.is_daily3);
    assert_eq!(completed.daily3_order, None);

    let reopened = repo.toggle_complete(task.id).await.expect("toggle failed");
    assert!(!reopened.completed);
    assert_eq!(reopened.completed_at, None);
}

#[tokio::test]
async fn test_daily3_capacity_enforced() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";

    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(create_test_task(&repo, owner, &format!("Task {i}")).await.id);
    }

    for id in &ids[..DAILY_CAPACITY] {
        repo.set_daily3(*id, true).await.expect("activation failed");
    }

    let err = repo.set_daily3(ids[3], true).await.unwrap_err();
    assert!(matches!(err, CoreError::CapacityExceeded(3)));

    // Completing one frees a slot
    repo.toggle_complete(ids[0]).await.expect("toggle failed");
    repo.set_daily3(ids[3], true).await.expect("activation after free slot failed");

    // Re-activating an already-active task is not a capacity violation
    repo.set_daily3(ids[1], true).await.expect("idempotent activation failed");
}

#[tokio::test]
async fn test_reorder_daily3_roundtrip() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";

    let t1 = create_test_task(&repo, owner, "T1").await;
    let t2 = create_test_task(&repo, owner, "T2").await;
    let t3 = create_test_task(&repo, owner, "T3").await;
    for id in [t1.id, t2.id, t3.id] {
        repo.set_daily3(id, true).await.expect("activation failed");
    }

    repo.reorder_daily3(owner, &[t3.id, t1.id, t2.id])
        .await
        .expect("reorder failed");

    let active = repo.active_daily3(owner).await.expect("active list failed");
    let titles: Vec<&str> = active.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["T3", "T1", "T2"]);
    let orders: Vec<Option<i64>> = active.iter().map(|t| t.daily3_order).collect();
    assert_eq!(orders, vec![Some(0), Some(1), Some(2)]);
}

#[tokio::test]
async fn test_subscription_reflects_mutations() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";
    create_test_task(&repo, owner, "First").await;

    let mut rx = repo.subscribe(owner).await.expect("subscribe failed");
    assert_eq!(rx.borrow().len(), 1);

    create_test_task(&repo, owner, "Second").await;
    rx.changed().await.expect("snapshot channel closed");
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.len(), 2);

    // Mutations for another owner do not disturb this stream
    create_test_task(&repo, "owner-b", "Elsewhere").await;
    assert!(!rx.has_changed().expect("snapshot channel closed"));
}

#[tokio::test]
async fn test_category_seed_add_and_duplicates() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";

    assert!(repo.seed_default_categories(owner).await.expect("seed failed"));
    // Second seed is a no-op
    assert!(!repo.seed_default_categories(owner).await.expect("seed failed"));

    let before = repo.find_categories(owner).await.expect("list failed").len();

    repo.add_category(owner, "Ops").await.expect("add failed");
    // Case-insensitive duplicate is a silent no-op
    repo.add_category(owner, "ops").await.expect("add failed");
    repo.add_category(owner, " OPS ").await.expect("add failed");

    let after = repo.find_categories(owner).await.expect("list failed");
    assert_eq!(after.len(), before + 1);
    assert!(after.iter().any(|c| c.name == "Ops"));
}

#[tokio::test]
async fn test_remove_category_migrate() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";
    repo.add_category(owner, "Ops").await.expect("add failed");

    for title in ["One", "Two"] {
        repo.create_task(
            owner,
            NewTaskData {
                title: title.to_string(),
                category: Some("Ops".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("create failed");
    }
    create_test_task(&repo, owner, "Unrelated").await;

    repo.remove_category(owner, "Ops", RemovalPolicy::Migrate)
        .await
        .expect("remove failed");

    let tasks = repo.find_tasks(owner).await.expect("snapshot failed");
    assert_eq!(tasks.len(), 3);
    assert!(tasks.iter().all(|t| t.category != "Ops"));
    assert_eq!(tasks.iter().filter(|t| t.category == UNCATEGORIZED).count(), 3);
    assert!(repo
        .find_categories(owner)
        .await
        .expect("list failed")
        .iter()
        .all(|c| c.name != "Ops"));
}

#[tokio::test]
async fn test_remove_category_delete() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";
    repo.add_category(owner, "Ops").await.expect("add failed");

    repo.create_task(
        owner,
        NewTaskData {
            title: "Doomed".to_string(),
            category: Some("Ops".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("create failed");
    let survivor = create_test_task(&repo, owner, "Survivor").await;

    repo.remove_category(owner, "Ops", RemovalPolicy::Delete)
        .await
        .expect("remove failed");

    let tasks = repo.find_tasks(owner).await.expect("snapshot failed");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, survivor.id);
}

#[tokio::test]
async fn test_notes_append_only_and_digest() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";
    let task = repo
        .create_task(
            owner,
            NewTaskData {
                title: "Call vendor".to_string(),
                category: Some("Ops".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("create failed");

    repo.add_note(task.id, "left voicemail").await.expect("note failed");
    repo.add_note(task.id, "they called back").await.expect("note failed");

    let notes = repo.find_notes(task.id).await.expect("list failed");
    assert_eq!(notes.len(), 2);
    // Newest first
    assert_eq!(notes[0].content, "they called back");

    let cutoff = chrono::Utc::now() - chrono::Duration::hours(1);
    let digest = repo.notes_logged_since(owner, cutoff).await.expect("digest failed");
    assert_eq!(digest, vec!["[Ops] left voicemail", "[Ops] they called back"]);

    let err = repo.add_note(Uuid::now_v7(), "orphan note").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound(_)));
}

#[tokio::test]
async fn test_notes_cascade_with_task_delete() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "owner-a", "Call vendor").await;
    repo.add_note(task.id, "first contact").await.expect("note failed");

    repo.delete_task(task.id).await.expect("delete failed");
    let notes = repo.find_notes(task.id).await.expect("list failed");
    assert!(notes.is_empty());
}

#[tokio::test]
async fn test_identity_lifecycle_and_orphans() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;

    assert_eq!(repo.current_identity().await.expect("query failed"), None);

    let anon = repo.establish_identity().await.expect("establish failed");
    // Idempotent while active
    assert_eq!(repo.establish_identity().await.expect("establish failed"), anon);

    create_test_task(&repo, &anon, "Old life task").await;

    // Linking a durable identity strands the anonymous records
    let durable = repo.link_identity("user@example").await.expect("link failed");
    assert_eq!(repo.current_identity().await.expect("query failed"), Some(durable.clone()));
    assert!(repo.find_tasks(&durable).await.expect("snapshot failed").is_empty());

    assert_eq!(repo.scan_orphans(&durable).await.expect("scan failed"), 1);
    assert_eq!(repo.claim_orphans(&durable).await.expect("claim failed"), 1);
    assert_eq!(repo.find_tasks(&durable).await.expect("snapshot failed").len(), 1);

    // Idempotent: nothing left to claim
    assert_eq!(repo.scan_orphans(&durable).await.expect("scan failed"), 0);
    assert_eq!(repo.claim_orphans(&durable).await.expect("claim failed"), 0);

    repo.sign_out().await.expect("sign out failed");
    assert_eq!(repo.current_identity().await.expect("query failed"), None);
}

#[tokio::test]
async fn test_daily_maintenance_runs_once_per_day() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";
    create_test_task(&repo, owner, "Task").await;

    let first = repo.run_daily_maintenance(owner).await.expect("maintenance failed");
    assert!(first.ran);

    let second = repo.run_daily_maintenance(owner).await.expect("maintenance failed");
    assert!(!second.ran);
}

#[tokio::test]
async fn test_maintenance_resets_stale_completions() {
    let (repo, pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";

    let focus = create_test_task(&repo, owner, "Yesterday's mission").await;
    repo.set_daily3(focus.id, true).await.expect("activation failed");
    repo.toggle_complete(focus.id).await.expect("toggle failed");

    let recurring = repo
        .create_task(
            owner,
            NewTaskData {
                title: "Morning review".to_string(),
                is_recurring: true,
                ..Default::default()
            },
        )
        .await
        .expect("create failed");
    repo.toggle_complete(recurring.id).await.expect("toggle failed");

    // Backdate both completions to before today's local midnight
    let yesterday = chrono::Utc::now() - chrono::Duration::days(2);
    sqlx::query("UPDATE tasks SET completed_at = $1, is_daily3 = TRUE WHERE id = $2")
        .bind(yesterday)
        .bind(focus.id)
        .execute(&pool)
        .await
        .expect("backdate failed");
    sqlx::query("UPDATE tasks SET completed_at = $1 WHERE id = $2")
        .bind(yesterday)
        .bind(recurring.id)
        .execute(&pool)
        .await
        .expect("backdate failed");

    let report = repo.run_daily_maintenance(owner).await.expect("maintenance failed");
    assert!(report.ran);
    assert_eq!(report.slots_cleared, 1);
    assert_eq!(report.recurring_reset, 1);

    let tasks = repo.find_tasks(owner).await.expect("snapshot failed");
    for task in tasks {
        assert!(!task.completed, "{} should be reopened", task.title);
        assert_eq!(task.completed_at, None);
        assert!(!task.is_daily3);
    }
}

#[tokio::test]
async fn test_streak_and_completed_today() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";

    assert_eq!(repo.current_streak(owner).await.expect("streak failed"), 0);

    let task = create_test_task(&repo, owner, "Task").await;
    repo.toggle_complete(task.id).await.expect("toggle failed");

    assert_eq!(repo.current_streak(owner).await.expect("streak failed"), 1);
    assert_eq!(repo.completed_today(owner).await.expect("count failed"), 1);
}

#[tokio::test]
async fn test_short_id_prefix_resolution() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "owner-a", "Call vendor").await;

    let prefix = task.id.simple().to_string()[..8].to_string();
    let matches = repo
        .find_tasks_by_short_id_prefix(&prefix)
        .await
        .expect("prefix lookup failed");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, task.id);

    // Hyphenated form resolves too
    let hyphenated = &task.id.to_string()[..13];
    let matches = repo
        .find_tasks_by_short_id_prefix(hyphenated)
        .await
        .expect("prefix lookup failed");
    assert_eq!(matches.len(), 1);
}

#[tokio::test]
async fn test_commit_drafts_creates_categories_first() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = "owner-a";

    let drafts = vec![
        TaskDraft {
            title: "Call vendor".to_string(),
            category: "Ops".to_string(),
            hormozi_score: 8.0,
            magic_words: "Just dial.".to_string(),
        },
        TaskDraft {
            title: "Wild idea".to_string(),
            category: UNCATEGORIZED.to_string(),
            hormozi_score: 42.0, // clamped on commit
            magic_words: String::new(),
        },
    ];

    let created = commit_drafts(&repo, owner, &drafts).await.expect("commit failed");
    assert_eq!(created.len(), 2);

    // The unseen category was created before its task
    let categories = repo.find_categories(owner).await.expect("list failed");
    assert!(categories.iter().any(|c| c.name == "Ops"));
    // The sentinel never becomes a real category row
    assert!(categories.iter().all(|c| c.name != UNCATEGORIZED));

    // Model's 1-10 judgment lands on outcome only, other axes fixed
    let first = &created[0];
    assert_eq!(first.score_variables.outcome, 8.0);
    assert_eq!(first.score_variables.certainty, 9.0);
    assert_eq!(first.score_variables.delay, 5.0);
    assert_eq!(first.score_variables.effort, 5.0);
    assert_eq!(first.calculated_score, 2.88); // round(8*9/25, 2)

    assert_eq!(created[1].score_variables.outcome, 10.0);
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let (repo, _pool, _temp_dir) = setup_test_db().await;
    let owner = repo.establish_identity().await.expect("identity failed");

    repo.add_category(&owner, "Ops").await.expect("add category failed");

    let task = repo
        .create_task(
            &owner,
            NewTaskData {
                title: "Call vendor".to_string(),
                category: Some("Ops".to_string()),
                score_variables: Some(ScoreVariables {
                    outcome: 8.0,
                    certainty: 9.0,
                    delay: 2.0,
                    effort: 3.0,
                }),
                ..Default::default()
            },
        )
        .await
        .expect("create failed");
    assert_eq!(task.calculated_score, 12.0);

    repo.set_daily3(task.id, true).await.expect("activation failed");
    assert_eq!(repo.active_daily3(&owner).await.expect("active failed").len(), 1);

    repo.toggle_complete(task.id).await.expect("toggle failed");
    assert_eq!(repo.active_daily3(&owner).await.expect("active failed").len(), 0);

    let done = repo
        .find_task_by_id(task.id)
        .await
        .expect("lookup failed")
        .expect("task missing");
    assert!(done.completed);
    assert!(done.completed_at.is_some());
}
