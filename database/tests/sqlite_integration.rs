use database::{
    NewTodo, RepositoryOptions, SqliteTodoRepository, TodoRepository, TodoTransaction, UpdateTodo,
};
use futures_util::future::join_all;
use std::{sync::Arc, time::Duration};
use tempfile::TempDir;

async fn create_test_repository() -> SqliteTodoRepository {
    let repo = SqliteTodoRepository::new(":memory:").await.unwrap();
    repo.migrate().await.unwrap();
    repo
}

async fn create_file_repository(dir: &TempDir) -> SqliteTodoRepository {
    let url = format!("sqlite://{}", dir.path().join("todos.db").display());
    let repo = SqliteTodoRepository::with_options(
        &url,
        RepositoryOptions {
            max_connections: 4,
            acquire_timeout: Duration::from_secs(10),
        },
    )
    .await
    .unwrap();
    repo.migrate().await.unwrap();
    repo
}

#[tokio::test]
async fn test_full_todo_lifecycle() {
    let repo = create_test_repository().await;

    let todo = repo
        .create(NewTodo::new("Buy milk", Some("2 liters".to_string())))
        .await
        .unwrap();
    assert_eq!(todo.id, 1);
    assert!(!todo.completed);

    let listed = repo.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Buy milk");

    let mut tx = repo.begin().await.unwrap();
    let toggled = tx.toggle_completed(todo.id).await.unwrap().unwrap();
    tx.commit().await.unwrap();
    assert!(toggled.completed);
    assert!(toggled.updated_at > todo.updated_at);
    assert_eq!(toggled.created_at, todo.created_at);

    let mut tx = repo.begin().await.unwrap();
    let updated = tx
        .update(todo.id, UpdateTodo::new("Buy oat milk", None, false))
        .await
        .unwrap()
        .unwrap();
    tx.commit().await.unwrap();
    assert_eq!(updated.title, "Buy oat milk");
    assert_eq!(updated.description, None);
    assert!(!updated.completed);

    let mut tx = repo.begin().await.unwrap();
    tx.delete(todo.id).await.unwrap();
    tx.commit().await.unwrap();

    assert!(repo.get(todo.id).await.unwrap().is_none());
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ids_are_not_reused() {
    let repo = create_test_repository().await;

    let first = repo.create(NewTodo::new("First", None)).await.unwrap();
    repo.delete(first.id).await.unwrap();
    let second = repo.create(NewTodo::new("Second", None)).await.unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_list_orders_newest_first_with_id_tiebreak() {
    let repo = create_test_repository().await;

    // Same-millisecond inserts are common here, the id breaks the tie
    let mut ids = Vec::new();
    for i in 0..5 {
        let todo = repo.create(NewTodo::new(format!("Todo {i}"), None)).await.unwrap();
        ids.push(todo.id);
    }

    let listed: Vec<i64> = repo.list().await.unwrap().iter().map(|t| t.id).collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_list_by_completion() {
    let repo = create_test_repository().await;

    let done = repo.create(NewTodo::new("Done", None)).await.unwrap();
    repo.create(NewTodo::new("Open A", None)).await.unwrap();
    repo.create(NewTodo::new("Open B", None)).await.unwrap();
    repo.toggle_completed(done.id).await.unwrap();

    let completed = repo.list_by_completion(true).await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, done.id);

    let open = repo.list_by_completion(false).await.unwrap();
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|t| !t.completed));
    assert_eq!(open[0].title, "Open B");
}

#[tokio::test]
async fn test_timestamps_are_stored_as_rfc3339_text() {
    let repo = create_test_repository().await;
    let todo = repo.create(NewTodo::new("Check format", None)).await.unwrap();

    let (created_at,): (String,) = sqlx::query_as("SELECT created_at FROM todos WHERE id = ?")
        .bind(todo.id)
        .fetch_one(repo.pool())
        .await
        .unwrap();

    assert!(created_at.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&created_at).is_ok());
}

#[tokio::test]
async fn test_double_toggle_restores_flag() {
    let repo = create_test_repository().await;
    let todo = repo.create(NewTodo::new("Flip", None)).await.unwrap();

    let once = repo.toggle_completed(todo.id).await.unwrap().unwrap();
    let twice = repo.toggle_completed(todo.id).await.unwrap().unwrap();

    assert!(once.completed);
    assert!(!twice.completed);
    assert!(once.updated_at > todo.updated_at);
    assert!(twice.updated_at > once.updated_at);
}

#[tokio::test]
async fn test_back_to_back_mutations_advance_updated_at() {
    let repo = create_test_repository().await;

    for round in 0..50 {
        let created = repo
            .create(NewTodo::new(format!("Rapid {round}"), None))
            .await
            .unwrap();

        let mut tx = repo.begin().await.unwrap();
        let updated = tx
            .update(created.id, UpdateTodo::new("Rapid edit", None, false))
            .await
            .unwrap()
            .unwrap();
        tx.commit().await.unwrap();

        let once = repo.toggle_completed(created.id).await.unwrap().unwrap();
        let twice = repo.toggle_completed(created.id).await.unwrap().unwrap();

        assert!(updated.updated_at > created.updated_at, "round {round}: update");
        assert!(once.updated_at > updated.updated_at, "round {round}: first toggle");
        assert!(twice.updated_at > once.updated_at, "round {round}: second toggle");
        assert_eq!(twice.created_at, created.created_at);
    }
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let repo = create_file_repository(&dir).await;
        let todo = repo.create(NewTodo::new("Persist me", None)).await.unwrap();
        repo.close().await;
        todo.id
    };

    let repo = create_file_repository(&dir).await;
    let todo = repo.get(id).await.unwrap().unwrap();
    assert_eq!(todo.title, "Persist me");
    repo.close().await;
}

#[tokio::test]
async fn test_concurrent_toggles_are_serialized() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(create_file_repository(&dir).await);
    let id = repo.create(NewTodo::new("Contended", None)).await.unwrap().id;

    let tasks = (0..10).map(|_| {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move {
            let mut tx = repo.begin().await?;
            let toggled = tx.toggle_completed(id).await?;
            tx.commit().await?;
            Ok::<_, database::TodoError>(toggled)
        })
    });

    for result in join_all(tasks).await {
        let toggled = result.unwrap().unwrap();
        assert!(toggled.is_some());
    }

    // An even number of flips lands back where it started
    let after = repo.get(id).await.unwrap().unwrap();
    assert!(!after.completed);
    repo.close().await;
}

#[tokio::test]
async fn test_reads_proceed_while_write_transaction_is_open() {
    let dir = tempfile::tempdir().unwrap();
    let repo = create_file_repository(&dir).await;
    let todo = repo.create(NewTodo::new("Visible", None)).await.unwrap();

    let mut tx = repo.begin().await.unwrap();
    tx.toggle_completed(todo.id).await.unwrap();

    // Readers see the last committed state
    let seen = repo.get(todo.id).await.unwrap().unwrap();
    assert!(!seen.completed);

    tx.commit().await.unwrap();
    let seen = repo.get(todo.id).await.unwrap().unwrap();
    assert!(seen.completed);
    repo.close().await;
}
