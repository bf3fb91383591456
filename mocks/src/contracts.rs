//! Contract tests that all TodoRepository implementations must pass
//!
//! The suite runs against one shared repository and only relies on rows it
//! created itself, so it tolerates whatever earlier steps left behind.

use crate::assertions::{
    assert_all_completed, assert_contains_todo, assert_not_contains_todo,
    assert_sorted_newest_first, assert_todo_matches,
};
use todo_core::{NewTodo, TodoRepository, TodoTransaction, UpdateTodo};

const MISSING_ID: i64 = 987_654_321;

/// Run every contract check against `repo`
pub async fn test_repository_contract<R: TodoRepository>(repo: &R) {
    test_health_check_contract(repo).await;
    test_create_contract(repo).await;
    test_get_contract(repo).await;
    test_list_ordering_contract(repo).await;
    test_list_by_completion_contract(repo).await;
    test_update_contract(repo).await;
    test_toggle_contract(repo).await;
    test_delete_contract(repo).await;
    test_transaction_rollback_contract(repo).await;
}

async fn test_health_check_contract<R: TodoRepository>(repo: &R) {
    assert!(
        repo.health_check().await.is_ok(),
        "Health check should pass for healthy repository"
    );
}

async fn test_create_contract<R: TodoRepository>(repo: &R) {
    let input = NewTodo::new("Contract create", Some("With description".to_string()));
    let created = repo.create(input.clone()).await.unwrap();
    assert!(created.id > 0);
    assert_todo_matches(&created, &input);

    let empty = NewTodo::new("Contract empty description", Some(String::new()));
    let created_empty = repo.create(empty.clone()).await.unwrap();
    assert_todo_matches(&created_empty, &empty);
    assert!(created_empty.description.is_none());

    assert!(
        created_empty.id > created.id,
        "IDs must increase with each insert"
    );
}

async fn test_get_contract<R: TodoRepository>(repo: &R) {
    let created = repo
        .create(NewTodo::new("Contract get", None))
        .await
        .unwrap();

    let fetched = repo.get(created.id).await.unwrap();
    assert_eq!(fetched.as_ref(), Some(&created));

    let missing = repo.get(MISSING_ID).await.unwrap();
    assert!(missing.is_none(), "Missing ID should return None, not error");
}

async fn test_list_ordering_contract<R: TodoRepository>(repo: &R) {
    let mut ids = Vec::new();
    for n in 0..3 {
        ids.push(
            repo.create(NewTodo::new(format!("Contract list {n}"), None))
                .await
                .unwrap()
                .id,
        );
    }

    let todos = repo.list().await.unwrap();
    assert_sorted_newest_first(&todos);

    // Most recent inserts come first
    let head: Vec<i64> = todos.iter().take(3).map(|t| t.id).collect();
    ids.reverse();
    assert_eq!(head, ids);
}

async fn test_list_by_completion_contract<R: TodoRepository>(repo: &R) {
    let done = repo
        .create(NewTodo::new("Contract filter done", None))
        .await
        .unwrap();
    let open = repo
        .create(NewTodo::new("Contract filter open", None))
        .await
        .unwrap();
    repo.toggle_completed(done.id).await.unwrap();

    let completed = repo.list_by_completion(true).await.unwrap();
    assert_all_completed(&completed, true);
    assert_sorted_newest_first(&completed);
    assert_contains_todo(&completed, done.id);
    assert_not_contains_todo(&completed, open.id);

    let pending = repo.list_by_completion(false).await.unwrap();
    assert_all_completed(&pending, false);
    assert_contains_todo(&pending, open.id);
    assert_not_contains_todo(&pending, done.id);

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), completed.len() + pending.len());
}

async fn test_update_contract<R: TodoRepository>(repo: &R) {
    let original = repo
        .create(NewTodo::new("Contract update", Some("Before".to_string())))
        .await
        .unwrap();

    let mut tx = repo.begin().await.unwrap();
    let updated = tx
        .update(
            original.id,
            UpdateTodo::new("Contract updated", None, true),
        )
        .await
        .unwrap()
        .expect("existing todo should be updated");
    tx.commit().await.unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.title, "Contract updated");
    assert!(updated.description.is_none());
    assert!(updated.completed);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);

    let fetched = repo.get(original.id).await.unwrap().unwrap();
    assert_eq!(fetched, updated);

    let mut tx = repo.begin().await.unwrap();
    let missing = tx
        .update(MISSING_ID, UpdateTodo::new("Nobody", None, false))
        .await
        .unwrap();
    tx.commit().await.unwrap();
    assert!(missing.is_none(), "Updating a missing ID should return None");
}

async fn test_toggle_contract<R: TodoRepository>(repo: &R) {
    let original = repo
        .create(NewTodo::new("Contract toggle", None))
        .await
        .unwrap();

    let mut tx = repo.begin().await.unwrap();
    let once = tx.toggle_completed(original.id).await.unwrap().unwrap();
    tx.commit().await.unwrap();
    assert!(once.completed);
    assert!(once.updated_at > original.updated_at);
    assert_eq!(once.title, original.title);

    let twice = repo.toggle_completed(original.id).await.unwrap().unwrap();
    assert!(!twice.completed);
    assert!(twice.updated_at > once.updated_at);

    let missing = repo.toggle_completed(MISSING_ID).await.unwrap();
    assert!(missing.is_none(), "Toggling a missing ID should return None");
}

async fn test_delete_contract<R: TodoRepository>(repo: &R) {
    let doomed = repo
        .create(NewTodo::new("Contract delete", None))
        .await
        .unwrap();

    let mut tx = repo.begin().await.unwrap();
    tx.delete(doomed.id).await.unwrap();
    tx.commit().await.unwrap();

    assert!(repo.get(doomed.id).await.unwrap().is_none());
    assert_not_contains_todo(&repo.list().await.unwrap(), doomed.id);

    // Deleting again, or deleting something that never existed, succeeds
    assert!(repo.delete(doomed.id).await.is_ok());
    assert!(repo.delete(MISSING_ID).await.is_ok());

    let next = repo
        .create(NewTodo::new("Contract after delete", None))
        .await
        .unwrap();
    assert!(next.id > doomed.id, "Deleted IDs must not be reused");
}

async fn test_transaction_rollback_contract<R: TodoRepository>(repo: &R) {
    let todo = repo
        .create(NewTodo::new("Contract rollback", None))
        .await
        .unwrap();

    {
        let mut tx = repo.begin().await.unwrap();
        tx.update(todo.id, UpdateTodo::new("Never saved", None, true))
            .await
            .unwrap();
        let seen = tx.get(todo.id).await.unwrap().unwrap();
        assert_eq!(seen.title, "Never saved", "Transaction should see its own writes");
    }
    assert_eq!(repo.get(todo.id).await.unwrap().unwrap(), todo);

    let mut tx = repo.begin().await.unwrap();
    tx.delete(todo.id).await.unwrap();
    tx.rollback().await.unwrap();
    assert!(repo.get(todo.id).await.unwrap().is_some());
}
