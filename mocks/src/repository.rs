//! Mock implementation of the TodoRepository trait
//!
//! Provides a thread-safe in-memory repository with:
//! - Per-operation failure injection
//! - Call tracking for verification
//! - Transactions that stage changes and discard them unless committed

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use todo_core::{NewTodo, Result, TodoError, TodoItem, TodoRepository, TodoTransaction, UpdateTodo};
use tokio::sync::OwnedMutexGuard;

#[derive(Debug, Clone, Default)]
struct MockState {
    todos: BTreeMap<i64, TodoItem>,
    next_id: i64,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MockState {
    fn with_todos(todos: Vec<TodoItem>) -> Self {
        let next_id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let last_timestamp = todos.iter().map(|t| t.updated_at).max();
        Self {
            todos: todos.into_iter().map(|t| (t.id, t)).collect(),
            next_id,
            last_timestamp,
        }
    }

    /// Timestamps never repeat, so every write is observable through `updated_at`
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(prev) if now <= prev => prev + Duration::milliseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }

    fn list(&self, completed: Option<bool>) -> Vec<TodoItem> {
        let mut todos: Vec<TodoItem> = self
            .todos
            .values()
            .filter(|t| completed.map_or(true, |c| t.completed == c))
            .cloned()
            .collect();
        todos.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        todos
    }

    fn create(&mut self, todo: NewTodo) -> TodoItem {
        let now = self.next_timestamp();
        let item = TodoItem {
            id: self.next_id,
            title: todo.title,
            description: todo.description.filter(|d| !d.is_empty()),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.todos.insert(item.id, item.clone());
        item
    }

    fn update(&mut self, id: i64, changes: UpdateTodo) -> Option<TodoItem> {
        if !self.todos.contains_key(&id) {
            return None;
        }
        let now = self.next_timestamp();
        let item = self.todos.get_mut(&id)?;
        item.title = changes.title;
        item.description = changes.description.filter(|d| !d.is_empty());
        item.completed = changes.completed;
        item.updated_at = now;
        Some(item.clone())
    }

    fn toggle(&mut self, id: i64) -> Option<TodoItem> {
        if !self.todos.contains_key(&id) {
            return None;
        }
        let now = self.next_timestamp();
        let item = self.todos.get_mut(&id)?;
        item.completed = !item.completed;
        item.updated_at = now;
        Some(item.clone())
    }
}

type Failures = Arc<Mutex<HashMap<String, TodoError>>>;
type History = Arc<Mutex<Vec<String>>>;

fn check_failure(failures: &Failures, operation: &str) -> Result<()> {
    match failures.lock().get(operation) {
        Some(error) => Err(error.clone()),
        None => Ok(()),
    }
}

/// Mock implementation of TodoRepository for testing
///
/// Clones share the same store. Writes (including open transactions) are
/// serialized through one writer lock, mirroring the single SQLite writer.
#[derive(Clone)]
pub struct MockTodoRepository {
    state: Arc<Mutex<MockState>>,
    writer: Arc<tokio::sync::Mutex<()>>,
    failures: Failures,
    call_history: History,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_todos(Vec::new())
    }

    /// Create mock repository with pre-populated todos
    ///
    /// New IDs continue after the largest seeded ID.
    pub fn with_todos(todos: Vec<TodoItem>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::with_todos(todos))),
            writer: Arc::new(tokio::sync::Mutex::new(())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make an operation fail until [`clear_failures`](Self::clear_failures)
    ///
    /// Repository operations are named after their method (`"create"`,
    /// `"begin"`, `"health_check"`); transaction operations carry a `tx.`
    /// prefix (`"tx.update"`, `"tx.commit"`, `"tx.rollback"`).
    pub fn fail_on(&self, operation: &str, error: TodoError) {
        self.failures.lock().insert(operation.to_string(), error);
    }

    /// Remove all injected failures
    pub fn clear_failures(&self) {
        self.failures.lock().clear();
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Number of committed todos
    pub fn len(&self) -> usize {
        self.state.lock().todos.len()
    }

    /// Whether the committed store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record_call(&self, call: String) {
        self.call_history.lock().push(call);
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    type Transaction = MockTodoTransaction;

    async fn begin(&self) -> Result<MockTodoTransaction> {
        self.record_call("begin()".to_string());
        check_failure(&self.failures, "begin")?;

        let guard = Arc::clone(&self.writer).lock_owned().await;
        let staged = self.state.lock().clone();

        Ok(MockTodoTransaction {
            shared: Arc::clone(&self.state),
            staged,
            failures: Arc::clone(&self.failures),
            call_history: Arc::clone(&self.call_history),
            finished: false,
            _writer: guard,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<TodoItem>> {
        self.record_call(format!("get(id={id})"));
        check_failure(&self.failures, "get")?;
        Ok(self.state.lock().todos.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<TodoItem>> {
        self.record_call("list()".to_string());
        check_failure(&self.failures, "list")?;
        Ok(self.state.lock().list(None))
    }

    async fn list_by_completion(&self, completed: bool) -> Result<Vec<TodoItem>> {
        self.record_call(format!("list_by_completion(completed={completed})"));
        check_failure(&self.failures, "list_by_completion")?;
        Ok(self.state.lock().list(Some(completed)))
    }

    async fn create(&self, todo: NewTodo) -> Result<TodoItem> {
        self.record_call(format!("create(title={})", todo.title));
        check_failure(&self.failures, "create")?;
        let _writer = self.writer.lock().await;
        Ok(self.state.lock().create(todo))
    }

    async fn update(&self, id: i64, changes: UpdateTodo) -> Result<Option<TodoItem>> {
        self.record_call(format!("update(id={id})"));
        check_failure(&self.failures, "update")?;
        let _writer = self.writer.lock().await;
        Ok(self.state.lock().update(id, changes))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.record_call(format!("delete(id={id})"));
        check_failure(&self.failures, "delete")?;
        let _writer = self.writer.lock().await;
        self.state.lock().todos.remove(&id);
        Ok(())
    }

    async fn toggle_completed(&self, id: i64) -> Result<Option<TodoItem>> {
        self.record_call(format!("toggle_completed(id={id})"));
        check_failure(&self.failures, "toggle_completed")?;
        let _writer = self.writer.lock().await;
        Ok(self.state.lock().toggle(id))
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call("health_check()".to_string());
        check_failure(&self.failures, "health_check")
    }
}

/// Transaction over a private copy of the store
///
/// Holds the writer lock for its whole lifetime. Commit publishes the staged
/// copy; rollback or drop throws it away.
pub struct MockTodoTransaction {
    shared: Arc<Mutex<MockState>>,
    staged: MockState,
    failures: Failures,
    call_history: History,
    finished: bool,
    _writer: OwnedMutexGuard<()>,
}

impl MockTodoTransaction {
    fn record_call(&self, call: String) {
        self.call_history.lock().push(call);
    }
}

#[async_trait]
impl TodoTransaction for MockTodoTransaction {
    async fn get(&mut self, id: i64) -> Result<Option<TodoItem>> {
        self.record_call(format!("tx.get(id={id})"));
        check_failure(&self.failures, "tx.get")?;
        Ok(self.staged.todos.get(&id).cloned())
    }

    async fn update(&mut self, id: i64, changes: UpdateTodo) -> Result<Option<TodoItem>> {
        self.record_call(format!("tx.update(id={id})"));
        check_failure(&self.failures, "tx.update")?;
        Ok(self.staged.update(id, changes))
    }

    async fn delete(&mut self, id: i64) -> Result<()> {
        self.record_call(format!("tx.delete(id={id})"));
        check_failure(&self.failures, "tx.delete")?;
        self.staged.todos.remove(&id);
        Ok(())
    }

    async fn toggle_completed(&mut self, id: i64) -> Result<Option<TodoItem>> {
        self.record_call(format!("tx.toggle_completed(id={id})"));
        check_failure(&self.failures, "tx.toggle_completed")?;
        Ok(self.staged.toggle(id))
    }

    async fn commit(mut self) -> Result<()> {
        self.record_call("tx.commit()".to_string());
        // A failed commit leaves `finished` unset so drop records the rollback
        check_failure(&self.failures, "tx.commit")?;
        *self.shared.lock() = std::mem::take(&mut self.staged);
        self.finished = true;
        Ok(())
    }

    async fn rollback(mut self) -> Result<()> {
        self.record_call("tx.rollback()".to_string());
        self.finished = true;
        check_failure(&self.failures, "tx.rollback")
    }
}

impl Drop for MockTodoTransaction {
    fn drop(&mut self) {
        if !self.finished {
            self.call_history
                .lock()
                .push("tx.rollback (drop)".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MockTodoRepository::new();
        let a = repo.create(NewTodo::new("A", None)).await.unwrap();
        let b = repo.create(NewTodo::new("B", Some(String::new()))).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(b.description, None);
        assert!(b.created_at > a.created_at);
        repo.assert_called("create");
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let repo = MockTodoRepository::new();
        repo.fail_on("list", TodoError::Database("boom".to_string()));

        assert!(repo.list().await.is_err());
        assert!(repo.list_by_completion(true).await.is_ok());

        repo.clear_failures();
        assert!(repo.list().await.is_ok());
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_changes() {
        let repo = MockTodoRepository::new();
        let todo = repo.create(NewTodo::new("Keep", None)).await.unwrap();

        {
            let mut tx = repo.begin().await.unwrap();
            tx.delete(todo.id).await.unwrap();
        }

        assert!(repo.get(todo.id).await.unwrap().is_some());
        repo.assert_called("tx.rollback (drop)");
    }

    #[tokio::test]
    async fn test_failed_commit_discards_changes() {
        let repo = MockTodoRepository::new();
        let todo = repo.create(NewTodo::new("Keep", None)).await.unwrap();
        repo.fail_on("tx.commit", TodoError::Busy("locked".to_string()));

        let mut tx = repo.begin().await.unwrap();
        tx.toggle_completed(todo.id).await.unwrap();
        assert!(tx.commit().await.is_err());

        assert!(!repo.get(todo.id).await.unwrap().unwrap().completed);
    }

    #[tokio::test]
    async fn test_seeded_repository_continues_ids() {
        let repo = MockTodoRepository::with_todos(vec![crate::fixtures::create_test_todo()]);
        let created = repo.create(NewTodo::new("Next", None)).await.unwrap();
        assert_eq!(created.id, 2);
        assert_eq!(repo.len(), 2);
    }
}
