use std::sync::Arc;
use std::time::Duration;

use taskhub::db::{create_pool_at, initialize_database, ConnectionPool};
use taskhub::{
    LocalTodoRepository, SqliteTodoStore, TodoListModel, TodoListState, TodoRecord, TodoRepository,
    TodoSeeder, TodoStore,
};
use tempfile::TempDir;
use tokio::sync::watch;
use tokio::time::timeout;

fn setup() -> (
    TempDir,
    Arc<ConnectionPool>,
    Arc<SqliteTodoStore>,
    Arc<TodoListModel>,
) {
    let dir = tempfile::tempdir().unwrap();
    let pool = Arc::new(create_pool_at(&dir.path().join("todos.db")).unwrap());
    {
        let conn = pool.get().unwrap();
        initialize_database(&conn).unwrap();
    }
    let store = Arc::new(SqliteTodoStore::new(Arc::clone(&pool)));
    let repository: Arc<dyn TodoRepository> = Arc::new(LocalTodoRepository::new(
        Arc::clone(&store) as Arc<dyn TodoStore>,
    ));
    let model = Arc::new(TodoListModel::new(repository));
    (dir, pool, store, model)
}

fn record(id: &str, title: &str, created_at: i64) -> TodoRecord {
    TodoRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        is_completed: false,
        created_at,
    }
}

/// Wait until the published state matches the predicate.
///
/// The watch channel conflates updates, so the predicate has to describe
/// the settled state rather than an intermediate one.
async fn wait_for<F>(rx: &mut watch::Receiver<TodoListState>, mut pred: F) -> TodoListState
where
    F: FnMut(&TodoListState) -> bool,
{
    timeout(Duration::from_secs(5), async {
        loop {
            {
                let state = rx.borrow_and_update();
                if pred(&state) {
                    return state.clone();
                }
            }
            rx.changed().await.expect("state channel closed");
        }
    })
    .await
    .expect("state never matched")
}

fn settled(state: &TodoListState) -> bool {
    !state.is_loading && state.error.is_none()
}

#[tokio::test]
async fn load_reaches_settled_success() {
    let (_dir, _pool, _store, model) = setup();
    let mut rx = model.subscribe();

    model.load();

    let state = wait_for(&mut rx, settled).await;
    assert!(state.todos.is_empty());
}

#[tokio::test]
async fn add_reloads_and_shows_the_new_todo() {
    let (_dir, _pool, _store, model) = setup();
    let mut rx = model.subscribe();

    model.load();
    wait_for(&mut rx, settled).await;

    model.add("Buy milk", "2 liters").await;

    let state = wait_for(&mut rx, |s| settled(s) && s.todos.len() == 1).await;
    assert_eq!(state.todos[0].title, "Buy milk");
    assert!(!state.todos[0].is_completed);
}

#[tokio::test]
async fn add_blank_title_surfaces_error_and_keeps_the_list() {
    let (_dir, _pool, _store, model) = setup();
    let mut rx = model.subscribe();

    model.load();
    model.add("keep me", "").await;
    wait_for(&mut rx, |s| settled(s) && s.todos.len() == 1).await;

    model.add("   ", "no title").await;

    let state = wait_for(&mut rx, |s| s.error.is_some()).await;
    assert_eq!(state.error.as_deref(), Some("Title cannot be empty"));
    assert_eq!(state.todos.len(), 1, "a rejected add must not touch the list");
}

#[tokio::test]
async fn update_through_the_model() {
    let (_dir, _pool, _store, model) = setup();
    let mut rx = model.subscribe();

    model.load();
    model.add("draft", "").await;
    let state = wait_for(&mut rx, |s| settled(s) && s.todos.len() == 1).await;

    let mut todo = state.todos[0].clone();
    todo.title = "final".to_string();
    model.update(todo).await;

    let state = wait_for(&mut rx, |s| {
        settled(s) && s.todos.first().map(|t| t.title.as_str()) == Some("final")
    })
    .await;
    assert_eq!(state.todos.len(), 1);
}

#[tokio::test]
async fn toggle_then_delete_flow() {
    let (_dir, _pool, _store, model) = setup();
    let mut rx = model.subscribe();

    model.load();
    model.add("task", "").await;
    let state = wait_for(&mut rx, |s| settled(s) && s.todos.len() == 1).await;
    let id = state.todos[0].id.clone();

    model.toggle_completion(&id).await;
    wait_for(&mut rx, |s| {
        settled(s) && s.todos.first().map(|t| t.is_completed) == Some(true)
    })
    .await;

    model.delete(&id).await;
    wait_for(&mut rx, |s| settled(s) && s.todos.is_empty()).await;
}

#[tokio::test]
async fn toggle_of_missing_id_surfaces_todo_not_found() {
    let (_dir, _pool, _store, model) = setup();
    let mut rx = model.subscribe();

    model.load();
    wait_for(&mut rx, settled).await;

    model.toggle_completion("ghost").await;

    let state = wait_for(&mut rx, |s| s.error.is_some()).await;
    assert_eq!(state.error.as_deref(), Some("Todo not found"));
}

#[tokio::test]
async fn clear_error_removes_the_message() {
    let (_dir, _pool, _store, model) = setup();
    let mut rx = model.subscribe();

    model.load();
    wait_for(&mut rx, settled).await;

    model.add("   ", "").await;
    wait_for(&mut rx, |s| s.error.is_some()).await;

    model.clear_error();

    let state = wait_for(&mut rx, |s| s.error.is_none()).await;
    assert!(state.error.is_none());
}

#[tokio::test]
async fn model_observes_external_store_writes() {
    let (_dir, _pool, store, model) = setup();
    let mut rx = model.subscribe();

    model.load();
    wait_for(&mut rx, settled).await;

    store.insert(record("ext", "written behind the model", 1_000))
        .await
        .unwrap();

    let state = wait_for(&mut rx, |s| settled(s) && s.todos.len() == 1).await;
    assert_eq!(state.todos[0].id, "ext");
}

#[tokio::test]
async fn stream_fault_keeps_the_list_and_sets_an_error() {
    let (_dir, _pool, store, model) = setup();
    let mut rx = model.subscribe();

    model.load();
    model.add("survivor", "").await;
    wait_for(&mut rx, |s| settled(s) && s.todos.len() == 1).await;

    // A row the mapping cannot represent faults the observation stream
    store.insert(record("bad", "corrupt", i64::MAX)).await.unwrap();

    let state = wait_for(&mut rx, |s| s.error.is_some()).await;
    assert!(
        state.error.as_deref().unwrap_or("").contains("invalid created_at"),
        "got: {:?}",
        state.error
    );
    assert_eq!(state.todos.len(), 1, "the last good list must survive a fault");
    assert_eq!(state.todos[0].title, "survivor");
}

#[tokio::test]
async fn retry_recovers_after_a_fault() {
    let (_dir, pool, _store, model) = setup();
    let mut rx = model.subscribe();

    pool.get().unwrap().execute("DROP TABLE todos", []).unwrap();
    model.load();

    let state = wait_for(&mut rx, |s| s.error.is_some()).await;
    assert!(
        state.error.as_deref().unwrap_or("").contains("no such table"),
        "got: {:?}",
        state.error
    );

    pool.get()
        .unwrap()
        .execute_batch(
            "CREATE TABLE todos (
                id           TEXT PRIMARY KEY,
                title        TEXT NOT NULL,
                description  TEXT NOT NULL DEFAULT '',
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at   INTEGER NOT NULL
            );",
        )
        .unwrap();

    model.retry();

    let state = wait_for(&mut rx, settled).await;
    assert!(state.todos.is_empty());
}

#[tokio::test]
async fn superseding_reloads_converge_on_the_latest_state() {
    let (_dir, _pool, store, model) = setup();
    let mut rx = model.subscribe();

    store.insert(record("a", "early", 1_000)).await.unwrap();

    // Each load supersedes the one before it; only the last may publish
    for _ in 0..10 {
        model.load();
    }

    let state = wait_for(&mut rx, |s| settled(s) && s.todos.len() == 1).await;
    assert_eq!(state.todos[0].id, "a");

    // Later writes flow through the surviving observation only
    store.insert(record("b", "late", 2_000)).await.unwrap();
    let state = wait_for(&mut rx, |s| settled(s) && s.todos.len() == 2).await;
    assert_eq!(state.todos[0].id, "b");
}

#[tokio::test]
async fn seeded_counts_flow_through_the_model() {
    let (_dir, _pool, store, model) = setup();
    let mut rx = model.subscribe();

    let seeded = TodoSeeder::new(Arc::clone(&store) as Arc<dyn TodoStore>)
        .seed_if_empty()
        .await
        .unwrap();
    assert!(seeded);

    model.load();

    let state = wait_for(&mut rx, |s| settled(s) && s.todos.len() == 5).await;
    assert_eq!(state.completed_count(), 3);
    assert_eq!(state.pending_count(), 2);
}
