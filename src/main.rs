// src/main.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use flexi_logger::Logger;

use taskhub::db::{
    create_pool_at, get_connection, get_database_path, initialize_database,
    verify_database_integrity,
};
use taskhub::{
    AppState, LocalTodoRepository, Outcome, SqliteTodoStore, Todo, TodoListModel, TodoListState,
    TodoRepository, TodoSeeder, TodoStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _logger = Logger::try_with_env_or_str("info")?
        .log_to_stderr()
        .start()?;

    // 1. INFRASTRUCTURE
    let db_path = match std::env::var_os("TASKHUB_DB") {
        Some(path) => PathBuf::from(path),
        None => get_database_path()?,
    };
    log::debug!("using database at {}", db_path.display());
    let pool = Arc::new(create_pool_at(&db_path)?);

    // Initialize schema (idempotent)
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }

    // 2. STORE + FIRST-RUN SEEDING
    let store: Arc<dyn TodoStore> = Arc::new(SqliteTodoStore::new(pool));
    TodoSeeder::new(Arc::clone(&store)).seed_if_empty().await?;

    // 3. REPOSITORY + STATE HOLDER
    let repository: Arc<dyn TodoRepository> =
        Arc::new(LocalTodoRepository::new(Arc::clone(&store)));
    let todo_list = Arc::new(TodoListModel::new(Arc::clone(&repository)));

    let state = AppState {
        store,
        repository,
        todo_list,
    };

    // 4. COMMAND DISPATCH
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("list") => list(&state, args.iter().any(|a| a == "--json")).await,
        Some("add") => add(&state, &args[1..]).await,
        Some("done") => done(&state, &args[1..]).await,
        Some("rm") => rm(&state, &args[1..]).await,
        Some("clear") => clear(&state).await,
        Some("watch") => watch(&state).await,
        Some("help") | None => {
            usage();
            Ok(())
        }
        Some(other) => {
            usage();
            anyhow::bail!("unknown command: {}", other);
        }
    }
}

async fn list(state: &AppState, as_json: bool) -> anyhow::Result<()> {
    let mut outcomes = state.repository.observe();
    while let Some(outcome) = outcomes.next().await {
        match outcome {
            Outcome::Loading => continue,
            Outcome::Success { data } => {
                if as_json {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    render_todos(&data);
                }
                return Ok(());
            }
            Outcome::Empty { title, message } => {
                println!("{}: {}", title, message);
                return Ok(());
            }
            Outcome::Error { message, .. } => anyhow::bail!(message),
        }
    }
    Ok(())
}

async fn add(state: &AppState, args: &[String]) -> anyhow::Result<()> {
    let title = args.first().map(String::as_str).unwrap_or("");
    let description = args.get(1..).unwrap_or_default().join(" ");

    match state.repository.add(title, &description).await {
        Outcome::Success { data } => {
            println!("Added {}: {}", data.id, data.title);
            Ok(())
        }
        Outcome::Error { message, .. } => anyhow::bail!(message),
        Outcome::Loading | Outcome::Empty { .. } => Ok(()),
    }
}

async fn done(state: &AppState, args: &[String]) -> anyhow::Result<()> {
    let id = args.first().context("usage: taskhub done <id>")?;

    match state.repository.toggle_completion(id).await {
        Outcome::Success { data } => {
            let status = if data.is_completed {
                "completed"
            } else {
                "pending"
            };
            println!("Marked {} as {}", data.id, status);
            Ok(())
        }
        Outcome::Error { message, .. } => anyhow::bail!(message),
        Outcome::Loading | Outcome::Empty { .. } => Ok(()),
    }
}

async fn rm(state: &AppState, args: &[String]) -> anyhow::Result<()> {
    let id = args.first().context("usage: taskhub rm <id>")?;

    match state.repository.delete(id).await {
        Outcome::Success { .. } => {
            println!("Removed {}", id);
            Ok(())
        }
        Outcome::Error { message, .. } => anyhow::bail!(message),
        Outcome::Loading | Outcome::Empty { .. } => Ok(()),
    }
}

async fn clear(state: &AppState) -> anyhow::Result<()> {
    state.store.delete_all().await?;
    println!("All todos removed");
    Ok(())
}

async fn watch(state: &AppState) -> anyhow::Result<()> {
    state.todo_list.load();
    let mut rx = state.todo_list.subscribe();

    println!("Watching todos (ctrl-c to stop)");
    loop {
        rx.changed().await?;
        let snapshot = rx.borrow_and_update().clone();
        render_state(&snapshot);
    }
}

fn render_state(state: &TodoListState) {
    if state.is_loading {
        println!("loading...");
        return;
    }
    if let Some(error) = &state.error {
        println!("error: {}", error);
        return;
    }
    render_todos(&state.todos);
}

fn render_todos(todos: &[Todo]) {
    if todos.is_empty() {
        println!("No todos yet. Add one with: taskhub add <title> [description]");
        return;
    }

    for todo in todos {
        let marker = if todo.is_completed { "x" } else { " " };
        println!("[{}] {}  {}", marker, todo.id, todo.title);
        if !todo.description.is_empty() {
            println!("         {}", todo.description);
        }
    }

    let completed = todos.iter().filter(|t| t.is_completed).count();
    println!("{} pending, {} completed", todos.len() - completed, completed);
}

fn usage() {
    println!("TaskHub - local todo list");
    println!();
    println!("Usage:");
    println!("  taskhub list [--json]           Show all todos");
    println!("  taskhub add <title> [detail]    Add a todo");
    println!("  taskhub done <id>               Toggle completion");
    println!("  taskhub rm <id>                 Remove a todo");
    println!("  taskhub clear                   Remove every todo");
    println!("  taskhub watch                   Follow live updates");
    println!();
    println!("The database lives in the platform data directory.");
    println!("Set TASKHUB_DB to use another file.");
}
