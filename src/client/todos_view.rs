//! State behind the TODO list screen.
//!
//! The view owns the full item list and the visible page window. Every
//! mutation goes to the backend first (or optimistically, for the done
//! toggle), and failures are reported once through the [`Notifier`] without
//! retrying.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use tracing::debug;

use super::api::TodosBackend;
use super::auth::AuthClient;
use super::notifier::Notifier;
use super::pagination::{total_pages, PageWindow};
use crate::models::{CreateTodoRequest, TodoItem, UpdateTodoRequest};

/// Days between creation and the default due date.
pub const DEFAULT_DUE_IN_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// The initial fetch failed; `load` may be called again.
    Failed(String),
}

/// Default due date for a todo created on `today`.
pub fn default_due_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(DEFAULT_DUE_IN_DAYS)
}

pub struct TodosView {
    backend: Arc<dyn TodosBackend>,
    auth: Arc<dyn AuthClient>,
    notifier: Arc<dyn Notifier>,
    todos: Vec<TodoItem>,
    window: PageWindow,
    new_todo_name: String,
    state: LoadState,
}

impl TodosView {
    pub fn new(
        backend: Arc<dyn TodosBackend>,
        auth: Arc<dyn AuthClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            auth,
            notifier,
            todos: Vec::new(),
            window: PageWindow::default(),
            new_todo_name: String::new(),
            state: LoadState::Loading,
        }
    }

    fn token(&self) -> String {
        self.auth.id_token().unwrap_or_default()
    }

    fn refresh_window(&mut self) {
        self.window = self.window.resized(self.todos.len());
    }

    /// Fetch the caller's items and show the current page.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        match self.backend.get_todos(&self.token()).await {
            Ok(todos) => {
                debug!("Loaded {} todos", todos.len());
                self.todos = todos;
                self.state = LoadState::Ready;
                self.refresh_window();
            }
            Err(e) => {
                self.notifier
                    .alert(&format!("Failed to fetch todos: {}", e));
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    pub fn set_new_todo_name(&mut self, name: impl Into<String>) {
        self.new_todo_name = name.into();
    }

    /// Create a todo from the name input, due a week from today.
    pub async fn create_todo(&mut self) {
        self.create_todo_on(Local::now().date_naive()).await;
    }

    pub async fn create_todo_on(&mut self, today: NaiveDate) {
        let request = CreateTodoRequest {
            name: self.new_todo_name.trim().to_string(),
            due_date: default_due_date(today),
        };
        match self.backend.create_todo(&self.token(), &request).await {
            Ok(item) => {
                self.todos.push(item);
                self.new_todo_name.clear();
                self.refresh_window();
            }
            Err(e) => {
                debug!("Create failed: {}", e);
                self.notifier.alert("Todo creation failed");
            }
        }
    }

    /// Flip `done` locally, then persist. A failed save is reported but not rolled back.
    pub async fn toggle_done(&mut self, item_id: &str) {
        let Some(todo) = self.todos.iter_mut().find(|t| t.item_id == item_id) else {
            return;
        };
        todo.done = !todo.done;
        let request = UpdateTodoRequest {
            name: todo.name.clone(),
            due_date: todo.due_date,
            done: todo.done,
        };
        self.refresh_window();

        if let Err(e) = self
            .backend
            .patch_todo(&self.token(), item_id, &request)
            .await
        {
            debug!("Update failed: {}", e);
            self.notifier.alert("Todo update failed");
        }
    }

    pub async fn delete_todo(&mut self, item_id: &str) {
        match self.backend.delete_todo(&self.token(), item_id).await {
            Ok(()) => {
                self.todos.retain(|t| t.item_id != item_id);
                self.refresh_window();
            }
            Err(e) => {
                debug!("Delete failed: {}", e);
                self.notifier.alert("Todo deletion failed");
            }
        }
    }

    pub fn change_page(&mut self, page: usize) {
        self.window = PageWindow::for_page(page, self.todos.len());
    }

    /// Items on the active page.
    pub fn page_items(&self) -> &[TodoItem] {
        self.window.slice(&self.todos)
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.todos.len())
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn new_todo_name(&self) -> &str {
        &self.new_todo_name
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }
}
