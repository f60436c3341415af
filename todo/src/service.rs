//! Business layer over the record store.
//!
//! [`TodoService`] adds what the store deliberately does not know about:
//! markup stripping, length limits, the rule that completed todos are
//! frozen, and search. It holds no copy of the data; every read and write
//! goes through [`TodoRepository`].

use crate::error::{BusinessRuleViolation, ErrorKind, Result, TodoError, ValidationError};
use crate::repository::TodoRepository;
use crate::types::{NewTodo, Todo, TodoFilter, TodoId, TodoPatch};
use std::sync::Arc;
use todo_core::environment::Sanitizer;

/// Length limits, counted in characters after sanitizing and trimming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoLimits {
    /// Longest accepted title
    pub max_title_chars: usize,
    /// Longest accepted description
    pub max_description_chars: usize,
}

impl TodoLimits {
    /// 100 characters of title, 500 of description
    pub const DEFAULT: Self = Self {
        max_title_chars: 100,
        max_description_chars: 500,
    };
}

impl Default for TodoLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Business rules and search over a shared [`TodoRepository`]
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<TodoRepository>,
    sanitizer: Arc<dyn Sanitizer>,
    limits: TodoLimits,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoService")
            .field("repository", &self.repository)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl TodoService {
    /// Creates a service with the default limits
    #[must_use]
    pub fn new(repository: Arc<TodoRepository>, sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self {
            repository,
            sanitizer,
            limits: TodoLimits::DEFAULT,
        }
    }

    /// Replaces the length limits
    #[must_use]
    pub const fn with_limits(mut self, limits: TodoLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The underlying store
    #[must_use]
    pub const fn repository(&self) -> &Arc<TodoRepository> {
        &self.repository
    }

    /// The active length limits
    #[must_use]
    pub const fn limits(&self) -> TodoLimits {
        self.limits
    }

    fn clean_title(&self, raw: &str) -> std::result::Result<String, ValidationError> {
        let title = self.sanitizer.sanitize(raw).trim().to_string();
        if title.chars().count() > self.limits.max_title_chars {
            return Err(ValidationError::TitleTooLong {
                max: self.limits.max_title_chars,
            });
        }
        Ok(title)
    }

    fn clean_description(&self, raw: &str) -> std::result::Result<String, ValidationError> {
        let description = self.sanitizer.sanitize(raw).trim().to_string();
        if description.chars().count() > self.limits.max_description_chars {
            return Err(ValidationError::DescriptionTooLong {
                max: self.limits.max_description_chars,
            });
        }
        Ok(description)
    }

    fn clean_patch(&self, patch: TodoPatch) -> std::result::Result<TodoPatch, ValidationError> {
        Ok(TodoPatch {
            title: patch.title.as_deref().map(|t| self.clean_title(t)).transpose()?,
            description: patch
                .description
                .as_deref()
                .map(|d| self.clean_description(d))
                .transpose()?,
            completed: patch.completed,
        })
    }

    /// Sanitizes, validates and stores a new todo
    ///
    /// # Errors
    ///
    /// - [`ValidationError::TitleTooLong`] / [`ValidationError::DescriptionTooLong`]
    /// - [`ValidationError::EmptyTitle`] from the store when nothing is left
    ///   of the title
    #[tracing::instrument(skip_all)]
    pub fn create_todo(&self, input: NewTodo) -> Result<Todo> {
        let cleaned = self
            .clean_title(&input.title)
            .and_then(|title| {
                let description = input
                    .description
                    .as_deref()
                    .map(|d| self.clean_description(d))
                    .transpose()?;
                Ok(NewTodo { title, description })
            })
            .map_err(TodoError::from);

        let todo = cleaned
            .and_then(|input| self.repository.create(input))
            .inspect_err(|error| record_rejection("create", error))?;

        metrics::counter!("todos.created.total").increment(1);
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    /// Applies a partial update to an open todo
    ///
    /// Checks run in this order, atomically with the write: existence,
    /// completed-is-frozen, field limits, store validation.
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if the id is not live
    /// - [`BusinessRuleViolation::CompletedTodoImmutable`] if the todo is
    ///   completed, whatever the patch contains
    /// - any [`ValidationError`]
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn update_todo(&self, id: &TodoId, patch: TodoPatch) -> Result<Todo> {
        let cleaned = self.clean_patch(patch);

        let todo = self
            .repository
            .update_with(id, move |current| {
                if current.completed {
                    return Err(BusinessRuleViolation::CompletedTodoImmutable.into());
                }
                Ok(cleaned?)
            })
            .inspect_err(|error| record_rejection("update", error))?;

        metrics::counter!("todos.updated.total").increment(1);
        tracing::info!(completed = todo.completed, "todo updated");
        Ok(todo)
    }

    /// Returns the live todos matching every criterion in `filter`
    ///
    /// # Errors
    ///
    /// [`TodoError::Internal`] if the store is unusable.
    #[tracing::instrument(skip_all)]
    pub fn find_todos(&self, filter: &TodoFilter) -> Result<Vec<Todo>> {
        let found = self
            .repository
            .find_matching(|todo| filter.matches(todo))
            .inspect_err(|error| record_rejection("search", error))?;
        tracing::debug!(matches = found.len(), "search completed");
        Ok(found)
    }

    /// Returns one todo
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if the id is not live.
    pub fn get_todo(&self, id: &TodoId) -> Result<Todo> {
        self.repository
            .find_by_id(id)?
            .ok_or(TodoError::NotFound { id: *id })
    }

    /// Returns every live todo
    ///
    /// # Errors
    ///
    /// [`TodoError::Internal`] if the store is unusable.
    pub fn list_todos(&self) -> Result<Vec<Todo>> {
        self.repository.find_all()
    }

    /// Deletes a todo
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if the id is not live.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn delete_todo(&self, id: &TodoId) -> Result<()> {
        self.repository
            .delete(id)
            .inspect_err(|error| record_rejection("delete", error))?;

        metrics::counter!("todos.deleted.total").increment(1);
        tracing::info!("todo deleted");
        Ok(())
    }
}

fn record_rejection(operation: &'static str, error: &TodoError) {
    let kind = error.kind();
    metrics::counter!("todos.rejected.total", "operation" => operation, "kind" => kind.as_str())
        .increment(1);

    match kind {
        ErrorKind::Internal => tracing::error!(operation, %error, "todo operation failed"),
        ErrorKind::BusinessRule => tracing::warn!(operation, %error, "todo operation rejected"),
        ErrorKind::Validation | ErrorKind::NotFound => {
            tracing::debug!(operation, %error, "todo operation rejected");
        },
    }
}
