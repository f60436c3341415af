//! In-memory record store for todos.
//!
//! The store owns the canonical collection. It enforces only structural
//! rules (non-empty trimmed title, trimmed description, identity and
//! timestamp invariants); business limits live in [`crate::service`].
//!
//! All state sits behind one `RwLock`. Every check-then-act sequence
//! (existence check, id uniqueness, guard evaluation) runs under the write
//! guard, so concurrent callers never see a half-applied update or a
//! duplicate id.

use crate::error::{Result, TodoError, ValidationError};
use crate::types::{NewTodo, Todo, TodoId, TodoPatch};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use todo_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};

/// Live records plus every id ever handed out.
///
/// `issued` keeps one 16 byte entry per create for the life of the store,
/// deleted records included. That is the price of refusing to recycle an
/// id; memory grows with the number of creates, not with the live set.
#[derive(Debug, Default)]
struct Records {
    live: HashMap<TodoId, Todo>,
    issued: HashSet<TodoId>,
}

/// Authoritative in-memory collection of todo records
pub struct TodoRepository {
    records: RwLock<Records>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for TodoRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoRepository")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl Default for TodoRepository {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

impl TodoRepository {
    /// Creates an empty store
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            records: RwLock::new(Records::default()),
            clock,
            ids,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|_| TodoError::internal("todo store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|_| TodoError::internal("todo store lock poisoned"))
    }

    /// Trims a title and rejects it if nothing is left
    fn validate_title(title: &str) -> std::result::Result<String, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(title.to_string())
    }

    fn normalize_description(description: &str) -> String {
        description.trim().to_string()
    }

    /// Timestamp for an update: now, or just past `previous` if the clock
    /// has not moved since.
    fn next_update_time(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.clock.now();
        if now > previous {
            now
        } else {
            previous + Duration::microseconds(1)
        }
    }

    /// Creates a new record
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyTitle`] if the trimmed title is empty
    /// - [`TodoError::Internal`] if the id generator repeats an id
    pub fn create(&self, input: NewTodo) -> Result<Todo> {
        let title = Self::validate_title(&input.title)?;
        let description = input.description.as_deref().map(Self::normalize_description);

        let mut records = self.write()?;

        let id = TodoId::from_uuid(self.ids.next_id());
        if !records.issued.insert(id) {
            tracing::error!(%id, "id generator returned an id that was already issued");
            return Err(TodoError::internal(format!("id {id} was already issued")));
        }

        let now = self.clock.now();
        let todo = Todo {
            id,
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        records.live.insert(id, todo.clone());

        tracing::debug!(%id, "record inserted");
        Ok(todo)
    }

    /// Returns the live record with this id, or `None`
    ///
    /// # Errors
    ///
    /// [`TodoError::Internal`] if the store lock is poisoned.
    pub fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>> {
        Ok(self.read()?.live.get(id).cloned())
    }

    /// Returns every live record, oldest first
    ///
    /// # Errors
    ///
    /// [`TodoError::Internal`] if the store lock is poisoned.
    pub fn find_all(&self) -> Result<Vec<Todo>> {
        self.find_matching(|_| true)
    }

    /// Returns the live records accepted by `predicate`, oldest first
    ///
    /// The whole scan happens under a single read guard.
    ///
    /// # Errors
    ///
    /// [`TodoError::Internal`] if the store lock is poisoned.
    pub fn find_matching<P>(&self, predicate: P) -> Result<Vec<Todo>>
    where
        P: Fn(&Todo) -> bool,
    {
        let records = self.read()?;
        let mut found: Vec<Todo> = records
            .live
            .values()
            .filter(|todo| predicate(todo))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    /// Applies a partial update
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if no live record has this id
    /// - [`ValidationError::EmptyTitle`] if a supplied title trims to nothing
    pub fn update(&self, id: &TodoId, patch: TodoPatch) -> Result<Todo> {
        self.update_with(id, |_| Ok(patch))
    }

    /// Applies a partial update computed from the current record
    ///
    /// `guard` runs under the write lock with the current record and either
    /// returns the patch to apply or rejects the update. Nothing is written
    /// unless the guard and every field check pass.
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if no live record has this id
    /// - whatever `guard` returns
    /// - [`ValidationError::EmptyTitle`] if a supplied title trims to nothing
    pub fn update_with<F>(&self, id: &TodoId, guard: F) -> Result<Todo>
    where
        F: FnOnce(&Todo) -> Result<TodoPatch>,
    {
        let mut records = self.write()?;
        let current = records
            .live
            .get_mut(id)
            .ok_or(TodoError::NotFound { id: *id })?;

        let patch = guard(&*current)?;
        let title = patch.title.as_deref().map(Self::validate_title).transpose()?;

        let updated_at = self.next_update_time(current.updated_at);
        if let Some(title) = title {
            current.title = title;
        }
        if let Some(description) = patch.description.as_deref() {
            current.description = Some(Self::normalize_description(description));
        }
        if let Some(completed) = patch.completed {
            current.completed = completed;
        }
        current.updated_at = updated_at;

        tracing::debug!(%id, %updated_at, "record updated");
        Ok(current.clone())
    }

    /// Removes a record; its id is never handed out again
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if no live record has this id.
    pub fn delete(&self, id: &TodoId) -> Result<()> {
        let mut records = self.write()?;
        if records.live.remove(id).is_none() {
            return Err(TodoError::NotFound { id: *id });
        }
        tracing::debug!(%id, "record removed");
        Ok(())
    }

    /// Number of live records
    ///
    /// # Errors
    ///
    /// [`TodoError::Internal`] if the store lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.live.len())
    }

    /// True when no record is live
    ///
    /// # Errors
    ///
    /// [`TodoError::Internal`] if the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.live.is_empty())
    }
}
