//! Application state for Axum handlers.

use std::sync::Arc;
use todo::{MarkupStripper, TodoLimits, TodoRepository, TodoService};
use todo_core::environment::{Clock, IdGenerator};

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap: every clone points at the same store.
#[derive(Clone, Debug)]
pub struct AppState {
    service: Arc<TodoService>,
}

impl AppState {
    /// Wrap an existing service.
    #[must_use]
    pub fn new(service: TodoService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Fresh in-memory store on the system clock, with markup stripping.
    #[must_use]
    pub fn in_memory(limits: TodoLimits) -> Self {
        let repository = Arc::new(TodoRepository::default());
        Self::new(TodoService::new(repository, Arc::new(MarkupStripper)).with_limits(limits))
    }

    /// Fresh in-memory store on an injected clock and id source.
    #[must_use]
    pub fn with_environment(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        limits: TodoLimits,
    ) -> Self {
        let repository = Arc::new(TodoRepository::new(clock, ids));
        Self::new(TodoService::new(repository, Arc::new(MarkupStripper)).with_limits(limits))
    }

    /// The business layer behind every route.
    #[must_use]
    pub fn service(&self) -> &TodoService {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone() {
        // Axum requires Clone state
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_store() {
        let state = AppState::in_memory(TodoLimits::DEFAULT);
        let other = state.clone();
        assert!(Arc::ptr_eq(&state.service, &other.service));
    }
}
