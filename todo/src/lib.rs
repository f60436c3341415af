//! In-memory todo records with validation, partial updates and search.
//!
//! Two layers:
//!
//! - [`TodoRepository`] owns the records. It assigns ids and timestamps,
//!   trims input and rejects empty titles.
//! - [`TodoService`] wraps a shared repository with business rules: markup
//!   stripping, length limits, frozen completed todos, and filtered search.
//!
//! Every dependency is injected: the clock and id source go into the
//! repository, the sanitizer into the service. Nothing is global.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use todo::{MarkupStripper, NewTodo, TodoFilter, TodoPatch, TodoRepository, TodoService};
//!
//! # fn main() -> Result<(), todo::TodoError> {
//! let repository = Arc::new(TodoRepository::default());
//! let service = TodoService::new(repository, Arc::new(MarkupStripper));
//!
//! let todo = service.create_todo(NewTodo::titled("  <b>Buy milk</b>  "))?;
//! assert_eq!(todo.title, "Buy milk");
//!
//! service.update_todo(&todo.id, TodoPatch::default().completed(true))?;
//! let open = service.find_todos(&TodoFilter::default().completed(false))?;
//! assert!(open.is_empty());
//!
//! let error = service
//!     .update_todo(&todo.id, TodoPatch::default().title("Buy bread"))
//!     .unwrap_err();
//! assert_eq!(error.to_string(), "Cannot update completed todo");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod repository;
pub mod sanitize;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use error::{BusinessRuleViolation, ErrorKind, Result, TodoError, ValidationError};
pub use repository::TodoRepository;
pub use sanitize::MarkupStripper;
pub use service::{TodoLimits, TodoService};
pub use types::{NewTodo, Todo, TodoFilter, TodoId, TodoPatch};
