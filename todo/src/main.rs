//! Simple CLI demo for the todo engine.
//!
//! Walks one record through its whole lifecycle and runs a search.
//! Set `RUST_LOG=todo=debug` to watch the store at work.

use std::sync::Arc;
use todo::{MarkupStripper, NewTodo, Todo, TodoFilter, TodoPatch, TodoRepository, TodoService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_todos(heading: &str, todos: &[Todo]) {
    println!("\n{heading}: {}", todos.len());
    for todo in todos {
        let status = if todo.completed { "✓" } else { " " };
        match &todo.description {
            Some(description) => println!("  [{status}] {} ({description})", todo.title),
            None => println!("  [{status}] {}", todo.title),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Todo Example ===");

    let repository = Arc::new(TodoRepository::default());
    let service = TodoService::new(repository, Arc::new(MarkupStripper));

    println!("\nCreating todos...");
    let shopping = service.create_todo(
        NewTodo::titled("  Shopping  ").with_description("<b>milk</b>, bread"),
    )?;
    service.create_todo(NewTodo::titled("<script>alert(1)</script>Coding"))?;
    let reading = service.create_todo(NewTodo::titled("Reading"))?;
    print_todos("Todos created", &service.list_todos()?);

    println!("\nCompleting 'Reading'...");
    service.update_todo(&reading.id, TodoPatch::default().completed(true))?;

    println!("Trying to rename a completed todo...");
    if let Err(error) = service.update_todo(&reading.id, TodoPatch::default().title("Re-reading")) {
        println!("  rejected: {error}");
    }

    let open = service.find_todos(&TodoFilter::default().title("ing").completed(false))?;
    print_todos("Open todos matching 'ing'", &open);

    println!("\nDeleting 'Shopping'...");
    service.delete_todo(&shopping.id)?;
    if let Err(error) = service.delete_todo(&shopping.id) {
        println!("  second delete: {error}");
    }

    print_todos("Final todos", &service.list_todos()?);

    println!("\n=== Demo Complete ===");
    Ok(())
}
