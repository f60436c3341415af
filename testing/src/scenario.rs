//! Given-When-Then scenarios for the todo engine
//!
//! This module provides a fluent API for exercising a subject (a store, a
//! service, a router) with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ScenarioTest is the natural name

type Setup<T, C> = Box<dyn FnOnce(&T) -> C>;
type Action<T, C, O> = Box<dyn FnOnce(&T, &C) -> O>;
type OutcomeAssertion<C, O> = Box<dyn FnOnce(&C, &O)>;
type SubjectAssertion<T, C> = Box<dyn FnOnce(&T, &C)>;

/// Fluent Given-When-Then test runner
///
/// - `T`: the subject under test
/// - `C`: context produced by the Given step (ids of seeded records, ...)
/// - `O`: outcome of the When step (usually a `Result`)
///
/// # Example
///
/// ```ignore
/// use todo_testing::ScenarioTest;
///
/// ScenarioTest::new(service)
///     .given(|service| service.create_todo(NewTodo::titled("Task A")).unwrap().id)
///     .when(|service, id| service.update_todo(id, TodoPatch::default().completed(true)))
///     .then_outcome(|_, result| assert!(result.is_ok()))
///     .then_subject(|service, id| assert!(service.get_todo(id).unwrap().completed))
///     .run();
/// ```
pub struct ScenarioTest<T, C, O> {
    subject: T,
    setup: Option<Setup<T, C>>,
    action: Option<Action<T, C, O>>,
    outcome_assertions: Vec<OutcomeAssertion<C, O>>,
    subject_assertions: Vec<SubjectAssertion<T, C>>,
}

impl<T, C, O> ScenarioTest<T, C, O> {
    /// Create a new scenario around the given subject
    #[must_use]
    pub const fn new(subject: T) -> Self {
        Self {
            subject,
            setup: None,
            action: None,
            outcome_assertions: Vec::new(),
            subject_assertions: Vec::new(),
        }
    }

    /// Prepare the subject and capture context (Given)
    #[must_use]
    pub fn given<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&T) -> C + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    /// The operation under test (When)
    #[must_use]
    pub fn when<F>(mut self, action: F) -> Self
    where
        F: FnOnce(&T, &C) -> O + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Add an assertion about the outcome of the When step (Then)
    #[must_use]
    pub fn then_outcome<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&C, &O) + 'static,
    {
        self.outcome_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the subject after the When step (Then)
    #[must_use]
    pub fn then_subject<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&T, &C) + 'static,
    {
        self.subject_assertions.push(Box::new(assertion));
        self
    }

    /// Run the scenario and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the Given or When step is not set, or if any assertion
    /// fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let setup = self.setup.expect("Given step must be set with given()");
        let action = self.action.expect("When step must be set with when()");

        let context = setup(&self.subject);
        let outcome = action(&self.subject, &context);

        for assertion in self.outcome_assertions {
            assertion(&context, &outcome);
        }

        for assertion in self.subject_assertions {
            assertion(&self.subject, &context);
        }
    }
}

/// Helper assertions for `Result` outcomes
pub mod assertions {
    use std::fmt::{Debug, Display};

    /// Assert that the outcome failed with exactly `expected` as its message
    ///
    /// # Panics
    ///
    /// Panics if the outcome succeeded or the message differs.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_err_message<T: Debug, E: Display>(outcome: &Result<T, E>, expected: &str) {
        match outcome {
            Ok(value) => panic!("Expected error {expected:?}, but got Ok({value:?})"),
            Err(error) => assert_eq!(error.to_string(), expected),
        }
    }

    /// Assert that the outcome succeeded
    ///
    /// # Panics
    ///
    /// Panics if the outcome is an error.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_ok<T, E: Display>(outcome: &Result<T, E>) {
        if let Err(error) = outcome {
            panic!("Expected success, but got error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Counter {
        value: RefCell<i32>,
    }

    impl Counter {
        fn add(&self, by: i32) -> Result<i32, String> {
            if by < 0 {
                return Err("negative step".to_string());
            }
            *self.value.borrow_mut() += by;
            Ok(*self.value.borrow())
        }
    }

    #[test]
    fn test_scenario_success() {
        ScenarioTest::new(Counter::default())
            .given(|counter| counter.add(2).map_or(0, |v| v))
            .when(|counter, _| counter.add(3))
            .then_outcome(|before, result| {
                assert_eq!(*before, 2);
                assertions::assert_ok(result);
            })
            .then_subject(|counter, _| assert_eq!(*counter.value.borrow(), 5))
            .run();
    }

    #[test]
    fn test_scenario_failure() {
        ScenarioTest::new(Counter::default())
            .given(|_| ())
            .when(|counter, ()| counter.add(-1))
            .then_outcome(|(), result| assertions::assert_err_message(result, "negative step"))
            .then_subject(|counter, ()| assert_eq!(*counter.value.borrow(), 0))
            .run();
    }
}
