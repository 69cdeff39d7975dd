//! Custom assertions for domain-specific testing.

use crate::model::{Project, Task};

/// Assert that a project and all of its tasks satisfy the entity invariants.
///
/// # Panics
///
/// Panics with the violated invariant.
///
/// # Example
///
/// ```
/// use projman::model::Project;
/// use projman::testing::assert_project_invariants;
///
/// assert_project_invariants(&Project::new("WebApp", None));
/// ```
pub fn assert_project_invariants(project: &Project) {
    if let Err(reason) = project.check_invariants() {
        panic!("Project '{}' violates invariants: {reason}", project.name());
    }
}

/// Assert that two projects carry the same data, field by field, including
/// timestamps and task order.
///
/// # Panics
///
/// Panics naming the first field that differs.
pub fn assert_same_project(actual: &Project, expected: &Project) {
    assert_eq!(actual.name(), expected.name(), "name differs");
    assert_eq!(
        actual.description(),
        expected.description(),
        "description differs for '{}'",
        expected.name()
    );
    assert_eq!(actual.status(), expected.status(), "status differs");
    assert_eq!(actual.created_at(), expected.created_at(), "created_at differs");
    assert_eq!(actual.closed_at(), expected.closed_at(), "closed_at differs");
    assert_eq!(
        task_titles(actual),
        task_titles(expected),
        "task order differs for '{}'",
        expected.name()
    );
    for (a, e) in actual.tasks().iter().zip(expected.tasks()) {
        assert_eq!(a, e, "task '{}' differs", e.title());
    }
}

/// Titles in display order.
pub fn task_titles(project: &Project) -> Vec<&str> {
    project.tasks().iter().map(Task::title).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskPriority;

    #[test]
    fn test_assert_project_invariants_passes_for_new_project() {
        let mut p = Project::new("P", None);
        p.add_task(Task::new("a", None, TaskPriority::Low)).unwrap();
        assert_project_invariants(&p);
    }

    #[test]
    fn test_assert_same_project_on_clone() {
        let mut p = Project::new("P", Some("d".into()));
        p.add_task(Task::new("a", None, TaskPriority::Low)).unwrap();
        assert_same_project(&p.clone(), &p);
    }

    #[test]
    #[should_panic(expected = "name differs")]
    fn test_assert_same_project_detects_difference() {
        assert_same_project(&Project::new("A", None), &Project::new("B", None));
    }

    #[test]
    fn test_task_titles() {
        let mut p = Project::new("P", None);
        p.add_task(Task::new("x", None, TaskPriority::Low)).unwrap();
        p.add_task(Task::new("y", None, TaskPriority::Low)).unwrap();
        assert_eq!(task_titles(&p), ["x", "y"]);
    }
}
