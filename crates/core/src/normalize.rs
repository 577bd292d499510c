//! Gateway-record normalization and current-task selection.

use focusflow_api::{StepRecord, TaskRecord};

use crate::model::{Step, Task};

/// Map raw gateway records into the internal task shape. Length and order
/// are preserved exactly: no dedup, no sorting.
pub fn normalize_tasks(records: Vec<TaskRecord>) -> Vec<Task> {
    records.into_iter().map(normalize_task).collect()
}

pub fn normalize_task(record: TaskRecord) -> Task {
    Task {
        id: record.id,
        title: record.title,
        description: record.description,
        completed: record.is_completed,
        display_order: record.order,
        steps: record.steps.into_iter().map(normalize_step).collect(),
    }
}

fn normalize_step(record: StepRecord) -> Step {
    Step {
        id: record.id,
        content: record.content,
        completed: record.is_completed,
    }
}

/// Index of the first incomplete task; 0 when every task is complete or the
/// list is empty.
pub fn next_task_index(tasks: &[Task]) -> usize {
    tasks.iter().position(|t| !t.completed).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, completed: bool) -> TaskRecord {
        TaskRecord {
            id,
            title: format!("task {id}"),
            description: None,
            is_completed: completed,
            order: None,
            steps: Vec::new(),
        }
    }

    fn step(id: i64, completed: bool) -> StepRecord {
        StepRecord {
            id,
            content: format!("step {id}"),
            order: None,
            is_completed: completed,
        }
    }

    #[test]
    fn normalization_preserves_length_and_order() {
        let records = vec![record(3, true), record(1, false), record(2, false)];
        let tasks = normalize_tasks(records);
        assert_eq!(tasks.len(), 3);
        assert_eq!(
            tasks.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn completion_flags_carry_over_for_tasks_and_steps() {
        let mut raw = record(1, true);
        raw.steps = vec![step(10, false), step(11, true)];
        let task = normalize_task(raw);
        assert!(task.completed);
        assert!(!task.steps[0].completed);
        assert!(task.steps[1].completed);
    }

    #[test]
    fn absent_steps_become_empty_list() {
        let task = normalize_task(record(1, false));
        assert!(task.steps.is_empty());
    }

    #[test]
    fn first_incomplete_task_is_current() {
        let tasks = normalize_tasks(vec![record(1, true), record(2, false), record(3, false)]);
        assert_eq!(next_task_index(&tasks), 1);
    }

    #[test]
    fn all_complete_falls_back_to_index_zero() {
        let tasks = normalize_tasks(vec![record(1, true), record(2, true)]);
        assert_eq!(next_task_index(&tasks), 0);
    }

    #[test]
    fn empty_list_selects_index_zero() {
        assert_eq!(next_task_index(&[]), 0);
    }
}
