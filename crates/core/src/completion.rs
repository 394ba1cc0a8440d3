//! Completion percentage and project counter arithmetic.
//!
//! Every change to a project's aggregate counters is expressed as a
//! [`CounterDelta`], and every completion percentage comes from
//! [`compute_completion`]. The storage layer applies deltas as relative
//! updates and feeds the resulting counters back through the calculator.

/// Completion percentage for a project with `completed` of `total` tasks done.
///
/// Returns the integer floor of `100 * completed / total`, or `0` when the
/// project has no tasks. The result is always within `[0, 100]`.
///
/// # Examples
///
/// ```
/// use tasktally_core::completion::compute_completion;
///
/// assert_eq!(compute_completion(0, 0), 0);
/// assert_eq!(compute_completion(1, 3), 33);
/// assert_eq!(compute_completion(3, 3), 100);
/// ```
pub fn compute_completion(completed: i32, total: i32) -> i32 {
    if total <= 0 {
        return 0;
    }
    let percent = i64::from(completed.max(0)) * 100 / i64::from(total);
    // Bounded by the clamp, so the narrowing cast cannot truncate.
    percent.clamp(0, 100) as i32
}

/// A relative change to a project's `(tasks, completed_tasks, incompleted_tasks)`.
///
/// Constructed only through the named transitions below, each of which keeps
/// `completed + incompleted == tasks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDelta {
    tasks: i32,
    completed: i32,
    incompleted: i32,
}

impl CounterDelta {
    /// A new, not yet completed task was added.
    pub const fn task_created() -> Self {
        Self {
            tasks: 1,
            completed: 0,
            incompleted: 1,
        }
    }

    /// An incomplete task transitioned to completed.
    pub const fn task_completed() -> Self {
        Self {
            tasks: 0,
            completed: 1,
            incompleted: -1,
        }
    }

    /// `completed` completed tasks and `incompleted` open tasks were removed.
    pub const fn tasks_deleted(completed: i32, incompleted: i32) -> Self {
        Self {
            tasks: -(completed + incompleted),
            completed: -completed,
            incompleted: -incompleted,
        }
    }

    /// Whether applying this delta preserves `completed + incompleted == tasks`.
    pub const fn is_balanced(&self) -> bool {
        self.completed + self.incompleted == self.tasks
    }

    pub const fn tasks(&self) -> i32 {
        self.tasks
    }

    pub const fn completed(&self) -> i32 {
        self.completed
    }

    pub const fn incompleted(&self) -> i32 {
        self.incompleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_project_is_zero_percent() {
        assert_eq!(compute_completion(0, 0), 0);
    }

    #[test]
    fn thirds_round_down() {
        assert_eq!(compute_completion(1, 3), 33);
        assert_eq!(compute_completion(2, 3), 66);
        assert_eq!(compute_completion(3, 3), 100);
    }

    #[test]
    fn half_done() {
        assert_eq!(compute_completion(1, 2), 50);
    }

    #[test]
    fn nothing_done_is_zero_percent() {
        assert_eq!(compute_completion(0, 7), 0);
    }

    #[test]
    fn large_counts_do_not_overflow() {
        assert_eq!(compute_completion(i32::MAX - 1, i32::MAX), 99);
        assert_eq!(compute_completion(i32::MAX, i32::MAX), 100);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert_eq!(compute_completion(-4, 10), 0);
        assert_eq!(compute_completion(5, -1), 0);
        assert_eq!(compute_completion(12, 10), 100);
    }

    #[test]
    fn transitions_are_balanced() {
        assert!(CounterDelta::task_created().is_balanced());
        assert!(CounterDelta::task_completed().is_balanced());
        assert!(CounterDelta::tasks_deleted(2, 3).is_balanced());
        assert!(CounterDelta::tasks_deleted(0, 0).is_balanced());
    }

    #[test]
    fn deleting_mixed_tasks_removes_both_kinds() {
        let delta = CounterDelta::tasks_deleted(1, 2);
        assert_eq!(delta.tasks(), -3);
        assert_eq!(delta.completed(), -1);
        assert_eq!(delta.incompleted(), -2);
    }

    #[test]
    fn create_then_complete_nets_one_completed_task() {
        let created = CounterDelta::task_created();
        let completed = CounterDelta::task_completed();
        assert_eq!(created.tasks() + completed.tasks(), 1);
        assert_eq!(created.completed() + completed.completed(), 1);
        assert_eq!(created.incompleted() + completed.incompleted(), 0);
    }
}
