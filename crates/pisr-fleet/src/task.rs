//! Surveillance tasks and the registry that owns their true ages.

use pisr_core::{active_span, Point, TaskId};

use crate::{FleetError, FleetResult};

/// A persistent surveillance point.
///
/// A task accrues age and can be selected only while the simulation time is
/// inside `[activation_time, termination_time)`.  Outside that window its age
/// is pinned to zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub id:               TaskId,
    pub position:         Point,
    /// Latency weight, ≥ 0.
    pub priority:         f64,
    /// Seconds since the last visit (0 right after a visit).
    pub age:              f64,
    pub activation_time:  f64,
    pub termination_time: f64,
}

impl Task {
    /// An always-active task with priority 1 and age 0.
    pub fn new(id: TaskId, position: Point) -> Self {
        Self {
            id,
            position,
            priority:         1.0,
            age:              0.0,
            activation_time:  0.0,
            termination_time: f64::INFINITY,
        }
    }

    /// `true` if `time` lies inside the task's active window.
    #[inline]
    pub fn is_active_at(&self, time: f64) -> bool {
        time >= self.activation_time && time < self.termination_time
    }

    /// Age after `from → to` elapses, following the activation-window rule:
    /// outside the window at `to` the age is 0, otherwise it grows by the part
    /// of the interval at or after activation.
    #[inline]
    pub fn projected_age(&self, age: f64, from: f64, to: f64) -> f64 {
        if self.is_active_at(to) {
            age + active_span(from, to, self.activation_time)
        } else {
            0.0
        }
    }
}

/// The fixed, ordered set of tasks for one run.
///
/// Slot `i` always holds `TaskId(i + 1)`; this ordering is the tie-break
/// order for utility maximisation and must never change mid-run.
#[derive(Clone, Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    /// Validate and wrap `tasks`.
    ///
    /// # Errors
    ///
    /// - [`FleetError::TaskOrder`] if ids are not `1, 2, …, n` in order.
    /// - [`FleetError::Config`] for a negative priority or age, or an
    ///   activation time after the termination time.
    pub fn new(tasks: Vec<Task>) -> FleetResult<Self> {
        for (i, task) in tasks.iter().enumerate() {
            let expected = TaskId::from_index(i);
            if task.id != expected {
                return Err(FleetError::TaskOrder { index: i, expected, got: task.id });
            }
            if !(task.priority >= 0.0) {
                return Err(FleetError::Config(format!(
                    "{} has invalid priority {}", task.id, task.priority
                )));
            }
            if !(task.age >= 0.0) {
                return Err(FleetError::Config(format!("{} has invalid age {}", task.id, task.age)));
            }
            if task.activation_time > task.termination_time {
                return Err(FleetError::Config(format!(
                    "{} activates at {} after it terminates at {}",
                    task.id, task.activation_time, task.termination_time
                )));
            }
        }
        Ok(Self { tasks })
    }

    /// Build always-active, priority-1 tasks from a list of positions.
    pub fn from_positions(positions: &[Point]) -> Self {
        let tasks = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Task::new(TaskId::from_index(i), p))
            .collect();
        Self { tasks }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[inline]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        if id.0 == 0 {
            return None;
        }
        self.tasks.get(id.index())
    }

    /// Like [`get`](Self::get) but reports a missing id as an error.
    pub fn require(&self, id: TaskId) -> FleetResult<&Task> {
        self.get(id).ok_or(FleetError::UnknownTask(id))
    }

    #[inline]
    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Current true ages in task order.
    pub fn ages(&self) -> Vec<f64> {
        self.tasks.iter().map(|t| t.age).collect()
    }

    pub fn priorities(&self) -> Vec<f64> {
        self.tasks.iter().map(|t| t.priority).collect()
    }

    // ── Engine-only mutation ──────────────────────────────────────────────

    /// Advance every task's age from `from` to `to` under the
    /// activation-window rule.  Called by the engine once per arrival.
    pub fn accrue(&mut self, from: f64, to: f64) {
        for task in &mut self.tasks {
            task.age = task.projected_age(task.age, from, to);
        }
    }

    /// Reset a visited task's age to zero.
    pub fn reset(&mut self, id: TaskId) -> FleetResult<()> {
        if id.0 == 0 {
            return Err(FleetError::UnknownTask(id));
        }
        let task = self.tasks.get_mut(id.index()).ok_or(FleetError::UnknownTask(id))?;
        task.age = 0.0;
        Ok(())
    }

    // ── Distance statistics ───────────────────────────────────────────────

    /// Longest straight-line distance between any two tasks (0 for fewer
    /// than two tasks).
    pub fn max_pairwise_distance(&self) -> f64 {
        let mut longest = 0.0f64;
        for (i, a) in self.tasks.iter().enumerate() {
            for b in &self.tasks[i + 1..] {
                longest = longest.max(a.position.distance(b.position));
            }
        }
        longest
    }

    /// Mean straight-line distance over ordered pairs `i ≠ j` (0 for fewer
    /// than two tasks).
    pub fn mean_pairwise_distance(&self) -> f64 {
        let n = self.tasks.len();
        if n < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for (i, a) in self.tasks.iter().enumerate() {
            for b in &self.tasks[i + 1..] {
                total += 2.0 * a.position.distance(b.position);
            }
        }
        total / (n * n - n) as f64
    }
}

impl<'a> IntoIterator for &'a TaskRegistry {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
