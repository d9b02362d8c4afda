//! Occurrence materialization.
//!
//! Turns the raw task snapshot into the full, flat occurrence set: one
//! main occurrence per task, one generated occurrence per recurrence
//! step, one occurrence per declared sub-item. The whole set is rebuilt
//! on every call; there is no incremental path and no cached state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::expand_cycle;
use crate::occurrence::{day_end, day_start, Occurrence, OccurrenceKind};
use crate::points::compute_points;
use crate::status::resolve_status;
use crate::task::{CycleFrequency, Task};

/// The materialized occurrence set, partitioned for the two list views.
///
/// `done` holds exactly the terminal main occurrences. `active` holds
/// everything else: open main occurrences plus all generated cyclic and
/// subtask entries, which ride along for calendar placement only. List
/// views go through [`active_list`](Self::active_list) and
/// [`done_list`](Self::done_list), which filter the derived entries out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterializedSet {
    pub active: Vec<Occurrence>,
    pub done: Vec<Occurrence>,
}

impl MaterializedSet {
    /// Open main occurrences, for the active task-list view.
    pub fn active_list(&self) -> Vec<&Occurrence> {
        self.active.iter().filter(|o| o.kind.is_main()).collect()
    }

    /// Terminal main occurrences, for the done/abandoned list view.
    pub fn done_list(&self) -> Vec<&Occurrence> {
        self.done.iter().filter(|o| o.kind.is_main()).collect()
    }

    /// Every occurrence, active partition first.
    pub fn all(&self) -> impl Iterator<Item = &Occurrence> {
        self.active.iter().chain(self.done.iter())
    }

    /// Look up an occurrence by id.
    pub fn find(&self, occurrence_id: &str) -> Option<&Occurrence> {
        self.all().find(|o| o.occurrence_id == occurrence_id)
    }

    /// Cloned main occurrences (active + done), the aggregator's input.
    pub fn main_occurrences(&self) -> Vec<Occurrence> {
        self.all().filter(|o| o.kind.is_main()).cloned().collect()
    }
}

/// Annotated title for a task's main occurrence.
fn main_title(task: &Task) -> String {
    if task.subtasks.is_empty() {
        task.title.clone()
    } else {
        format!("[split] {}", task.title)
    }
}

/// Build the main occurrence for a task.
fn main_occurrence(task: &Task, now: DateTime<Utc>) -> Occurrence {
    Occurrence {
        occurrence_id: task.id.clone(),
        parent_task_id: task.id.clone(),
        kind: OccurrenceKind::Main,
        display_title: main_title(task),
        window_start: day_start(task.effective_start()),
        window_end: day_end(task.end_date),
        priority: task.priority,
        points: compute_points(task),
        effective_status: resolve_status(task.status, task.end_date, now),
    }
}

/// Build the generated occurrences of a cyclic task.
///
/// Each entry inherits the parent's priority and point value and carries a
/// frequency-annotated title. Status is resolved against the generated
/// date, so a future repetition of an overdue task still shows as open.
fn cyclic_occurrences(task: &Task, now: DateTime<Utc>) -> Vec<Occurrence> {
    let frequency = task
        .cycle
        .as_ref()
        .map(|c| c.frequency)
        .unwrap_or(CycleFrequency::Weekly);
    let points = compute_points(task);

    expand_cycle(task)
        .into_iter()
        .enumerate()
        .map(|(idx, date)| {
            let index = idx as u32 + 1;
            Occurrence {
                occurrence_id: format!("{}::cycle::{}", task.id, index),
                parent_task_id: task.id.clone(),
                kind: OccurrenceKind::Cyclic { index, frequency },
                display_title: format!("{} ({})", task.title, frequency.as_str()),
                window_start: day_start(date),
                window_end: day_end(date),
                priority: task.priority,
                points,
                effective_status: resolve_status(task.status, day_end(date), now),
            }
        })
        .collect()
}

/// Build one occurrence per declared sub-item of a task.
///
/// Sub-items keep their own dates, priority, and stored status (no overdue
/// derivation) and are always worth zero points. Actions route to the
/// parent task id.
pub fn expand_subtasks(task: &Task) -> Vec<Occurrence> {
    task.subtasks
        .iter()
        .map(|sub| Occurrence {
            occurrence_id: format!("{}::sub::{}", task.id, sub.id),
            parent_task_id: task.id.clone(),
            kind: OccurrenceKind::Subtask {
                subtask_id: sub.id.clone(),
            },
            display_title: format!("→ {}", sub.title),
            window_start: day_start(sub.start_date.unwrap_or(sub.end_date)),
            window_end: day_end(sub.end_date),
            priority: sub.priority,
            points: 0,
            effective_status: sub.status.into(),
        })
        .collect()
}

/// Materialize the full occurrence set for a task snapshot at `now`.
///
/// Deterministic: identical inputs produce byte-identical output. Tasks
/// are processed in input order; per task the main occurrence comes first,
/// then cyclic occurrences, then subtask occurrences.
pub fn materialize(tasks: &[Task], now: DateTime<Utc>) -> MaterializedSet {
    let mut set = MaterializedSet::default();

    for task in tasks {
        let main = main_occurrence(task, now);
        if main.effective_status.is_terminal() {
            set.done.push(main);
        } else {
            set.active.push(main);
        }
        set.active.extend(cyclic_occurrences(task, now));
        set.active.extend(expand_subtasks(task));
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::EffectiveStatus;
    use crate::task::{CycleSpec, Subtask, TaskStatus};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn plain_task(id: &str, status: TaskStatus, end: DateTime<Utc>) -> Task {
        let mut task = Task::new("Write report", end);
        task.id = id.to_string();
        task.priority = 5;
        task.status = status;
        task
    }

    #[test]
    fn test_every_task_yields_exactly_one_main_in_one_partition() {
        let now = utc_date(2024, 6, 1);
        let tasks = vec![
            plain_task("a", TaskStatus::Pending, utc_date(2024, 6, 10)),
            plain_task("b", TaskStatus::Done, utc_date(2024, 5, 1)),
            plain_task("c", TaskStatus::Abandoned, utc_date(2024, 5, 2)),
        ];
        let set = materialize(&tasks, now);

        assert_eq!(set.active_list().len(), 1);
        assert_eq!(set.done_list().len(), 2);
        assert_eq!(set.main_occurrences().len(), 3);
    }

    #[test]
    fn test_overdue_main_stays_active() {
        let now = utc_date(2024, 6, 1);
        let tasks = vec![plain_task("a", TaskStatus::Pending, utc_date(2024, 1, 1))];
        let set = materialize(&tasks, now);

        assert_eq!(set.done.len(), 0);
        assert_eq!(set.active[0].effective_status, EffectiveStatus::Overdue);
    }

    #[test]
    fn test_cyclic_task_emits_count_extra_occurrences() {
        let now = utc_date(2024, 3, 1);
        let mut task = plain_task("cyc", TaskStatus::Pending, utc_date(2024, 3, 10));
        task.is_cyclic = true;
        task.cycle = Some(CycleSpec {
            frequency: CycleFrequency::Daily,
            occurrences_count: 4,
        });
        let set = materialize(&[task], now);

        assert_eq!(set.active.len(), 5); // main + 4 generated
        let cyclic: Vec<_> = set
            .active
            .iter()
            .filter(|o| matches!(o.kind, OccurrenceKind::Cyclic { .. }))
            .collect();
        assert_eq!(cyclic.len(), 4);
        assert!(cyclic.iter().all(|o| o.parent_task_id == "cyc"));
        assert!(cyclic
            .iter()
            .all(|o| o.display_title == "Write report (daily)"));
        // List views never show generated entries.
        assert_eq!(set.active_list().len(), 1);
    }

    #[test]
    fn test_cyclic_occurrence_in_future_is_not_overdue() {
        let now = utc_date(2024, 3, 12);
        let mut task = plain_task("cyc", TaskStatus::Pending, utc_date(2024, 3, 10));
        task.is_cyclic = true;
        task.cycle = Some(CycleSpec {
            frequency: CycleFrequency::Weekly,
            occurrences_count: 1,
        });
        let set = materialize(&[task], now);

        let main = set.find("cyc").unwrap();
        assert_eq!(main.effective_status, EffectiveStatus::Overdue);
        let generated = set.find("cyc::cycle::1").unwrap();
        assert_eq!(generated.effective_status, EffectiveStatus::Pending);
    }

    #[test]
    fn test_subtasks_expand_with_zero_points_and_own_status() {
        let now = utc_date(2024, 3, 1);
        let mut task = plain_task("split", TaskStatus::Pending, utc_date(2024, 3, 10));
        task.points = Some(50);
        task.subtasks = vec![
            Subtask {
                id: "s1".into(),
                title: "Outline".into(),
                start_date: None,
                end_date: utc_date(2024, 3, 4),
                priority: 9,
                status: TaskStatus::Done,
            },
            Subtask {
                id: "s2".into(),
                title: "Draft".into(),
                start_date: Some(utc_date(2024, 3, 5)),
                end_date: utc_date(2024, 3, 8),
                priority: 2,
                status: TaskStatus::Pending,
            },
        ];
        let set = materialize(&[task], now);

        let main = set.find("split").unwrap();
        assert_eq!(main.display_title, "[split] Write report");
        assert_eq!(main.points, 50);

        let s1 = set.find("split::sub::s1").unwrap();
        assert_eq!(s1.points, 0);
        assert_eq!(s1.effective_status, EffectiveStatus::Done);
        assert_eq!(s1.parent_task_id, "split");
        assert_eq!(s1.display_title, "→ Outline");

        let s2 = set.find("split::sub::s2").unwrap();
        assert_eq!(s2.points, 0);
        assert_eq!(s2.window_start, day_start(utc_date(2024, 3, 5)));
        assert_eq!(s2.window_end.date_naive(), utc_date(2024, 3, 8).date_naive());
    }

    #[test]
    fn test_subtask_status_is_not_overdue_derived() {
        // Sub-item deadlines in the past keep their stored status as-is.
        let now = utc_date(2024, 6, 1);
        let mut task = plain_task("split", TaskStatus::Pending, utc_date(2024, 6, 10));
        task.subtasks = vec![Subtask {
            id: "s1".into(),
            title: "Late piece".into(),
            start_date: None,
            end_date: utc_date(2024, 1, 1),
            priority: 1,
            status: TaskStatus::InProgress,
        }];
        let set = materialize(&[task], now);

        let sub = set.find("split::sub::s1").unwrap();
        assert_eq!(sub.effective_status, EffectiveStatus::InProgress);
    }

    #[test]
    fn test_materialization_is_deterministic() {
        let now = utc_date(2024, 3, 1);
        let mut task = plain_task("cyc", TaskStatus::Pending, utc_date(2024, 3, 10));
        task.is_cyclic = true;
        task.cycle = Some(CycleSpec {
            frequency: CycleFrequency::Monthly,
            occurrences_count: 3,
        });
        let tasks = vec![task];

        let a = serde_json::to_string(&materialize(&tasks, now)).unwrap();
        let b = serde_json::to_string(&materialize(&tasks, now)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_snapshot() {
        let set = materialize(&[], utc_date(2024, 3, 1));
        assert!(set.active.is_empty());
        assert!(set.done.is_empty());
    }

    fn any_status() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![
            Just(TaskStatus::Pending),
            Just(TaskStatus::InProgress),
            Just(TaskStatus::Completed),
            Just(TaskStatus::Done),
            Just(TaskStatus::Abandoned),
        ]
    }

    proptest! {
        #[test]
        fn prop_one_main_per_task_in_exactly_one_partition(
            statuses in proptest::collection::vec(any_status(), 0..20),
            end_offsets in proptest::collection::vec(-200i64..200, 0..20),
        ) {
            let now = utc_date(2024, 6, 1);
            let tasks: Vec<Task> = statuses
                .iter()
                .zip(end_offsets.iter().chain(std::iter::repeat(&0)))
                .enumerate()
                .map(|(i, (status, offset))| {
                    let mut t = plain_task(
                        &format!("t{i}"),
                        *status,
                        now + chrono::Duration::days(*offset),
                    );
                    t.priority = (i % 10) as i32 + 1;
                    t
                })
                .collect();

            let set = materialize(&tasks, now);
            let mains = set.main_occurrences();
            prop_assert_eq!(mains.len(), tasks.len());
            for task in &tasks {
                let in_active = set.active.iter().filter(|o| o.kind.is_main() && o.parent_task_id == task.id).count();
                let in_done = set.done.iter().filter(|o| o.kind.is_main() && o.parent_task_id == task.id).count();
                prop_assert_eq!(in_active + in_done, 1);
            }
        }
    }
}
