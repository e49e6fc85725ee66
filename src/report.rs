// src/report.rs

//! Planned-vs-actual productivity report.

use std::collections::BTreeMap;

use crate::tracker::CompletionRecord;
use crate::types::{Minutes, Task, TaskId, percentage};

/// One row of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub task_id: TaskId,
    pub task_name: String,
    pub planned_time: Minutes,
    /// 0 for tasks that have not completed.
    pub actual_time: Minutes,
    pub productivity: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductivityReport {
    /// One entry per task, ascending by id.
    pub entries: Vec<ReportEntry>,
    pub overall_productivity: f64,
}

impl ProductivityReport {
    pub fn entry(&self, task: TaskId) -> Option<&ReportEntry> {
        self.entries.iter().find(|e| e.task_id == task)
    }

    pub fn total_planned(&self) -> Minutes {
        self.entries.iter().map(|e| e.planned_time).sum()
    }

    pub fn total_actual(&self) -> Minutes {
        self.entries.iter().map(|e| e.actual_time).sum()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductivityReporter;

impl ProductivityReporter {
    /// Pure function of the task set and completion records.
    pub fn generate_report(
        tasks: &BTreeMap<TaskId, Task>,
        records: &BTreeMap<TaskId, CompletionRecord>,
    ) -> ProductivityReport {
        let entries: Vec<ReportEntry> = tasks
            .values()
            .map(|task| {
                let actual = records
                    .get(&task.id)
                    .filter(|r| r.completed)
                    .map(|r| r.actual_duration)
                    .unwrap_or(0.0);
                ReportEntry {
                    task_id: task.id,
                    task_name: task.name.clone(),
                    planned_time: task.planned_duration,
                    actual_time: actual,
                    productivity: percentage(actual, task.planned_duration),
                }
            })
            .collect();

        let planned: Minutes = entries.iter().map(|e| e.planned_time).sum();
        let actual: Minutes = entries.iter().map(|e| e.actual_time).sum();

        ProductivityReport {
            entries,
            overall_productivity: percentage(actual, planned),
        }
    }
}
