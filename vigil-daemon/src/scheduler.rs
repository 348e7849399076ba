use std::collections::HashMap;

use chrono::NaiveDateTime;

use vigil_core::DailySchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    DailyTask,
}

#[derive(Debug, Clone, Copy)]
pub struct JobSchedule {
    pub next_due: NaiveDateTime,
}

#[derive(Debug, Default)]
pub struct SchedulerState {
    schedules: HashMap<JobKind, JobSchedule>,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_due(&mut self, kind: JobKind, next_due: Option<NaiveDateTime>) {
        if let Some(ts) = next_due {
            self.schedules.insert(kind, JobSchedule { next_due: ts });
        } else {
            self.schedules.remove(&kind);
        }
    }

    pub fn get_due(&self, kind: JobKind) -> Option<NaiveDateTime> {
        self.schedules.get(&kind).map(|entry| entry.next_due)
    }

    pub fn clear(&mut self, kind: JobKind) {
        self.schedules.remove(&kind);
    }

    /// Whether `kind` should run at `now`.
    ///
    /// The first poll only arms the job for its next occurrence. Once due,
    /// the job is re-armed for the following occurrence, so a late check
    /// fires once rather than catching up.
    pub fn poll(&mut self, kind: JobKind, schedule: &DailySchedule, now: NaiveDateTime) -> bool {
        match self.get_due(kind) {
            Some(next_due) if now >= next_due => {
                self.set_due(kind, Some(schedule.next_after(now)));
                true
            }
            Some(_) => false,
            None => {
                self.set_due(kind, Some(schedule.next_after(now)));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_set_get_clear() {
        let mut state = SchedulerState::new();
        assert!(state.get_due(JobKind::DailyTask).is_none());
        state.set_due(JobKind::DailyTask, Some(at(1, 10, 0)));
        assert_eq!(state.get_due(JobKind::DailyTask), Some(at(1, 10, 0)));
        state.clear(JobKind::DailyTask);
        assert!(state.get_due(JobKind::DailyTask).is_none());
        state.set_due(JobKind::DailyTask, Some(at(1, 10, 0)));
        state.set_due(JobKind::DailyTask, None);
        assert!(state.get_due(JobKind::DailyTask).is_none());
    }

    #[test]
    fn test_first_poll_arms_without_firing() {
        let schedule = DailySchedule::parse("10:00").unwrap();
        let mut state = SchedulerState::new();

        assert!(!state.poll(JobKind::DailyTask, &schedule, at(1, 9, 0)));
        assert_eq!(state.get_due(JobKind::DailyTask), Some(at(1, 10, 0)));

        // Starting after today's slot waits for tomorrow.
        let mut late = SchedulerState::new();
        assert!(!late.poll(JobKind::DailyTask, &schedule, at(1, 11, 0)));
        assert_eq!(late.get_due(JobKind::DailyTask), Some(at(2, 10, 0)));
    }

    #[test]
    fn test_fires_once_per_day() {
        let schedule = DailySchedule::parse("10:00").unwrap();
        let mut state = SchedulerState::new();
        state.poll(JobKind::DailyTask, &schedule, at(1, 9, 59));

        assert!(state.poll(JobKind::DailyTask, &schedule, at(1, 10, 0)));
        assert!(!state.poll(JobKind::DailyTask, &schedule, at(1, 10, 1)));
        assert_eq!(state.get_due(JobKind::DailyTask), Some(at(2, 10, 0)));

        // A check that arrives days late fires once and re-arms.
        assert!(state.poll(JobKind::DailyTask, &schedule, at(5, 12, 0)));
        assert_eq!(state.get_due(JobKind::DailyTask), Some(at(6, 10, 0)));
    }
}
