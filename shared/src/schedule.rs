//! Recurring tasks on a caller-supplied millisecond clock.
//!
//! The schedule never reads wall-clock time itself: the browser pumps it from a
//! timer with `Date.now()`, tests pump it with whatever virtual time they like.

/// Cancel handle returned by [`Schedule::every`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<K> {
    handle: TaskHandle,
    key: K,
    period_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Schedule<K> {
    now_ms: u64,
    next_handle: u64,
    entries: Vec<Entry<K>>,
}

impl<K: Copy> Schedule<K> {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms,
            next_handle: 0,
            entries: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire `key` every `period_ms`, first one period from now. A zero period is
    /// clamped to 1 ms.
    pub fn every(&mut self, key: K, period_ms: u64) -> TaskHandle {
        let period_ms = period_ms.max(1);
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            key,
            period_ms,
            next_due_ms: self.now_ms + period_ms,
        });
        handle
    }

    /// Stop a task. Returns false if it was already cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the clock to `now_ms` and return every key that came due, ordered by
    /// due time (ties keep registration order). A task overdue by several periods
    /// fires once per period. Time never moves backwards.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<K> {
        let now_ms = now_ms.max(self.now_ms);
        self.now_ms = now_ms;

        let mut due: Vec<(u64, usize, K)> = Vec::new();
        for (order, entry) in self.entries.iter_mut().enumerate() {
            while entry.next_due_ms <= now_ms {
                due.push((entry.next_due_ms, order, entry.key));
                entry.next_due_ms += entry.period_ms;
            }
        }
        due.sort_by_key(|&(at, order, _)| (at, order));
        due.into_iter().map(|(_, _, key)| key).collect()
    }

    pub fn advance_by(&mut self, delta_ms: u64) -> Vec<K> {
        self.advance_to(self.now_ms.saturating_add(delta_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Task {
        Refresh,
        Tick,
    }

    #[test]
    fn nothing_fires_before_first_period() {
        let mut schedule = Schedule::new(0);
        schedule.every(Task::Refresh, 60_000);
        assert!(schedule.advance_to(59_999).is_empty());
        assert_eq!(schedule.advance_to(60_000), vec![Task::Refresh]);
    }

    #[test]
    fn independent_tasks_interleave_by_due_time() {
        let mut schedule = Schedule::new(1_000);
        schedule.every(Task::Refresh, 60_000);
        schedule.every(Task::Tick, 25_000);
        assert_eq!(
            schedule.advance_by(120_000),
            vec![
                Task::Tick,
                Task::Tick,
                Task::Refresh,
                Task::Tick,
                Task::Tick,
                Task::Refresh,
            ]
        );
        assert_eq!(schedule.now_ms(), 121_000);
    }

    #[test]
    fn same_due_time_keeps_registration_order() {
        let mut schedule = Schedule::new(0);
        schedule.every(Task::Refresh, 60_000);
        schedule.every(Task::Tick, 60_000);
        assert_eq!(schedule.advance_by(60_000), vec![Task::Refresh, Task::Tick]);
    }

    #[test]
    fn cancelled_task_stops_firing() {
        let mut schedule = Schedule::new(0);
        let refresh = schedule.every(Task::Refresh, 60_000);
        schedule.every(Task::Tick, 60_000);
        assert!(schedule.cancel(refresh));
        assert!(!schedule.cancel(refresh));
        assert!(!schedule.is_scheduled(refresh));
        assert_eq!(schedule.advance_by(60_000), vec![Task::Tick]);
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut schedule = Schedule::new(10_000);
        schedule.every(Task::Tick, 1_000);
        assert!(schedule.advance_to(5_000).is_empty());
        assert_eq!(schedule.now_ms(), 10_000);
        assert_eq!(schedule.advance_to(11_000), vec![Task::Tick]);
    }
}
