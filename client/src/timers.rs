use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;

use alpha_shared::Schedule;

use crate::config::{SCHEDULE_PUMP_MS, STATS_LABEL_TICK_MS, STATS_REFRESH_MS};
use crate::fetch::now_ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageTask {
    RefreshStats,
    AgeStatsLabel,
}

struct PageTimers {
    schedule: Rc<RefCell<Schedule<PageTask>>>,
    _pump: Interval,
}

thread_local! {
    static PAGE_TIMERS: RefCell<Option<PageTimers>> = const { RefCell::new(None) };
}

/// Register the recurring page tasks and start pumping them from wall-clock time.
/// Calling again replaces the previous schedule.
pub(crate) fn start(on_due: impl Fn(PageTask) + 'static) {
    stop();

    let mut schedule = Schedule::new(now_ms());
    schedule.every(PageTask::RefreshStats, STATS_REFRESH_MS);
    schedule.every(PageTask::AgeStatsLabel, STATS_LABEL_TICK_MS);
    let schedule = Rc::new(RefCell::new(schedule));

    let pumped = schedule.clone();
    let pump = Interval::new(SCHEDULE_PUMP_MS, move || {
        // Collect first so handlers never run while the schedule is borrowed.
        let mut due = pumped.borrow_mut().advance_to(now_ms());
        // A throttled tab can owe several periods; each task runs once per pump.
        let mut ran: Vec<PageTask> = Vec::with_capacity(due.len());
        due.retain(|task| {
            let first = !ran.contains(task);
            ran.push(*task);
            first
        });
        for task in due {
            on_due(task);
        }
    });

    PAGE_TIMERS.with(|slot| {
        *slot.borrow_mut() = Some(PageTimers {
            schedule,
            _pump: pump,
        });
    });
}

/// Cancel every page task. Dropping the interval clears it.
pub(crate) fn stop() {
    PAGE_TIMERS.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let pending = old.schedule.borrow().len();
            if pending > 0 {
                crate::dom::log_info(&format!("Stopping {pending} page timers"));
            }
        }
    });
}
