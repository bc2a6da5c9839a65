use crate::core::ElementRef;

/// Deferred DOM mutation produced by timed transitions.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DeferredAction {
    /// Second step of a panel fade. Ignored when `generation` is stale.
    PanelStyle {
        element: ElementRef,
        property: &'static str,
        value: &'static str,
        generation: u64,
    },
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    due_at_ms: f64,
    order: u64,
    action: DeferredAction,
}

/// Timer queue ordered by `(due_at_ms, order)`.
///
/// `order` keeps tasks scheduled for the same instant in insertion order.
#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    tasks: Vec<ScheduledTask>,
    next_order: u64,
}

impl TimerQueue {
    pub(crate) fn schedule(&mut self, due_at_ms: f64, action: DeferredAction) {
        let order = self.next_order;
        self.next_order += 1;
        self.tasks.push(ScheduledTask {
            due_at_ms,
            order,
            action,
        });
    }

    /// Removes and returns every task due at or before `now_ms`, in firing order.
    pub(crate) fn drain_due(&mut self, now_ms: f64) -> Vec<DeferredAction> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|task| task.due_at_ms <= now_ms);
        self.tasks = pending;
        due.sort_by(|left, right| {
            left.due_at_ms
                .total_cmp(&right.due_at_ms)
                .then(left.order.cmp(&right.order))
        });
        due.into_iter().map(|task| task.action).collect()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&DeferredAction) -> bool) {
        self.tasks.retain(|task| keep(&task.action));
    }

    #[must_use]
    pub(crate) fn next_due_ms(&self) -> Option<f64> {
        self.tasks
            .iter()
            .map(|task| task.due_at_ms)
            .min_by(f64::total_cmp)
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{DeferredAction, TimerQueue};
    use crate::core::ElementRef;

    fn action(generation: u64) -> DeferredAction {
        DeferredAction::PanelStyle {
            element: ElementRef(1),
            property: "opacity",
            value: "1",
            generation,
        }
    }

    #[test]
    fn drains_due_tasks_in_time_then_insertion_order() {
        let mut queue = TimerQueue::default();
        queue.schedule(20.0, action(3));
        queue.schedule(10.0, action(1));
        queue.schedule(10.0, action(2));
        queue.schedule(50.0, action(4));

        let due = queue.drain_due(20.0);
        assert_eq!(due, vec![action(1), action(2), action(3)]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_due_ms(), Some(50.0));
    }

    #[test]
    fn retain_drops_matching_tasks() {
        let mut queue = TimerQueue::default();
        queue.schedule(10.0, action(1));
        queue.schedule(10.0, action(2));
        queue.retain(|task| !matches!(task, DeferredAction::PanelStyle { generation: 1, .. }));
        assert_eq!(queue.drain_due(10.0), vec![action(2)]);
        assert!(queue.is_empty());
    }
}
