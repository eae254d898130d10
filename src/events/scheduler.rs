use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use log::trace;

/// Shared flag attached to one scheduled task. Cancelled tasks are
/// discarded unfired the next time the queue is drained.
#[derive(Debug, Clone)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    fn new() -> Self {
        CancellationToken(Rc::new(Cell::new(false)))
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

struct ScheduledTask<T> {
    due: Instant,
    payload: T,
    token: CancellationToken,
}

/// Cooperative deferred-continuation queue. All engine work is
/// synchronous; the only asynchrony in the game is a handful of delayed
/// reveals, which are parked here and fired by the caller's clock tick.
/// Resetting a board cancels its pending continuations so a stale reveal
/// can never mutate a fresh game.
pub struct TaskQueue<T> {
    tasks: Vec<ScheduledTask<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        TaskQueue { tasks: Vec::new() }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, payload: T) -> CancellationToken {
        let token = CancellationToken::new();
        self.tasks.push(ScheduledTask {
            due,
            payload,
            token: token.clone(),
        });
        token
    }

    /// Removes and returns the payloads of every task due at `now`, in
    /// schedule order. Cancelled tasks are dropped silently.
    pub fn fire_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.drain(..) {
            if task.token.is_cancelled() {
                continue;
            }
            if task.due <= now {
                due.push(task.payload);
            } else {
                remaining.push(task);
            }
        }
        self.tasks = remaining;
        due
    }

    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            trace!(target: "scheduler", "Cancelling {} pending tasks", self.tasks.len());
        }
        for task in &self.tasks {
            task.token.cancel();
        }
        self.tasks.clear();
    }

    pub fn pending(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| !t.token.is_cancelled())
            .count()
    }
}
