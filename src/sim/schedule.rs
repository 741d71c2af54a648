//! One-shot timers against the simulation clock
//!
//! Tasks are keyed by an absolute fire time and drained at the start of each
//! tick. Ties fire in scheduling order.

/// Token returned by [`Scheduler::schedule_once`], used to cancel the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelToken(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    fire_at_ms: f64,
    id: u64,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    pending: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Schedule `task` to fire once `delay_ms` after `now_ms`
    pub fn schedule_once(&mut self, now_ms: f64, delay_ms: f64, task: T) -> CancelToken {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Scheduled {
            fire_at_ms: now_ms + delay_ms.max(0.0),
            id,
            task,
        });
        CancelToken(id)
    }

    /// Remove a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: CancelToken) -> bool {
        match self.pending.iter().position(|s| s.id == token.0) {
            Some(i) => {
                self.pending.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, token: CancelToken) -> bool {
        self.pending.iter().any(|s| s.id == token.0)
    }

    /// Remove and return every task due at `now_ms`, earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].fire_at_ms <= now_ms {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.fire_at_ms.total_cmp(&b.fire_at_ms).then(a.id.cmp(&b.id)));
        due.into_iter().map(|s| s.task).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all pending tasks
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
