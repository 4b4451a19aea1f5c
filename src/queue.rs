//! Fork-join over scoped threads.
//!
//! Every [`TaskQueue::push`] spawns a fresh thread; [`TaskQueue::wait`] joins
//! them all. There is no pool and no result channel, tasks communicate only
//! through the borrowed state they capture.

use std::ops::Range;
use std::panic;

use crossbeam_utils::thread::{Scope, ScopedJoinHandle};

pub struct TaskQueue<'scope, 'env> {
    scope: &'scope Scope<'env>,
    handles: Vec<ScopedJoinHandle<'scope, ()>>,
}

impl<'scope, 'env> TaskQueue<'scope, 'env> {
    pub fn new(scope: &'scope Scope<'env>) -> Self {
        Self::with_capacity(scope, 0)
    }

    pub fn with_capacity(scope: &'scope Scope<'env>, capacity: usize) -> Self {
        Self {
            scope,
            handles: Vec::with_capacity(capacity),
        }
    }

    /// Spawn `task` immediately.
    pub fn push<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'env,
    {
        self.handles.push(self.scope.spawn(move |_| task()));
    }

    /// Block until every task pushed since the last wait has finished.
    /// A panicking task is re-raised here.
    pub fn wait(&mut self) {
        for handle in self.handles.drain(..) {
            if let Err(payload) = handle.join() {
                panic::resume_unwind(payload);
            }
        }
    }

    /// Tasks pushed and not yet joined.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.handles.capacity()
    }
}

impl Drop for TaskQueue<'_, '_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            // Already unwinding; join without re-raising.
            for handle in self.handles.drain(..) {
                let _ = handle.join();
            }
        } else {
            self.wait();
        }
    }
}

/// Run `f` with a task queue whose tasks may borrow from the caller's stack.
/// All tasks are joined before this returns.
pub fn fork_join<'env, F, R>(capacity: usize, f: F) -> R
where
    F: FnOnce(&mut TaskQueue<'_, 'env>) -> R,
{
    let result = crossbeam_utils::thread::scope(|scope| {
        let mut queue = TaskQueue::with_capacity(scope, capacity);
        let result = f(&mut queue);
        queue.wait();
        result
    });
    match result {
        Ok(result) => result,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Split `0..len` into `parts` contiguous ranges whose sizes differ by at most
/// one, the larger ones first. Empty ranges are skipped.
pub fn balanced_ranges(len: usize, parts: usize) -> impl Iterator<Item = Range<usize>> {
    let parts = parts.max(1);
    let base = len / parts;
    let extra = len % parts;
    let mut start = 0;
    (0..parts).filter_map(move |part| {
        let stop = start + base + usize::from(part < extra);
        let range = start..stop;
        start = stop;
        (!range.is_empty()).then_some(range)
    })
}
