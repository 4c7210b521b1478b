//! Bounded fixed-delay retry, independent of any UI framework.
//!
//! A [`RetryBudget`] counts attempts; [`retry_until`] drives an attempt
//! closure through a [`Timer`] until it succeeds or the budget runs out.

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::consts::{MAX_RETRIES, RETRY_DELAY_MS};

/// Task run once by a [`Timer`].
pub type TimerTask = Box<dyn FnOnce()>;

/// Fire-and-forget delayed execution.
pub trait Timer {
    fn schedule(&self, delay_ms: u32, task: TimerTask);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay_ms: u32,
    /// Delayed attempts allowed after the first, immediate one.
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { delay_ms: RETRY_DELAY_MS, max_retries: MAX_RETRIES }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryStep {
    /// Try again after this many milliseconds.
    Wait(u32),
    Exhausted,
}

#[derive(Clone, Copy, Debug)]
pub struct RetryBudget {
    policy: RetryPolicy,
    retries: u32,
}

impl RetryBudget {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, retries: 0 }
    }

    /// Record a failed attempt and decide what happens next.
    pub fn next(&mut self) -> RetryStep {
        if self.retries >= self.policy.max_retries {
            return RetryStep::Exhausted;
        }
        self.retries += 1;
        RetryStep::Wait(self.policy.delay_ms)
    }

    /// Delayed retries scheduled so far.
    #[must_use]
    pub fn retries(&self) -> u32 {
        self.retries
    }
}

/// Run `attempt` now and then on every retry until it returns `true`.
/// `on_exhausted` runs once if the budget is spent first.
pub fn retry_until(
    timer: Rc<dyn Timer>,
    policy: RetryPolicy,
    attempt: Rc<dyn Fn() -> bool>,
    on_exhausted: Rc<dyn Fn(u32)>,
) {
    step(timer, RetryBudget::new(policy), attempt, on_exhausted);
}

fn step(timer: Rc<dyn Timer>, mut budget: RetryBudget, attempt: Rc<dyn Fn() -> bool>, on_exhausted: Rc<dyn Fn(u32)>) {
    if attempt() {
        return;
    }
    match budget.next() {
        RetryStep::Wait(delay_ms) => {
            let next_timer = Rc::clone(&timer);
            timer.schedule(delay_ms, Box::new(move || step(next_timer, budget, attempt, on_exhausted)));
        }
        RetryStep::Exhausted => on_exhausted(budget.retries()),
    }
}

/// Timer that only runs tasks when told to. Clones share the queue.
#[derive(Clone, Default)]
pub struct ManualTimer {
    inner: Rc<RefCell<ManualTimerInner>>,
}

#[derive(Default)]
struct ManualTimerInner {
    queue: VecDeque<(u32, TimerTask)>,
    elapsed_ms: u64,
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Total simulated delay of every task run so far.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.inner.borrow().elapsed_ms
    }

    /// Run the oldest pending task. Returns `false` when the queue is empty.
    pub fn run_next(&self) -> bool {
        let next = {
            let mut inner = self.inner.borrow_mut();
            let next = inner.queue.pop_front();
            if let Some((delay_ms, _)) = &next {
                inner.elapsed_ms += u64::from(*delay_ms);
            }
            next
        };
        match next {
            Some((_, task)) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks, including ones they schedule, until the queue drains.
    /// Returns how many ran.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay_ms: u32, task: TimerTask) {
        self.inner.borrow_mut().queue.push_back((delay_ms, task));
    }
}
