use std::cell::Cell;

use super::*;

fn counting_attempt(succeed_on: Option<u32>) -> (Rc<Cell<u32>>, Rc<dyn Fn() -> bool>) {
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    let attempt: Rc<dyn Fn() -> bool> = Rc::new(move || {
        c.set(c.get() + 1);
        succeed_on.is_some_and(|n| c.get() >= n)
    });
    (calls, attempt)
}

// =============================================================
// RetryBudget
// =============================================================

#[test]
fn default_policy_is_ten_retries_every_200ms() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_ms, 200);
    assert_eq!(policy.max_retries, 10);
}

#[test]
fn budget_waits_until_exhausted() {
    let mut budget = RetryBudget::new(RetryPolicy { delay_ms: 50, max_retries: 2 });
    assert_eq!(budget.next(), RetryStep::Wait(50));
    assert_eq!(budget.next(), RetryStep::Wait(50));
    assert_eq!(budget.next(), RetryStep::Exhausted);
    assert_eq!(budget.next(), RetryStep::Exhausted);
    assert_eq!(budget.retries(), 2);
}

#[test]
fn zero_retry_budget_is_immediately_exhausted() {
    let mut budget = RetryBudget::new(RetryPolicy { delay_ms: 10, max_retries: 0 });
    assert_eq!(budget.next(), RetryStep::Exhausted);
}

// =============================================================
// retry_until
// =============================================================

#[test]
fn immediate_success_schedules_nothing() {
    let timer = ManualTimer::new();
    let (calls, attempt) = counting_attempt(Some(1));
    retry_until(Rc::new(timer.clone()), RetryPolicy::default(), attempt, Rc::new(|_: u32| {}));
    assert_eq!(calls.get(), 1);
    assert_eq!(timer.pending(), 0);
}

#[test]
fn success_after_retries_stops_scheduling() {
    let timer = ManualTimer::new();
    let exhausted = Rc::new(Cell::new(false));
    let e = Rc::clone(&exhausted);
    let (calls, attempt) = counting_attempt(Some(4));
    retry_until(Rc::new(timer.clone()), RetryPolicy::default(), attempt, Rc::new(move |_: u32| e.set(true)));

    assert_eq!(timer.run_all(), 3);
    assert_eq!(calls.get(), 4);
    assert_eq!(timer.elapsed_ms(), 600);
    assert!(!exhausted.get());
}

#[test]
fn exhaustion_runs_callback_once_after_all_retries() {
    let timer = ManualTimer::new();
    let exhausted = Rc::new(Cell::new(0));
    let e = Rc::clone(&exhausted);
    let (calls, attempt) = counting_attempt(None);
    retry_until(
        Rc::new(timer.clone()),
        RetryPolicy { delay_ms: 200, max_retries: 10 },
        attempt,
        Rc::new(move |retries: u32| {
            assert_eq!(retries, 10);
            e.set(e.get() + 1);
        }),
    );

    assert_eq!(timer.run_all(), 10);
    assert_eq!(calls.get(), 11);
    assert_eq!(exhausted.get(), 1);
    assert_eq!(timer.elapsed_ms(), 2000);
}

#[test]
fn run_next_on_empty_queue_is_false() {
    assert!(!ManualTimer::new().run_next());
}
