//! Bounded-concurrency batch execution
//!
//! Runs one async operation per target with at most `concurrency` in flight,
//! recording an outcome per input position. One target failing never takes
//! down the run: failures are captured, the rest proceed. With `fail_fast`
//! set, a failure stops new dispatch, awaits whatever is already in flight,
//! and marks the undispatched tail as skipped. An external abort flag
//! (Ctrl-C) halts the run the same way.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use indicatif::ProgressBar;
use log::{debug, warn};

use crate::error::{PdsError, Result};

/// Per-target terminal state of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The operation succeeded; carries a short detail string (e.g. the
    /// created record's URI).
    Success(String),
    /// The operation failed; carries the error message.
    Failure(String),
    /// Never dispatched because the run halted first.
    Skipped,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Success(_))
    }
}

/// Outcomes of a batch run, indexed by input position.
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, BatchOutcome::Failure(_)))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, BatchOutcome::Skipped))
            .count()
    }

    pub fn is_full_success(&self) -> bool {
        self.outcomes.iter().all(BatchOutcome::is_success)
    }
}

/// Run `op` over `targets` with at most `concurrency` operations in flight.
///
/// Outcomes come back in input order regardless of completion order. The
/// progress bar, when given, ticks once per completed operation so long
/// runs stay observable.
pub async fn run_batch<T, F, Fut>(
    targets: Vec<T>,
    concurrency: usize,
    fail_fast: bool,
    abort: &AtomicBool,
    progress: Option<&ProgressBar>,
    op: F,
) -> Result<BatchResult>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    if concurrency == 0 {
        return Err(PdsError::InvalidArgument(
            "concurrency must be at least 1".to_string(),
        ));
    }

    let total = targets.len();
    let mut outcomes = vec![BatchOutcome::Skipped; total];
    let mut pending = targets.into_iter().enumerate();
    let mut in_flight = FuturesUnordered::new();
    let mut halted = false;

    loop {
        while !halted && in_flight.len() < concurrency {
            if abort.load(Ordering::SeqCst) {
                warn!("Abort requested, halting dispatch");
                halted = true;
                break;
            }
            match pending.next() {
                Some((index, target)) => {
                    let fut = op(target);
                    in_flight.push(async move { (index, fut.await) });
                }
                None => break,
            }
        }

        match in_flight.next().await {
            Some((index, result)) => {
                match result {
                    Ok(detail) => outcomes[index] = BatchOutcome::Success(detail),
                    Err(e) => {
                        debug!("Batch target {} failed: {}", index, e);
                        outcomes[index] = BatchOutcome::Failure(e.to_string());
                        if fail_fast {
                            halted = true;
                        }
                    }
                }
                if let Some(pb) = progress {
                    pb.inc(1);
                }
            }
            // Nothing in flight and nothing left to dispatch
            None => break,
        }
    }

    Ok(BatchResult { outcomes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    fn no_abort() -> AtomicBool {
        AtomicBool::new(false)
    }

    #[tokio::test]
    async fn test_all_success_in_input_order() {
        let abort = no_abort();
        let result = run_batch(vec![10u64, 5, 1], 3, false, &abort, None, |delay| async move {
            // Later inputs finish first
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(format!("done-{}", delay))
        })
        .await
        .unwrap();

        assert_eq!(
            result.outcomes,
            vec![
                BatchOutcome::Success("done-10".to_string()),
                BatchOutcome::Success("done-5".to_string()),
                BatchOutcome::Success("done-1".to_string()),
            ]
        );
        assert!(result.is_full_success());
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_others() {
        let abort = no_abort();
        let result = run_batch(vec![1u32, 2, 3], 2, false, &abort, None, |n| async move {
            if n == 2 {
                Err(PdsError::InvalidArgument("bad target".to_string()))
            } else {
                Ok(n.to_string())
            }
        })
        .await
        .unwrap();

        assert_eq!(result.succeeded(), 2);
        assert_eq!(result.failed(), 1);
        assert_eq!(result.skipped(), 0);
        assert!(!result.is_full_success());
        assert!(matches!(result.outcomes[1], BatchOutcome::Failure(_)));
    }

    #[tokio::test]
    async fn test_fail_fast_skips_undispatched_tail() {
        let abort = no_abort();
        let result = run_batch(vec![1u32, 2, 3, 4], 1, true, &abort, None, |n| async move {
            if n == 2 {
                Err(PdsError::Api {
                    status: 500,
                    message: "boom".to_string(),
                })
            } else {
                Ok(n.to_string())
            }
        })
        .await
        .unwrap();

        assert_eq!(
            result.outcomes,
            vec![
                BatchOutcome::Success("1".to_string()),
                BatchOutcome::Failure("API error (status 500): boom".to_string()),
                BatchOutcome::Skipped,
                BatchOutcome::Skipped,
            ]
        );
    }

    #[tokio::test]
    async fn test_fail_fast_awaits_in_flight() {
        // Target 0 is still running when target 1 fails; its result must
        // still be recorded rather than dropped.
        let abort = no_abort();
        let result = run_batch(vec![0u32, 1, 2], 2, true, &abort, None, |n| async move {
            match n {
                0 => {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok("slow".to_string())
                }
                1 => Err(PdsError::InvalidArgument("fast failure".to_string())),
                _ => Ok("tail".to_string()),
            }
        })
        .await
        .unwrap();

        assert_eq!(result.outcomes[0], BatchOutcome::Success("slow".to_string()));
        assert!(matches!(result.outcomes[1], BatchOutcome::Failure(_)));
        assert_eq!(result.outcomes[2], BatchOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_concurrency_bound_respected() {
        let active = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let abort = no_abort();

        let targets: Vec<u32> = (0..12).collect();
        let result = run_batch(targets, 3, false, &abort, None, |_| {
            let active = active.clone();
            let max_seen = max_seen.clone();
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                active.fetch_sub(1, Ordering::SeqCst);
                Ok("ok".to_string())
            }
        })
        .await
        .unwrap();

        assert!(result.is_full_success());
        let peak = max_seen.load(Ordering::SeqCst);
        assert!(peak <= 3, "concurrency bound exceeded: {}", peak);
        assert!(peak >= 2, "operations never overlapped");
    }

    #[tokio::test]
    async fn test_zero_concurrency_rejected() {
        let abort = no_abort();
        let result = run_batch(vec![1u32], 0, false, &abort, None, |n| async move {
            Ok(n.to_string())
        })
        .await;
        assert!(matches!(result.unwrap_err(), PdsError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_preset_abort_skips_everything() {
        let abort = AtomicBool::new(true);
        let dispatched = Arc::new(AtomicUsize::new(0));
        let result = run_batch(vec![1u32, 2, 3], 2, false, &abort, None, |_| {
            let dispatched = dispatched.clone();
            async move {
                dispatched.fetch_add(1, Ordering::SeqCst);
                Ok("ok".to_string())
            }
        })
        .await
        .unwrap();

        assert_eq!(result.skipped(), 3);
        assert_eq!(dispatched.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_targets() {
        let abort = no_abort();
        let result = run_batch(Vec::<u32>::new(), 4, false, &abort, None, |_| async move {
            Ok("ok".to_string())
        })
        .await
        .unwrap();
        assert!(result.outcomes.is_empty());
        assert!(result.is_full_success());
    }
}
