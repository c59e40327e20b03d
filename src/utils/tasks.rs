use anyhow::{Result, anyhow};
use futures::future::join_all;
use tokio::task::JoinHandle;

/// Joins every spawned branch before evaluating any of their results, then
/// surfaces the first error in branch order. A fast failure therefore never
/// hides the outcome of a branch that is still running.
pub async fn join_all_branches<T>(handles: Vec<JoinHandle<Result<T>>>) -> Result<Vec<T>> {
    let outcomes = join_all(handles).await;

    let mut results = Vec::with_capacity(outcomes.len());
    let mut first_error: Option<anyhow::Error> = None;
    for outcome in outcomes {
        match outcome {
            Ok(Ok(value)) => results.push(value),
            Ok(Err(e)) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(anyhow!("Branch panicked: {}", e));
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(results),
    }
}

#[cfg(test)]
mod tests {
    use super::join_all_branches;
    use anyhow::bail;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::time::{Duration, sleep};

    #[tokio::test]
    async fn results_keep_branch_order_regardless_of_finish_order() {
        let slow = tokio::spawn(async {
            sleep(Duration::from_millis(50)).await;
            Ok(1)
        });
        let fast = tokio::spawn(async { Ok(2) });

        let results = join_all_branches(vec![slow, fast]).await.unwrap();
        assert_eq!(results, vec![1, 2]);
    }

    #[tokio::test]
    async fn a_fast_failure_still_waits_for_the_slow_branch() {
        let slow_branch_finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&slow_branch_finished);

        let slow = tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });
        let fast = tokio::spawn(async { bail!("fast branch failed") });

        let error = join_all_branches(vec![slow, fast]).await.unwrap_err();
        assert_eq!(error.to_string(), "fast branch failed");
        assert!(slow_branch_finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn the_first_error_in_branch_order_wins() {
        let first = tokio::spawn(async {
            sleep(Duration::from_millis(30)).await;
            bail!("first branch failed")
        });
        let second = tokio::spawn(async { bail!("second branch failed") });

        let error = join_all_branches::<()>(vec![first, second]).await.unwrap_err();
        assert_eq!(error.to_string(), "first branch failed");
    }

    #[tokio::test]
    async fn a_panicked_branch_becomes_an_error() {
        let panicking = tokio::spawn(async { panic!("boom") });
        let healthy = tokio::spawn(async { Ok(()) });

        let error = join_all_branches::<()>(vec![panicking, healthy])
            .await
            .unwrap_err();
        assert!(error.to_string().contains("panicked"));
    }
}
