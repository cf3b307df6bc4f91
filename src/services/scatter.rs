//! Bounded scatter-gather over independent units of work.
//!
//! Every unit is polled on the calling task; an optional semaphore caps how
//! many are past their permit at once. Results carry the submission index so
//! callers can attribute them regardless of completion order.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct Gathered<R> {
    /// `(submission index, result)` in completion order
    pub completed: Vec<(usize, R)>,
    pub submitted: usize,
    /// True when the token fired before every unit reported
    pub cancelled: bool,
}

impl<R> Gathered<R> {
    /// Completed results sorted by submission index
    pub fn into_ordered(mut self) -> Vec<(usize, R)> {
        self.completed.sort_by_key(|(index, _)| *index);
        self.completed
    }
}

/// Run `work` for every item, at most `max_in_flight` at a time (`None` for
/// unbounded), until all report or `cancel` fires. On cancellation the
/// unfinished units are dropped and whatever completed is returned.
pub async fn scatter_gather<I, R, F, Fut>(
    items: I,
    max_in_flight: Option<usize>,
    cancel: &CancellationToken,
    mut work: F,
) -> Gathered<R>
where
    I: IntoIterator,
    F: FnMut(usize, I::Item) -> Fut,
    Fut: Future<Output = R>,
{
    let semaphore = max_in_flight.map(|n| Arc::new(Semaphore::new(n.max(1))));

    let mut pending = FuturesUnordered::new();
    for (index, item) in items.into_iter().enumerate() {
        let unit = work(index, item);
        let semaphore = semaphore.clone();
        pending.push(async move {
            // The semaphore is never closed, so acquire cannot fail
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            (index, unit.await)
        });
    }

    let submitted = pending.len();
    let mut completed = Vec::with_capacity(submitted);
    let mut cancelled = false;

    while !pending.is_empty() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                cancelled = true;
                break;
            }
            next = pending.next() => match next {
                Some(result) => completed.push(result),
                None => break,
            },
        }
    }

    if cancelled {
        tracing::debug!(
            completed = completed.len(),
            submitted,
            "Scatter-gather cancelled: {}/{} units reported",
            completed.len(),
            submitted
        );
    }

    Gathered {
        completed,
        submitted,
        cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn respects_in_flight_cap() {
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let cancel = CancellationToken::new();

        let gathered = scatter_gather(0..8, Some(3), &cancel, |_, n| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                n * 10
            }
        })
        .await;

        assert!(!gathered.cancelled);
        assert_eq!(gathered.submitted, 8);
        assert_eq!(peak.load(Ordering::SeqCst), 3);

        let ordered = gathered.into_ordered();
        let values: Vec<i32> = ordered.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![0, 10, 20, 30, 40, 50, 60, 70]);
    }

    #[tokio::test]
    async fn attributes_by_index_not_arrival() {
        let cancel = CancellationToken::new();
        // Later submissions finish first
        let gathered = scatter_gather(vec![30u64, 20, 10], None, &cancel, |index, delay| async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            index
        })
        .await;

        let arrival: Vec<usize> = gathered.completed.iter().map(|(i, _)| *i).collect();
        assert_eq!(arrival, vec![2, 1, 0]);
        for (index, value) in gathered.into_ordered() {
            assert_eq!(index, value);
        }
    }

    #[tokio::test]
    async fn cancellation_returns_completed_units() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(60)).await;
            trigger.cancel();
        });

        let gathered = scatter_gather(vec![5u64, 10, 10_000], Some(5), &cancel, |_, delay| async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            delay
        })
        .await;

        assert!(gathered.cancelled);
        assert_eq!(gathered.submitted, 3);
        let mut done: Vec<u64> = gathered.completed.into_iter().map(|(_, d)| d).collect();
        done.sort();
        assert_eq!(done, vec![5, 10]);
    }

    #[tokio::test]
    async fn empty_input() {
        let cancel = CancellationToken::new();
        let gathered = scatter_gather(Vec::<u8>::new(), Some(2), &cancel, |_, v| async move { v }).await;
        assert_eq!(gathered.submitted, 0);
        assert!(gathered.completed.is_empty());
        assert!(!gathered.cancelled);
    }
}
