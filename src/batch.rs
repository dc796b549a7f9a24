//! Bounded-parallelism batch runner.
//!
//! Units are grouped into fixed-size batches; everything in a batch starts
//! concurrently and the next batch only starts once the whole batch has
//! resolved, failed units included. This caps concurrently open
//! subprocesses and file handles at the batch size with no unbounded
//! fan-out, whatever the cache size.

use futures::future;
use std::future::Future;

/// Default batch width, matching the cap the tool has always used.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Run `f` over every item, at most `batch_size` units in flight at a time.
/// Results come back in item order.
pub async fn run_batched<T, F, Fut, R>(items: Vec<T>, batch_size: usize, f: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let batch_size = batch_size.max(1);
    let mut results = Vec::with_capacity(items.len());
    let mut iter = items.into_iter();

    loop {
        let batch: Vec<T> = iter.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }
        results.extend(future::join_all(batch.into_iter().map(&f)).await);
    }

    results
}
