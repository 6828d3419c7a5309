//! Channel-based streaming with one page of prefetch
//!
//! The producer task fetches page N+1 while the consumer drains page N from
//! a bounded channel, so at most one fetch is in flight ahead of
//! consumption. Termination is the channel closing; there is no sentinel
//! value in the payload type. Backpressure is the bounded channel itself:
//! a slow consumer suspends the producer on `send`.
//!
//! A dropped receiver makes `send` fail, which stops the producer before it
//! issues any further fetch; the single prefetch already in flight runs to
//! completion and is discarded.
//!
//! Because the payload carries records only, a fetch failure closes the
//! channel the same way exhaustion does. [`RecordStream::finish`] separates
//! the two: it reports the producer's final outcome after the channel is
//! drained.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use rolodex_core::{Error, Result};

/// A live stream of records plus the producer's final outcome
///
/// [`RecordStream::recv`] drains the bounded channel; once it yields `None`
/// the stream is over, and [`RecordStream::finish`] tells truncation apart
/// from normal exhaustion.
#[derive(Debug)]
pub struct RecordStream<T> {
    receiver: mpsc::Receiver<T>,
    outcome: JoinHandle<Result<()>>,
}

impl<T> RecordStream<T> {
    /// Receive the next record, `None` once the channel closes
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Wait for the producer and report how the stream ended
    ///
    /// `Ok(())` means the traversal ran to exhaustion (or the consumer
    /// stopped it by closing the channel); an error is the fetch failure
    /// that truncated the stream. Closes the channel first, so calling this
    /// before draining simply abandons the remaining records.
    pub async fn finish(mut self) -> Result<()> {
        self.receiver.close();
        self.outcome
            .await
            .map_err(|e| Error::Storage(format!("stream producer task failed: {e}")))?
    }
}

/// Spawn a page-at-a-time fill loop into a bounded channel
///
/// `spawn_fetch` turns a position of type `C` into an in-flight fetch
/// producing a batch of records plus the next position, or `None` at
/// exhaustion. This is generic over the position type so both the two-phase
/// group traversal (cursor positions) and plain table listings (scan
/// continuations) stream through the same loop.
///
/// Must be called within a tokio runtime. Errors inside the producer close
/// the channel early after a warning log and surface again through
/// [`RecordStream::finish`]; pre-flight errors belong to the caller, before
/// it builds the fetch closure.
pub fn spawn_fill<T, C, F>(capacity: usize, start: C, spawn_fetch: F) -> RecordStream<T>
where
    T: Send + 'static,
    C: Send + 'static,
    F: FnMut(C) -> JoinHandle<Result<(Vec<T>, Option<C>)>> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let outcome = tokio::spawn(async move {
        let result = fill(start, spawn_fetch, tx).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "stream fill aborted");
        }
        result
    });
    RecordStream {
        receiver: rx,
        outcome,
    }
}

async fn fill<T, C, F>(start: C, mut spawn_fetch: F, tx: mpsc::Sender<T>) -> Result<()>
where
    F: FnMut(C) -> JoinHandle<Result<(Vec<T>, Option<C>)>>,
{
    let mut pending = Some(spawn_fetch(start));
    while let Some(in_flight) = pending.take() {
        let (records, next) = in_flight
            .await
            .map_err(|e| Error::Storage(format!("stream fetch task failed: {e}")))??;

        // Kick off the next fetch before handing this batch to the consumer.
        if let Some(position) = next {
            pending = Some(spawn_fetch(position));
        }

        for record in records {
            if tx.send(record).await.is_err() {
                // Consumer stopped draining; issue no further fetches.
                return Ok(());
            }
        }
    }
    Ok(())
}
