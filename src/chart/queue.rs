//! Single-producer single-consumer queues handing section lines from the scanner to the parsers.
//!
//! The scanner owns the [`QueueWriter`] of every section in flight and the parser of each section
//! owns its [`QueueReader`]. [`QueueReader::pull`] blocks until a line arrives or the writer is
//! gone, so dropping a writer is both the end-of-input signal and the way to force-close a queue
//! on cancellation.

use crossbeam_channel::{Receiver, Sender, TryRecvError};

/// Creates a connected writer and reader.
#[must_use]
pub fn streamed_queue<T>() -> (QueueWriter<T>, QueueReader<T>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (QueueWriter { tx }, QueueReader { rx })
}

/// The producing half of a streamed queue.
#[derive(Debug)]
pub struct QueueWriter<T> {
    tx: Sender<T>,
}

impl<T> QueueWriter<T> {
    /// Appends an item.
    ///
    /// Returns the item back if the reader is gone, which happens when a parser stopped early on
    /// an error.
    pub fn push(&self, item: T) -> Result<(), T> {
        self.tx.send(item).map_err(|err| err.into_inner())
    }

    /// Signals that no more items will be pushed.
    pub fn end(self) {}
}

/// Whether an item could be pulled without waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryPull<T> {
    /// An item was waiting.
    Item(T),
    /// Nothing waits yet but the writer is still alive.
    Pending,
    /// The writer is gone and every item was pulled.
    Ended,
}

/// The consuming half of a streamed queue.
#[derive(Debug)]
pub struct QueueReader<T> {
    rx: Receiver<T>,
}

impl<T> QueueReader<T> {
    /// Pulls the next item, blocking while the queue is empty and the writer is alive.
    ///
    /// Returns `None` once the writer is gone and every item was pulled.
    pub fn pull(&self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Pulls the next item without blocking.
    pub fn try_pull(&self) -> TryPull<T> {
        match self.rx.try_recv() {
            Ok(item) => TryPull::Item(item),
            Err(TryRecvError::Empty) => TryPull::Pending,
            Err(TryRecvError::Disconnected) => TryPull::Ended,
        }
    }

    /// Returns the number of items waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Checks whether no item is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl<T> Iterator for QueueReader<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull()
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn items_arrive_in_order_then_end() {
        let (writer, reader) = streamed_queue();
        for item in 0..5 {
            writer.push(item).unwrap();
        }
        assert_eq!(reader.len(), 5);
        assert_eq!(reader.try_pull(), TryPull::Item(0));
        writer.end();
        assert_eq!(reader.collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn pull_waits_for_the_producer() {
        let (writer, reader) = streamed_queue();
        assert_eq!(reader.try_pull(), TryPull::<&str>::Pending);
        let consumer = thread::spawn(move || reader.collect::<Vec<_>>());
        thread::sleep(Duration::from_millis(10));
        writer.push("a").unwrap();
        writer.push("b").unwrap();
        drop(writer);
        assert_eq!(consumer.join().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn push_fails_without_reader() {
        let (writer, reader) = streamed_queue();
        drop(reader);
        assert_eq!(writer.push(1), Err(1));
    }
}
