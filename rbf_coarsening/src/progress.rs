/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines progress reporting messages, sinks, and helper functions for basis selection.
//
// Created on: 15 Nov 2025     Author: Daniel Owen
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Progress reporting primitives for coarsening sessions.

use std::fmt::Debug;
use std::sync::{mpsc, Arc};
use std::thread;

/// Progress events emitted while a coarse basis is selected and used.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMsg {
    /// One greedy step: error of the basis of `basis_size` points.
    SelectionIteration { iter: usize, basis_size: usize, error: f64 },

    /// The greedy selection reached the tolerance.
    BasisSelected { basis_size: usize, error: f64, iterations: usize },

    /// The greedy selection stopped at `max_points` above the tolerance.
    AccuracyNotMet { basis_size: usize, error: f64, tolerance: f64 },

    /// The selection ran out of candidates: every remaining source point
    /// coincides with a selected one.
    DuplicatesSkipped { num_duplicates: usize },

    /// An existing basis was discarded because its error on new values
    /// exceeded the reselection tolerance.
    Reselection { error: f64, reselection_tolerance: f64, count: usize },

    /// Arbitrary informational message.
    Message { message: String },
}

/// Sink that consumes progress messages.
pub trait ProgressSink: Send + Sync + Debug {
    fn emit(&self, msg: ProgressMsg);
}

/// Progress sink that forwards messages over a channel.
#[derive(Debug)]
pub struct ClosureSink {
    tx: mpsc::SyncSender<ProgressMsg>,
}

impl ProgressSink for ClosureSink {
    #[inline]
    fn emit(&self, msg: ProgressMsg) {
        let _ = self.tx.try_send(msg);
    }
}

/// Spawns a listener thread that runs a handler closure for each progress message.
///
/// Messages are dropped if the buffer is full. The listener exits once every
/// clone of the returned sink has been dropped.
pub fn closure_sink<F>(
    buffer: usize,
    mut handler: F,
) -> (Arc<dyn ProgressSink>, thread::JoinHandle<()>)
where
    F: FnMut(ProgressMsg) + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel::<ProgressMsg>(buffer.max(1));
    let sink: Arc<dyn ProgressSink> = Arc::new(ClosureSink { tx });

    let handle = thread::spawn(move || {
        while let Ok(msg) = rx.recv() {
            handler(msg);
        }
    });

    (sink, handle)
}

/// Emits `msg` if a sink is attached.
#[inline]
pub(crate) fn emit(sink: Option<&Arc<dyn ProgressSink>>, msg: ProgressMsg) {
    if let Some(sink) = sink {
        sink.emit(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;
    use std::sync::Mutex;

    #[test]
    fn closure_sink_delivers_messages_in_order() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = Arc::clone(&received);

        let (sink, handle) = closure_sink(16, move |msg| {
            received_clone.lock().unwrap().push(msg);
        });

        sink.emit(ProgressMsg::Message { message: "first".into() });
        emit(
            Some(&sink),
            ProgressMsg::SelectionIteration { iter: 1, basis_size: 2, error: 0.5 },
        );
        emit(None, ProgressMsg::Message { message: "dropped".into() });

        drop(sink);
        handle.join().unwrap();

        let received = received.lock().unwrap();
        assert!(received.len() == 2);
        assert!(received[0] == ProgressMsg::Message { message: "first".into() });
    }
}
