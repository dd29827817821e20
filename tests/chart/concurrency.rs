use std::{
    io::{self, BufRead, Cursor, Read},
    thread,
    time::Duration,
};

use chart_rs::chart::prelude::*;
use pretty_assertions::assert_eq;

use crate::generated_chart;

#[test]
fn concurrent_read_matches_blocking_read() {
    let source = generated_chart(2_000);
    let blocking = read_song(source.as_bytes(), &ReadConfig::default()).unwrap();
    let concurrent = read_song_concurrent(
        source.as_bytes(),
        &ReadConfig::default(),
        &CancellationToken::new(),
    )
    .unwrap();
    assert_eq!(
        blocking.instruments.drums.track(Difficulty::Hard).chords.len(),
        2_000
    );
    assert_eq!(concurrent, blocking);
}

#[test]
fn concurrent_errors_match_blocking_errors() {
    let mut source = generated_chart(200);
    source.push_str("[ExpertKeyboard]\n{\n  0 = N 0 0\n  0 = N x 0\n}\n");
    let blocking = read_song(source.as_bytes(), &ReadConfig::default()).unwrap_err();
    let concurrent = read_song_concurrent(
        source.as_bytes(),
        &ReadConfig::default(),
        &CancellationToken::new(),
    )
    .unwrap_err();
    assert_eq!(concurrent.to_string(), blocking.to_string());
}

/// Cancels its token once a given amount of bytes was consumed.
struct CancellingReader {
    inner: Cursor<Vec<u8>>,
    cancel: CancellationToken,
    after: u64,
}

impl Read for CancellingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for CancellingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amount: usize) {
        self.inner.consume(amount);
        if self.inner.position() >= self.after {
            self.cancel.cancel();
        }
    }
}

#[test]
fn cancelled_read_returns_promptly() {
    let source = generated_chart(5_000).into_bytes();
    let cancel = CancellationToken::new();
    let reader = CancellingReader {
        after: source.len() as u64 / 2,
        inner: Cursor::new(source),
        cancel: cancel.clone(),
    };

    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let result = read_song_concurrent(reader, &ReadConfig::default(), &cancel);
        let _ = tx.send(result);
    });
    let result = rx
        .recv_timeout(Duration::from_secs(30))
        .expect("the cancelled read did not return");
    assert!(matches!(result, Err(ReadError::Cancelled)));
}

#[test]
fn cancelled_token_stops_blocking_reads() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = read_components(
        generated_chart(10).as_bytes(),
        &ComponentList::full(),
        &ReadConfig::default(),
        ExecutionMode::Blocking,
        &cancel,
    );
    assert!(matches!(result, Err(ReadError::Cancelled)));
}
