//! The `.chart` rhythm game format reader, writer and in-place patcher.
//!
//! A `.chart` file is a sequence of sections, each made of a `[Header]` line and a body delimited by
//! `{` and `}`. Bodies hold either `Key = value` metadata lines or `position = TYPE data` entries
//! describing notes, tempo markers, time signatures, events and special phrases.
//!
//! The [`chart`] module provides:
//!
//! - A section scanner that streams every section body into its own parser, either one after
//!   another or concurrently with one worker per section.
//! - Section parsers producing typed results, governed by configurable policies on duplicates,
//!   overlapping phrases, snapped notes, unknown sections and anchors without tempo.
//! - Serializers rendering typed results back into lines.
//! - A section writer replacing only the sections that changed in an existing file.
//!
//! # Example
//!
//! ```
//! use chart_rs::chart::prelude::*;
//!
//! let source = "[SyncTrack]\n{\n  0 = B 120000\n  0 = TS 4\n}\n";
//! let song = read_song_from_str(source, &ReadConfig::default()).unwrap();
//! let sync_track = song.sync_track.unwrap();
//! assert_eq!(sync_track.tempo.len(), 1);
//! assert_eq!(sync_track.tempo[0].value, 120.0);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chart;
#[cfg(feature = "diagnostics")]
pub mod diagnostics;
