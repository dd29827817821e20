//! Tests for `chart_rs::chart`.

mod concurrency;
#[cfg(feature = "serde")]
mod config_serde;
#[cfg(feature = "diagnostics")]
mod diagnostics_test;
mod patch;
mod read;
mod round_trip;
mod write;

use std::fmt::Write as _;

/// Builds a chart with a sync track and a dense track for every difficulty of a few instruments.
pub fn generated_chart(chords_per_track: u32) -> String {
    let mut chart = String::from("[Song]\n{\n  Name = \"Generated\"\n  Resolution = 192\n}\n");
    chart.push_str("[SyncTrack]\n{\n  0 = TS 4\n");
    for bar in 0..chords_per_track / 16 {
        let _ = writeln!(chart, "  {} = B {}", bar * 768, 120_000 + bar);
    }
    chart.push_str("}\n");
    for part in ["Single", "DoubleBass", "Drums"] {
        for difficulty in ["Easy", "Medium", "Hard", "Expert"] {
            let _ = write!(chart, "[{difficulty}{part}]\n{{\n");
            for index in 0..chords_per_track {
                let position = index * 48;
                let _ = writeln!(chart, "  {position} = N {} 0", index % 5);
                if index % 3 == 0 {
                    let _ = writeln!(chart, "  {position} = N {} 24", (index + 2) % 5);
                }
                if index % 64 == 0 {
                    let _ = writeln!(chart, "  {position} = S 2 192");
                }
            }
            chart.push_str("}\n");
        }
    }
    chart
}
