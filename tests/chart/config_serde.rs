use chart_rs::chart::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn partial_configs_fill_in_defaults() {
    let config: ReadConfig = serde_json::from_str(
        r#"{ "duplicate_policy": "IncludeFirst", "snapped_notes_policy": "Snap", "snap_distance": 4 }"#,
    )
    .unwrap();
    assert_eq!(
        config,
        ReadConfig::default()
            .with_duplicate_policy(DuplicatePolicy::IncludeFirst)
            .with_snapped_notes_policy(SnappedNotesPolicy::Snap, 4)
    );

    let config: WriteConfig =
        serde_json::from_str(r#"{ "line_ending": "CrLf", "hopo_threshold": 65 }"#).unwrap();
    assert_eq!(
        config,
        WriteConfig::default()
            .with_line_ending(LineEnding::CrLf)
            .with_hopo_threshold(65)
    );
}

#[test]
fn songs_serialize() {
    let song = read_song_from_str(
        include_str!("files/sample.chart"),
        &ReadConfig::lenient(),
    )
    .unwrap();
    let json = serde_json::to_string(&song).unwrap();
    let back: Song = serde_json::from_str(&json).unwrap();
    assert_eq!(back, song);
}
