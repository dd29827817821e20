use chart_rs::chart::prelude::*;
use pretty_assertions::assert_eq;

fn write_config() -> WriteConfig {
    WriteConfig::default().with_unsupported_modifier_policy(UnsupportedModifierPolicy::Convert)
}

#[test]
fn written_song_reads_back_equal() {
    let source = include_str!("files/sample.chart");
    let song = read_song_from_str(source, &ReadConfig::lenient()).unwrap();

    let mut out = vec![];
    let written = write_song(&mut out, &song, &write_config()).unwrap();
    assert_eq!(written, out.len() as u64);
    let text = String::from_utf8(out).unwrap();

    // The open note is cleared by the red note after it and never written back.
    assert_eq!(text, source.replace("  384 = N 7 0\n", ""));
    assert_eq!(read_song_from_str(&text, &ReadConfig::lenient()).unwrap(), song);
}

#[test]
fn crlf_output_reads_back_equal() {
    let source = include_str!("files/sample.chart");
    let song = read_song_from_str(source, &ReadConfig::lenient()).unwrap();

    let mut out = vec![];
    write_song(
        &mut out,
        &song,
        &write_config().with_line_ending(LineEnding::CrLf),
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("[Song]\r\n{\r\n  Name = \"Test Song\"\r\n"));
    assert!(!text.replace("\r\n", "").contains('\n'));
    assert_eq!(read_song_from_str(&text, &ReadConfig::lenient()).unwrap(), song);
}

#[test]
fn songs_built_in_code_round_trip() {
    let mut song = Song {
        metadata: Some(Metadata {
            title: Some("Built".into()),
            resolution: Some(480),
            ..Metadata::default()
        }),
        sync_track: Some(SyncTrack {
            tempo: vec![Tempo::new(0, 150.5)],
            time_signatures: vec![TimeSignature::new(0, 7, 8)],
        }),
        ..Song::default()
    };
    let mut chord = Chord::with_notes(
        0,
        [
            Note::new(GhlLane::Black3, 120),
            Note::new(GhlLane::White1, 120),
        ],
    );
    chord.modifiers = GhlModifiers::TAP;
    song.instruments
        .set_track(
            InstrumentIdentity::GhlGuitar,
            Difficulty::Hard,
            Track {
                chords: vec![chord],
                special_phrases: vec![Phrase::new(0, 480, PhraseKind::StarPowerGain)],
                ..Track::default()
            }
            .into(),
        )
        .unwrap();

    let mut out = vec![];
    write_song(&mut out, &song, &WriteConfig::default()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("[HardGHLGuitar]\n{\n  0 = N 8 120\n  0 = N 0 120\n  0 = N 6 0\n"));
    assert_eq!(read_song_from_str(&text, &ReadConfig::default()).unwrap(), song);
}

#[test]
fn drum_accents_stay_on_their_pads() {
    let two_accents = "[ExpertDrums]\n{\n  0 = N 1 0\n  0 = N 2 0\n  0 = N 34 0\n  0 = N 35 0\n}\n";
    let song = read_song_from_str(two_accents, &ReadConfig::default()).unwrap();
    assert_eq!(
        song.instruments.drums.track(Difficulty::Expert).chords[0].modifiers,
        DrumsModifiers::RED_ACCENT | DrumsModifiers::YELLOW_ACCENT
    );
    let mut out = vec![];
    write_song(&mut out, &song, &write_config()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("{\n  0 = N 1 0\n  0 = N 2 0\n  0 = N 34 0\n  0 = N 35 0\n}"));

    let partial = "[ExpertDrums]\n{\n  0 = N 1 0\n  0 = N 2 0\n  0 = N 34 0\n  0 = N 41 0\n}\n";
    let song = read_song_from_str(partial, &ReadConfig::default()).unwrap();
    let mut out = vec![];
    write_song(&mut out, &song, &write_config()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("{\n  0 = N 1 0\n  0 = N 2 0\n  0 = N 34 0\n  0 = N 41 0\n}"));
    assert!(!text.contains("N 35"));
    assert_eq!(read_song_from_str(&text, &ReadConfig::default()).unwrap(), song);
}
