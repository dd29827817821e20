use chart_rs::chart::prelude::*;
use pretty_assertions::assert_eq;

fn song_with_guitar(track: Track<StandardLane>) -> Song {
    let mut song = Song::default();
    song.instruments.lead_guitar.set_track(Difficulty::Expert, track);
    song
}

fn write(song: &Song, config: &WriteConfig) -> Result<String, WriteError> {
    let mut out = vec![];
    write_song(&mut out, song, config)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn blank_song_writes_nothing() {
    assert_eq!(write(&Song::default(), &WriteConfig::default()).unwrap(), "");
}

#[test]
fn unsupported_modifiers_abort_the_write() {
    let mut chord = Chord::with_notes(0, [Note::new(StandardLane::Green, 0)]);
    chord.modifiers = StandardModifiers::FORCED_HOPO;
    let song = song_with_guitar(Track {
        chords: vec![chord],
        ..Track::default()
    });
    assert!(matches!(
        write(&song, &WriteConfig::default()),
        Err(WriteError::UnsupportedModifier { position: 0 })
    ));

    // Forcing a HOPO on a chord that is not a natural one inverts it.
    let text = write(
        &song,
        &WriteConfig::default().with_unsupported_modifier_policy(UnsupportedModifierPolicy::Convert),
    )
    .unwrap();
    assert_eq!(text, "[ExpertSingle]\n{\n  0 = N 0 0\n  0 = N 5 0\n}\n");

    let text = write(
        &song,
        &WriteConfig::default()
            .with_unsupported_modifier_policy(UnsupportedModifierPolicy::IgnoreChord),
    )
    .unwrap();
    assert_eq!(text, "[ExpertSingle]\n{\n}\n");
}

#[test]
fn duplicate_tempo_markers_abort_the_write() {
    let song = Song {
        sync_track: Some(SyncTrack {
            tempo: vec![Tempo::new(0, 120.0), Tempo::new(0, 140.0)],
            time_signatures: vec![],
        }),
        ..Song::default()
    };
    assert!(matches!(
        write(&song, &WriteConfig::default()),
        Err(WriteError::Duplicate {
            kind: DuplicateKind::TempoMarker,
            position: 0
        })
    ));
    assert_eq!(
        write(
            &song,
            &WriteConfig::default().with_duplicate_policy(DuplicatePolicy::IncludeAll)
        )
        .unwrap(),
        "[SyncTrack]\n{\n  0 = B 120000\n  0 = B 140000\n}\n"
    );
}

#[test]
fn stored_sections_are_written_last() {
    let mut song = Song {
        global_events: Some(vec![Event::new(0, "section Verse 1")]),
        ..Song::default()
    };
    let mut section = Section::new("[Vocals]");
    section.lines.push("0 = E \"lyric la\"".into());
    song.unknown_sections.insert(section).unwrap();
    assert_eq!(
        write(&song, &WriteConfig::default()).unwrap(),
        "[Events]\n{\n  0 = E \"section Verse 1\"\n}\n[Vocals]\n{\n  0 = E \"lyric la\"\n}\n"
    );
}
