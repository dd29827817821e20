use std::time::Duration;

use chart_rs::chart::prelude::*;
use pretty_assertions::assert_eq;

fn expert_guitar(body: &str, config: &ReadConfig) -> Result<Track<StandardLane>, ReadError> {
    let source = format!("[ExpertSingle]\n{{\n{body}\n}}\n");
    let song = read_song_from_str(&source, config)?;
    Ok(song.instruments.lead_guitar.track(Difficulty::Expert).clone())
}

fn section_error(result: Result<impl std::fmt::Debug, ReadError>) -> ParseError {
    match result {
        Err(ReadError::Section { error, .. }) => error,
        other => panic!("expected a section error, found {other:?}"),
    }
}

#[test]
fn tempo_and_anchor_merge_regardless_of_order() {
    let expected = vec![Tempo::new(0, 120.0).with_anchor(Duration::from_millis(500))];
    for body in ["  0 B 120000\n  0 A 500000", "  0 A 500000\n  0 B 120000"] {
        let source = format!("[SyncTrack]\n{{\n{body}\n}}");
        let sync_track = read_sync_track(source.as_bytes(), &ReadConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(sync_track.tempo, expected);
    }
}

#[test]
fn notes_at_one_position_form_a_chord() {
    let track = expert_guitar("0 N 0 0\n0 N 1 0\n192 N 2 0", &ReadConfig::default()).unwrap();
    assert_eq!(
        track.chords,
        vec![
            Chord::with_notes(
                0,
                [
                    Note::new(StandardLane::Green, 0),
                    Note::new(StandardLane::Red, 0)
                ]
            ),
            Chord::with_notes(192, [Note::new(StandardLane::Yellow, 0)]),
        ]
    );
}

#[test]
fn misplaced_notes_are_sorted_in() {
    let track = expert_guitar(
        "  192 = N 0 0\n  0 = N 1 0\n  192 = N 2 0",
        &ReadConfig::default(),
    )
    .unwrap();
    let positions: Vec<_> = track.chords.iter().map(|chord| chord.position).collect();
    assert_eq!(positions, vec![0, 192]);
    assert!(track.chords[1].contains_lane(StandardLane::Green));
    assert!(track.chords[1].contains_lane(StandardLane::Yellow));
    assert_eq!(track.chords[0].notes().len(), 1);
}

#[test]
fn open_notes_are_exclusive_on_frets_only() {
    let track = expert_guitar("  0 = N 0 0\n  0 = N 7 0", &ReadConfig::default()).unwrap();
    assert_eq!(track.chords[0].notes(), [Note::new(StandardLane::Open, 0)]);
    let track = expert_guitar(
        "  0 = N 0 0\n  0 = N 7 0\n  0 = N 1 0",
        &ReadConfig::default(),
    )
    .unwrap();
    assert_eq!(track.chords[0].notes(), [Note::new(StandardLane::Red, 0)]);

    let song = read_song_from_str(
        "[ExpertDrums]\n{\n  0 = N 0 0\n  0 = N 32 0\n  0 = N 1 0\n}\n",
        &ReadConfig::default(),
    )
    .unwrap();
    assert_eq!(
        song.instruments.drums.track(Difficulty::Expert).chords[0]
            .notes()
            .len(),
        3
    );
}

#[test]
fn duplicate_notes_follow_the_policy() {
    let body = "  0 = N 0 10\n  0 = N 0 20";
    assert_eq!(
        section_error(expert_guitar(body, &ReadConfig::default())),
        ParseError::Duplicate {
            kind: DuplicateKind::Note,
            position: 0
        }
    );

    let first = expert_guitar(
        body,
        &ReadConfig::default().with_duplicate_policy(DuplicatePolicy::IncludeFirst),
    )
    .unwrap();
    assert_eq!(first.chords[0].notes(), [Note::new(StandardLane::Green, 10)]);

    let all = expert_guitar(
        body,
        &ReadConfig::default().with_duplicate_policy(DuplicatePolicy::IncludeAll),
    )
    .unwrap();
    assert_eq!(all.chords[0].notes(), [Note::new(StandardLane::Green, 20)]);
}

#[test]
fn duplicate_metadata_keys_follow_the_policy() {
    let source = "[Song]\n{\n  Name = \"first\"\n  Name = \"second\"\n}\n";
    assert_eq!(
        section_error(read_metadata(source.as_bytes(), &ReadConfig::default())),
        ParseError::DuplicateKey {
            key: "Name".into()
        }
    );
    let metadata = read_metadata(source.as_bytes(), &ReadConfig::lenient())
        .unwrap()
        .unwrap();
    assert_eq!(metadata.title.as_deref(), Some("first"));
}

#[test]
fn overlapping_phrases_follow_the_policy() {
    let body = "  0 = S 2 200\n  100 = S 2 50";
    assert_eq!(
        section_error(expert_guitar(body, &ReadConfig::default())),
        ParseError::OverlappingPhrases { position: 100 }
    );
    let track = expert_guitar(
        body,
        &ReadConfig::default().with_overlapping_phrase_policy(OverlappingPhrasePolicy::Cut),
    )
    .unwrap();
    assert_eq!(
        track.special_phrases,
        vec![
            Phrase::new(0, 100, PhraseKind::StarPowerGain),
            Phrase::new(100, 50, PhraseKind::StarPowerGain),
        ]
    );
}

#[test]
fn snapped_notes_follow_the_policy() {
    let body = "  0 = N 0 0\n  2 = N 1 0";
    let snapping = |policy| ReadConfig::default().with_snapped_notes_policy(policy, 4);

    assert_eq!(
        section_error(expert_guitar(body, &snapping(SnappedNotesPolicy::Throw))),
        ParseError::SnappedNote {
            origin: 0,
            position: 2
        }
    );
    let snapped = expert_guitar(body, &snapping(SnappedNotesPolicy::Snap)).unwrap();
    assert_eq!(snapped.chords.len(), 1);
    assert_eq!(snapped.chords[0].notes().len(), 2);
    let kept = expert_guitar(body, &snapping(SnappedNotesPolicy::Ignore)).unwrap();
    assert_eq!(kept.chords.len(), 2);
    // Snapping is disabled by default.
    assert_eq!(
        expert_guitar(body, &ReadConfig::default())
            .unwrap()
            .chords
            .len(),
        2
    );
}

#[test]
fn tempoless_anchors_follow_the_policy() {
    let source = "[SyncTrack]\n{\n  0 = B 120000\n  768 = A 1000000\n}\n";
    let read = |policy| {
        read_sync_track(
            source.as_bytes(),
            &ReadConfig::default().with_tempoless_anchor_policy(policy),
        )
    };

    assert_eq!(
        section_error(read(TempolessAnchorPolicy::Throw)),
        ParseError::TempolessAnchor { position: 768 }
    );
    assert_eq!(
        read(TempolessAnchorPolicy::Ignore).unwrap().unwrap().tempo,
        vec![Tempo::new(0, 120.0)]
    );
    assert_eq!(
        read(TempolessAnchorPolicy::Create).unwrap().unwrap().tempo,
        vec![
            Tempo::new(0, 120.0),
            Tempo::new(768, 120.0).with_anchor(Duration::from_secs(1)),
        ]
    );
}

#[test]
fn solo_events_become_star_power() {
    let body = "  0 = N 0 0\n  0 = E solo\n  384 = E soloend";
    let track = expert_guitar(body, &ReadConfig::default()).unwrap();
    assert_eq!(
        track.special_phrases,
        vec![Phrase::new(0, 384, PhraseKind::StarPowerGain)]
    );
    assert!(track.local_events.is_empty());

    let track = expert_guitar(
        body,
        &ReadConfig::default().with_solo_no_star_power_policy(SoloNoStarPowerPolicy::Ignore),
    )
    .unwrap();
    assert!(track.special_phrases.is_empty());
    assert_eq!(track.local_events.len(), 2);
}

#[test]
fn whole_file() {
    let source = include_str!("files/sample.chart");
    assert!(matches!(
        read_song_from_str(source, &ReadConfig::default()),
        Err(ReadError::UnknownSection { .. })
    ));

    let song = read_song_from_str(source, &ReadConfig::lenient()).unwrap();
    let metadata = song.metadata.as_ref().unwrap();
    assert_eq!(metadata.title.as_deref(), Some("Test Song"));
    assert_eq!(metadata.year, Some(2021));
    assert_eq!(metadata.resolution, Some(192));
    assert_eq!(metadata.streams.get("MusicStream").map(String::as_str), Some("song.ogg"));

    let sync_track = song.sync_track.as_ref().unwrap();
    assert_eq!(sync_track.tempo.len(), 2);
    assert_eq!(
        sync_track.time_signatures,
        vec![TimeSignature::new(0, 4, 4), TimeSignature::new(768, 6, 8)]
    );
    assert_eq!(
        song.global_events.as_deref(),
        Some(
            [
                Event::new(0, "section Intro"),
                Event::new(768, "lyric hello")
            ]
            .as_slice()
        )
    );

    let guitar = song.instruments.lead_guitar.track(Difficulty::Expert);
    assert_eq!(guitar.chords.len(), 4);
    assert_eq!(
        guitar.chord_at(384).unwrap().notes(),
        [Note::new(StandardLane::Red, 0)]
    );
    assert_eq!(
        guitar.chord_at(576).unwrap().modifiers,
        StandardModifiers::HOPO_INVERT
    );
    // Solo events stay events since the track has a phrase.
    assert_eq!(guitar.local_events.len(), 2);
    assert!(song.instruments.lead_guitar.track(Difficulty::Hard).is_empty());

    let drums = song.instruments.drums.track(Difficulty::Expert);
    assert_eq!(drums.chords[0].modifiers, DrumsModifiers::RED_ACCENT);
    assert_eq!(drums.chords[1].modifiers, DrumsModifiers::YELLOW_CYMBAL);

    assert_eq!(
        song.unknown_sections.get("[Custom]").unwrap().lines,
        vec!["whatever text here"]
    );
}

#[test]
fn selected_tracks_only() {
    let source = include_str!("files/sample.chart");
    let mut selected = InstrumentComponentList::default();
    selected.insert(InstrumentIdentity::Drums, Difficulty::Expert);
    let instruments = read_instruments(source.as_bytes(), &selected, &ReadConfig::default()).unwrap();
    assert_eq!(instruments.drums.track(Difficulty::Expert).chords.len(), 2);
    assert!(instruments.lead_guitar.is_empty());
}
