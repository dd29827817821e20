use std::io::Cursor;

use chart_rs::chart::prelude::*;
use pretty_assertions::assert_eq;

const EXISTING: &str = "[Song]\r\n{\r\n  Name = \"Kept\"\r\n  Custom = yes\r\n}\r\n\
[SyncTrack]\n{\n  0 = B 120000\n}\n\
[Mystery]\n{\n\tdo not touch  \n}\n\
[ExpertSingle]\n{\n  0 = N 0 0\n}\n\
[EasySingle]\n{\n  0 = N 0 0\n}\n";

#[test]
fn rewriting_one_section_keeps_the_others() {
    let mut dest = Cursor::new(EXISTING.as_bytes().to_vec());
    let sync_track = SyncTrack {
        tempo: vec![Tempo::new(0, 90.0)],
        time_signatures: vec![TimeSignature::new(0, 3, 4)],
    };
    replace_sync_track(&mut dest, &sync_track, &WriteConfig::default()).unwrap();

    let expected = EXISTING.replace(
        "[SyncTrack]\n{\n  0 = B 120000\n}\n",
        "[SyncTrack]\n{\n  0 = TS 3\n  0 = B 90000\n}\n",
    );
    assert_eq!(String::from_utf8(dest.into_inner()).unwrap(), expected);
}

#[test]
fn missing_sections_are_appended() {
    let mut dest = Cursor::new(EXISTING.as_bytes().to_vec());
    replace_global_events(
        &mut dest,
        &[Event::new(0, "section Intro")],
        &WriteConfig::default(),
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(dest.into_inner()).unwrap(),
        format!("{EXISTING}[Events]\n{{\n  0 = E \"section Intro\"\n}}\n")
    );
}

#[test]
fn selected_empty_tracks_are_removed() {
    let mut dest = Cursor::new(EXISTING.as_bytes().to_vec());
    let mut instruments = InstrumentSet::default();
    instruments.lead_guitar.set_track(
        Difficulty::Expert,
        Track {
            chords: vec![Chord::with_notes(0, [Note::new(StandardLane::Orange, 48)])],
            ..Track::default()
        },
    );
    let mut selected = InstrumentComponentList::default();
    selected.insert_instrument(InstrumentIdentity::LeadGuitar);

    let written = replace_instruments(
        &mut dest,
        &instruments,
        &selected,
        Some(192),
        &WriteConfig::default(),
    )
    .unwrap();
    let text = String::from_utf8(dest.into_inner()).unwrap();
    assert_eq!(written, text.len() as u64);
    assert_eq!(
        text,
        EXISTING
            .replace("[ExpertSingle]\n{\n  0 = N 0 0\n}\n", "[ExpertSingle]\n{\n  0 = N 4 48\n}\n")
            .replace("[EasySingle]\n{\n  0 = N 0 0\n}\n", "")
    );
}

#[test]
fn patched_song_reads_back() {
    let mut dest = Cursor::new(EXISTING.as_bytes().to_vec());
    let mut song = read_song_from_str(EXISTING, &ReadConfig::lenient()).unwrap();
    song.metadata.as_mut().unwrap().artist = Some("Added".into());
    assert!(song.unknown_sections.remove("[Mystery]").is_some());

    replace_components(
        &mut dest,
        &song,
        &ComponentList::global(),
        &WriteConfig::default(),
    )
    .unwrap();
    let text = String::from_utf8(dest.into_inner()).unwrap();
    assert!(text.starts_with(
        "[Song]\n{\n  Name = \"Kept\"\n  Artist = \"Added\"\n  Custom = yes\n}\n[SyncTrack]"
    ));
    // Unknown sections were not selected, so the stored removal does not apply.
    assert!(text.contains("[Mystery]\n{\n\tdo not touch  \n}\n"));
    assert_eq!(
        read_song_from_str(&text, &ReadConfig::lenient())
            .unwrap()
            .metadata,
        song.metadata
    );
}
