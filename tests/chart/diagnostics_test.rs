use chart_rs::{
    chart::prelude::*,
    diagnostics::{SimpleSource, ToAriadne, emit_read_error},
};

#[test]
fn reports_point_at_the_offending_line() {
    let source = "[Song]\n{\n}\n[SyncTrack]\n{\n  0 = B fast\n}\n";
    let err = read_song_from_str(source, &ReadConfig::default()).unwrap_err();
    let ReadError::Section {
        header,
        line: Some(line),
        ..
    } = &err
    else {
        panic!("expected a section error, found {err:?}");
    };
    assert_eq!(&source[header.span()], "[SyncTrack]");
    assert_eq!(&source[line.span()], "  0 = B fast");

    let simple = SimpleSource::new("notes.chart", source);
    let _report = err.to_report(&simple);
    emit_read_error("notes.chart", source, &err);
}

#[test]
fn every_error_can_be_reported() {
    let sources = ["[Nope]\n{\n}\n", "[Events]\n{\n", "[ExpertSingle]\n{\n  0 = S 2 9\n  1 = S 2 9\n}\n"];
    for source in sources {
        let err = read_song_from_str(source, &ReadConfig::default()).unwrap_err();
        emit_read_error("notes.chart", source, &err);
    }
    emit_read_error("notes.chart", "", &ReadError::Cancelled);
}
