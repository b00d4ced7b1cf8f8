//! End-to-end session flow against a real database file.

use discipline_core::{
    AppSession, Command, Config, Database, Event, CHECKIN_INTERVAL_SECS,
};

fn tick(session: &mut AppSession) -> Vec<Event> {
    session.handle(Command::Tick).unwrap()
}

#[test]
fn two_checkins_with_a_pause_in_between() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("discipline.db");
    let db = Database::open_at(&db_path).unwrap();
    let mut session = AppSession::new(db, &Config::default());

    session.handle(Command::SetTarget(3)).unwrap();
    session.handle(Command::SetFocus("Thesis".into())).unwrap();
    session.handle(Command::Toggle).unwrap();

    // First 15 minutes, answered yes.
    let mut due = Vec::new();
    for _ in 0..CHECKIN_INTERVAL_SECS {
        due.extend(tick(&mut session));
    }
    assert!(matches!(&due[..], [Event::CheckinDue { .. }]));
    session
        .handle(Command::AnswerYes(Some("on track".into())))
        .unwrap();

    // Pause halfway through the next block, then resume.
    for _ in 0..400 {
        tick(&mut session);
    }
    session.handle(Command::Toggle).unwrap();
    session.handle(Command::Toggle).unwrap();
    assert_eq!(
        session.timer().elapsed_seconds(),
        CHECKIN_INTERVAL_SECS + 400
    );

    // Finish the second block, answered no.
    let mut due = Vec::new();
    for _ in 0..500 {
        due.extend(tick(&mut session));
    }
    assert!(matches!(&due[..], [Event::CheckinDue { .. }]));
    session.handle(Command::AnswerNo(None)).unwrap();

    session.handle(Command::Toggle).unwrap();
    drop(session);

    // Entries survive reopening the file, in order.
    let db = Database::open_at(&db_path).unwrap();
    let entries = db.entries(None).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].id < entries[1].id);
    assert!(entries[0].timestamp <= entries[1].timestamp);
    assert_eq!(entries[0].activity, "answer: yes - note: on track");
    assert_eq!(entries[0].productivity_score, 1);
    assert_eq!(entries[1].activity, "answer: no");
    assert_eq!(entries[1].productivity_score, 0);

    let stats = db.stats().unwrap();
    assert_eq!(stats.total_checkins, 2);
    assert_eq!(stats.productive_checkins, 1);
}
