//! Single-instance lock and hand-off through the shared source file

mod common;

use common::config_in;
use envdash_rs::{
    hand_off, unix_now, Acquisition, Channel, Engine, FileSource, InstanceGuard,
    TelemetrySource,
};

#[test]
fn test_second_instance_hands_off_to_first() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    // First instance: acquires the lock and starts consuming the source
    let Acquisition::Acquired(guard) = InstanceGuard::acquire(&config.lock).unwrap() else {
        panic!("first instance must acquire the lock");
    };
    let source = FileSource::new(&config.ingest.source_path);
    source.ensure_exists().unwrap();
    let start = unix_now();
    let mut engine = Engine::new(&config, source, start);
    engine.tick(start);
    assert!(engine.store().is_empty());

    // Second instance: sees the marker and forwards its input
    match InstanceGuard::acquire(&config.lock).unwrap() {
        Acquisition::HandOff { .. } => {
            let source = FileSource::new(&config.ingest.source_path);
            hand_off(&source, Some("10,1,1,1")).unwrap();
        }
        Acquisition::Acquired(_) => panic!("second instance must not acquire the lock"),
    }
    assert_eq!(
        FileSource::new(&config.ingest.source_path)
            .read_payload()
            .unwrap(),
        "10,1,1,1"
    );

    // The first instance picks the reading up on its next tick
    engine.tick(start + 1.0);
    assert_eq!(
        engine.store().latest(Channel::Temperature).map(|s| s.value),
        Some(10.0)
    );

    guard.release().unwrap();
    assert!(!config.lock.lock_path.exists());

    // With the lock gone the next start becomes the active instance
    assert!(matches!(
        InstanceGuard::acquire(&config.lock).unwrap(),
        Acquisition::Acquired(_)
    ));
}

#[test]
fn test_hand_off_rejects_bad_input_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let source = FileSource::new(&config.ingest.source_path);

    assert!(hand_off(&source, Some("1,2")).is_err());
    assert!(!source.path().exists());
}
