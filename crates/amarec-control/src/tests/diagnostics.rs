use crate::diagnostics::Snapshot;

use amarec_control_core::{
    Clock, ControllerSettings, DESTINATION_DIR_VAR, Environment, FileLockState, Labels,
    LockProbe, RecordingDetector, STAGE_VAR, WindowTitles,
};

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

struct Titles(Vec<&'static str>);

impl WindowTitles for Titles {
    fn visible_titles(&self) -> Vec<String> {
        self.0.iter().map(|t| t.to_string()).collect()
    }
}

struct Held;

impl LockProbe for Held {
    fn probe(&self, _path: &Path) -> FileLockState {
        FileLockState::Locked
    }
}

struct Noon;

impl Clock for Noon {
    #[allow(clippy::unwrap_used)]
    fn now(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 8, 1)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap()
    }
}

/// WHAT: Snapshot captures every input the controller decides on
/// WHY: The diagnostics log is the only output of a GUI-subsystem build
#[test]
fn given_recording_desktop_when_capturing_snapshot_then_all_fields_populated() {
    // Given: A recorder window among others, locked output, labels set
    let detector = RecordingDetector::new(
        Box::new(Titles(vec!["IkaLog", "AmaRecTV: capture.avi"])),
        Box::new(Held),
        "videos",
    );
    let env = Environment {
        destination_dir: PathBuf::from("videos"),
        labels: Labels {
            stage: "Stage1".to_string(),
            rule: "Rule1".to_string(),
            won: "win".to_string(),
        },
    };
    let settings = ControllerSettings {
        labels: env.labels.clone(),
        ..ControllerSettings::default()
    };

    // When: Capturing with a partial environment
    let snapshot = Snapshot::capture(
        vec!["amarec-control".to_string(), "stop".to_string()],
        |name| match name {
            DESTINATION_DIR_VAR => Some("videos".to_string()),
            STAGE_VAR => Some("Stage1".to_string()),
            _ => None,
        },
        &detector,
        &env,
        &settings,
        &Noon,
    );

    // Then: Everything is recorded
    assert_eq!(snapshot.command_line, vec!["amarec-control", "stop"]);
    assert_eq!(snapshot.variables.len(), 5);
    assert_eq!(
        snapshot.variables[0],
        (DESTINATION_DIR_VAR, Some("videos".to_string()))
    );
    assert_eq!(snapshot.variables[1].1, None);
    assert_eq!(snapshot.window_titles, vec!["IkaLog", "AmaRecTV: capture.avi"]);
    assert_eq!(snapshot.recorder_title.as_deref(), Some("AmaRecTV: capture.avi"));
    assert_eq!(
        snapshot.source_path,
        Some(PathBuf::from("videos").join("capture.avi"))
    );
    assert_eq!(
        snapshot.destination_path,
        PathBuf::from("videos").join("20150801_1234_Stage1_Rule1_win.avi")
    );
    assert_eq!(snapshot.state, FileLockState::Locked);

    // And: Logging it does not panic without a subscriber
    snapshot.log();
}

/// WHAT: No recorder window yields an empty, absent snapshot
/// WHY: Distinguishes "recorder not running" in the log
#[test]
fn given_no_recorder_when_capturing_snapshot_then_absent() {
    let detector = RecordingDetector::new(Box::new(Titles(vec![])), Box::new(Held), "videos");
    let env = Environment::default();

    let snapshot = Snapshot::capture(
        Vec::new(),
        |_| None,
        &detector,
        &env,
        &ControllerSettings::default(),
        &Noon,
    );

    assert_eq!(snapshot.recorder_title, None);
    assert_eq!(snapshot.source_path, None);
    assert_eq!(snapshot.state, FileLockState::Absent);
    assert!(snapshot.variables.iter().all(|(_, v)| v.is_none()));
}
