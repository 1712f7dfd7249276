mod common;

use chooseprio::{run_under_load, Error, FighterCfg, LaunchError, StdLauncher, WaitError};
use common::{argv, init_logging, Ending, FailingLauncher, ScriptedLauncher};
use std::time::Duration;

#[test]
fn launch_failure_is_reported() {
    let cfg = FighterCfg::default().with_threads(2);
    let mut started = None;
    let res = run_under_load(&FailingLauncher, &argv(&["nope"]), &cfg, |n| {
        started = Some(n)
    });
    assert_eq!(started, Some(2));
    assert!(matches!(res, Err(Error::Launch(LaunchError::Spawn { .. }))));
}

#[test]
fn missing_binary() {
    let cfg = FighterCfg::default().with_threads(1);
    let res = run_under_load(
        &StdLauncher,
        &argv(&["chooseprio-nonexistent-binary"]),
        &cfg,
        |_| {},
    );
    assert!(matches!(res, Err(Error::Launch(LaunchError::Spawn { .. }))));
}

#[test]
fn wait_error_is_not_fatal() {
    let launcher = ScriptedLauncher {
        runtime: Duration::from_millis(20),
        ending: Ending::WaitFails,
    };
    let cfg = FighterCfg::default().with_threads(1);
    let report = run_under_load(&launcher, &argv(&["scripted"]), &cfg, |_| {}).unwrap();
    assert_eq!(report.exit_code, 0);
    assert!(matches!(report.wait_error, Some(WaitError::Io(_))));
    assert!(report.elapsed >= Duration::from_millis(20));
}

#[test]
fn no_load_threads() {
    let launcher = ScriptedLauncher {
        runtime: Duration::from_millis(10),
        ending: Ending::Exit(4),
    };
    let cfg = FighterCfg::default().with_threads(0);
    let report = run_under_load(&launcher, &argv(&["scripted"]), &cfg, |_| {}).unwrap();
    assert_eq!(report.threads, 0);
    assert_eq!(report.load_iterations, 0);
    assert_eq!(report.exit_code, 4);
}

#[cfg(unix)]
#[test]
fn exit_status_is_reported() {
    let cfg = FighterCfg::default().with_threads(2);
    let report =
        run_under_load(&StdLauncher, &argv(&["sh", "-c", "exit 3"]), &cfg, |_| {}).unwrap();
    assert_eq!(report.exit_code, 3);
    assert!(report.wait_error.is_none());
    assert_eq!(report.threads, 2);
}

#[cfg(unix)]
#[test]
fn duration_tracks_child_runtime() {
    init_logging();
    let cfg = FighterCfg::default().with_threads(2);
    let report = run_under_load(&StdLauncher, &argv(&["sleep", "1"]), &cfg, |_| {}).unwrap();
    assert_eq!(report.exit_code, 0);
    assert!(report.wait_error.is_none());
    assert!(
        report.elapsed >= Duration::from_millis(950) && report.elapsed < Duration::from_secs(3),
        "elapsed={:?}",
        report.elapsed
    );
    assert!(report.load_iterations > 0);
}
