//! Integration tests for platform operations

use jslaunch_errors::PlatformError;
use jslaunch_events::{AppEvent, EventReceiver, PlatformEvent};
use jslaunch_platform::*;
use jslaunch_types::RawPlatform;
use std::path::{Path, PathBuf};

fn context() -> (PlatformContext, EventReceiver) {
    let (tx, rx) = jslaunch_events::channel();
    (PlatformContext::new(Some(tx)).with_correlation_id("test"), rx)
}

fn drain_events(rx: &mut EventReceiver) -> Vec<PlatformEvent> {
    let mut events = Vec::new();
    while let Ok(message) = rx.try_recv() {
        if let AppEvent::Platform(event) = message.event {
            events.push(event);
        }
    }
    events
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[tokio::test]
async fn test_resolve_missing_binary_is_unsupported_platform() {
    let temp = tempfile::tempdir().unwrap();
    let (ctx, _rx) = context();
    let host = HostPlatform::from_raw(RawPlatform::new("sunos", "sparc"));

    let err = resolve_executable(&ctx, temp.path(), &host)
        .await
        .unwrap_err();

    match err {
        PlatformError::UnsupportedPlatform {
            os,
            arch,
            expected_path,
        } => {
            assert_eq!(os, "sunos");
            assert_eq!(arch, "sparc");
            assert!(expected_path.ends_with("jsonschema-sunos-sparc"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_resolve_existing_binary() {
    let temp = tempfile::tempdir().unwrap();
    let (ctx, mut rx) = context();
    let host = HostPlatform::from_raw(RawPlatform::new("linux", "x64"));

    let expected = executable_path(temp.path(), &host.pair);
    std::fs::create_dir_all(expected.parent().unwrap()).unwrap();
    std::fs::write(&expected, b"").unwrap();

    let resolved = resolve_executable(&ctx, temp.path(), &host).await.unwrap();
    assert_eq!(resolved, expected);
    assert!(resolved.ends_with("build/github-releases/jsonschema-linux-x86_64"));

    let events = drain_events(&mut rx);
    assert!(matches!(
        events.as_slice(),
        [PlatformEvent::ExecutableResolved { platform, .. }] if platform == "linux-x86_64"
    ));
}

#[tokio::test]
async fn test_spawn_failure_is_distinct_from_exit_code() {
    let temp = tempfile::tempdir().unwrap();
    let (ctx, mut rx) = context();
    let ops = NativeProcessOperations::new();

    let cmd = PlatformCommand::new(temp.path().join("does-not-exist"));
    let err = ops.run_captured(&ctx, cmd).await.unwrap_err();
    assert!(matches!(err, PlatformError::SpawnFailed { .. }));

    let events = drain_events(&mut rx);
    assert!(matches!(
        events.last(),
        Some(PlatformEvent::ProcessExecutionFailed { .. })
    ));
}

#[tokio::test]
async fn test_quarantine_not_required_runs_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let (ctx, mut rx) = context();
    let ops = NativeProcessOperations::new();

    QuarantineMitigation::NotRequired
        .apply(&ctx, &ops, &temp.path().join("jsonschema-linux-x86_64"))
        .await;

    assert!(drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn test_quarantine_with_missing_utility_is_swallowed() {
    let temp = tempfile::tempdir().unwrap();
    let (ctx, mut rx) = context();
    let ops = NativeProcessOperations::new();
    let mitigation = QuarantineMitigation::ClearAttributes {
        utility: temp.path().join("no-xattr-here"),
    };

    mitigation
        .apply(&ctx, &ops, &temp.path().join("jsonschema-darwin-arm64"))
        .await;

    let events = drain_events(&mut rx);
    assert!(matches!(
        events.last(),
        Some(PlatformEvent::QuarantineClearFinished {
            exit_code: None,
            error: Some(_),
            ..
        })
    ));
}

#[cfg(unix)]
mod unix {
    use super::*;

    #[tokio::test]
    async fn test_captured_output_and_exit_code() {
        let temp = tempfile::tempdir().unwrap();
        let (ctx, mut rx) = context();
        let script = write_script(
            temp.path(),
            "tool",
            r#"echo "out:$1"; echo "err:$2" >&2; exit 3"#,
        );

        let mut cmd = PlatformCommand::new(&script);
        cmd.args(["a", "b"]);
        let output = NativeProcessOperations::new()
            .run_captured(&ctx, cmd)
            .await
            .unwrap();

        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout, "out:a\n");
        assert_eq!(output.stderr, "err:b\n");

        let events = drain_events(&mut rx);
        assert!(matches!(
            events.first(),
            Some(PlatformEvent::ProcessExecutionStarted { args, .. }) if args == &["a", "b"]
        ));
        assert!(matches!(
            events.last(),
            Some(PlatformEvent::ProcessExecutionCompleted {
                exit_code: Some(3),
                stdout_bytes: 6,
                stderr_bytes: 6,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_non_utf8_argument_reaches_child_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().unwrap();
        let (ctx, _rx) = context();
        let log = temp.path().join("args.log");
        let script = write_script(
            temp.path(),
            "tool",
            &format!(r#"printf '%s' "$1" > "{}""#, log.display()),
        );

        let mut cmd = PlatformCommand::new(&script);
        cmd.arg(OsStr::from_bytes(b"sch\xffema.json"));
        let output = NativeProcessOperations::new()
            .run_captured(&ctx, cmd)
            .await
            .unwrap();

        assert_eq!(output.code, Some(0));
        assert_eq!(std::fs::read(&log).unwrap(), b"sch\xffema.json");
    }

    #[tokio::test]
    async fn test_large_output_on_both_streams_does_not_block() {
        let temp = tempfile::tempdir().unwrap();
        let (ctx, _rx) = context();
        // Well past a typical 64 KiB pipe buffer on each stream
        let script = write_script(
            temp.path(),
            "chatty",
            "i=0; while [ $i -lt 4000 ]; do \
             echo 'xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx'; \
             echo 'yyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyyy' >&2; \
             i=$((i+1)); done",
        );

        let output = NativeProcessOperations::new()
            .run_captured(&ctx, PlatformCommand::new(&script))
            .await
            .unwrap();

        assert_eq!(output.code, Some(0));
        assert_eq!(output.stdout.lines().count(), 4000);
        assert_eq!(output.stderr.lines().count(), 4000);
    }

    #[tokio::test]
    async fn test_non_executable_file_fails_to_spawn() {
        let temp = tempfile::tempdir().unwrap();
        let (ctx, _rx) = context();
        let path = temp.path().join("plain");
        std::fs::write(&path, "not a program").unwrap();

        let err = NativeProcessOperations::new()
            .run_captured(&ctx, PlatformCommand::new(&path))
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::SpawnFailed { .. }));
    }

    #[tokio::test]
    async fn test_signal_termination_has_no_code() {
        let temp = tempfile::tempdir().unwrap();
        let (ctx, _rx) = context();
        let script = write_script(temp.path(), "suicide", "kill -9 $$");

        let output = NativeProcessOperations::new()
            .run_captured(&ctx, PlatformCommand::new(&script))
            .await
            .unwrap();
        assert_eq!(output.code, None);
    }

    #[tokio::test]
    async fn test_inherited_returns_exit_code() {
        let temp = tempfile::tempdir().unwrap();
        let (ctx, _rx) = context();
        let script = write_script(temp.path(), "exit7", "exit 7");

        let code = NativeProcessOperations::new()
            .run_inherited(&ctx, PlatformCommand::new(&script))
            .await
            .unwrap();
        assert_eq!(code, Some(7));
    }

    #[tokio::test]
    async fn test_quarantine_runs_utility_with_clear_flag() {
        let temp = tempfile::tempdir().unwrap();
        let (ctx, _rx) = context();
        let log = temp.path().join("xattr.log");
        let utility = write_script(
            temp.path(),
            "xattr",
            &format!(r#"echo "$@" > "{}"; exit 1"#, log.display()),
        );
        let binary = temp.path().join("jsonschema-darwin-arm64");

        QuarantineMitigation::ClearAttributes { utility }
            .apply(&ctx, &NativeProcessOperations::new(), &binary)
            .await;

        let recorded = std::fs::read_to_string(&log).unwrap();
        assert_eq!(recorded.trim(), format!("-c {}", binary.display()));
    }
}
