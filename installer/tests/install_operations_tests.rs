//! Integration tests for blockchain installation
//!
//! These tests drive the installer end to end against a bundled snapshot
//! directory and a data directory, both temporary. They cover when the
//! installer must stay silent, when it must ask, and what a failed copy
//! leaves behind.

mod common;

use common::*;
use installer::errors::CopyError;
use installer::types::{Heights, InstallState, SkipReason, SnapshotFile};
use installer::services::RecordingStatusSink;
use installer::{InstallOutcome, Installer, InstallerConfig};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn assert_copied(source: &std::path::Path, target: &std::path::Path) {
    for name in ["blockindexes.dat", "blocks.dat"] {
        assert_eq!(
            fs::read(source.join(name)).unwrap(),
            fs::read(target.join(name)).unwrap(),
            "{} must match the bundled copy",
            name
        );
    }
}

#[tokio::test]
async fn test_unrecognized_source_is_silent_noop() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write_index(source.path(), 100, &[0, 200]);
    write_blocks(source.path(), 1024);

    let t = create_test_installer(source.path(), &target.path().join("data"), true);
    let report = t.installer.exec().await;

    assert!(matches!(
        report.outcome,
        InstallOutcome::Skipped(SkipReason::SourceUnrecognized)
    ));
    assert!(t.prompt.questions().is_empty());
    assert!(t.status.messages().is_empty());
    assert!(!target.path().join("data").exists());
}

#[tokio::test]
async fn test_missing_bundle_is_silent_noop() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    let t = create_test_installer(source.path(), target.path(), true);

    assert!(!t.installer.check_if_current_blockchain_exists().await);
    let report = t.installer.exec().await;
    assert!(matches!(report.outcome, InstallOutcome::Skipped(_)));
    assert!(t.status.messages().is_empty());
}

#[tokio::test]
async fn test_missing_target_installs_without_prompt() {
    let source = TempDir::new().unwrap();
    let target_root = TempDir::new().unwrap();
    let target = target_root.path().join("nested").join("chain");
    create_mock_snapshot(source.path(), 100);

    let t = create_test_installer(source.path(), &target, false);
    assert_eq!(t.installer.source().dir(), source.path());
    assert_eq!(t.installer.target().dir(), target.as_path());
    assert!(!t.installer.check_if_target_blockchain_exists().await);

    let report = t.installer.exec().await;

    assert!(report.outcome.is_installed());
    assert!(t.prompt.questions().is_empty(), "no prompt without an installed chain");
    assert_eq!(
        report.states,
        vec![
            InstallState::CheckingSource,
            InstallState::NoExistingTarget,
            InstallState::Copying(SnapshotFile::Index),
            InstallState::Copying(SnapshotFile::Blocks),
            InstallState::Done,
        ]
    );
    assert_copied(source.path(), &target);

    let messages = t.status.messages();
    assert_eq!(messages.first().map(String::as_str), Some("Copying blockchain files..."));
    assert!(messages.iter().any(|m| m == "Copying blockchain files... (100%)"));
}

#[tokio::test]
async fn test_higher_target_is_left_alone() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot(source.path(), 51);
    create_mock_snapshot(target.path(), 81);

    let t = create_test_installer(source.path(), target.path(), true);

    assert_eq!(t.installer.check_if_blockchain_outdated().await, None);
    let report = t.installer.exec().await;

    assert!(matches!(
        report.outcome,
        InstallOutcome::Skipped(SkipReason::TargetUpToDate(Heights {
            source: 50,
            target: 80
        }))
    ));
    assert!(t.prompt.questions().is_empty());
    assert_eq!(read_count(target.path()), 81);
}

#[tokio::test]
async fn test_equal_heights_are_left_alone() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot(source.path(), 70);
    create_mock_snapshot_with_blocks(target.path(), 70, 10);

    let t = create_test_installer(source.path(), target.path(), true);
    let report = t.installer.exec().await;

    assert!(matches!(report.outcome, InstallOutcome::Skipped(_)));
    assert!(t.prompt.questions().is_empty());
}

#[tokio::test]
async fn test_outdated_target_prompts_and_installs() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot_with_blocks(source.path(), 81, 5000);
    create_mock_snapshot(target.path(), 51);

    let t = create_test_installer(source.path(), target.path(), true);

    assert_eq!(
        t.installer.check_if_blockchain_outdated().await,
        Some(Heights {
            source: 80,
            target: 50
        })
    );

    let report = t.installer.exec().await;

    let questions = t.prompt.questions();
    assert_eq!(questions.len(), 1);
    let (title, question) = &questions[0];
    assert_eq!(title, "Blockchain installation");
    assert!(question.contains("(height: 50)"), "installed height shown: {}", question);
    assert!(question.contains("(height: 80)"), "bundled height shown: {}", question);

    assert!(report.outcome.is_installed());
    assert_eq!(
        report.states,
        vec![
            InstallState::CheckingSource,
            InstallState::ComparingHeights,
            InstallState::AwaitingConfirmation,
            InstallState::Copying(SnapshotFile::Index),
            InstallState::Copying(SnapshotFile::Blocks),
            InstallState::Done,
        ]
    );
    assert_copied(source.path(), target.path());
    assert_eq!(read_count(target.path()), 81);
}

#[tokio::test]
async fn test_cancel_while_prompting_counts_as_declined() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot_with_blocks(source.path(), 81, 5000);
    create_mock_snapshot(target.path(), 51);

    let (prompt, release) = BlockingPrompt::new();
    let cancel = CancellationToken::new();
    let installer = Installer::new(
        &InstallerConfig::new(source.path(), target.path()),
        prompt.clone(),
        Arc::new(RecordingStatusSink::new()),
    )
    .with_cancellation(cancel.clone());

    // The runtime keeps serving other tasks while the prompt blocks
    let canceller = tokio::spawn({
        let prompt = prompt.clone();
        async move {
            while !prompt.was_asked() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            cancel.cancel();
        }
    });

    let report = tokio::time::timeout(Duration::from_secs(5), installer.exec())
        .await
        .expect("exec must return once cancelled");
    canceller.await.unwrap();
    let _ = release.send(());

    assert!(matches!(
        report.outcome,
        InstallOutcome::Declined(Heights {
            source: 80,
            target: 50
        })
    ));
    assert_eq!(report.states.last(), Some(&InstallState::Aborted));
    assert_eq!(read_count(target.path()), 51);
}

#[tokio::test]
async fn test_declined_prompt_leaves_target_untouched() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot(source.path(), 81);
    create_mock_snapshot_with_blocks(target.path(), 51, 300);

    let t = create_test_installer(source.path(), target.path(), false);
    let report = t.installer.exec().await;

    assert!(matches!(report.outcome, InstallOutcome::Declined(_)));
    assert_eq!(report.states.last(), Some(&InstallState::Aborted));
    assert_eq!(t.prompt.questions().len(), 1);
    assert!(t.status.messages().is_empty());
    assert_eq!(read_count(target.path()), 51);
    assert_eq!(fs::read(target.path().join("blocks.dat")).unwrap().len(), 300);
}

#[tokio::test]
async fn test_unreadable_target_index_is_silent_noop() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot(source.path(), 81);
    // Installed chain has data but no index
    write_blocks(target.path(), 64);

    let t = create_test_installer(source.path(), target.path(), true);
    let report = t.installer.exec().await;

    assert!(matches!(
        report.outcome,
        InstallOutcome::Skipped(SkipReason::HeightsUnreadable)
    ));
    assert!(t.prompt.questions().is_empty());
}

#[tokio::test]
async fn test_empty_target_index_is_silent_noop() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot(source.path(), 81);
    create_mock_snapshot(target.path(), 0);

    let t = create_test_installer(source.path(), target.path(), true);

    assert!(t.installer.read_heights().await.is_err());
    let report = t.installer.exec().await;
    assert!(matches!(
        report.outcome,
        InstallOutcome::Skipped(SkipReason::HeightsUnreadable)
    ));
}

#[tokio::test]
async fn test_failed_data_copy_keeps_copied_index() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot(source.path(), 81);
    write_index(target.path(), 51, &[0, 0xd5]);
    // The data file slot is a directory, so opening it for writing fails
    fs::create_dir(target.path().join("blocks.dat")).unwrap();

    let t = create_test_installer(source.path(), target.path(), true);
    let report = t.installer.exec().await;

    match &report.outcome {
        InstallOutcome::Failed(err @ CopyError::OpenTarget { path, .. }) => {
            assert_eq!(path, &target.path().join("blocks.dat"));
            assert!(err.raw_os_error().is_some());
        }
        other => panic!("expected target open failure, got {:?}", other),
    }
    assert_eq!(
        &report.states[report.states.len() - 3..],
        &[
            InstallState::Copying(SnapshotFile::Index),
            InstallState::Copying(SnapshotFile::Blocks),
            InstallState::Aborted,
        ]
    );

    // Index already replaced, no rollback
    assert_eq!(
        fs::read(target.path().join("blockindexes.dat")).unwrap(),
        fs::read(source.path().join("blockindexes.dat")).unwrap()
    );
}

#[tokio::test]
async fn test_failed_index_copy_never_starts_data_copy() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot(source.path(), 81);
    fs::create_dir(target.path().join("blockindexes.dat")).unwrap();

    let t = create_test_installer(source.path(), target.path(), true);
    let result = t.installer.install_blockchain().await;

    assert!(matches!(result, Err(CopyError::OpenTarget { .. })));
    assert!(
        !target.path().join("blocks.dat").exists(),
        "data file must not be touched after a failed index copy"
    );
}

#[tokio::test]
async fn test_install_reports_progress_per_chunk() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot_with_blocks(source.path(), 10, 4096);

    let mut t = create_test_installer(source.path(), &target.path().join("chain"), true);
    t.installer = t.installer.with_chunk_size(1024);

    let bytes = t.installer.install_blockchain().await.unwrap();

    assert_eq!(bytes, 4096 + 20);
    let messages = t.status.messages();
    // One start message, one index chunk, four data chunks
    assert_eq!(messages.len(), 6, "{:?}", messages);
    assert_eq!(
        &messages[2..],
        &[
            "Copying blockchain files... (25%)",
            "Copying blockchain files... (50%)",
            "Copying blockchain files... (75%)",
            "Copying blockchain files... (100%)",
        ]
    );
}

#[tokio::test]
async fn test_cancelled_install_never_copies_data() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    create_mock_snapshot(source.path(), 10);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut t = create_test_installer(source.path(), &target.path().join("chain"), true);
    t.installer = t.installer.with_cancellation(cancel);
    let report = t.installer.exec().await;

    assert!(matches!(
        report.outcome,
        InstallOutcome::Failed(CopyError::Cancelled { .. })
    ));
    assert_eq!(report.states.last(), Some(&InstallState::Aborted));
    assert!(!target.path().join("chain").join("blocks.dat").exists());
}

#[test]
fn test_question_text_orders_heights() {
    let text = installer::operations::question_text(Heights {
        source: 80,
        target: 50,
    });

    assert!(text.starts_with("Would you like to replace your current blockchain (height: 50)\n"));
    assert!(text.ends_with("(height: 80)?"));
}
