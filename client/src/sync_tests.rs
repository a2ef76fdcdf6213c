//! Tests for the existence/upload protocol.

use super::*;
use crate::test_utils::{ExpectedCall, RecordedUpload, StubTransport};
use camino::Utf8Path;
use nexus_sync_common::Gav;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

const BASE: &str = "http://nexus.test:8081/nexus/content/repositories/releases";

#[fixture]
fn endpoint() -> RepositoryEndpoint {
    RepositoryEndpoint {
        scheme: "http".to_owned(),
        server: "nexus.test".to_owned(),
        port: 8081,
        context_path: "/nexus/content/repositories".to_owned(),
        repository: "releases".to_owned(),
    }
}

fn settings(endpoint: RepositoryEndpoint, upload: bool) -> SyncSettings {
    SyncSettings { endpoint, upload }
}

/// A temporary repository holding one file per given artifact name.
struct LocalRepo {
    _dir: TempDir,
    artifacts: Vec<Artifact>,
}

fn local_repo(names: &[&str]) -> LocalRepo {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = Utf8Path::from_path(dir.path())
        .expect("temp dir is UTF-8")
        .to_owned();
    let artifacts = names
        .iter()
        .map(|name| {
            let filename = Utf8PathBuf::from(format!("com/acme/{name}/1.0/{name}-1.0.jar"));
            let path = root.join(&filename);
            fs::create_dir_all(path.parent().expect("has parent")).expect("create dirs");
            fs::write(&path, format!("bytes of {name}")).expect("write artifact");
            let gav = Gav::new("com/acme", *name, "1.0", "jar").expect("valid GAV");
            Artifact::new(root.clone(), filename, gav)
        })
        .collect();
    LocalRepo {
        _dir: dir,
        artifacts,
    }
}

fn url_of(name: &str) -> String {
    format!("{BASE}/com/acme/{name}/1.0/{name}-1.0.jar")
}

#[rstest]
#[case::default_context("/nexus/content/repositories", BASE)]
#[case::trailing_slash("/nexus/content/repositories/", BASE)]
#[case::no_context("", "http://nexus.test:8081/releases")]
fn base_url_normalises_context_path(
    mut endpoint: RepositoryEndpoint,
    #[case] context_path: &str,
    #[case] expected: &str,
) {
    endpoint.context_path = context_path.to_owned();
    assert_eq!(endpoint.base_url(), expected);
}

#[rstest]
fn artifact_url_appends_relative_filename(endpoint: RepositoryEndpoint) {
    let repo = local_repo(&["widget"]);
    assert_eq!(endpoint.artifact_url(&repo.artifacts[0]), url_of("widget"));
}

#[rstest]
fn present_and_absent_are_reported_without_upload(endpoint: RepositoryEndpoint) {
    let repo = local_repo(&["alpha", "beta"]);
    let transport = StubTransport::new(vec![
        ExpectedCall::head(url_of("alpha"), 200),
        ExpectedCall::head(url_of("beta"), 404),
    ]);
    let mut out = Vec::new();

    let report = synchronise(
        repo.artifacts.clone(),
        &transport,
        &settings(endpoint, false),
        &mut out,
    )
    .expect("sync succeeds");

    transport.assert_finished();
    assert!(transport.uploads().is_empty());
    assert_eq!(
        report.summary,
        SyncSummary {
            present: 1,
            absent: 1,
            uploaded: 0
        }
    );
    let statuses: Vec<_> = report.artifacts.iter().map(Artifact::status).collect();
    assert_eq!(
        statuses,
        vec![Some(RemoteStatus::Present), Some(RemoteStatus::Absent)]
    );
    let printed = String::from_utf8(out).expect("output is UTF-8");
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("200 com/acme:alpha:1.0:jar"));
    assert!(lines[1].starts_with("404 com/acme:beta:1.0:jar"));
}

#[rstest]
fn absent_artifact_is_uploaded_when_enabled(endpoint: RepositoryEndpoint) {
    let repo = local_repo(&["widget"]);
    let transport = StubTransport::new(vec![
        ExpectedCall::head(url_of("widget"), 404),
        ExpectedCall::put(url_of("widget"), 201),
    ]);
    let mut out = Vec::new();

    let report = synchronise(
        repo.artifacts.clone(),
        &transport,
        &settings(endpoint, true),
        &mut out,
    )
    .expect("sync succeeds");

    transport.assert_finished();
    assert_eq!(
        transport.uploads(),
        vec![RecordedUpload {
            url: url_of("widget"),
            body: b"bytes of widget".to_vec(),
        }]
    );
    assert_eq!(report.summary.uploaded, 1);
    assert_eq!(report.artifacts[0].status(), Some(RemoteStatus::Uploaded));
}

#[rstest]
fn present_artifact_is_never_uploaded(endpoint: RepositoryEndpoint) {
    let repo = local_repo(&["widget"]);
    let transport = StubTransport::new(vec![ExpectedCall::head(url_of("widget"), 200)]);

    let report = synchronise(
        repo.artifacts.clone(),
        &transport,
        &settings(endpoint, true),
        &mut Vec::new(),
    )
    .expect("sync succeeds");

    transport.assert_finished();
    assert_eq!(report.summary.present, 1);
}

#[rstest]
#[case::server_error(500)]
#[case::unauthorised(401)]
#[case::redirect(302)]
fn unexpected_head_status_aborts_remaining_artifacts(
    endpoint: RepositoryEndpoint,
    #[case] status: u16,
) {
    let repo = local_repo(&["alpha", "beta"]);
    let transport = StubTransport::new(vec![ExpectedCall::head(url_of("alpha"), status)]);
    let mut out = Vec::new();

    let err = synchronise(
        repo.artifacts.clone(),
        &transport,
        &settings(endpoint, true),
        &mut out,
    )
    .expect_err("unexpected status is fatal");

    transport.assert_finished();
    assert!(out.is_empty());
    match err {
        SyncError::UnexpectedStatus {
            method,
            url,
            actual,
            ..
        } => {
            assert_eq!(method, Method::Head);
            assert_eq!(url, url_of("alpha"));
            assert_eq!(actual, status);
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[rstest]
fn rejected_upload_is_fatal(endpoint: RepositoryEndpoint) {
    let repo = local_repo(&["alpha", "beta"]);
    let transport = StubTransport::new(vec![
        ExpectedCall::head(url_of("alpha"), 404),
        ExpectedCall::put(url_of("alpha"), 400),
    ]);

    let err = synchronise(
        repo.artifacts.clone(),
        &transport,
        &settings(endpoint, true),
        &mut Vec::new(),
    )
    .expect_err("rejected upload is fatal");

    transport.assert_finished();
    assert!(err.to_string().contains("PUT"));
    assert!(err.to_string().contains("returned 400, expected 201"));
}

#[rstest]
fn transport_failure_is_propagated(endpoint: RepositoryEndpoint) {
    let repo = local_repo(&["alpha"]);
    let transport = StubTransport::new(vec![ExpectedCall::failing(
        Method::Head,
        url_of("alpha"),
        "connection refused",
    )]);

    let err = synchronise(
        repo.artifacts.clone(),
        &transport,
        &settings(endpoint, false),
        &mut Vec::new(),
    )
    .expect_err("transport failure is fatal");

    assert!(matches!(err, SyncError::Transport(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[rstest]
fn missing_local_file_fails_upload(endpoint: RepositoryEndpoint) {
    let repo = local_repo(&["alpha"]);
    fs::remove_file(repo.artifacts[0].local_path()).expect("remove artifact");
    let transport = StubTransport::new(vec![ExpectedCall::head(url_of("alpha"), 404)]);

    let err = synchronise(
        repo.artifacts.clone(),
        &transport,
        &settings(endpoint, true),
        &mut Vec::new(),
    )
    .expect_err("missing file is fatal");

    transport.assert_finished();
    assert!(matches!(err, SyncError::OpenArtifact { .. }));
}

#[rstest]
fn empty_scan_makes_no_requests(endpoint: RepositoryEndpoint) {
    let transport = StubTransport::new(Vec::new());
    let report = synchronise(Vec::new(), &transport, &settings(endpoint, true), &mut Vec::new())
        .expect("nothing to do");
    assert_eq!(report.summary.total(), 0);
}
