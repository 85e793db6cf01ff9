use std::path::Path;

use super::*;
use crate::test_support::{
    FakeTransport, games_page, grids_body, image_json, run_params, write_user,
};

fn setup(root: &Path) -> (Pipeline<FakeTransport>, RunParams, Identity) {
    write_user(root, 22202, "someone");
    let identity = Identity::new(root, "someone", 22202);
    let pipeline = Pipeline::new(FakeTransport::new(), ActivityLog::default());
    (pipeline, run_params(root), identity)
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_writes_only_missing_art() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, params, identity) = setup(tmp.path());
    let endpoints = &params.endpoints;
    let transport = pipeline.transport();

    let a = Title::new(1, "A");
    let b = Title::new(2, "B");
    transport.respond(
        endpoints.profile_games(identity.id64()),
        200,
        games_page(&[(1, "A"), (2, "B")]),
    );
    transport.respond(endpoints.library_art(1), 200, "");
    transport.respond(endpoints.library_art(2), 404, "");
    let grids_url = params.query.grids_url(endpoints, std::slice::from_ref(&b));
    transport.respond(
        &grids_url,
        200,
        grids_body(&[Some(vec![image_json(9, "http://fake/img/9.png")])]),
    );
    transport.respond("http://fake/img/9.png", 200, "png-bytes");

    let report = pipeline.run(&params).await.unwrap();

    assert!(!identity.custom_art_path(&a).exists());
    let written: Vec<&Path> = report.written().collect();
    assert_eq!(written, vec![identity.custom_art_path(&b).as_path()]);
    assert_eq!(
        std::fs::read(identity.custom_art_path(&b)).unwrap(),
        b"png-bytes"
    );
    assert_eq!(transport.requests_to(&grids_url).len(), 1);

    let lines = pipeline.log().snapshot();
    assert_eq!(
        lines,
        vec![
            "Started",
            "User: someone",
            "Game: 1:A has Steam art",
            "Game: 2:B has no art",
            "Downloading games: 2:B",
            "Written game 2:B",
            "Done",
        ]
    );

    let summary = report.summary();
    assert_eq!(summary.users, 1);
    assert_eq!(summary.official, 1);
    assert_eq!(summary.written, 1);
}

#[tokio::test(start_paused = true)]
async fn test_rerun_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, params, identity) = setup(tmp.path());
    let endpoints = &params.endpoints;
    let transport = pipeline.transport();

    let b = Title::new(2, "B");
    transport.respond(
        endpoints.profile_games(identity.id64()),
        200,
        games_page(&[(2, "B")]),
    );
    let grids_url = params.query.grids_url(endpoints, std::slice::from_ref(&b));
    transport.respond(
        &grids_url,
        200,
        grids_body(&[Some(vec![image_json(9, "http://fake/img/9.png")])]),
    );
    transport.respond("http://fake/img/9.png", 200, "png-bytes");

    pipeline.run(&params).await.unwrap();
    let second = pipeline.run(&params).await.unwrap();

    assert_eq!(second.written().count(), 0);
    assert_eq!(second.summary().custom, 1);
    assert_eq!(transport.requests_to(&grids_url).len(), 1);
    assert_eq!(transport.requests_to("http://fake/img/9.png").len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_candidates_are_searched_in_batches() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, params, identity) = setup(tmp.path());
    let endpoints = &params.endpoints;
    let transport = pipeline.transport();

    let games: Vec<(u32, String)> = (1..=20).map(|i| (i, format!("Game {}", i))).collect();
    let refs: Vec<(u32, &str)> = games.iter().map(|(i, n)| (*i, n.as_str())).collect();
    transport.respond(endpoints.profile_games(identity.id64()), 200, games_page(&refs));

    let titles: Vec<Title> = games.iter().map(|(i, n)| Title::new(*i, n.clone())).collect();
    let first = params.query.grids_url(endpoints, &titles[..15]);
    let second = params.query.grids_url(endpoints, &titles[15..]);
    let empty: Vec<Option<Vec<serde_json::Value>>> = vec![Some(Vec::new()); 15];
    transport.respond(&first, 200, grids_body(&empty));
    transport.respond(&second, 200, grids_body(&empty[..5]));

    let report = pipeline.run(&params).await.unwrap();

    assert_eq!(transport.requests_to(&first).len(), 1);
    assert_eq!(transport.requests_to(&second).len(), 1);
    assert_eq!(report.summary().no_candidates, 20);
}

#[tokio::test(start_paused = true)]
async fn test_partial_failure_keeps_going() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, params, identity) = setup(tmp.path());
    let endpoints = &params.endpoints;
    let transport = pipeline.transport();

    transport.respond(
        endpoints.profile_games(identity.id64()),
        200,
        games_page(&[(1, "A"), (2, "B")]),
    );
    let titles = vec![Title::new(1, "A"), Title::new(2, "B")];
    transport.respond(
        params.query.grids_url(endpoints, &titles),
        200,
        grids_body(&[None, Some(vec![image_json(9, "http://fake/img/9.png")])]),
    );
    transport.respond("http://fake/img/9.png", 200, "png-bytes");

    let report = pipeline.run(&params).await.unwrap();

    assert!(!identity.custom_art_path(&titles[0]).exists());
    assert!(identity.custom_art_path(&titles[1]).exists());
    assert!(report.entries().contains(&ReportEntry::SearchFailed {
        user: "someone".to_string(),
        title: titles[0].clone(),
        status: 404,
        errors: vec!["Game not found".to_string()],
    }));
}

#[tokio::test(start_paused = true)]
async fn test_remote_error_aborts_run_but_keeps_files() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_user(root, 100, "first");
    write_user(root, 200, "second");
    let first = Identity::new(root, "first", 100);
    let second = Identity::new(root, "second", 200);
    let pipeline = Pipeline::new(FakeTransport::new(), ActivityLog::default());
    let params = run_params(root);
    let endpoints = &params.endpoints;
    let transport = pipeline.transport();

    let title = Title::new(5, "Five");
    transport.respond(
        endpoints.profile_games(first.id64()),
        200,
        games_page(&[(5, "Five")]),
    );
    transport.respond(
        params.query.grids_url(endpoints, std::slice::from_ref(&title)),
        200,
        grids_body(&[Some(vec![image_json(1, "http://fake/img/1.png")])]),
    );
    transport.respond("http://fake/img/1.png", 200, "bytes");
    transport.respond(endpoints.profile_games(second.id64()), 500, "");

    let err = pipeline.run(&params).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Status { status: 500, .. }));
    assert!(err.is_remote());
    assert!(first.custom_art_path(&title).exists());
    assert!(!pipeline.log().snapshot().contains(&"Done".to_string()));
}

#[tokio::test]
async fn test_missing_userdata_is_configuration_error() {
    let tmp = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(FakeTransport::new(), ActivityLog::default());

    let err = pipeline.run(&run_params(tmp.path())).await.unwrap_err();
    assert!(err.is_configuration());
    assert!(pipeline.transport().requests().is_empty());
}

#[tokio::test]
async fn test_missing_token_is_configuration_error() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, mut params, _) = setup(tmp.path());
    params.query.token = String::new();

    let err = pipeline.run(&params).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Config(_)));
}

#[tokio::test(start_paused = true)]
async fn test_user_without_settings_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, params, identity) = setup(tmp.path());
    std::fs::create_dir_all(tmp.path().join("userdata").join("30000")).unwrap();
    pipeline.transport().respond(
        params.endpoints.profile_games(identity.id64()),
        200,
        games_page(&[]),
    );

    let report = pipeline.run(&params).await.unwrap();

    let summary = report.summary();
    assert_eq!(summary.users, 1);
    assert_eq!(summary.skipped_users, 1);
    assert!(
        pipeline
            .log()
            .snapshot()
            .iter()
            .any(|l| l.starts_with("Missing config:"))
    );
}

#[tokio::test(start_paused = true)]
async fn test_single_title_without_covers_completes() {
    let tmp = tempfile::tempdir().unwrap();
    let (pipeline, params, identity) = setup(tmp.path());
    let endpoints = &params.endpoints;
    let transport = pipeline.transport();

    let title = Title::new(7, "Seven");
    transport.respond(
        endpoints.profile_games(identity.id64()),
        200,
        games_page(&[(7, "Seven")]),
    );
    transport.respond(
        params.query.grids_url(endpoints, std::slice::from_ref(&title)),
        200,
        r#"{"success":true,"data":[]}"#,
    );

    let report = pipeline.run(&params).await.unwrap();

    assert!(!identity.custom_art_path(&title).exists());
    assert!(report.entries().contains(&ReportEntry::NoCandidates {
        user: "someone".to_string(),
        title: title.clone(),
    }));
    let lines = pipeline.log().snapshot();
    assert!(lines.contains(&"There are no covers for 7:Seven".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some("Done"));
}
