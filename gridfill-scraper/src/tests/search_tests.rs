use super::*;
use crate::test_support::{BASE, FakeTransport, grids_body, image_json};

fn query() -> SearchQuery {
    SearchQuery {
        token: "secret".to_string(),
        styles: vec![ArtStyle::Alternate, ArtStyle::Blurred],
        kind: ArtKind::Static,
    }
}

fn batch() -> Vec<Title> {
    vec![
        Title::new(620, "Portal 2"),
        Title::new(400, "Portal"),
        Title::new(70, "Half-Life"),
    ]
}

#[test]
fn test_grids_url_layout() {
    let endpoints = Endpoints::with_base(BASE);
    assert_eq!(
        query().grids_url(&endpoints, &batch()),
        "http://fake/griddb/grids/steam/620,400,70?styles=alternate,blurred&dimensions=600x900&types=static"
    );

    let animated = SearchQuery {
        styles: Vec::new(),
        kind: ArtKind::Animated,
        ..query()
    };
    assert_eq!(
        animated.grids_url(&endpoints, &batch()[..1]),
        "http://fake/griddb/grids/steam/620?dimensions=600x900&types=animated"
    );
}

#[tokio::test]
async fn test_sends_bearer_token() {
    let transport = FakeTransport::new();
    let endpoints = Endpoints::with_base(BASE);
    let titles = batch();
    let url = query().grids_url(&endpoints, &titles);
    transport.respond(
        &url,
        200,
        grids_body(&[Some(vec![]), Some(vec![]), Some(vec![])]),
    );

    search_batch(&transport, &endpoints, &query(), &titles)
        .await
        .unwrap();

    let requests = transport.requests_to(&url);
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].headers,
        vec![("Authorization".to_string(), "Bearer secret".to_string())]
    );
}

#[tokio::test]
async fn test_failed_title_does_not_affect_siblings() {
    let transport = FakeTransport::new();
    let endpoints = Endpoints::with_base(BASE);
    let titles = batch();
    transport.respond(
        query().grids_url(&endpoints, &titles),
        200,
        grids_body(&[
            Some(vec![image_json(1, "http://img/1.png")]),
            None,
            Some(vec![image_json(3, "http://img/3.png")]),
        ]),
    );
    let log = ActivityLog::default();

    let results = search_batch(&transport, &endpoints, &query(), &titles)
        .await
        .unwrap();
    let mut selections = GridSelections::new(results, &titles, &log);
    let chosen: Vec<(u64, usize)> = selections
        .by_ref()
        .map(|(image, position)| (image.id, position))
        .collect();

    assert_eq!(chosen, vec![(1, 0), (3, 2)]);
    let failures = selections.into_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].title, Title::new(400, "Portal"));
    assert_eq!(
        failures[0].kind,
        FailureKind::NotSuccess {
            status: 404,
            errors: vec!["Game not found".to_string()],
        }
    );
    assert!(log.snapshot()[0].contains("Game 400:Portal was not a success: 404"));
}

#[tokio::test]
async fn test_empty_image_list_is_skipped() {
    let transport = FakeTransport::new();
    let endpoints = Endpoints::with_base(BASE);
    let titles = batch();
    transport.respond(
        query().grids_url(&endpoints, &titles),
        200,
        grids_body(&[
            Some(vec![]),
            Some(vec![image_json(2, "http://img/2.png")]),
            Some(vec![]),
        ]),
    );
    let log = ActivityLog::default();

    let results = search_batch(&transport, &endpoints, &query(), &titles)
        .await
        .unwrap();
    let mut selections = GridSelections::new(results, &titles, &log);
    let chosen: Vec<usize> = selections.by_ref().map(|(_, position)| position).collect();

    assert_eq!(chosen, vec![1]);
    assert_eq!(selections.failures().len(), 2);
    assert_eq!(
        log.snapshot(),
        vec![
            "There are no covers for 620:Portal 2".to_string(),
            "There are no covers for 70:Half-Life".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_first_image_wins_regardless_of_score() {
    let transport = FakeTransport::new();
    let endpoints = Endpoints::with_base(BASE);
    let titles = vec![Title::new(620, "Portal 2"), Title::new(400, "Portal")];
    let mut low = image_json(10, "http://img/low.png");
    low["score"] = serde_json::json!(1);
    let mut high = image_json(11, "http://img/high.png");
    high["score"] = serde_json::json!(99);
    transport.respond(
        query().grids_url(&endpoints, &titles),
        200,
        grids_body(&[Some(vec![low, high]), Some(vec![image_json(12, "x")])]),
    );
    let log = ActivityLog::default();

    let results = search_batch(&transport, &endpoints, &query(), &titles)
        .await
        .unwrap();
    let first = GridSelections::new(results, &titles, &log).next().unwrap();

    assert_eq!(first.0.url, "http://img/low.png");
    assert_eq!(first.0.score, 1);
    assert_eq!(first.0.author.unwrap().name, "artist");
}

#[tokio::test]
async fn test_envelope_failure_is_remote_error() {
    let transport = FakeTransport::new();
    let endpoints = Endpoints::with_base(BASE);
    let titles = batch();
    transport.respond(
        query().grids_url(&endpoints, &titles),
        200,
        r#"{"success":false,"errors":["Invalid token"]}"#,
    );

    let err = search_batch(&transport, &endpoints, &query(), &titles)
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Remote(ref m) if m.contains("Invalid token")));
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let transport = FakeTransport::new();
    let endpoints = Endpoints::with_base(BASE);
    let titles = batch();
    transport.respond(query().grids_url(&endpoints, &titles), 401, "");

    let err = search_batch(&transport, &endpoints, &query(), &titles)
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 401, .. }));
    assert!(err.is_remote());
}

#[tokio::test]
async fn test_result_count_mismatch_is_error() {
    let transport = FakeTransport::new();
    let endpoints = Endpoints::with_base(BASE);
    let titles = batch();
    transport.respond(
        query().grids_url(&endpoints, &titles),
        200,
        grids_body(&[Some(vec![]), Some(vec![])]),
    );

    let err = search_batch(&transport, &endpoints, &query(), &titles)
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Remote(ref m) if m.contains("2 results for 3 titles")));
}

#[tokio::test]
async fn test_single_title_flat_shape() {
    let transport = FakeTransport::new();
    let endpoints = Endpoints::with_base(BASE);
    let titles = vec![Title::new(620, "Portal 2")];
    let body = serde_json::json!({
        "success": true,
        "data": [image_json(5, "http://img/5.png"), image_json(6, "http://img/6.png")],
    });
    transport.respond(
        query().grids_url(&endpoints, &titles),
        200,
        body.to_string(),
    );

    let results = search_batch(&transport, &endpoints, &query(), &titles)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].images.len(), 2);

    let log = ActivityLog::default();
    let chosen: Vec<(u64, usize)> = GridSelections::new(results, &titles, &log)
        .map(|(image, position)| (image.id, position))
        .collect();
    assert_eq!(chosen, vec![(5, 0)]);
}

#[tokio::test]
async fn test_single_title_empty_data_has_no_covers() {
    let transport = FakeTransport::new();
    let endpoints = Endpoints::with_base(BASE);
    let titles = vec![Title::new(620, "Portal 2")];
    transport.respond(
        query().grids_url(&endpoints, &titles),
        200,
        r#"{"success":true,"data":[]}"#,
    );

    let results = search_batch(&transport, &endpoints, &query(), &titles)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert!(results[0].images.is_empty());

    let log = ActivityLog::default();
    let mut selections = GridSelections::new(results, &titles, &log);
    assert!(selections.next().is_none());
    assert_eq!(
        selections.into_failures(),
        vec![PartialFailure {
            title: titles[0].clone(),
            kind: FailureKind::NoImages,
        }]
    );
    assert_eq!(log.snapshot(), vec!["There are no covers for 620:Portal 2"]);
}
