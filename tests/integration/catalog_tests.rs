use crate::common::{create_client, game, mount_json, mount_record, page};
use longrun::catalog::{
    lookup_any_percent_record, resolve_genres, resolve_platform, GameEnumerator, GameFilter,
    GenreIds,
};
use serde_json::json;
use std::collections::BTreeSet;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

async fn collect_games(enumerator: &mut GameEnumerator<'_>) -> Vec<String> {
    let mut found = Vec::new();
    while let Some(game) = enumerator.next().await.expect("Enumeration failed") {
        found.push(game.name().to_string());
    }
    found
}

#[tokio::test]
async fn test_resolve_platform_stops_at_first_match() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Must never be requested
    Mock::given(method("GET"))
        .and(path("/platforms"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]), None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/platforms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([
                {"name": "PC", "id": "8gej2n93"},
                {"name": "GameCube", "id": "o1y9wo6q"}
            ]),
            Some(format!("{}/platforms?offset=20", base_url)),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let id = resolve_platform(&client, "GameCube")
        .await
        .expect("Resolve failed");

    assert_eq!(id.as_deref(), Some("o1y9wo6q"));
}

#[tokio::test]
async fn test_resolve_platform_not_found_after_all_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/platforms"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"name": "Wii", "id": "p3"}]),
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/platforms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"name": "gamecube", "id": "p1"}]),
            Some(format!("{}/platforms?offset=20", base_url)),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let id = resolve_platform(&client, "GameCube")
        .await
        .expect("Resolve failed");

    assert!(id.is_none());
}

#[tokio::test]
async fn test_resolve_genres_walks_whole_catalog() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/genres"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([
                {"id": "rac", "name": "Racing"},
                {"id": "x", "name": "X"}
            ]),
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/genres"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([
                {"id": "act", "name": "Action"},
                {"id": "puz", "name": "Puzzle"}
            ]),
            Some(format!("{}/genres?offset=20", base_url)),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let genres = resolve_genres(
        &client,
        &names(&["Action", "X"]),
        &names(&["Racing", "X", "Unknown"]),
    )
    .await
    .expect("Resolve failed");

    assert_eq!(genres.include, ids(&["act", "x"]));
    assert_eq!(genres.exclude, ids(&["rac"]));
}

#[tokio::test]
async fn test_enumerate_games_applies_genre_filters_in_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([
                game("g4", "Fourth", &["act"]),
                game("g5", "Fifth", &["puz"])
            ]),
            None,
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .and(query_param("platform", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([
                game("g1", "First", &["act", "rac"]),
                {"id": "g2", "names": {"international": "No Genres"}},
                game("g3", "Third", &["act"])
            ]),
            Some(format!("{}/games?platform=p1&offset=20", base_url)),
        )))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let filter = GameFilter::new(
        "p1",
        GenreIds {
            include: ids(&["act"]),
            exclude: ids(&["rac"]),
        },
        false,
    );
    let mut enumerator = GameEnumerator::new(&client, filter).unwrap();

    assert_eq!(collect_games(&mut enumerator).await, vec!["Third", "Fourth"]);
    assert_eq!(enumerator.games_seen(), 5);
    assert_eq!(enumerator.games_kept(), 2);
}

#[tokio::test]
async fn test_enumerate_games_without_include_keeps_all_with_genres() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([
                game("g1", "First", &[]),
                {"id": "g2", "names": {"international": "No Genres"}},
                game("g3", "Third", &["puz"])
            ]),
            None,
        )))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let filter = GameFilter::new("p1", GenreIds::default(), false);
    let mut enumerator = GameEnumerator::new(&client, filter).unwrap();

    assert_eq!(collect_games(&mut enumerator).await, vec!["First", "Third"]);
}

#[tokio::test]
async fn test_enumerate_games_exclusive_checks_details() {
    let mock_server = MockServer::start().await;

    mount_json(
        &mock_server,
        "/games",
        page(
            json!([
                game("solo", "Solo", &[]),
                game("multi", "Multi", &[]),
                {"id": "bare", "names": {"international": "Bare"}}
            ]),
            None,
        ),
    )
    .await;
    mount_json(
        &mock_server,
        "/games/solo",
        json!({"data": {"id": "solo", "platforms": ["p1"]}}),
    )
    .await;
    mount_json(
        &mock_server,
        "/games/multi",
        json!({"data": {"id": "multi", "platforms": ["p1", "pc"]}}),
    )
    .await;

    // Games filtered out by genre never get a detail fetch
    Mock::given(method("GET"))
        .and(path("/games/bare"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let filter = GameFilter::new("p1", GenreIds::default(), true);
    let mut enumerator = GameEnumerator::new(&client, filter).unwrap();

    assert_eq!(collect_games(&mut enumerator).await, vec!["Solo"]);
}

#[tokio::test]
async fn test_lookup_without_any_percent_category() {
    let mock_server = MockServer::start().await;

    mount_json(
        &mock_server,
        "/games/g1/categories",
        json!({"data": [{"name": "100%", "id": "c1"}]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/leaderboards/g1/category/c1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let record = lookup_any_percent_record(&client, "g1")
        .await
        .expect("Lookup failed");

    assert!(record.is_none());
}

#[tokio::test]
async fn test_lookup_with_empty_leaderboard() {
    let mock_server = MockServer::start().await;
    mount_record(&mock_server, "g1", None).await;

    let client = create_client(&mock_server);
    let record = lookup_any_percent_record(&client, "g1")
        .await
        .expect("Lookup failed");

    assert!(record.is_none());
}

#[tokio::test]
async fn test_lookup_returns_top_run_and_is_stable() {
    let mock_server = MockServer::start().await;
    mount_record(&mock_server, "g1", Some(7500.0)).await;

    let client = create_client(&mock_server);
    let first = lookup_any_percent_record(&client, "g1")
        .await
        .expect("Lookup failed");
    let second = lookup_any_percent_record(&client, "g1")
        .await
        .expect("Lookup failed");

    assert_eq!(first, Some(7500.0));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_lookup_retries_each_request_independently() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games/g1/categories"))
        .respond_with(ResponseTemplate::new(420))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/leaderboards/g1/category/g1-any"))
        .respond_with(ResponseTemplate::new(420))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    mount_record(&mock_server, "g1", Some(9000.0)).await;

    let client = create_client(&mock_server);
    let record = lookup_any_percent_record(&client, "g1")
        .await
        .expect("Lookup failed");

    assert_eq!(record, Some(9000.0));
    assert_eq!(client.throttle_count(), 2);
}
