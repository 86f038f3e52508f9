//! # Client Integration Tests
//!
//! End-to-end coverage through the real HTTP transport against a local mock
//! server: header handling, accessor mapping, typed payloads, and the
//! validation that must fail before any network traffic.

use hypixel_client::api::GuildQuery;
use hypixel_client::{ClientConfig, ClientError, HttpTransport, HypixelClient, Transport};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY_A: &str = "2931ba88-3ccd-4504-9d53-94021c723e06";
const KEY_B: &str = "4ccbc899-71c7-4554-994d-05638279e4a7";

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        lookup_url: format!("{}/uuid", server.uri()),
        ..Default::default()
    }
}

fn client_for(server: &MockServer) -> HypixelClient {
    HypixelClient::with_config(vec![KEY_A.to_string()], config_for(server)).unwrap()
}

fn key_header_count(requests: &[wiremock::Request]) -> usize {
    requests
        .iter()
        .filter(|request| {
            request
                .headers
                .keys()
                .any(|name| name.to_string().eq_ignore_ascii_case("api-key"))
        })
        .count()
}

#[tokio::test]
async fn player_lookup_resolves_username_then_fetches_stats() {
    let server = MockServer::start().await;
    let uuid = "069a79f444e94726a5befca90e38aaf5";

    Mock::given(method("GET"))
        .and(path("/uuid/GoogleSites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "id": uuid,
            "name": "GoogleSites"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/player"))
        .and(query_param("uuid", uuid))
        .and(header("API-Key", KEY_A))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "player": { "uuid": uuid, "displayname": "GoogleSites" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let player = client.player("GoogleSites").await.unwrap();

    assert_eq!(player["displayname"], "GoogleSites");
}

#[tokio::test]
async fn key_info_sends_the_pinned_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/key"))
        .and(header("API-Key", KEY_B))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "record": {
                "key": KEY_B,
                "owner": "069a79f444e94726a5befca90e38aaf5",
                "limit": 120,
                "queriesInPastMin": 3,
                "totalQueries": 4321
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The pool holds KEY_A; the lookup still goes out with KEY_B.
    let client = client_for(&server);
    let info = client.key_info(KEY_B).await.unwrap();

    assert_eq!(info.key, KEY_B);
    assert_eq!(info.limit, 120);
    assert_eq!(info.queries_in_past_min, 3);
}

#[tokio::test]
async fn resource_requests_carry_no_key_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resources/achievements"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "achievements": { "arcade": {} }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let achievements = client.resources().achievements().await.unwrap();
    assert!(achievements.get("arcade").is_some());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(key_header_count(&requests), 0);
}

#[tokio::test]
async fn authenticated_requests_carry_the_key_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boosters"))
        .and(header("API-Key", KEY_A))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "boosters": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.boosters().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(key_header_count(&requests), 1);
}

#[tokio::test]
async fn typed_payloads_deserialize() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/counts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "playerCount": 85000,
            "games": { "SKYBLOCK": { "players": 30000, "modes": { "hub": 9000 } } }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/punishmentstats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "watchdog_lastMinute": 3,
            "staff_rollingDaily": 1500,
            "watchdog_total": 6000000,
            "watchdog_rollingDaily": 4000,
            "staff_total": 2000000
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/skyblock/auctions"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "page": 2,
            "totalPages": 30,
            "totalAuctions": 58000,
            "lastUpdated": 1616843200000i64,
            "auctions": [ { "item_name": "Aspect of the End" } ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let counts = client.counts().await.unwrap();
    assert_eq!(counts.player_count, 85000);
    assert_eq!(counts.games["SKYBLOCK"].players, 30000);

    let punishments = client.punishment_stats().await.unwrap();
    assert_eq!(punishments.watchdog_last_minute, 3);
    assert_eq!(punishments.staff_total, 2000000);

    let auctions = client.skyblock().auctions(2).await.unwrap();
    assert_eq!(auctions.page, 2);
    assert_eq!(auctions.total_pages, 30);
    assert_eq!(auctions.auctions.len(), 1);
}

#[tokio::test]
async fn accessor_validation_fails_before_any_network_call() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let too_long = "x".repeat(33);
    assert!(matches!(
        client.guild(GuildQuery::Name(&too_long)).await,
        Err(ClientError::InvalidArgument { .. })
    ));
    assert!(matches!(
        client.guild(GuildQuery::Player("not-a-uuid")).await,
        Err(ClientError::InvalidArgument { .. })
    ));
    assert!(matches!(
        client.guild(GuildQuery::Id("short")).await,
        Err(ClientError::InvalidArgument { .. })
    ));
    assert!(matches!(
        client.uuid_of("bad name!").await,
        Err(ClientError::InvalidArgument { .. })
    ));
    assert!(matches!(
        client.username_of("dashed-uuid-not-allowed").await,
        Err(ClientError::InvalidArgument { .. })
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn upstream_failure_surfaces_masked_key_and_cause() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guild"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "cause": "Given guild does not exist"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.guild(GuildQuery::Name("Nobody")).await.unwrap_err();

    match err {
        ClientError::Upstream { key, cause } => {
            assert_eq!(cause, "Given guild does not exist");
            assert!(key.ends_with("94021c723e06"));
            assert!(!key.contains(&KEY_A[..8]));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn forbidden_status_is_an_invalid_key_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boosters"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "cause": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.boosters().await,
        Err(ClientError::InvalidKey)
    ));
}

#[tokio::test]
async fn repeated_calls_are_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/leaderboards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "leaderboards": { "ARENA": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.leaderboards().await.unwrap();
    client.leaderboards().await.unwrap();

    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn transport_reports_non_2xx_without_erroring() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/oops"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false
        })))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let response = transport
        .fetch(&server.uri(), "/oops", &[], None)
        .await
        .unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn transport_turns_non_json_bodies_into_null() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).unwrap();
    let response = transport
        .fetch(&server.uri(), "/empty", &[], Some(KEY_A))
        .await
        .unwrap();

    assert_eq!(response.status, 403);
    assert!(response.body.is_null());
}
