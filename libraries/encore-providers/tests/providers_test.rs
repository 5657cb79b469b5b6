//! Provider tests against mock HTTP servers.

use encore_core::{
    EncoreError, LyricsProvider, PlaylistProvider, RequesterId, SearchProvider, SearchSource,
};
use encore_providers::{
    LavalinkClient, LavalinkConfig, LyricsClient, ProviderError, SpotifyClient, SpotifyConfig,
};
use encore_resolver::Resolver;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

fn lavalink_config(server: &MockServer) -> LavalinkConfig {
    let address = server.address();
    LavalinkConfig {
        host: address.ip().to_string(),
        port: address.port(),
        password: "secret".to_string(),
        secure: false,
    }
}

fn lavalink_track(encoded: &str, title: &str, author: &str) -> serde_json::Value {
    json!({
        "encoded": encoded,
        "info": {
            "identifier": encoded,
            "isSeekable": true,
            "author": author,
            "length": 200000,
            "isStream": false,
            "position": 0,
            "title": title,
            "uri": format!("https://www.youtube.com/watch?v={}", encoded),
            "artworkUrl": null,
            "isrc": null,
            "sourceName": "youtube"
        },
        "pluginInfo": {},
        "userData": {}
    })
}

fn spotify_config(server: &MockServer) -> SpotifyConfig {
    SpotifyConfig::new("client", "shh").with_base_urls(server.uri(), server.uri())
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", "Basic Y2xpZW50OnNoaA=="))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-1",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn spotify_item(name: &str, artist: &str) -> serde_json::Value {
    json!({ "track": { "name": name, "artists": [{ "name": artist }, { "name": "Featured" }] } })
}

// =============================================================================
// Lavalink
// =============================================================================

mod lavalink {
    use super::*;

    #[tokio::test]
    async fn search_sends_prefixed_identifier_and_password() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/loadtracks"))
            .and(query_param("identifier", "ytmsearch:one more time"))
            .and(header("authorization", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "loadType": "search",
                "data": [
                    lavalink_track("aaa", "One More Time", "Daft Punk"),
                    lavalink_track("bbb", "One More Time (Live)", "Daft Punk"),
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LavalinkClient::new(&lavalink_config(&server)).unwrap();
        let results = client
            .search(SearchSource::YouTubeMusic, "one more time")
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "One More Time");
        assert_eq!(results[0].play_uri, "aaa");
        assert_eq!(
            results[0].source_uri.as_deref(),
            Some("https://www.youtube.com/watch?v=aaa")
        );
        assert!(results[0].artwork_uri.is_none());
    }

    #[tokio::test]
    async fn direct_link_loads_single_track() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/loadtracks"))
            .and(query_param("identifier", "https://youtu.be/ccc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "loadType": "track",
                "data": lavalink_track("ccc", "Linked", "Someone")
            })))
            .mount(&server)
            .await;

        let client = LavalinkClient::new(&lavalink_config(&server)).unwrap();
        let results = client
            .search(SearchSource::Direct, "https://youtu.be/ccc")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Linked");
    }

    #[tokio::test]
    async fn playlist_result_is_flattened() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/loadtracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "loadType": "playlist",
                "data": {
                    "info": { "name": "Mix", "selectedTrack": -1 },
                    "pluginInfo": {},
                    "tracks": [
                        lavalink_track("p1", "First", "A"),
                        lavalink_track("p2", "Second", "B"),
                    ]
                }
            })))
            .mount(&server)
            .await;

        let client = LavalinkClient::new(&lavalink_config(&server)).unwrap();
        let results = client.load_tracks("https://youtube.com/playlist?list=x").await.unwrap();

        let titles: Vec<_> = results.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn empty_result_is_no_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/loadtracks"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "loadType": "empty", "data": {} })),
            )
            .mount(&server)
            .await;

        let client = LavalinkClient::new(&lavalink_config(&server)).unwrap();
        let results = client.search(SearchSource::YouTube, "zzzz").await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn load_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/loadtracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "loadType": "error",
                "data": { "message": "This video is private", "severity": "common", "cause": "x" }
            })))
            .mount(&server)
            .await;

        let client = LavalinkClient::new(&lavalink_config(&server)).unwrap();

        match client.load_tracks("ytsearch:private").await {
            Err(ProviderError::LoadFailed(message)) => assert_eq!(message, "This video is private"),
            other => panic!("expected LoadFailed, got {:?}", other),
        }
        let via_trait = client.search(SearchSource::YouTube, "private").await;
        assert!(matches!(via_trait, Err(EncoreError::Provider(_))));
    }

    #[tokio::test]
    async fn wrong_password_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/loadtracks"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let client = LavalinkClient::new(&lavalink_config(&server)).unwrap();

        assert!(matches!(
            client.load_tracks("ytsearch:x").await,
            Err(ProviderError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn availability_follows_version_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version"))
            .and(header("authorization", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("4.0.8\n"))
            .mount(&server)
            .await;

        let client = LavalinkClient::new(&lavalink_config(&server)).unwrap();

        assert_eq!(client.version().await.unwrap(), "4.0.8");
        assert!(client.is_available().await);
    }

    #[tokio::test]
    async fn unreachable_node_is_unavailable() {
        let closed_port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = LavalinkConfig {
            port: closed_port,
            ..LavalinkConfig::default()
        };

        let client = LavalinkClient::new(&config).unwrap();

        assert!(!client.is_available().await);
        assert!(matches!(
            client.search(SearchSource::YouTube, "x").await,
            Err(EncoreError::Network(_))
        ));
    }
}

// =============================================================================
// Spotify
// =============================================================================

mod spotify {
    use super::*;

    #[tokio::test]
    async fn lists_items_across_pages_and_skips_missing_tracks() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/playlists/pl1/tracks"))
            .and(header("authorization", "Bearer token-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    spotify_item("Around the World", "Daft Punk"),
                    { "track": null },
                    spotify_item("Digital Love", "Daft Punk"),
                ],
                "next": format!("{}/v1/playlists/pl1/tracks-page-2", server.uri())
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/playlists/pl1/tracks-page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [spotify_item("Veridis Quo", "Daft Punk")],
                "next": null
            })))
            .mount(&server)
            .await;

        let client = SpotifyClient::new(spotify_config(&server)).unwrap();
        let items = client.list_items("pl1").await.unwrap();

        let queries: Vec<_> = items.iter().map(|item| item.search_query()).collect();
        assert_eq!(
            queries,
            vec![
                "Around the World Daft Punk",
                "Digital Love Daft Punk",
                "Veridis Quo Daft Punk",
            ]
        );
    }

    #[tokio::test]
    async fn token_is_reused_until_expiry() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;

        Mock::given(method("GET"))
            .and(path("/v1/playlists/pl1/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [spotify_item("Song", "Band")],
                "next": null
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = SpotifyClient::new(spotify_config(&server)).unwrap();
        client.list_items("pl1").await.unwrap();
        client.list_items("pl1").await.unwrap();
    }

    #[tokio::test]
    async fn rejected_credentials_are_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_client" })),
            )
            .mount(&server)
            .await;

        let client = SpotifyClient::new(spotify_config(&server)).unwrap();

        assert!(matches!(
            client.playlist_items("pl1").await,
            Err(ProviderError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn missing_playlist_is_server_error() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/v1/playlists/gone/tracks"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&server)
            .await;

        let client = SpotifyClient::new(spotify_config(&server)).unwrap();

        assert!(matches!(
            client.playlist_items("gone").await,
            Err(ProviderError::Server { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn provider_recognizes_playlist_links() {
        let server = MockServer::start().await;
        let client = SpotifyClient::new(spotify_config(&server)).unwrap();

        assert_eq!(
            client.playlist_id("https://open.spotify.com/playlist/abc?si=1"),
            Some("abc".to_string())
        );
        assert_eq!(client.playlist_id("some song"), None);
    }
}

// =============================================================================
// Lyrics
// =============================================================================

mod lyrics {
    use super::*;

    #[tokio::test]
    async fn found_lyrics_are_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/Daft%20Punk/Digital%20Love"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "lyrics": "\nWhy don't you play the game?\n" })),
            )
            .mount(&server)
            .await;

        let client = LyricsClient::new(&server.uri()).unwrap();
        let lyrics = client.search("Digital Love", "Daft Punk").await.unwrap().unwrap();

        assert_eq!(lyrics.title, "Digital Love");
        assert_eq!(lyrics.text, "Why don't you play the game?");
    }

    #[tokio::test]
    async fn not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "No lyrics found" })),
            )
            .mount(&server)
            .await;

        let client = LyricsClient::new(&server.uri()).unwrap();

        assert_eq!(client.search("Unknown", "Nobody").await.unwrap(), None);
    }
}

// =============================================================================
// Resolution through real adapters
// =============================================================================

#[tokio::test]
async fn spotify_playlist_resolves_through_lavalink() {
    let lavalink = MockServer::start().await;
    let spotify = MockServer::start().await;

    mount_token(&spotify, 1).await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/mix/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [spotify_item("Alpha", "One"), spotify_item("Missing", "Two"), spotify_item("Gamma", "Three")],
            "next": null
        })))
        .mount(&spotify)
        .await;

    for (query, encoded) in [("ytmsearch:Alpha One", "enc-a"), ("ytmsearch:Gamma Three", "enc-g")] {
        Mock::given(method("GET"))
            .and(path("/v4/loadtracks"))
            .and(query_param("identifier", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "loadType": "search",
                "data": [lavalink_track(encoded, query, "Artist")]
            })))
            .mount(&lavalink)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/v4/loadtracks"))
        .and(query_param("identifier", "ytmsearch:Missing Two"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "loadType": "empty", "data": {} })),
        )
        .mount(&lavalink)
        .await;

    let search = Arc::new(LavalinkClient::new(&lavalink_config(&lavalink)).unwrap());
    let playlists = Arc::new(SpotifyClient::new(spotify_config(&spotify)).unwrap());
    let resolver = Resolver::new(search).with_playlists(playlists);

    let tracks = resolver
        .resolve("https://open.spotify.com/playlist/mix?si=share", RequesterId::new(9))
        .await
        .unwrap();

    let handles: Vec<_> = tracks.iter().map(|t| t.play_uri()).collect();
    assert_eq!(handles, vec!["enc-a", "enc-g"]);
    assert!(tracks.iter().all(|t| t.requester() == RequesterId::new(9)));
}
