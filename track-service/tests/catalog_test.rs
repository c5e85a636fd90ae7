mod common;

use common::TestApp;

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn list_returns_newest_first() {
    let app = TestApp::spawn().await;

    let first = app.upload_track("First", "Artist A").await;
    tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
    let second = app.upload_track("Second", "Artist B").await;

    let response = app.get("/api/songs").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let songs = body["songs"].as_array().unwrap();
    assert_eq!(songs.len(), 2);
    assert_eq!(songs[0]["id"], second.as_str());
    assert_eq!(songs[1]["id"], first.as_str());

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn get_track_by_id() {
    let app = TestApp::spawn().await;
    let id = app.upload_track("Song", "Band").await;

    let response = app.get(&format!("/api/songs/{}", id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["song"]["title"], "Song");

    let missing = app.get("/api/songs/does-not-exist").await;
    assert_eq!(missing.status().as_u16(), 404);
    let body: serde_json::Value = missing.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Track not found");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn search_matches_title_or_artist_case_insensitively() {
    let app = TestApp::spawn().await;
    app.upload_track("Bohemian Rhapsody", "Queen").await;
    app.upload_track("Killer Queen", "Queen").await;
    app.upload_track("Imagine", "John Lennon").await;

    let body: serde_json::Value = app.get("/api/search?q=queen").await.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    let body: serde_json::Value = app.get("/api/search?q=LENNON").await.json().await.unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Imagine");

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn search_treats_query_literally() {
    let app = TestApp::spawn().await;
    app.upload_track("Song (Live)", "Band").await;
    app.upload_track("Other", "Band").await;

    let body: serde_json::Value = app
        .get("/api/search?q=%28live%29")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["results"].as_array().unwrap().len(), 1);

    let body: serde_json::Value = app.get("/api/search?q=.%2A").await.json().await.unwrap();
    assert!(body["results"].as_array().unwrap().is_empty());

    app.cleanup().await;
}
