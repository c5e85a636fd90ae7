mod common;

use common::TestApp;
use serde_json::json;

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn like_increments_counter() {
    let app = TestApp::spawn().await;
    let id = app.upload_track("Song", "Band").await;

    for expected in 1..=3 {
        let response = app.post_empty(&format!("/api/songs/{}/like", id)).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["song"]["likes"], expected);
    }

    let missing = app.post_empty("/api/songs/missing/like").await;
    assert_eq!(missing.status().as_u16(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn comments_are_appended_in_order() {
    let app = TestApp::spawn().await;
    let id = app.upload_track("Song", "Band").await;
    let path = format!("/api/songs/{}/comments", id);

    let response = app
        .post_json(&path, json!({ "text": "first!", "author": "ali" }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app.post_json(&path, json!({ "text": "second" })).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    let comments = body["song"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["text"], "first!");
    assert_eq!(comments[0]["author"], "ali");
    assert_eq!(comments[1]["author"], "Anonymous");
    assert_eq!(comments[1]["likes"], 0);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn blank_comment_is_rejected() {
    let app = TestApp::spawn().await;
    let id = app.upload_track("Song", "Band").await;

    let response = app
        .post_json(&format!("/api/songs/{}/comments", id), json!({ "text": "   " }))
        .await;
    assert_eq!(response.status().as_u16(), 422);

    let body: serde_json::Value = app
        .get(&format!("/api/songs/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert!(body["song"]["comments"].as_array().unwrap().is_empty());

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn comment_on_missing_track_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/songs/missing/comments", json!({ "text": "hello" }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    app.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires running MongoDB
async fn like_comment_increments_only_that_comment() {
    let app = TestApp::spawn().await;
    let id = app.upload_track("Song", "Band").await;
    let path = format!("/api/songs/{}/comments", id);

    app.post_json(&path, json!({ "text": "one" })).await;
    let body: serde_json::Value = app
        .post_json(&path, json!({ "text": "two" }))
        .await
        .json()
        .await
        .unwrap();
    let second_id = body["song"]["comments"][1]["id"].as_str().unwrap().to_string();

    let response = app
        .post_empty(&format!("/api/songs/{}/comments/{}/like", id, second_id))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["song"]["comments"][0]["likes"], 0);
    assert_eq!(body["song"]["comments"][1]["likes"], 1);

    let missing_comment = app
        .post_empty(&format!("/api/songs/{}/comments/nope/like", id))
        .await;
    assert_eq!(missing_comment.status().as_u16(), 404);
    let body: serde_json::Value = missing_comment.json().await.unwrap();
    assert_eq!(body["error"], "Comment not found");

    let missing_track = app
        .post_empty(&format!("/api/songs/missing/comments/{}/like", second_id))
        .await;
    let body: serde_json::Value = missing_track.json().await.unwrap();
    assert_eq!(body["error"], "Track not found");

    app.cleanup().await;
}
