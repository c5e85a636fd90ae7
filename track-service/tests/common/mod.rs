#![allow(dead_code)]

use reqwest::multipart;
use track_service::config::TrackConfig;
use track_service::services::MongoDb;
use track_service::startup::Application;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
    pub upload_dir: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");

        let db_name = format!("track_test_{}", Uuid::new_v4());
        let upload_dir = format!("target/test-uploads-{}", Uuid::new_v4());

        let mut config = TrackConfig::load().expect("Failed to load configuration");
        config.common.host = "127.0.0.1".parse().unwrap();
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();
        config.storage.upload_dir = upload_dir.clone();
        config.storage.max_file_size = 64 * 1024;

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
            upload_dir,
            client,
        }
    }

    pub async fn upload(&self, form: multipart::Form) -> reqwest::Response {
        self.client
            .post(format!("{}/api/songs", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Upload a track with a small fake mp3 and return its id.
    pub async fn upload_track(&self, title: &str, artist: &str) -> String {
        let response = self.upload(track_form(title, artist)).await;
        assert_eq!(response.status().as_u16(), 201);

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        body["song"]["id"].as_str().unwrap().to_string()
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_empty(&self, path: &str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Cleanup test resources (database and upload directory).
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
        let _ = tokio::fs::remove_dir_all(&self.upload_dir).await;
    }
}

pub fn file_part(bytes: Vec<u8>, file_name: &str, mime: &str) -> multipart::Part {
    multipart::Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .unwrap()
}

pub fn track_form(title: &str, artist: &str) -> multipart::Form {
    multipart::Form::new()
        .text("title", title.to_string())
        .text("artist", artist.to_string())
        .part("audio", file_part(vec![0xFF; 128], "song.mp3", "audio/mpeg"))
}
