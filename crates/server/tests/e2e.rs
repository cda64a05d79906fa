use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup::{build_app, build_state};

struct TestServer {
    base_url: String,
    root: std::path::PathBuf,
    cfg: AppConfig,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// Boot the real startup wiring against a temp data dir and override file.
async fn start_server() -> anyhow::Result<TestServer> {
    let root = std::env::temp_dir().join(format!("catalog_e2e_{}", Uuid::new_v4()));
    let data_dir = root.join("data");
    tokio::fs::create_dir_all(&data_dir).await?;
    tokio::fs::write(
        data_dir.join("services.json"),
        serde_json::to_vec(&json!([
            {"id": 1, "name": "Reiki Healing", "description": "Energy healing", "price": 75.0},
            {"id": 2, "name": "Yoga Classes", "description": "All levels", "price": 75.0}
        ]))?,
    )
    .await?;
    // categories.json and providers.json deliberately missing

    let mut cfg = AppConfig::default();
    cfg.catalog.data_dir = data_dir.to_string_lossy().into_owned();
    cfg.catalog.override_path = root.join("overrides.json").to_string_lossy().into_owned();

    let base_url = serve(&cfg).await?;
    Ok(TestServer { base_url, root, cfg })
}

/// Build fresh state from `cfg` and serve it on an ephemeral port.
async fn serve(cfg: &AppConfig) -> anyhow::Result<String> {
    let state = build_state(cfg).await?;
    let app = build_app(state, cfg);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(format!("http://{}", addr))
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("reqwest client")
}

#[tokio::test]
async fn e2e_missing_collections_degrade_to_empty() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let categories = c.get(format!("{}/api/categories", app.base_url)).send().await?;
    assert_eq!(categories.status(), HttpStatusCode::OK);
    assert_eq!(categories.json::<serde_json::Value>().await?, json!([]));

    let listings = c.get(format!("{}/api/listings", app.base_url)).send().await?.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(listings.len(), 2);
    Ok(())
}

#[tokio::test]
async fn e2e_login_cookie_and_override_file() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/dashboard/services", app.base_url))
        .json(&json!({"name": "Life Coaching", "description": "Goals", "price": 150.0}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let res = c.post(format!("{}/auth/login", app.base_url))
        .json(&json!({"username": "provider123", "password": "service2024"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.post(format!("{}/dashboard/services", app.base_url))
        .json(&json!({"name": "Life Coaching", "description": "Goals", "price": 150.0}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["service"]["id"], 3);

    let res = c.delete(format!("{}/dashboard/services/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let saved: serde_json::Value = serde_json::from_slice(&tokio::fs::read(app.root.join("overrides.json")).await?)?;
    let slot = saved["services_data"].as_array().expect("slot written");
    assert_eq!(slot.len(), 3);
    assert_eq!(slot[0]["active"], false);
    Ok(())
}

#[tokio::test]
async fn e2e_override_layer_survives_restart() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.post(format!("{}/auth/login", app.base_url))
        .json(&json!({"username": "provider123", "password": "service2024"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.patch(format!("{}/dashboard/services/2", app.base_url))
        .json(&json!({"name": "Yoga Flow", "price": 80.0}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.delete(format!("{}/dashboard/services/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.post(format!("{}/dashboard/services", app.base_url))
        .json(&json!({"name": "Sound Bath", "description": "Gongs", "price": 60.0}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    // second process over the same data dir and override file
    let restarted = serve(&app.cfg).await?;
    let listings = c.get(format!("{}/api/listings", restarted)).send().await?.json::<Vec<serde_json::Value>>().await?;
    let names: Vec<&str> = listings.iter().filter_map(|l| l["name"].as_str()).collect();
    assert_eq!(names, vec!["Yoga Flow", "Sound Bath"]);
    assert_eq!(listings[0]["price"], 80.0);

    let res = c.get(format!("{}/api/listings/1", restarted)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.get(format!("{}/api/listings/3", restarted)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}
