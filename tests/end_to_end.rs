//! The gateway over a real socket, driven by the SDK client.

use std::time::Duration;
use gateway_sdk::{GatewayClient, Resolved, OFFLINE_TAG, SOURCE_CODE_TAG};
use github_gateway::config::GatewayConfig;
use github_gateway::lifecycle::Shutdown;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

mod common;

use common::{config_for, refused_addr, server, start_upstream, TOKEN};

fn client_for(url: &str) -> GatewayClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    GatewayClient::with_client(http, url)
}

struct Running {
    url: String,
    shutdown: Shutdown,
    updates: mpsc::UnboundedSender<GatewayConfig>,
    task: tokio::task::JoinHandle<()>,
}

async fn launch(config: GatewayConfig, token: Option<&str>) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let gateway = server(config, token);

    let shutdown = Shutdown::new();
    let (updates, config_updates) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();
    let task = tokio::spawn(async move {
        gateway
            .run(listener, config_updates, server_shutdown)
            .await
            .unwrap();
    });

    Running {
        url: format!("http://{addr}"),
        shutdown,
        updates,
        task,
    }
}

impl Running {
    async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("server did not drain")
            .unwrap();
    }
}

#[tokio::test]
async fn portfolio_widgets_resolve_through_gateway() {
    let upstream = start_upstream(|target| match target {
        "/users/rootLocalGhost" => (
            200,
            json!({"login": "rootLocalGhost", "avatar_url": "https://x/y.png"}).to_string(),
        ),
        "/repos/rootLocalGhost/PixZen/languages" => (
            200,
            r#"{"Rust":52000,"TypeScript":9000,"CSS":800,"HTML":300,"Shell":12}"#.into(),
        ),
        "/repos/rootLocalGhost/ArtTic-LAB/languages" => (200, "{}".into()),
        _ => (404, r#"{"message":"Not Found"}"#.into()),
    })
    .await;
    let running = launch(config_for(&upstream.base_url()), Some(TOKEN)).await;
    let client = client_for(&running.url);

    assert_eq!(
        client.profile_image("rootLocalGhost").await,
        Resolved::Primary("https://x/y.png".to_string())
    );
    assert_eq!(
        client.profile_image("ghost-of-nobody").await,
        Resolved::Fallback("https://github.com/identicons/ghost-of-nobody.png".to_string())
    );

    assert_eq!(
        client.repo_languages("rootLocalGhost", "PixZen").await,
        Resolved::Primary(vec![
            "Rust".to_string(),
            "TypeScript".to_string(),
            "CSS".to_string(),
            "HTML".to_string(),
        ])
    );
    assert_eq!(
        client.repo_languages("rootLocalGhost", "ArtTic-LAB").await,
        Resolved::Fallback(vec![SOURCE_CODE_TAG.to_string()])
    );
    assert_eq!(
        client.repo_languages("rootLocalGhost", "ViveStream-Revived").await,
        Resolved::Fallback(vec![SOURCE_CODE_TAG.to_string()])
    );

    let health = client.health().await.unwrap();
    assert!(health.credential_configured);

    running.stop().await;
}

#[tokio::test]
async fn wire_format_over_http() {
    let upstream = start_upstream(|_| (404, r#"{"message":"Not Found"}"#.into())).await;
    let running = launch(config_for(&upstream.base_url()), Some(TOKEN)).await;
    let http = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = http
        .get(format!("{}/api/github?path=users/x", running.url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert!(res.headers().get("cache-control").is_none());
    assert!(res.headers().get("x-request-id").is_some());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": "GitHub API Error: 404", "details": {"message": "Not Found"}})
    );

    let res = http
        .get(format!("{}/api/github?path=", running.url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    running.stop().await;
}

#[tokio::test]
async fn unreachable_upstream_degrades_widgets() {
    let addr = refused_addr().await;
    let running = launch(config_for(&format!("http://{addr}")), Some(TOKEN)).await;
    let client = client_for(&running.url);

    // The gateway answers 500, so the client sees an error status.
    assert_eq!(
        client.repo_languages("rootLocalGhost", "PixZen").await,
        Resolved::Fallback(vec![SOURCE_CODE_TAG.to_string()])
    );
    assert!(client.profile_image("rootLocalGhost").await.is_fallback());

    running.stop().await;
}

#[tokio::test]
async fn unreachable_gateway_shows_offline() {
    let addr = refused_addr().await;
    let client = client_for(&format!("http://{addr}"));

    assert_eq!(
        client.repo_languages("rootLocalGhost", "PixZen").await,
        Resolved::Fallback(vec![OFFLINE_TAG.to_string()])
    );
}

#[tokio::test]
async fn config_updates_apply_while_serving() {
    let first = start_upstream(|_| (200, r#"{"from":"first"}"#.into())).await;
    let second = start_upstream(|_| (200, r#"{"from":"second"}"#.into())).await;
    let running = launch(config_for(&first.base_url()), Some(TOKEN)).await;
    let client = client_for(&running.url);

    assert_eq!(client.fetch("users/a").await.unwrap(), json!({"from": "first"}));

    running.updates.send(config_for(&second.base_url())).unwrap();

    let mut switched = false;
    for _ in 0..50 {
        if client.fetch("users/a").await.unwrap() == json!({"from": "second"}) {
            switched = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(switched, "reloaded config was never applied");

    running.stop().await;
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let upstream = start_upstream(|target| (200, json!({"target": target}).to_string())).await;
    let running = launch(config_for(&upstream.base_url()), Some(TOKEN)).await;

    let mut tasks = Vec::new();
    for i in 0..20 {
        let url = running.url.clone();
        tasks.push(tokio::spawn(async move {
            let client = client_for(&url);
            let value = client.fetch(&format!("users/u{i}")).await.unwrap();
            assert_eq!(value, json!({"target": format!("/users/u{i}")}));
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(upstream.requests().len(), 20);

    running.stop().await;
}
