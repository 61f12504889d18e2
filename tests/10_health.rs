mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let server = common::spawn_server().await?;

    let body = server
        .client
        .get(server.url("/"))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    assert_eq!(body["name"], "notes-api");
    assert!(body.get("version").is_some());
    Ok(())
}
