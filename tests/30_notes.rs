mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn notes_require_a_bearer_token() -> Result<()> {
    let server = common::spawn_server().await?;

    let missing = server.client.get(server.url("/api/notes")).send().await?;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(missing.json::<Value>().await?["code"], "UNAUTHENTICATED");

    let forged = server
        .client
        .get(server.url("/api/notes"))
        .bearer_auth("not-a-real-token")
        .send()
        .await?;
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);

    let create = server
        .client
        .post(server.url("/api/notes"))
        .json(&json!({ "title": "A" }))
        .send()
        .await?;
    assert_eq!(create.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn create_then_list_round_trip() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.user_token("a@x.com", "pw1").await?;

    let created = server.create_note(&token, "A", "B").await?;
    assert_eq!(created["ownerType"], "user");
    assert!(created["createdAt"].is_string());

    let notes = server.list_notes(&token).await?;
    assert!(notes
        .iter()
        .any(|n| n["title"] == "A" && n["content"] == "B" && n["id"] == created["id"]));
    Ok(())
}

#[tokio::test]
async fn create_without_body_defaults_to_empty() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.user_token("a@x.com", "pw1").await?;

    let res = server
        .client
        .post(server.url("/api/notes"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let note: Value = res.json().await?;
    assert_eq!(note["title"], "");
    assert_eq!(note["content"], "");
    Ok(())
}

#[tokio::test]
async fn update_replaces_content_and_stamps() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.user_token("a@x.com", "pw1").await?;
    let note = server.create_note(&token, "old", "old body").await?;
    let id = note["id"].as_str().unwrap();

    let res = server
        .client
        .put(server.url(&format!("/api/notes/{}", id)))
        .bearer_auth(&token)
        .json(&json!({ "title": "new", "content": "new body" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let updated: Value = res.json().await?;
    assert_eq!(updated["title"], "new");
    assert_eq!(updated["content"], "new body");
    assert!(updated["updatedAt"].is_string());
    assert_eq!(updated["ownerId"], note["ownerId"]);
    Ok(())
}

#[tokio::test]
async fn foreign_notes_are_forbidden() -> Result<()> {
    let server = common::spawn_server().await?;
    let owner = server.user_token("owner@x.com", "pw").await?;
    let intruder = server.user_token("intruder@x.com", "pw").await?;
    let note = server.create_note(&owner, "mine", "secret").await?;
    let path = format!("/api/notes/{}", note["id"].as_str().unwrap());

    let update = server
        .client
        .put(server.url(&path))
        .bearer_auth(&intruder)
        .json(&json!({ "title": "pwned", "content": "" }))
        .send()
        .await?;
    assert_eq!(update.status(), StatusCode::FORBIDDEN);
    let body: Value = update.json().await?;
    assert!(body.get("title").is_none());

    let delete = server
        .client
        .delete(server.url(&path))
        .bearer_auth(&intruder)
        .send()
        .await?;
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);

    assert!(server.list_notes(&intruder).await?.is_empty());
    let owned = server.list_notes(&owner).await?;
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0]["title"], "mine");
    Ok(())
}

#[tokio::test]
async fn delete_is_strict() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.user_token("a@x.com", "pw1").await?;
    let note = server.create_note(&token, "x", "y").await?;
    let path = format!("/api/notes/{}", note["id"].as_str().unwrap());

    let first = server.client.delete(server.url(&path)).bearer_auth(&token).send().await?;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.json::<Value>().await?, json!({ "success": true }));

    let second = server.client.delete(server.url(&path)).bearer_auth(&token).send().await?;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let bogus = server
        .client
        .delete(server.url("/api/notes/not-a-uuid"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(bogus.status(), StatusCode::NOT_FOUND);
    Ok(())
}
