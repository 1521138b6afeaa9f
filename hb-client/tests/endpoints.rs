// hb-client/tests/endpoints.rs
// Runs both clients against an in-process axum server

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use hb_client::{
    ClientConfig, ClientError, HumbleClient, KeyRedeemer, OwnedAppsSource, RedeemMode,
    RedeemOutcome, RedeemRequest, SteamClient,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;

async fn redeem_handler(
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    let cookie = headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if cookie != "_simpleauth_sess=abc" {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let body = match (form.get("keytype").map(String::as_str), form.get("gift")) {
        (Some("sold_out_steam"), _) => json!({"success": false, "error_msg": "Sold out"}),
        (Some(_), Some(_)) => json!({"success": true, "giftkey": format!("gift-{}", form["keyindex"])}),
        (Some(_), None) => json!({"success": true, "key": format!("{}-{}", form["key"], form["keyindex"])}),
        (None, _) => json!({"success": false}),
    };
    Ok(Json(body))
}

async fn userdata_handler() -> Json<Value> {
    Json(json!({"rgOwnedPackages": [100], "rgOwnedApps": [440, 570]}))
}

async fn slow_userdata_handler() -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    Json(json!({"rgOwnedPackages": [], "rgOwnedApps": [1]}))
}

async fn slow_redeem_handler() -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(1500)).await;
    Json(json!({"success": true, "key": "LATE"}))
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/humbler/redeemkey", post(redeem_handler))
        .route("/slow/humbler/redeemkey", post(slow_redeem_handler))
        .route("/dynamicstore/userdata", get(userdata_handler))
        .route("/slow/dynamicstore/userdata", get(slow_userdata_handler))
        .route("/broken/dynamicstore/userdata", get(|| async { StatusCode::BAD_GATEWAY }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn humble(base: &str, cookie: &str) -> HumbleClient {
    let config = ClientConfig::new()
        .with_humble_base_url(base)
        .with_humble_cookie(cookie)
        .with_redeem_timeout(5);
    HumbleClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_redeem_key() {
    let base = spawn_server().await;
    let client = humble(&base, "_simpleauth_sess=abc");

    let outcome = client
        .redeem(&RedeemRequest::new("game_a_steam", "g1", 3), RedeemMode::Key)
        .await
        .unwrap();
    assert_eq!(outcome, RedeemOutcome::Revealed { key: "g1-3".to_string() });
}

#[tokio::test]
async fn test_redeem_gift_builds_link_from_base() {
    let base = spawn_server().await;
    let client = humble(&base, "_simpleauth_sess=abc");

    let outcome = client
        .redeem(&RedeemRequest::new("game_a_steam", "g1", 0), RedeemMode::Gift)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        RedeemOutcome::GiftLink {
            url: format!("{base}/gift?key=gift-0")
        }
    );
}

#[tokio::test]
async fn test_redeem_rejected() {
    let base = spawn_server().await;
    let client = humble(&base, "_simpleauth_sess=abc");

    let outcome = client
        .redeem(&RedeemRequest::new("sold_out_steam", "g1", 1), RedeemMode::Key)
        .await
        .unwrap();
    assert_eq!(outcome, RedeemOutcome::Rejected { message: "Sold out".to_string() });
}

#[tokio::test]
async fn test_redeem_without_session() {
    let base = spawn_server().await;
    let client = humble(&base, "nope=1");

    let err = client
        .redeem(&RedeemRequest::new("game_a_steam", "g1", 0), RedeemMode::Key)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}

#[tokio::test]
async fn test_redeem_timeout() {
    let base = spawn_server().await;
    let config = ClientConfig::new()
        .with_humble_base_url(format!("{base}/slow"))
        .with_redeem_timeout(1);
    let client = HumbleClient::new(&config).unwrap();

    let err = client
        .redeem(&RedeemRequest::new("game_a_steam", "g1", 0), RedeemMode::Key)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn test_owned_apps_union() {
    let base = spawn_server().await;
    let client = SteamClient::new(&ClientConfig::new().with_steam_base_url(&base)).unwrap();

    let owned = client.owned_apps().await.unwrap();
    assert_eq!(owned, vec![100, 440, 570]);
}

#[tokio::test]
async fn test_owned_apps_timeout() {
    let base = spawn_server().await;
    let config = ClientConfig::new()
        .with_steam_base_url(format!("{base}/slow"))
        .with_steam_timeout_ms(50);
    let client = SteamClient::new(&config).unwrap();

    let err = client.owned_apps().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn test_owned_apps_bad_status() {
    let base = spawn_server().await;
    let config = ClientConfig::new().with_steam_base_url(format!("{base}/broken"));
    let client = SteamClient::new(&config).unwrap();

    let err = client.owned_apps().await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 502, .. }));
}
