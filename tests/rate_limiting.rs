//! Rate-limit policy tests against a live server.

use std::sync::Arc;

use serde_json::Value;

use catalog_api::gate::auth::UserDirectory;

mod common;

const OWNER: u64 = 1; // premium subject
const MANAGER: u64 = 2; // standard subject, fails the ownership check

#[tokio::test]
async fn public_policy_rejects_past_the_ceiling() {
    let (store, _calls) = common::CountingStore::with_fixtures();
    let directory = Arc::new(UserDirectory::with_fixtures());

    let mut config = common::open_config();
    config.rate_limit.public_per_window = 3;

    let (addr, _shutdown) = common::spawn_server(config, store, directory).await;
    let client = common::client();
    let url = format!("http://{}/products", addr);

    for i in 0..3 {
        let res = client
            .get(&url)
            .header("x-user-id", OWNER)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200, "request {i} within ceiling");
    }

    let res = client
        .get(&url)
        .header("x-user-id", OWNER)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 429);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Too many requests. Please try again later.");
}

#[tokio::test]
async fn premium_subject_gets_the_raised_ceiling() {
    let (store, _calls) = common::CountingStore::with_fixtures();
    let directory = Arc::new(UserDirectory::with_fixtures());

    let mut config = common::open_config();
    config.rate_limit.authenticated_per_window = 2;
    config.rate_limit.premium_per_window = 4;

    let (addr, _shutdown) = common::spawn_server(config, store, directory).await;
    let client = common::client();
    let url = format!("http://{}/user/products", addr);

    for i in 0..4 {
        let res = client
            .get(&url)
            .header("x-user-id", OWNER)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200, "premium request {i} within ceiling");
    }

    let res = client
        .get(&url)
        .header("x-user-id", OWNER)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 429);
}

#[tokio::test]
async fn standard_subject_capped_below_premium() {
    let (store, _calls) = common::CountingStore::with_fixtures();
    let directory = Arc::new(UserDirectory::with_fixtures());

    let mut config = common::open_config();
    config.rate_limit.authenticated_per_window = 2;
    config.rate_limit.premium_per_window = 4;

    let (addr, _shutdown) = common::spawn_server(config, store, directory).await;
    let client = common::client();
    let url = format!("http://{}/user/products", addr);

    // The manager clears the throttle but fails the ownership check, so
    // the first two responses are 403. The limiter runs earlier and
    // still counts them; the third is cut off with 429.
    for i in 0..2 {
        let res = client
            .get(&url)
            .header("x-user-id", MANAGER)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 403, "standard request {i} within ceiling");
    }

    let res = client
        .get(&url)
        .header("x-user-id", MANAGER)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 429);
}

#[tokio::test]
async fn separate_subjects_do_not_share_buckets() {
    let (store, _calls) = common::CountingStore::with_fixtures();
    let directory = Arc::new(UserDirectory::with_fixtures());

    let mut config = common::open_config();
    config.rate_limit.authenticated_per_window = 1;
    config.rate_limit.premium_per_window = 1;

    let (addr, _shutdown) = common::spawn_server(config, store, directory).await;
    let client = common::client();
    let url = format!("http://{}/user/products", addr);

    let res = client
        .get(&url)
        .header("x-user-id", MANAGER)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);

    // A different subject id gets a fresh bucket.
    let res = client
        .get(&url)
        .header("x-user-id", OWNER)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn disabled_rate_limiting_never_throttles() {
    let (store, _calls) = common::CountingStore::with_fixtures();
    let directory = Arc::new(UserDirectory::with_fixtures());

    let mut config = common::open_config();
    config.rate_limit.enabled = false;
    config.rate_limit.public_per_window = 1;

    let (addr, _shutdown) = common::spawn_server(config, store, directory).await;
    let client = common::client();
    let url = format!("http://{}/products", addr);

    for _ in 0..5 {
        let res = client
            .get(&url)
            .header("x-user-id", OWNER)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }
}
