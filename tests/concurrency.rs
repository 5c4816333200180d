//! Concurrency properties of issuance and one-time-view resolution.

mod common;

use shorty::application::services::{CreateLink, Resolution};
use shorty::domain::entities::NewClick;
use shorty::domain::repositories::{ClickRepository, LinkRepository};

#[tokio::test(flavor = "multi_thread")]
async fn test_one_time_view_exactly_one_redirect() {
    let (state, _rx, _store) = common::create_test_state();

    let link = state
        .link_service
        .create_link(CreateLink {
            target_url: "https://example.com/secret".to_string(),
            view_once: true,
            ..Default::default()
        })
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let resolver = state.resolver_service.clone();
        let code = link.code.clone();
        handles.push(tokio::spawn(
            async move { resolver.resolve(&code).await.unwrap() },
        ));
    }

    let mut redirects = 0;
    let mut expired = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Resolution::Redirect(_) => redirects += 1,
            Resolution::Expired => expired += 1,
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    assert_eq!(redirects, 1);
    assert_eq!(expired, 15);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_custom_alias_single_winner() {
    let (state, _rx, _store) = common::create_test_state();

    let mut handles = Vec::new();
    for i in 0..8 {
        let link_service = state.link_service.clone();
        handles.push(tokio::spawn(async move {
            link_service
                .create_link(CreateLink {
                    target_url: format!("https://example.com/{i}"),
                    custom_code: Some("contested".to_string()),
                    ..Default::default()
                })
                .await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(shorty::AppError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_generated_codes_all_unique() {
    let (state, _rx, store) = common::create_test_state();

    let mut handles = Vec::new();
    for i in 0..32 {
        let link_service = state.link_service.clone();
        handles.push(tokio::spawn(async move {
            link_service
                .create_link(CreateLink {
                    target_url: format!("https://example.com/{i}"),
                    ..Default::default()
                })
                .await
                .unwrap()
        }));
    }

    let mut codes = std::collections::HashSet::new();
    for handle in handles {
        let link = handle.await.unwrap();
        assert!(codes.insert(link.code.clone()), "duplicate code issued");

        // Round-trip: every issued code resolves immediately.
        let found = store.find_by_code(&link.code).await.unwrap();
        assert!(found.is_some());
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_clicks_keep_counter_consistent() {
    let (state, _rx, store) = common::create_test_state();

    let link = common::create_link(&state, "https://example.com", None).await;

    let mut handles = Vec::new();
    for _ in 0..50 {
        let store = store.clone();
        let link_id = link.id;
        handles.push(tokio::spawn(async move {
            store
                .record_click(NewClick {
                    link_id,
                    ip: None,
                    user_agent: None,
                    referer: None,
                    country: None,
                })
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    // The denormalized counter equals the number of recorded events.
    let stored = store.find_by_code(&link.code).await.unwrap().unwrap();
    assert_eq!(stored.click_count, 50);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_counter_matches_event_count_for_owner() {
    let (state, _rx, store) = common::create_test_state();

    let (user_id, _token) = common::register_user(&state, "owner@example.com").await;
    let link = common::create_link(&state, "https://example.com", Some(user_id)).await;

    let mut handles = Vec::new();
    for _ in 0..20 {
        let store = store.clone();
        let link_id = link.id;
        handles.push(tokio::spawn(async move {
            store
                .record_click(NewClick {
                    link_id,
                    ip: None,
                    user_agent: None,
                    referer: None,
                    country: None,
                })
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let stored = store.find_by_code(&link.code).await.unwrap().unwrap();
    let now = chrono::Utc::now();
    let events = store
        .count_between(
            user_id,
            now - chrono::Duration::hours(1),
            now + chrono::Duration::hours(1),
        )
        .await
        .unwrap();

    assert_eq!(stored.click_count, 20);
    assert_eq!(events, stored.click_count);
}
