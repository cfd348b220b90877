mod support;

use std::sync::Arc;

use serde_json::json;

use crudkit::{Filter, PageConfig, PagedList, SortOrder};
use support::client::StubClient;
use support::user::{user, user_json, User};

fn page_payload(items: serde_json::Value, total: u64) -> serde_json::Value {
    json!({ "items": items, "total": total })
}

fn list(client: &StubClient, config: PageConfig) -> PagedList<User> {
    PagedList::new(config, Arc::new(client.clone()))
}

#[tokio::test]
async fn fetch_populates_items_and_derived_totals() {
    let client = StubClient::new();
    client.push_ok(page_payload(
        json!([user_json(1, "Ann"), user_json(2, "Bob")]),
        42,
    ));

    let users = list(&client, PageConfig::new("/api/users"));
    users.fetch().await.unwrap();

    assert_eq!(users.items(), vec![user(1, "Ann"), user(2, "Bob")]);
    assert_eq!(users.total(), 42);
    assert_eq!(users.total_pages(), 5);
    assert!(!users.loading());
    assert_eq!(users.error(), None);
    assert_eq!(
        client.last_url(),
        Some("/api/users?page=1&pageSize=10".to_string())
    );
}

#[tokio::test]
async fn total_pages_follow_page_size_and_total() {
    // (page_size, total, expected total_pages)
    let grid = [
        (1, 0, 0),
        (1, 1, 1),
        (1, 99, 99),
        (1, 100, 100),
        (10, 0, 0),
        (10, 1, 1),
        (10, 99, 10),
        (10, 100, 10),
        (25, 0, 0),
        (25, 1, 1),
        (25, 99, 4),
        (25, 100, 4),
    ];

    for (page_size, total, expected) in grid {
        let client = StubClient::new();
        client.push_ok(page_payload(json!([]), total));

        let users = list(
            &client,
            PageConfig::new("/api/users")
                .initial_page_size(page_size)
                .eager(),
        );
        users.fetch().await.unwrap();

        assert_eq!(
            users.total_pages(),
            expected,
            "page_size {} total {}",
            page_size,
            total
        );
    }
}

#[tokio::test]
async fn toggle_sort_cycles_through_orders() {
    let client = StubClient::new();
    let users = list(&client, PageConfig::new("/api/users").eager());

    assert_eq!(users.sort(), None);

    users.toggle_sort("name").await.unwrap();
    let sort = users.sort().unwrap();
    assert_eq!((sort.field.as_str(), sort.order), ("name", SortOrder::Asc));

    users.toggle_sort("name").await.unwrap();
    assert_eq!(users.sort().unwrap().order, SortOrder::Desc);

    users.toggle_sort("name").await.unwrap();
    assert_eq!(users.sort().unwrap().order, SortOrder::Asc);

    // A different field restarts at ascending.
    users.toggle_sort("email").await.unwrap();
    let sort = users.sort().unwrap();
    assert_eq!((sort.field.as_str(), sort.order), ("email", SortOrder::Asc));
}

#[tokio::test]
async fn sort_change_resets_to_page_one_and_refetches() {
    let client = StubClient::new();
    client.push_ok(page_payload(json!([]), 100)); // initial fetch
    client.push_ok(page_payload(json!([]), 100)); // go_to_page(5)
    client.push_ok(page_payload(json!([]), 100)); // set_sort

    let users = list(&client, PageConfig::new("/api/users"));
    users.fetch().await.unwrap();
    users.go_to_page(5).await.unwrap();
    assert_eq!(users.page(), 5);

    users.set_sort("date", SortOrder::Desc).await.unwrap();

    assert_eq!(users.page(), 1);
    assert_eq!(
        client.last_url(),
        Some("/api/users?page=1&pageSize=10&sortField=date&sortOrder=desc".to_string())
    );
}

#[tokio::test]
async fn clear_sort_keeps_the_current_page() {
    let client = StubClient::new();
    client.push_ok(page_payload(json!([]), 100)); // set_sort
    client.push_ok(page_payload(json!([]), 100)); // go_to_page(3)
    client.push_ok(page_payload(json!([]), 100)); // clear_sort

    let users = list(&client, PageConfig::new("/api/users"));
    users.set_sort("name", SortOrder::Asc).await.unwrap();
    users.go_to_page(3).await.unwrap();

    users.clear_sort().await.unwrap();

    assert_eq!(users.sort(), None);
    assert_eq!(users.page(), 3);
    assert_eq!(
        client.last_url(),
        Some("/api/users?page=3&pageSize=10".to_string())
    );
}

#[tokio::test]
async fn query_string_serializes_filters_in_wire_order() {
    let client = StubClient::new();
    let users = list(&client, PageConfig::new("/api/users").eager());

    users.toggle_sort("name").await.unwrap();
    users.add_filter(Filter::new("status", "active")).await.unwrap();
    users.set_global_filter("smith").await.unwrap();

    let query = users.query_string();
    assert!(query.starts_with("page=1&pageSize=10&sortField=name&sortOrder=asc"));
    assert!(query.contains("search=smith"));
    assert!(query.contains("filters%5B0%5D%5Bfield%5D=status"));
    assert!(query.contains("filters%5B0%5D%5Bvalue%5D=active"));
    assert!(query.contains("filters%5B0%5D%5BmatchMode%5D=contains"));
}

#[tokio::test]
async fn go_to_page_out_of_range_is_a_no_op() {
    let client = StubClient::new();
    client.push_ok(page_payload(json!([]), 30));

    let users = list(&client, PageConfig::new("/api/users"));
    users.fetch().await.unwrap();
    assert_eq!(users.total_pages(), 3);

    users.go_to_page(0).await.unwrap();
    users.go_to_page(4).await.unwrap();

    assert_eq!(users.page(), 1);
    // Neither navigation issued a request.
    assert_eq!(client.requests().len(), 1);
}

#[tokio::test]
async fn next_and_previous_respect_bounds() {
    let client = StubClient::new();
    client.push_ok(page_payload(json!([]), 25));
    client.push_ok(page_payload(json!([]), 25));
    client.push_ok(page_payload(json!([]), 25));

    let users = list(&client, PageConfig::new("/api/users"));
    users.previous_page().await.unwrap();
    assert_eq!(users.page(), 1);
    assert!(client.requests().is_empty());

    users.fetch().await.unwrap();
    assert!(users.has_next_page());
    assert!(!users.has_previous_page());

    users.next_page().await.unwrap();
    users.next_page().await.unwrap();
    assert_eq!(users.page(), 3);

    users.next_page().await.unwrap();
    assert_eq!(users.page(), 3);
    assert_eq!(client.requests().len(), 3);
}

#[tokio::test]
async fn change_page_size_resets_page_and_rejects_zero() {
    let client = StubClient::new();
    client.push_ok(page_payload(json!([]), 100));
    client.push_ok(page_payload(json!([]), 100));
    client.push_ok(page_payload(json!([]), 100));

    let users = list(&client, PageConfig::new("/api/users"));
    users.fetch().await.unwrap();
    users.go_to_page(4).await.unwrap();

    users.change_page_size(0).await.unwrap();
    assert_eq!(users.page_size(), 10);
    assert_eq!(users.page(), 4);
    assert_eq!(client.requests().len(), 2);

    users.change_page_size(25).await.unwrap();
    assert_eq!(users.page_size(), 25);
    assert_eq!(users.page(), 1);
    assert_eq!(users.total_pages(), 4);
}

#[tokio::test]
async fn failed_fetch_keeps_items_and_records_error() {
    let client = StubClient::new();
    client.push_ok(page_payload(json!([user_json(1, "Ann")]), 1));
    client.push_fail("server exploded");

    let users = list(&client, PageConfig::new("/api/users"));
    users.fetch().await.unwrap();

    let error = users.fetch().await.unwrap_err();
    assert_eq!(error.to_string(), "server exploded");
    assert_eq!(users.items(), vec![user(1, "Ann")]);
    assert_eq!(users.error(), Some("server exploded".to_string()));
    assert!(!users.loading());
}

#[tokio::test]
async fn stale_page_response_is_discarded() {
    let client = StubClient::new();
    client.push_delayed_ok(50, page_payload(json!([user_json(1, "Ann")]), 1));
    client.push_ok(page_payload(json!([user_json(2, "Bob")]), 1));

    let users = list(&client, PageConfig::new("/api/users"));
    let (first, second) = tokio::join!(users.fetch(), users.fetch());
    first.unwrap();
    second.unwrap();

    assert_eq!(users.items(), vec![user(2, "Bob")]);
}

#[tokio::test]
async fn adding_a_filter_twice_updates_in_place() {
    let client = StubClient::new();
    let users = list(&client, PageConfig::new("/api/users").eager());

    users.add_filter(Filter::new("status", "active")).await.unwrap();
    users.add_filter(Filter::new("status", "archived")).await.unwrap();

    let filters = users.filters();
    assert_eq!(filters.len(), 1);
    assert_eq!(
        users.filter_value("status").map(|v| v.as_text()),
        Some("archived".to_string())
    );
}

#[tokio::test]
async fn clear_filters_drops_the_global_needle_too() {
    let client = StubClient::new();
    let users = list(&client, PageConfig::new("/api/users").eager());

    users.add_filter(Filter::new("status", "active")).await.unwrap();
    users.set_global_filter("smith").await.unwrap();

    users.clear_filters().await.unwrap();

    assert!(users.filters().is_empty());
    assert_eq!(users.global_filter(), "");
}

#[tokio::test]
async fn reset_restores_construction_defaults() {
    let client = StubClient::new();
    client.push_ok(page_payload(json!([]), 200));

    let users = list(
        &client,
        PageConfig::new("/api/users")
            .initial_page(2)
            .initial_page_size(20)
            .eager(),
    );
    users.fetch().await.unwrap();
    users.go_to_page(7).await.unwrap();
    users.change_page_size(50).await.unwrap();
    users.toggle_sort("name").await.unwrap();
    users.add_filter(Filter::new("status", "active")).await.unwrap();

    users.reset().await.unwrap();

    let pagination = users.pagination();
    assert_eq!(pagination.page, 2);
    assert_eq!(pagination.page_size, 20);
    assert_eq!(users.sort(), None);
    assert!(users.filters().is_empty());
}

#[tokio::test]
async fn full_flow_matches_the_wire_contract() {
    let client = StubClient::new();
    client.push_ok(page_payload(json!([user_json(1, "Ann")]), 100)); // fetch
    client.push_ok(page_payload(json!([user_json(2, "Bob")]), 100)); // page 5
    client.push_ok(page_payload(json!([user_json(3, "Cyd")]), 100)); // sort

    let users = list(&client, PageConfig::new("/api/users"));
    users.fetch().await.unwrap();
    users.go_to_page(5).await.unwrap();
    users.set_sort("date", SortOrder::Desc).await.unwrap();

    assert_eq!(users.page(), 1);
    assert_eq!(users.items(), vec![user(3, "Cyd")]);

    let urls: Vec<String> = client.requests().iter().map(|r| r.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            "/api/users?page=1&pageSize=10".to_string(),
            "/api/users?page=5&pageSize=10".to_string(),
            "/api/users?page=1&pageSize=10&sortField=date&sortOrder=desc".to_string(),
        ]
    );
}
