use common_services::api::listing::interfaces::{AlbumListingQuery, PhotoListingQuery};
use common_services::api::listing::service::{list_albums, list_photos};
use common_services::testing::{
    FakePhotoLibrary, remote_item, seed_connected_user, test_pool, test_settings,
};
use tempfile::TempDir;

fn filtered_query(user_id: i64, page: i64, token: Option<&str>) -> PhotoListingQuery {
    PhotoListingQuery {
        user_id,
        page,
        next_page_token: token.map(ToOwned::to_owned),
        date_from: Some("2021-01-01".to_owned()),
        date_to: Some("2021-02-01".to_owned()),
        is_range: true,
        ..PhotoListingQuery::default()
    }
}

#[tokio::test]
async fn walking_forward_records_tokens_for_backward_navigation() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let library = FakePhotoLibrary::with_items(vec![remote_item("ext-1", "one.jpg")]);

    // Page 0: nothing saved, no previous token.
    let page0 = list_photos(&pool, &settings, &library, &filtered_query(user_id, 0, None))
        .await
        .unwrap();
    assert_eq!(page0.prev_page_token, "");
    assert_eq!(page0.items.len(), 1);

    // Pages 1 and 2 arrive with the token that led there.
    list_photos(
        &pool,
        &settings,
        &library,
        &filtered_query(user_id, 1, Some("T1")),
    )
    .await
    .unwrap();
    list_photos(
        &pool,
        &settings,
        &library,
        &filtered_query(user_id, 2, Some("T2")),
    )
    .await
    .unwrap();

    // From page 2 the previous page resolves to the token saved for page 1.
    let page2 = list_photos(
        &pool,
        &settings,
        &library,
        &filtered_query(user_id, 2, Some("T2")),
    )
    .await
    .unwrap();
    assert_eq!(page2.prev_page_token, "T1");
}

#[tokio::test]
async fn different_filters_use_separate_token_caches() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let library = FakePhotoLibrary::with_items(vec![remote_item("ext-1", "one.jpg")]);

    list_photos(
        &pool,
        &settings,
        &library,
        &filtered_query(user_id, 1, Some("T1")),
    )
    .await
    .unwrap();

    // Same page position, different date range: the cache must miss.
    let mut other_filters = filtered_query(user_id, 2, None);
    other_filters.date_from = Some("1999-01-01".to_owned());
    let page = list_photos(&pool, &settings, &library, &other_filters)
        .await
        .unwrap();
    assert_eq!(page.prev_page_token, "");
}

#[tokio::test]
async fn shared_albums_are_listed_with_their_member_counts() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let mut library = FakePhotoLibrary::default();
    library.add_album("album-a", "Alps", &["1", "2", "3"]);

    let page = list_albums(
        &settings,
        &library,
        &AlbumListingQuery {
            user_id,
            page_token: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Alps");
    assert_eq!(page.items[0].media_count, 3);
}
