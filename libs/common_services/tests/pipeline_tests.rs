use common_services::importer::{
    AlbumMembers, Destination, ImportContext, ImportError, import_one,
};
use common_services::photos_client::PhotoLibraryError;
use common_services::testing::{
    FakePhotoLibrary, remote_item, seed_connected_user, seed_gallery_in_circle, test_pool,
    test_settings,
};
use tempfile::TempDir;

fn plain_context(destination: Destination) -> ImportContext {
    ImportContext {
        destination,
        album_mapping: Vec::new(),
    }
}

#[tokio::test]
async fn importing_an_item_creates_and_attaches_the_record() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, circle_id) = seed_gallery_in_circle(&pool, user_id).await;
    let library = FakePhotoLibrary::with_items(vec![remote_item("ext-1", "beach.jpg")]);

    let media = import_one(
        &pool,
        &settings,
        &library,
        "ext-1",
        user_id,
        &plain_context(Destination::Gallery(gallery_id)),
    )
    .await
    .unwrap();

    assert_eq!(media.external_id, "ext-1");
    assert_eq!(media.filename, "beach.jpg");
    assert_eq!(media.width, Some(4032));
    assert_eq!(media.user_id, Some(user_id));

    // Content landed inside the media root at the stored relative path.
    let content_path = media_dir.path().join(&media.relative_path);
    assert_eq!(tokio::fs::read(&content_path).await.unwrap(), b"jpeg-bytes");

    // Attached to the gallery and propagated into its circle.
    let in_gallery: i64 =
        sqlx::query_scalar("SELECT count(*) FROM gallery_media_item WHERE gallery_id = $1")
            .bind(gallery_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let in_circle: i64 =
        sqlx::query_scalar("SELECT count(*) FROM circle_media_item WHERE circle_id = $1")
            .bind(circle_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(in_gallery, 1);
    assert_eq!(in_circle, 1);
}

#[tokio::test]
async fn repeated_imports_reuse_the_existing_record() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, _) = seed_gallery_in_circle(&pool, user_id).await;
    let library = FakePhotoLibrary::with_items(vec![remote_item("ext-1", "beach.jpg")]);
    let context = plain_context(Destination::Gallery(gallery_id));

    let first = import_one(&pool, &settings, &library, "ext-1", user_id, &context)
        .await
        .unwrap();
    let second = import_one(&pool, &settings, &library, "ext-1", user_id, &context)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);

    let media_count: i64 = sqlx::query_scalar("SELECT count(*) FROM media_item")
        .fetch_one(&pool)
        .await
        .unwrap();
    let attach_count: i64 = sqlx::query_scalar("SELECT count(*) FROM gallery_media_item")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(media_count, 1);
    assert_eq!(attach_count, 1);
}

#[tokio::test]
async fn album_imports_create_and_link_the_event() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, circle_id) = seed_gallery_in_circle(&pool, user_id).await;
    let library = FakePhotoLibrary::with_items(vec![
        remote_item("ext-1", "one.jpg"),
        remote_item("ext-2", "two.jpg"),
    ]);
    let context = ImportContext {
        destination: Destination::Gallery(gallery_id),
        album_mapping: vec![AlbumMembers {
            album_id: "album-1".to_owned(),
            title: "Summer trip".to_owned(),
            items: vec!["ext-1".to_owned(), "ext-2".to_owned()],
        }],
    };

    for external_id in ["ext-1", "ext-2"] {
        import_one(&pool, &settings, &library, external_id, user_id, &context)
            .await
            .unwrap();
    }

    let event_count: i64 = sqlx::query_scalar("SELECT count(*) FROM event")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(event_count, 1);

    let title: String = sqlx::query_scalar("SELECT title FROM event WHERE external_album_id = $1")
        .bind("album-1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(title, "Summer trip");

    let attached_media: i64 = sqlx::query_scalar("SELECT count(*) FROM event_media_item")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(attached_media, 2);

    let in_circle: i64 =
        sqlx::query_scalar("SELECT count(*) FROM circle_event WHERE circle_id = $1")
            .bind(circle_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(in_circle, 1);
}

#[tokio::test]
async fn albums_without_a_title_get_a_generated_one() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, _) = seed_gallery_in_circle(&pool, user_id).await;
    let library = FakePhotoLibrary::with_items(vec![remote_item("ext-1", "one.jpg")]);
    let context = ImportContext {
        destination: Destination::Gallery(gallery_id),
        album_mapping: vec![AlbumMembers {
            album_id: "album-1".to_owned(),
            title: String::new(),
            items: vec!["ext-1".to_owned()],
        }],
    };

    import_one(&pool, &settings, &library, "ext-1", user_id, &context)
        .await
        .unwrap();

    let title: String = sqlx::query_scalar("SELECT title FROM event WHERE external_album_id = $1")
        .bind("album-1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(title, "ida - Family - 2021-06-05T10:20:30Z");
}

#[tokio::test]
async fn date_based_imports_get_no_event() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, _) = seed_gallery_in_circle(&pool, user_id).await;
    let library = FakePhotoLibrary::with_items(vec![remote_item("ext-1", "one.jpg")]);

    import_one(
        &pool,
        &settings,
        &library,
        "ext-1",
        user_id,
        &plain_context(Destination::Gallery(gallery_id)),
    )
    .await
    .unwrap();

    let event_count: i64 = sqlx::query_scalar("SELECT count(*) FROM event")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(event_count, 0);
}

#[tokio::test]
async fn remote_fetch_failures_surface_as_retryable_errors() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, _) = seed_gallery_in_circle(&pool, user_id).await;
    let mut library = FakePhotoLibrary::with_items(vec![remote_item("ext-1", "one.jpg")]);
    library.failing_ids.insert("ext-1".to_owned());

    let error = import_one(
        &pool,
        &settings,
        &library,
        "ext-1",
        user_id,
        &plain_context(Destination::Gallery(gallery_id)),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        error,
        ImportError::Library(PhotoLibraryError::RemoteServer(_))
    ));
    assert!(error.is_retryable());
}
