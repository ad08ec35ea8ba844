use common_services::api::import::error::ImportApiError;
use common_services::api::import::interfaces::{
    AlbumSelection, Selection, SubmissionOutcome, SubmitImportRequest,
};
use common_services::api::import::service::{submit_import, tick_batch};
use common_services::importer::Destination;
use common_services::testing::{
    FakeLibraryProvider, FakePhotoLibrary, remote_item, seed_connected_user,
    seed_gallery_in_circle, test_pool, test_settings,
};
use tempfile::TempDir;

fn library_with_two_albums() -> FakePhotoLibrary {
    let mut library = FakePhotoLibrary::with_items(vec![
        remote_item("1", "one.jpg"),
        remote_item("2", "two.jpg"),
        remote_item("3", "three.jpg"),
        remote_item("4", "four.jpg"),
    ]);
    library.add_album("album-a", "Alps", &["1", "2", "3"]);
    library.add_album("album-b", "Beach", &["2", "3", "4"]);
    library
}

fn album_submission(user_id: i64, gallery_id: i64, background: bool) -> SubmitImportRequest {
    SubmitImportRequest {
        user_id,
        destination: Destination::Gallery(gallery_id),
        background,
        auto_create_event: true,
        selection: Selection::Albums(vec![
            AlbumSelection {
                id: "album-a".to_owned(),
                title: "Alps".to_owned(),
            },
            AlbumSelection {
                id: "album-b".to_owned(),
                title: "Beach".to_owned(),
            },
        ]),
    }
}

#[tokio::test]
async fn background_album_submission_enqueues_items_and_one_notice() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, _) = seed_gallery_in_circle(&pool, user_id).await;
    let provider = FakeLibraryProvider {
        library: library_with_two_albums(),
        fail_connect: false,
    };

    let outcome = submit_import(
        &pool,
        &settings,
        &provider,
        album_submission(user_id, gallery_id, true),
    )
    .await
    .unwrap();

    let SubmissionOutcome::Scheduled {
        photos_count,
        albums_count,
        message,
    } = outcome
    else {
        panic!("expected a scheduled outcome");
    };
    // The cumulative fetch counts overlapping items once per album.
    assert_eq!(photos_count, 6);
    assert_eq!(albums_count, Some(2));
    assert!(message.contains("6 photo(s)"));
    assert!(message.contains("2 album(s)"));

    // Overlapping items collapse to one active job each; exactly one
    // completion notice trails the submission.
    let import_jobs: i64 =
        sqlx::query_scalar("SELECT count(*) FROM jobs WHERE job_type = 'import_item'")
            .fetch_one(&pool)
            .await
            .unwrap();
    let notify_jobs: i64 =
        sqlx::query_scalar("SELECT count(*) FROM jobs WHERE job_type = 'notify_completion'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(import_jobs, 4);
    assert_eq!(notify_jobs, 1);

    // First album in submission order claims the overlap.
    let payload: String = sqlx::query_scalar(
        "SELECT payload FROM jobs WHERE job_type = 'import_item' LIMIT 1",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    let mapping = value["context"]["album_mapping"].as_array().unwrap();
    assert_eq!(mapping[0]["items"], serde_json::json!(["1", "2", "3"]));
    assert_eq!(mapping[1]["items"], serde_json::json!(["4"]));
}

#[tokio::test]
async fn empty_selection_is_rejected() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, _) = seed_gallery_in_circle(&pool, user_id).await;
    let provider = FakeLibraryProvider::default();

    let error = submit_import(
        &pool,
        &settings,
        &provider,
        SubmitImportRequest {
            user_id,
            destination: Destination::Gallery(gallery_id),
            background: true,
            auto_create_event: false,
            selection: Selection::Photos(vec![]),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(error, ImportApiError::EmptySelection));
}

#[tokio::test]
async fn foreground_batch_processes_one_item_per_tick() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (_, circle_id) = seed_gallery_in_circle(&pool, user_id).await;
    let ids: Vec<String> = (1..=5).map(|i| i.to_string()).collect();
    let items = ids.iter().map(|id| remote_item(id, "pic.jpg")).collect();
    let provider = FakeLibraryProvider {
        library: FakePhotoLibrary::with_items(items),
        fail_connect: false,
    };

    let outcome = submit_import(
        &pool,
        &settings,
        &provider,
        SubmitImportRequest {
            user_id,
            destination: Destination::Circle(circle_id),
            background: false,
            auto_create_event: false,
            selection: Selection::Photos(ids),
        },
    )
    .await
    .unwrap();

    let SubmissionOutcome::Batch { session_id, total } = outcome else {
        panic!("expected a batch outcome");
    };
    assert_eq!(total, 5);

    for expected in 1..=5u32 {
        let report = tick_batch(&pool, &settings, &provider, &session_id)
            .await
            .unwrap();
        assert_eq!(report.processed, expected as usize);
        assert!((report.finished - f64::from(expected) / 5.0).abs() < f64::EPSILON);
        assert!(report.error.is_none());
        if expected < 5 {
            assert_eq!(
                report.message,
                format!("Now processing item {expected} of 5")
            );
        } else {
            assert_eq!(report.message, "Imported 5 photos");
        }
    }

    // The session is gone once the batch completed.
    let error = tick_batch(&pool, &settings, &provider, &session_id)
        .await
        .unwrap_err();
    assert!(matches!(error, ImportApiError::UnknownSession(_)));

    let media_count: i64 = sqlx::query_scalar("SELECT count(*) FROM media_item")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(media_count, 5);
}

#[tokio::test]
async fn a_failing_item_does_not_stop_the_batch() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, _) = seed_gallery_in_circle(&pool, user_id).await;
    let mut library = FakePhotoLibrary::with_items(vec![
        remote_item("ok-1", "one.jpg"),
        remote_item("bad", "two.jpg"),
        remote_item("ok-2", "three.jpg"),
    ]);
    library.failing_ids.insert("bad".to_owned());
    let provider = FakeLibraryProvider {
        library,
        fail_connect: false,
    };

    let outcome = submit_import(
        &pool,
        &settings,
        &provider,
        SubmitImportRequest {
            user_id,
            destination: Destination::Gallery(gallery_id),
            background: false,
            auto_create_event: false,
            selection: Selection::Photos(vec![
                "ok-1".to_owned(),
                "bad".to_owned(),
                "ok-2".to_owned(),
            ]),
        },
    )
    .await
    .unwrap();
    let SubmissionOutcome::Batch { session_id, .. } = outcome else {
        panic!("expected a batch outcome");
    };

    let first = tick_batch(&pool, &settings, &provider, &session_id)
        .await
        .unwrap();
    assert!(first.error.is_none());

    let second = tick_batch(&pool, &settings, &provider, &session_id)
        .await
        .unwrap();
    assert!(second.error.is_some());

    let third = tick_batch(&pool, &settings, &provider, &session_id)
        .await
        .unwrap();
    assert!(third.error.is_none());
    assert!((third.finished - 1.0).abs() < f64::EPSILON);

    let media_count: i64 = sqlx::query_scalar("SELECT count(*) FROM media_item")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(media_count, 2);
}

#[tokio::test]
async fn batch_ticks_abort_when_the_account_is_disconnected() {
    let pool = test_pool().await;
    let media_dir = TempDir::new().unwrap();
    let settings = test_settings(media_dir.path());
    let user_id = seed_connected_user(&pool, "ida", "ida@example.com").await;
    let (gallery_id, _) = seed_gallery_in_circle(&pool, user_id).await;
    let provider = FakeLibraryProvider {
        library: FakePhotoLibrary::with_items(vec![remote_item("1", "one.jpg")]),
        fail_connect: false,
    };

    let outcome = submit_import(
        &pool,
        &settings,
        &provider,
        SubmitImportRequest {
            user_id,
            destination: Destination::Gallery(gallery_id),
            background: false,
            auto_create_event: false,
            selection: Selection::Photos(vec!["1".to_owned()]),
        },
    )
    .await
    .unwrap();
    let SubmissionOutcome::Batch { session_id, .. } = outcome else {
        panic!("expected a batch outcome");
    };

    let disconnected = FakeLibraryProvider {
        library: FakePhotoLibrary::default(),
        fail_connect: true,
    };
    let error = tick_batch(&pool, &settings, &disconnected, &session_id)
        .await
        .unwrap_err();
    assert!(matches!(error, ImportApiError::NotConnected));

    // Nothing was consumed; a reconnected user can resume the batch.
    let report = tick_batch(&pool, &settings, &provider, &session_id)
        .await
        .unwrap();
    assert_eq!(report.processed, 1);
}
