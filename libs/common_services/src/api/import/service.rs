use crate::api::import::error::ImportApiError;
use crate::api::import::interfaces::{
    BACKGROUND_NOTICE, BatchTickReport, Selection, SubmissionOutcome, SubmitImportRequest,
};
use crate::database::{BatchStore, UserStore};
use crate::importer::{
    BatchState, ImportContext, Recipient, attribute_members, import_one,
};
use crate::job_queue::enqueue_import_submission;
use crate::photos_client::{MediaSearchQuery, PhotoLibrary, PhotoLibraryProvider};
use app_state::AppSettings;
use sqlx::SqlitePool;
use tracing::{error, info};

/// Turns a submission into work: expands selected albums into their member
/// ids, computes which album claims which item, and then either queues the
/// whole import for the background worker or opens a foreground batch
/// session for the caller to tick.
pub async fn submit_import(
    pool: &SqlitePool,
    settings: &AppSettings,
    provider: &dyn PhotoLibraryProvider,
    request: SubmitImportRequest,
) -> Result<SubmissionOutcome, ImportApiError> {
    let (external_ids, album_mapping, albums_count) = match &request.selection {
        Selection::Photos(ids) => (ids.clone(), Vec::new(), None),
        Selection::Albums(albums) => {
            let library = provider.connect(pool, request.user_id).await?;
            let mut fetched = Vec::with_capacity(albums.len());
            for album in albums {
                let ids = fetch_album_media_ids(settings, library.as_ref(), &album.id).await?;
                fetched.push((album.id.clone(), album.title.clone(), ids));
            }

            let mapping = if request.auto_create_event {
                attribute_members(&fetched)
            } else {
                Vec::new()
            };
            let all_ids = fetched.into_iter().flat_map(|(_, _, ids)| ids).collect();
            (all_ids, mapping, Some(albums.len() as u64))
        }
    };

    if external_ids.is_empty() {
        return Err(ImportApiError::EmptySelection);
    }

    let context = ImportContext {
        destination: request.destination,
        album_mapping,
    };

    if request.background {
        let user = UserStore::find_by_id(pool, request.user_id)
            .await?
            .ok_or(ImportApiError::UnknownUser(request.user_id))?;
        let recipient = Recipient {
            username: user.name,
            email: user.email,
            lang_code: user.lang_code,
        };
        let photos_count = external_ids.len() as u64;

        enqueue_import_submission(
            pool,
            settings.queue.max_attempts,
            request.user_id,
            &external_ids,
            &context,
            &recipient,
            albums_count,
        )
        .await?;

        let message = match albums_count {
            Some(albums) => format!(
                "{BACKGROUND_NOTICE} We scheduled to import {photos_count} photo(s), in {albums} album(s)."
            ),
            None => BACKGROUND_NOTICE.to_owned(),
        };
        info!(
            "📨 Scheduled background import of {} item(s) for user {}",
            photos_count, request.user_id
        );

        Ok(SubmissionOutcome::Scheduled {
            photos_count,
            albums_count,
            message,
        })
    } else {
        let state = BatchState::new(external_ids);
        let total = state.total();
        let session_id = BatchStore::create(pool, request.user_id, &state, &context).await?;
        info!(
            "🗂️ Opened batch session {} with {} item(s) for user {}",
            session_id, total, request.user_id
        );

        Ok(SubmissionOutcome::Batch { session_id, total })
    }
}

/// Pages through an album until the remote side stops handing out tokens,
/// collecting every member item id.
async fn fetch_album_media_ids(
    settings: &AppSettings,
    library: &dyn PhotoLibrary,
    album_id: &str,
) -> Result<Vec<String>, ImportApiError> {
    let mut ids = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let query = MediaSearchQuery {
            album_id: Some(album_id.to_owned()),
            filters: None,
            page_size: settings.remote_library.photos_page_size,
            page_token: page_token.clone(),
        };
        let page = library.search_media_items(&query).await?;

        ids.extend(page.media_items.into_iter().map(|item| item.id));

        if page.next_page_token.is_empty() {
            break;
        }
        page_token = Some(page.next_page_token);
    }

    Ok(ids)
}

/// Processes exactly one item of a batch session and persists the advanced
/// state. An item failure is reported in the tick but does not stop the
/// batch; a missing remote connection aborts the whole operation instead.
pub async fn tick_batch(
    pool: &SqlitePool,
    settings: &AppSettings,
    provider: &dyn PhotoLibraryProvider,
    session_id: &str,
) -> Result<BatchTickReport, ImportApiError> {
    let session = BatchStore::find_by_id(pool, session_id)
        .await?
        .ok_or_else(|| ImportApiError::UnknownSession(session_id.to_owned()))?;

    let Some((external_id, next_state)) = session.state.step() else {
        BatchStore::delete(pool, session_id).await?;
        let progress = session.state.progress();
        return Ok(BatchTickReport {
            session_id: session_id.to_owned(),
            processed: progress.processed,
            total: progress.total,
            finished: 1.0,
            message: session.state.completion_report(),
            error: None,
        });
    };

    let library = provider.connect(pool, session.user_id).await?;

    let item_error = match import_one(
        pool,
        settings,
        library.as_ref(),
        &external_id,
        session.user_id,
        &session.context,
    )
    .await
    {
        Ok(_) => None,
        Err(e) => {
            error!("Batch item {} failed: {:?}", external_id, e);
            Some(e.to_string())
        }
    };

    let progress = next_state.progress();
    let message = if next_state.is_done() {
        BatchStore::delete(pool, session_id).await?;
        next_state.completion_report()
    } else {
        BatchStore::save_state(pool, session_id, &next_state).await?;
        progress.message.clone()
    };

    Ok(BatchTickReport {
        session_id: session_id.to_owned(),
        processed: progress.processed,
        total: progress.total,
        finished: progress.finished,
        message,
        error: item_error,
    })
}
