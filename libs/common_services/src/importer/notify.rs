use async_trait::async_trait;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Snapshot of who to notify, taken at submission time so the queue job
/// does not depend on the user record still looking the same later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub username: String,
    pub email: String,
    pub lang_code: String,
}

/// The message sent to a user once their background import finished. The
/// wording changes depending on whether whole albums were imported.
#[must_use]
pub fn completion_message(
    username: &str,
    photos_count: u64,
    albums_count: Option<u64>,
) -> String {
    match albums_count {
        Some(albums) => format!(
            "Dear {username}! Your selected {albums} album(s) were imported. Processed {photos_count} photo(s)."
        ),
        None => format!("Dear {username}! Your selected {photos_count} photo(s) were imported."),
    }
}

/// Delivery channel for user-facing notices. Delivery itself (mail
/// templating, localization) lives outside this crate; the default
/// implementation just logs.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn send(&self, recipient: &Recipient, message: &str) -> Result<()>;
}

pub struct LogNotifier;

#[async_trait]
impl NotificationChannel for LogNotifier {
    async fn send(&self, recipient: &Recipient, message: &str) -> Result<()> {
        info!(
            "📧 Notifying {} <{}> ({}): {}",
            recipient.username, recipient.email, recipient.lang_code, message
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_only_wording_mentions_the_photo_count() {
        let message = completion_message("ida", 7, None);

        assert!(message.contains('7'));
        assert!(message.contains("ida"));
        assert!(!message.contains("album"));
    }

    #[test]
    fn album_wording_mentions_both_counts() {
        let message = completion_message("ida", 12, Some(3));

        assert!(message.contains("3 album(s)"));
        assert!(message.contains("12 photo(s)"));
    }
}
