pub mod app_user;
pub mod batch_session;
pub mod event;
pub mod gallery;
pub mod jobs;
pub mod media_item;
