pub mod batch_store;
pub mod circle_store;
pub mod event_store;
pub mod gallery_store;
pub mod media_item_store;
pub mod page_token_store;
pub mod user_store;

pub use batch_store::BatchStore;
pub use circle_store::CircleStore;
pub use event_store::EventStore;
pub use gallery_store::GalleryStore;
pub use media_item_store::MediaItemStore;
pub use page_token_store::PageTokenStore;
pub use user_store::UserStore;
