#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod api_state;
pub mod routes;
pub mod server;

pub use routes::create_router;
pub use server::serve;
