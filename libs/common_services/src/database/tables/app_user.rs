use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub lang_code: String,
}

/// A user's connection to the remote photo library. The token blob is stored
/// exactly as the remote connector issued it, so it may carry an `error` key
/// when the grant has gone bad.
#[derive(Debug, Clone, FromRow)]
pub struct RemoteAccount {
    pub user_id: i64,
    pub access_token: String,
    pub authenticated: bool,
}
