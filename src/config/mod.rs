#[cfg(feature = "cli")]
pub mod cli;
pub mod db;

#[cfg(feature = "cli")]
pub use cli::{DbArgs, EntrypointConfig, SyncCli, SyncCommand};
pub use db::{resolve_db_url, DbConfig, DbSettings};
