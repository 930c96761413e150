pub mod command;
pub mod irods;
pub mod mlwh;

pub use irods::{IcommandsStore, IrodsProbe};
pub use mlwh::MySqlProbe;
