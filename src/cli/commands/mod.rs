pub mod cleanup;
pub mod create;
pub mod delete;
pub mod env;
pub mod health;
pub mod init;
pub mod list;
pub mod report;
pub mod restore;
pub mod score;
pub mod verify;
