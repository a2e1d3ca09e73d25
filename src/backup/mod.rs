pub mod archive;
pub mod checksum;
pub mod index;
pub mod manager;
