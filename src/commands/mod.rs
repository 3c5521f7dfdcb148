pub mod doc;
pub mod export;
pub mod init;
