pub mod init;
pub mod quiz;
