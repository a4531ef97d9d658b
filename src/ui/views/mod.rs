pub mod deploy;
pub mod destroy;
pub mod doctor;
pub mod generate;
pub mod init;
pub mod outputs;
pub mod status;
