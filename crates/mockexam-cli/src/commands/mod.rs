pub mod init;
pub mod review;
pub mod run;
pub mod validate;
