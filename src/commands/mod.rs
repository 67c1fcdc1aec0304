pub mod init;
pub mod kill;
pub mod launch;
pub mod list;
pub mod show;
pub mod task;
