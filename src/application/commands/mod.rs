//! 应用层 - 命令（写操作）
//!
//! 两个命令都会整份重写音色目录

mod metadata_commands;
mod sample_commands;

pub mod handlers;

pub use metadata_commands::*;
pub use sample_commands::*;
