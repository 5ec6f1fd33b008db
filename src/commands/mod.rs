//! DropGallery 命令模块
//!
//! 前端可调用的图库操作

pub mod gallery;

pub use gallery::*;
