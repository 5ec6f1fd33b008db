//! DropGallery 工具模块
//!
//! 包含通用工具函数

pub mod error;
pub mod join;

pub use error::*;
pub use join::join_within;
