//! 核心模块
//!
//! 包含控制器的基础设施：
//! - `error` - 错误类型定义
//! - `logging` - 日志初始化
//! - `observer` - 状态切换和加载里程碑的观察者钩子
//! - `macros` - 通用宏

pub mod error;
pub mod logging;
#[macro_use]
pub mod macros;
pub mod observer;

// 重新导出错误类型
pub use error::{
    CharacterError, CharacterResult, ControllerError, ControllerResult, LoadError, LoadResult,
};
pub use logging::initialize_logging;
pub use observer::{ControllerObserver, NoopObserver};
