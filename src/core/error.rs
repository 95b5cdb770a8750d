//! 统一错误处理模块
//!
//! 提供控制器范围内的错误类型定义
//!
//! ## 错误类型分层
//!
//! - **加载错误** (`LoadError`): `init` 期间的任何子加载失败（模型或动画片段）
//! - **状态错误** (`ControllerError`): 宿主在错误的生命周期阶段调用控制器
//!
//! 运行时找不到动画片段不属于错误：过渡服务会记录日志并跳过。
//! `CharacterError` 可以同时承载以上两类错误以及配置错误。

use crate::config::ConfigError;
use thiserror::Error;

/// 资源加载错误
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to fetch asset: {path}, reason: {reason}")]
    Fetch { path: String, reason: String },

    #[error("Asset decode error: {path}, reason: {reason}")]
    Decode { path: String, reason: String },

    #[error("Animation file contains no clips: {path}")]
    EmptyClipFile { path: String },

    #[error("Animation clip '{name}' failed to load: {source}")]
    Clip {
        name: String,
        #[source]
        source: Box<LoadError>,
    },

    #[error("Locomotion clips missing after load: {0:?}")]
    IncompleteRegistry(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub fn fetch(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// 控制器生命周期错误
///
/// 这些都是宿主违反调用约定的情况，必须显式报错而不是静默容忍。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Controller used before init() completed")]
    NotInitialized,

    #[error("Controller is unusable: init() failed")]
    InitFailed,

    #[error("Controller used after dispose()")]
    Disposed,

    #[error("init() called more than once")]
    AlreadyInitialized,
}

/// 角色控制器顶层错误类型
#[derive(Error, Debug)]
pub enum CharacterError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Controller error: {0}")]
    Controller(#[from] ControllerError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// 结果类型别名
pub type LoadResult<T> = Result<T, LoadError>;
pub type ControllerResult<T> = Result<T, ControllerError>;
pub type CharacterResult<T> = Result<T, CharacterError>;
