pub mod catalog;
pub mod config;
pub mod emitter;
pub mod error;
pub mod facade;
pub mod host;
pub mod listener;
pub mod registry;
pub mod signal;

// 允许在本 crate 内通过 `mmg_signals::...` 自引用（供 derive 宏展开使用）
extern crate self as mmg_signals;

pub mod prelude {
    pub use crate::catalog::{SignalSet, Signals};
    pub use crate::config::CoreConfig;
    pub use crate::emitter::SignalEmitter;
    pub use crate::error::{Result, SignalError};
    pub use crate::facade::{Core, CoreSignal};
    pub use crate::host::HostBridge;
    pub use crate::listener::{ContextToken, Listener};
    pub use crate::registry::{BatchPolicy, Registry};
    pub use serde_json::{json, Value};
}

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}

pub use catalog::Signals;
pub use emitter::SignalEmitter;
