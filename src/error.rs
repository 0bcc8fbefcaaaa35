//! 统一错误类型：手写枚举 + Display，不引入额外错误栈。
//! Every message names the operation and, where one exists, the signal.
use std::{error::Error as StdError, fmt, time::Duration};

use crate::listener::ListenerId;

/// The registry call an error was raised from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    AddSignal,
    RegisterSignals,
    Connect,
    Disconnect,
    Emit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::AddSignal => "add_signal",
            Operation::RegisterSignals => "register_signals",
            Operation::Connect => "connect",
            Operation::Disconnect => "disconnect",
            Operation::Emit => "emit",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
pub enum SignalError {
    EmptyName { op: Operation },                          // 空信号名
    DuplicateSignal { name: String, op: Operation },      // 重复声明
    UnknownSignal { name: String, op: Operation },        // 未声明即使用
    ListenerInvocation {
        signal: String,
        listener: ListenerId,
        source: anyhow::Error,
    },
    Host { message: String, source: anyhow::Error },      // 宿主桥调用失败
    HostTimeout { message: String, after: Duration },     // 宿主桥无响应
    Config(String),
}

impl SignalError {
    pub(crate) fn duplicate(name: &str, op: Operation) -> Self {
        SignalError::DuplicateSignal { name: name.to_string(), op }
    }
    pub(crate) fn unknown(name: &str, op: Operation) -> Self {
        SignalError::UnknownSignal { name: name.to_string(), op }
    }

    /// Signal name the error refers to, if any.
    pub fn signal(&self) -> Option<&str> {
        match self {
            SignalError::DuplicateSignal { name, .. } | SignalError::UnknownSignal { name, .. } => {
                Some(name)
            }
            SignalError::ListenerInvocation { signal, .. } => Some(signal),
            _ => None,
        }
    }
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::EmptyName { op } => write!(f, "{op}: signal name must not be empty"),
            SignalError::DuplicateSignal { name, op } => {
                write!(f, "{op}: signal '{name}' is already declared")
            }
            SignalError::UnknownSignal { name, op } => {
                write!(f, "{op}: signal '{name}' is not declared")
            }
            SignalError::ListenerInvocation { signal, listener, source } => {
                write!(f, "emit: listener {listener} of signal '{signal}' failed: {source}")
            }
            SignalError::Host { message, source } => {
                write!(f, "host message '{message}' failed: {source}")
            }
            SignalError::HostTimeout { message, after } => {
                write!(f, "host message '{message}' timed out after {after:?}")
            }
            SignalError::Config(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl StdError for SignalError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SignalError::ListenerInvocation { source, .. } | SignalError::Host { source, .. } => {
                Some(&**source)
            }
            _ => None,
        }
    }
}

pub type Result<T = ()> = std::result::Result<T, SignalError>;
