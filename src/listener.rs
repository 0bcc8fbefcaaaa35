use std::{cell::Cell, fmt, rc::Rc};

use serde_json::Value;
use uuid::Uuid;

pub type ListenerFn = dyn Fn(&[Value]) -> anyhow::Result<Option<Value>>;

/// Callable listener handle. Clones share identity: connecting a clone and
/// disconnecting the original refers to the same listener.
#[derive(Clone)]
pub struct Listener(Rc<ListenerFn>);

impl Listener {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Option<Value>> + 'static,
    {
        Listener(Rc::new(f))
    }

    /// Listener that never yields a value and never fails.
    pub fn observer<F>(f: F) -> Self
    where
        F: Fn(&[Value]) + 'static,
    {
        Listener::new(move |args| {
            f(args);
            Ok(None)
        })
    }

    pub fn same(&self, other: &Listener) -> bool {
        // 只比较数据指针，忽略 vtable
        Rc::as_ptr(&self.0) as *const () == Rc::as_ptr(&other.0) as *const ()
    }

    pub(crate) fn call(&self, args: &[Value]) -> anyhow::Result<Option<Value>> {
        (self.0)(args)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Per-registry sequential identity of one registration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner token attached to registrations for later bulk removal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ContextToken(Uuid);

impl ContextToken {
    pub fn new() -> Self {
        ContextToken(Uuid::new_v4())
    }
    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl Default for ContextToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) struct ListenerEntry {
    pub(crate) id: ListenerId,
    pub(crate) listener: Listener,
    pub(crate) context: Option<ContextToken>,
    // 断开后置为 false：正在进行的 emit 快照据此跳过
    live: Cell<bool>,
}

impl ListenerEntry {
    pub(crate) fn new(id: ListenerId, listener: Listener, context: Option<ContextToken>) -> Self {
        Self { id, listener, context, live: Cell::new(true) }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.live.get()
    }

    pub(crate) fn retire(&self) {
        self.live.set(false);
    }

    pub(crate) fn matches(&self, listener: &Listener, context: Option<&ContextToken>) -> bool {
        self.listener.same(listener) && context.map_or(true, |c| self.context.as_ref() == Some(c))
    }
}
