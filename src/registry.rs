//! 信号注册表：信号名 -> 有序监听者序列。
//!
//! Single-threaded by construction (`Rc`/`RefCell`). No borrow of the table is
//! held while a listener runs, so listeners may freely connect, disconnect or
//! emit on the same registry.
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    fmt,
    rc::Rc,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::{
    error::{Operation, Result, SignalError},
    listener::{ContextToken, Listener, ListenerEntry, ListenerId},
    signal::{SignalInfo, SignalName},
};

/// How `register_signals` treats names that are already declared.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Any invalid or duplicate name aborts the batch; nothing is applied.
    #[default]
    Strict,
    /// Already-declared names are skipped with a warning.
    SkipDeclared,
}

struct SignalSlot {
    info: SignalInfo,
    listeners: SmallVec<[Rc<ListenerEntry>; 4]>,
}

#[derive(Default)]
pub struct Registry {
    slots: RefCell<HashMap<SignalName, SignalSlot>>,
    // 声明顺序，供列举
    order: RefCell<Vec<SignalName>>,
    next_id: Cell<u64>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("signals", &*self.order.borrow())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- 声明 ----

    pub fn add_signal(&self, name: impl AsRef<str>) -> Result<()> {
        self.add_signal_with_info(name, SignalInfo::default())
    }

    pub fn add_signal_with_info(&self, name: impl AsRef<str>, info: SignalInfo) -> Result<()> {
        let name = SignalName::parse(name.as_ref(), Operation::AddSignal)?;
        if self.has_signal(&name) {
            return Err(SignalError::duplicate(name.as_str(), Operation::AddSignal));
        }
        self.declare(name, info);
        Ok(())
    }

    /// Declares every name in order using [`BatchPolicy::Strict`].
    pub fn register_signals<I, S>(&self, names: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.register_signals_with(names, BatchPolicy::Strict)
    }

    /// Batch declaration. Names are validated up front, so a failing batch
    /// leaves the registry untouched. Returns how many signals were added.
    pub fn register_signals_with<I, S>(&self, names: I, policy: BatchPolicy) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let op = Operation::RegisterSignals;
        let mut pending: Vec<SignalName> = Vec::new();
        let mut seen: HashSet<SignalName> = HashSet::new();
        for raw in names {
            let name = SignalName::parse(raw.as_ref(), op)?;
            if self.has_signal(&name) || seen.contains(&name) {
                match policy {
                    BatchPolicy::Strict => return Err(SignalError::duplicate(name.as_str(), op)),
                    BatchPolicy::SkipDeclared => {
                        tracing::warn!(signal = %name, "register_signals: already declared; skipping");
                        continue;
                    }
                }
            }
            seen.insert(name.clone());
            pending.push(name);
        }
        let added = pending.len();
        for name in pending {
            self.declare(name, SignalInfo::default());
        }
        Ok(added)
    }

    fn declare(&self, name: SignalName, info: SignalInfo) {
        tracing::debug!(signal = %name, "signal declared");
        self.order.borrow_mut().push(name.clone());
        self.slots
            .borrow_mut()
            .insert(name, SignalSlot { info, listeners: SmallVec::new() });
    }

    pub fn has_signal(&self, name: impl AsRef<str>) -> bool {
        self.slots.borrow().contains_key(name.as_ref())
    }

    /// Declared names in declaration order.
    pub fn signal_names(&self) -> Vec<SignalName> {
        self.order.borrow().clone()
    }

    pub fn info(&self, name: impl AsRef<str>) -> Option<SignalInfo> {
        self.slots.borrow().get(name.as_ref()).map(|s| s.info.clone())
    }

    pub fn listener_count(&self, name: impl AsRef<str>) -> Option<usize> {
        self.slots.borrow().get(name.as_ref()).map(|s| s.listeners.len())
    }

    // ---- 连接 / 断开 ----

    pub fn connect(&self, name: impl AsRef<str>, listener: &Listener) -> Result<ListenerId> {
        self.attach(name.as_ref(), listener, None)
    }

    pub fn connect_with_context(
        &self,
        name: impl AsRef<str>,
        listener: &Listener,
        context: ContextToken,
    ) -> Result<ListenerId> {
        self.attach(name.as_ref(), listener, Some(context))
    }

    fn attach(&self, name: &str, listener: &Listener, context: Option<ContextToken>) -> Result<ListenerId> {
        let mut slots = self.slots.borrow_mut();
        let slot = slots
            .get_mut(name)
            .ok_or_else(|| SignalError::unknown(name, Operation::Connect))?;
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        slot.listeners
            .push(Rc::new(ListenerEntry::new(id, listener.clone(), context)));
        tracing::debug!(signal = %name, listener = %id, "listener connected");
        Ok(id)
    }

    /// Removes the first matching registration. `Ok(false)` when none matched.
    pub fn disconnect(&self, name: impl AsRef<str>, listener: &Listener) -> Result<bool> {
        self.detach(name.as_ref(), listener, None)
    }

    pub fn disconnect_with_context(
        &self,
        name: impl AsRef<str>,
        listener: &Listener,
        context: &ContextToken,
    ) -> Result<bool> {
        self.detach(name.as_ref(), listener, Some(context))
    }

    // 被移除的条目在借用释放后才析构：监听者捕获值的 Drop 可能回访注册表
    fn detach(&self, name: &str, listener: &Listener, context: Option<&ContextToken>) -> Result<bool> {
        let entry = {
            let mut slots = self.slots.borrow_mut();
            let slot = slots
                .get_mut(name)
                .ok_or_else(|| SignalError::unknown(name, Operation::Disconnect))?;
            let Some(pos) = slot.listeners.iter().position(|e| e.matches(listener, context)) else {
                tracing::debug!(signal = %name, "disconnect: no matching listener");
                return Ok(false);
            };
            slot.listeners.remove(pos)
        };
        entry.retire();
        tracing::debug!(signal = %name, listener = %entry.id, "listener disconnected");
        drop(entry);
        Ok(true)
    }

    /// Removes every registration made with `context`, across all signals.
    pub fn disconnect_context(&self, context: &ContextToken) -> usize {
        let removed: Vec<Rc<ListenerEntry>> = {
            let mut slots = self.slots.borrow_mut();
            let mut out = Vec::new();
            for slot in slots.values_mut() {
                let (gone, kept): (SmallVec<[_; 4]>, SmallVec<[_; 4]>) =
                    std::mem::take(&mut slot.listeners)
                        .into_iter()
                        .partition(|e: &Rc<ListenerEntry>| e.context.as_ref() == Some(context));
                slot.listeners = kept;
                out.extend(gone);
            }
            out
        };
        for e in &removed {
            e.retire();
        }
        let count = removed.len();
        tracing::debug!(context = %context, removed = count, "context listeners disconnected");
        drop(removed);
        count
    }

    /// Drops all listeners; declared signals stay.
    pub fn clear(&self) {
        let removed: Vec<Rc<ListenerEntry>> = self
            .slots
            .borrow_mut()
            .values_mut()
            .flat_map(|slot| std::mem::take(&mut slot.listeners))
            .collect();
        for e in &removed {
            e.retire();
        }
        tracing::debug!(removed = removed.len(), "registry cleared");
        drop(removed);
    }

    // ---- 发射 ----

    /// Invokes the listeners of `name` in registration order.
    ///
    /// The first listener returning a non-null value ends the emission and
    /// that value is returned. A failing listener also ends it, with
    /// [`SignalError::ListenerInvocation`]. Listeners connected during the
    /// emission are not called by it; listeners disconnected during it are
    /// skipped if not yet called.
    pub fn emit(&self, name: impl AsRef<str>, args: &[Value]) -> Result<Option<Value>> {
        let name = name.as_ref();
        // 快照后立即释放借用，允许监听者重入
        let snapshot: SmallVec<[Rc<ListenerEntry>; 8]> = {
            let slots = self.slots.borrow();
            let slot = slots
                .get(name)
                .ok_or_else(|| SignalError::unknown(name, Operation::Emit))?;
            slot.listeners.iter().cloned().collect()
        };
        tracing::trace!(signal = %name, listeners = snapshot.len(), "emit");
        for entry in snapshot.iter() {
            if !entry.is_live() {
                continue;
            }
            match entry.listener.call(args) {
                Ok(Some(v)) if !v.is_null() => {
                    tracing::trace!(signal = %name, listener = %entry.id, "emission claimed");
                    return Ok(Some(v));
                }
                Ok(_) => {}
                Err(source) => {
                    return Err(SignalError::ListenerInvocation {
                        signal: name.to_string(),
                        listener: entry.id,
                        source,
                    })
                }
            }
        }
        Ok(None)
    }

    /// `emit` without the return value.
    pub fn notify(&self, name: impl AsRef<str>, args: &[Value]) -> Result<()> {
        self.emit(name, args).map(|_| ())
    }
}
