use serde_json::Value;

use crate::{
    error::Result,
    listener::{ContextToken, Listener, ListenerId},
    registry::{BatchPolicy, Registry},
    signal::{SignalInfo, SignalName},
};

pub use signals_macros::SignalEmitter;

/// Capability of owning a signal registry.
///
/// Types embed a [`Registry`] and expose it through `signals()`; everything
/// else is delegated. `#[derive(SignalEmitter)]` writes the impl for a struct
/// whose registry field is marked `#[signals]`.
pub trait SignalEmitter {
    fn signals(&self) -> &Registry;

    fn add_signal(&self, name: impl AsRef<str>) -> Result<()> {
        self.signals().add_signal(name)
    }
    fn add_signal_with_info(&self, name: impl AsRef<str>, info: SignalInfo) -> Result<()> {
        self.signals().add_signal_with_info(name, info)
    }
    fn register_signals<I, S>(&self, names: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.signals().register_signals(names)
    }
    fn register_signals_with<I, S>(&self, names: I, policy: BatchPolicy) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.signals().register_signals_with(names, policy)
    }
    fn has_signal(&self, name: impl AsRef<str>) -> bool {
        self.signals().has_signal(name)
    }
    fn signal_names(&self) -> Vec<SignalName> {
        self.signals().signal_names()
    }

    fn connect(&self, name: impl AsRef<str>, listener: &Listener) -> Result<ListenerId> {
        self.signals().connect(name, listener)
    }
    fn connect_with_context(
        &self,
        name: impl AsRef<str>,
        listener: &Listener,
        context: ContextToken,
    ) -> Result<ListenerId> {
        self.signals().connect_with_context(name, listener, context)
    }
    fn disconnect(&self, name: impl AsRef<str>, listener: &Listener) -> Result<bool> {
        self.signals().disconnect(name, listener)
    }
    fn disconnect_with_context(
        &self,
        name: impl AsRef<str>,
        listener: &Listener,
        context: &ContextToken,
    ) -> Result<bool> {
        self.signals().disconnect_with_context(name, listener, context)
    }
    fn disconnect_context(&self, context: &ContextToken) -> usize {
        self.signals().disconnect_context(context)
    }

    fn emit(&self, name: impl AsRef<str>, args: &[Value]) -> Result<Option<Value>> {
        self.signals().emit(name, args)
    }
    fn notify(&self, name: impl AsRef<str>, args: &[Value]) -> Result<()> {
        self.signals().notify(name, args)
    }
}
