use std::sync::Arc;

use serde_json::Value;

use crate::{
    catalog::{self, Signals},
    config::CoreConfig,
    emitter::SignalEmitter,
    error::{Operation, Result, SignalError},
    host::HostBridge,
    registry::{BatchPolicy, Registry},
    signal::SignalInfo,
};

/// Host message carrying the hide-on-close preference.
pub const HIDE_ON_CLOSE_MESSAGE: &str = "Nuvola.setHideOnClose";

/// Signals declared by [`Core`]. Arguments follow the `params` order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Signals)]
pub enum CoreSignal {
    /// Initialize app runner process hook.
    ///
    /// Emitted at start-up when the app runner process needs initialization.
    /// Listeners may append entries to the initialization form and run their
    /// own initialization routine.
    #[signal(
        name = "init-app-runner",
        params(
            "init_values: values to fill the initialization form with",
            "form_spec: entries to show in the initialization form"
        )
    )]
    InitAppRunner,
    /// Initialize web worker process hook.
    ///
    /// Emitted just before a web page is loaded in the main frame of the web view.
    #[signal(name = "init-web-worker")]
    InitWebWorker,
    /// Home page URI is requested.
    #[signal(name = "home-page")]
    HomePage,
    /// Navigation is about to happen; a listener returning `false` vetoes it.
    #[signal(
        name = "navigation-request",
        params("uri: requested address", "new_window: whether a new window was requested")
    )]
    NavigationRequest,
    /// The main frame URI changed.
    #[signal(name = "uri-changed", params("uri: new address"))]
    UriChanged,
    /// Last visited page is requested.
    #[signal(name = "last-page")]
    LastPage,
    /// Preferences dialog is being built.
    #[signal(
        name = "append-preferences",
        params("values: current preference values", "entries: form entries to extend")
    )]
    AppendPreferences,
}

// 单独声明（带文档）的生命周期信号
const DOCUMENTED: [CoreSignal; 2] = [CoreSignal::InitAppRunner, CoreSignal::InitWebWorker];
// 一次性批量声明的其余信号
const BATCH: [CoreSignal; 5] = [
    CoreSignal::HomePage,
    CoreSignal::NavigationRequest,
    CoreSignal::UriChanged,
    CoreSignal::LastPage,
    CoreSignal::AppendPreferences,
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreState {
    Uninitialized,
    Initialized,
}

/// Application core: owns the signal registry and the host boundary.
///
/// Constructed explicitly and passed to whatever needs to emit or observe
/// signals; there is no process-wide instance.
#[derive(SignalEmitter)]
pub struct Core {
    #[signals]
    registry: Registry,
    host: Arc<dyn HostBridge>,
    cfg: CoreConfig,
    state: CoreState,
}

impl Core {
    pub fn new(host: Arc<dyn HostBridge>, cfg: CoreConfig) -> Self {
        Self {
            registry: Registry::new(),
            host,
            cfg,
            state: CoreState::Uninitialized,
        }
    }

    /// `new` followed by `init`.
    pub fn initialized(host: Arc<dyn HostBridge>, cfg: CoreConfig) -> Result<Self> {
        let mut core = Self::new(host, cfg);
        core.init()?;
        Ok(core)
    }

    /// Declares the core signals. Only the first successful call has an effect.
    pub fn init(&mut self) -> Result<()> {
        if self.state == CoreState::Initialized {
            tracing::warn!("Core::init called twice; ignoring");
            return Ok(());
        }
        // 先整体校验，失败时注册表保持原样
        for sig in DOCUMENTED {
            if self.registry.has_signal(sig) {
                return Err(SignalError::duplicate(sig.name(), Operation::AddSignal));
            }
        }
        if self.cfg.batch_policy == BatchPolicy::Strict {
            if let Some(sig) = BATCH.iter().find(|s| self.registry.has_signal(s)) {
                return Err(SignalError::duplicate(sig.name(), Operation::RegisterSignals));
            }
        }
        for sig in DOCUMENTED {
            let info = catalog::lookup(sig.name())
                .map(SignalInfo::from)
                .unwrap_or_default();
            self.registry.add_signal_with_info(sig, info)?;
        }
        self.registry
            .register_signals_with(BATCH, self.cfg.batch_policy)?;
        self.state = CoreState::Initialized;
        tracing::info!(signals = self.registry.signal_names().len(), "core initialized");
        Ok(())
    }

    pub fn state(&self) -> CoreState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == CoreState::Initialized
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Forwards the preference to the host and returns its opaque answer.
    ///
    /// The host hop is an IPC round trip, so this suspends until the host
    /// replies or `host_timeout_ms` elapses; callers must `.await` it. Registry
    /// operations on the core stay synchronous and are never blocked by it.
    pub async fn set_hide_on_close(&self, hide: bool) -> Result<Value> {
        self.call_host(HIDE_ON_CLOSE_MESSAGE, Value::Bool(hide)).await
    }

    async fn call_host(&self, message: &str, params: Value) -> Result<Value> {
        let after = self.cfg.host_timeout();
        match tokio::time::timeout(after, self.host.send_message(message, params)).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(source)) => {
                tracing::warn!(host_message = message, error = %source, "host message failed");
                Err(SignalError::Host { message: message.to_string(), source })
            }
            Err(_) => {
                tracing::warn!(host_message = message, ?after, "host message timed out");
                Err(SignalError::HostTimeout { message: message.to_string(), after })
            }
        }
    }

    /// Drops every listener and the core with them.
    pub fn teardown(self) {
        self.registry.clear();
        tracing::info!("core torn down");
    }

    // 直接访问注册表（与 SignalEmitter::signals 等价）
    pub fn registry(&self) -> &Registry {
        self.signals()
    }
}
