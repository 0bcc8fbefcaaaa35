// Centralized compile-time diagnostic strings for the derive codegen layer.

pub(super) const ERR_SIGNALS_TARGET: &str = "#[derive(Signals)] only supports enums";
pub(super) const ERR_SIGNALS_GENERICS: &str = "#[derive(Signals)] does not support generic enums";
pub(super) const ERR_SIGNALS_EMPTY: &str = "#[derive(Signals)] requires at least one variant";
pub(super) const ERR_SIGNALS_FIELDS: &str =
    "#[derive(Signals)] variants must be fieldless; signal payloads are passed at emit time";

pub(super) const ERR_SIGNAL_NEED_NAME: &str = "#[signal(...)] requires `name = \"...\"`";
pub(super) const ERR_SIGNAL_EMPTY_NAME: &str = "signal name must not be empty";
pub(super) const ERR_SIGNAL_MULTI_ATTR: &str = "a variant can only have one #[signal(...)] attribute";
pub(super) const ERR_SIGNAL_UNKNOWN_KEY: &str = "#[signal] only supports `name = \"...\"` and `params(...)`";
pub(super) const ERR_SIGNAL_DUP_NAME: &str = "signal name is already used by another variant";

pub(super) const ERR_EMITTER_TARGET: &str = "#[derive(SignalEmitter)] only supports structs";
pub(super) const ERR_EMITTER_NEED_FIELD: &str =
    "#[derive(SignalEmitter)] requires exactly one field marked #[signals]";
pub(super) const ERR_EMITTER_MULTI_FIELD: &str = "only one field can be marked #[signals]";
pub(super) const ERR_EMITTER_NO_ARGS: &str = "#[signals] does not accept any arguments";
