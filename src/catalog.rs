use std::fmt;

pub use signals_macros::Signals;

/// Documentation record for one signal, submitted at link time by
/// `#[derive(Signals)]` and collected via inventory.
/// - `summary`: first paragraph of the variant's doc comment (may be empty).
/// - `params`: `"name: description"` strings in positional order.
#[derive(Debug)]
pub struct SignalDoc {
    pub name: &'static str,
    pub summary: &'static str,
    pub params: &'static [&'static str],
    pub owner: fn() -> &'static str,
}

inventory::collect!(SignalDoc);

/// Look up a documented signal by name.
pub fn lookup(name: &str) -> Option<&'static SignalDoc> {
    inventory::iter::<SignalDoc>
        .into_iter()
        .find(|doc| doc.name == name)
}

/// Iterate all documented signals
pub fn all() -> Vec<&'static SignalDoc> {
    inventory::iter::<SignalDoc>.into_iter().collect()
}

/// Documented signals declared by the enum type `T`.
pub fn of<T: 'static>() -> Vec<&'static SignalDoc> {
    let owner = std::any::type_name::<T>();
    inventory::iter::<SignalDoc>
        .into_iter()
        .filter(|doc| (doc.owner)() == owner)
        .collect()
}

/// Typed set of signal names, implemented by `#[derive(Signals)]`.
pub trait SignalSet: Copy + AsRef<str> + 'static {
    const ALL: &'static [Self];
    fn name(self) -> &'static str;
}

/// Returned by the `FromStr` impl of a `#[derive(Signals)]` enum.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSignalError {
    pub name: String,
}

impl fmt::Display for ParseSignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown signal name '{}'", self.name)
    }
}
impl std::error::Error for ParseSignalError {}
