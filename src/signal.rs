use std::{borrow::Borrow, fmt};

use serde::Serialize;

use crate::catalog::SignalDoc;
use crate::error::{Operation, Result, SignalError};

/// Validated signal identifier: case-sensitive, never empty.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SignalName(String);

impl SignalName {
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        Self::parse(name.as_ref(), Operation::AddSignal)
    }

    pub(crate) fn parse(name: &str, op: Operation) -> Result<Self> {
        if name.is_empty() {
            return Err(SignalError::EmptyName { op });
        }
        Ok(SignalName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SignalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// 允许以 &str 直接查表
impl Borrow<str> for SignalName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Informal documentation attached to a declared signal. Never enforced.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SignalInfo {
    pub summary: Option<String>,
    pub params: Vec<ParamInfo>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ParamInfo {
    pub name: String,
    pub description: String,
}

impl SignalInfo {
    pub fn with_summary(summary: impl Into<String>) -> Self {
        Self { summary: Some(summary.into()), params: Vec::new() }
    }

    pub fn param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.params.push(ParamInfo { name: name.into(), description: description.into() });
        self
    }

    /// Number of documented positional arguments.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl From<&SignalDoc> for SignalInfo {
    fn from(doc: &SignalDoc) -> Self {
        let summary = if doc.summary.is_empty() { None } else { Some(doc.summary.to_string()) };
        let params = doc
            .params
            .iter()
            .map(|p| match p.split_once(':') {
                Some((n, d)) => ParamInfo {
                    name: n.trim().to_string(),
                    description: d.trim().to_string(),
                },
                None => ParamInfo {
                    name: p.trim().to_string(),
                    description: String::new(),
                },
            })
            .collect();
        Self { summary, params }
    }
}
