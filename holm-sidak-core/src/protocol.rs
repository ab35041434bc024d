//! JSON documents exchanged with callers.
//!
//! An [`AnalysisRequest`] carries the groups and options for one run; the
//! [`ProcedureResult`](crate::ProcedureResult) it produces serializes as the
//! response document.

use serde::{Deserialize, Serialize};

use crate::procedure::ProcedureOptions;
use crate::stats::Tail;

/// One input sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
}

impl GroupInput {
    /// Create an unlabeled group.
    pub fn new(data: Vec<f64>) -> Self {
        Self { label: None, data }
    }

    /// Create a group with a display label.
    pub fn labeled(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: Some(label.into()),
            data,
        }
    }
}

/// Procedure options set by a request. Fields left out keep whatever value
/// the caller already resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<Tail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<bool>,
}

impl RequestOptions {
    /// Overlay the fields this request sets onto `base`.
    pub fn apply_to(&self, base: ProcedureOptions) -> ProcedureOptions {
        ProcedureOptions {
            alpha: self.alpha.unwrap_or(base.alpha),
            tail: self.tail.unwrap_or(base.tail),
            control: self.control.unwrap_or(base.control),
        }
    }

    /// The request's options on top of the defaults.
    pub fn resolve(&self) -> ProcedureOptions {
        self.apply_to(ProcedureOptions::default())
    }
}

impl From<ProcedureOptions> for RequestOptions {
    fn from(options: ProcedureOptions) -> Self {
        Self {
            alpha: Some(options.alpha),
            tail: Some(options.tail),
            control: Some(options.control),
        }
    }
}

/// A complete analysis request: the groups, in order, plus procedure options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub groups: Vec<GroupInput>,
    #[serde(default)]
    pub options: RequestOptions,
}

impl AnalysisRequest {
    /// Create a request that leaves every option to the caller.
    pub fn new(groups: Vec<GroupInput>) -> Self {
        Self {
            groups,
            options: RequestOptions::default(),
        }
    }

    /// Parse a request from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
