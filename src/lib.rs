#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub use wasmcalc_core as core;

#[doc(inline)]
pub use crate::core::{exports, Backend, Operation, Signature, ValType, Value};

#[cfg(feature = "wasmer")]
pub mod wasmer_backend;

#[cfg(feature = "wasmer")]
#[doc(inline)]
pub use crate::wasmer_backend::WasmerBackend;

#[cfg(feature = "wasmi")]
pub mod wasmi_backend;

#[cfg(feature = "wasmi")]
#[doc(inline)]
pub use crate::wasmi_backend::{export_signatures, WasmiBackend};

#[cfg(test)]
mod testing;

/// Message for calls to an optional export the module doesn't provide.
#[cfg(any(feature = "wasmi", feature = "wasmer"))]
fn missing_export(name: &str) -> anyhow::Error {
    anyhow::anyhow!("module does not export `{name}`")
}

#[cfg(any(feature = "wasmi", feature = "wasmer"))]
fn wrong_type(name: &str, err: impl std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!("export `{name}` has the wrong type: {err}")
}
