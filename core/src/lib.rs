#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod exports;
mod operation;
mod signature;

#[doc(inline)]
pub use operation::{Operation, Value};
#[doc(inline)]
pub use signature::{Signature, ValType};

/// Common trait for WebAssembly backends hosting a calculator module.
///
/// Each method calls the export of the same name. Guest traps, and calls to
/// optional exports the module doesn't provide, come back as errors.
pub trait Backend {
    /// Call `add(i32, i32) -> i32`.
    fn add(&mut self, a: i32, b: i32) -> anyhow::Result<i32>;
    /// Call `multiply(f64, f64) -> f64`.
    fn multiply(&mut self, a: f64, b: f64) -> anyhow::Result<f64>;
    /// Call the optional `divide(f64, f64) -> f64`.
    fn divide(&mut self, a: f64, b: f64) -> anyhow::Result<f64>;
    /// Call the optional `is_even(i32) -> i32`, nonzero meaning even.
    fn is_even(&mut self, num: i32) -> anyhow::Result<bool>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn add(&mut self, a: i32, b: i32) -> anyhow::Result<i32> {
        (**self).add(a, b)
    }

    fn multiply(&mut self, a: f64, b: f64) -> anyhow::Result<f64> {
        (**self).multiply(a, b)
    }

    fn divide(&mut self, a: f64, b: f64) -> anyhow::Result<f64> {
        (**self).divide(a, b)
    }

    fn is_even(&mut self, num: i32) -> anyhow::Result<bool> {
        (**self).is_even(num)
    }
}
