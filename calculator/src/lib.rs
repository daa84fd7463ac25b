//! The calculator module.
//!
//! Built for `wasm32-unknown-unknown` this produces a loadable module whose
//! exports use C linkage:
//!
//! ```text
//! add(i32, i32) -> i32
//! multiply(f64, f64) -> f64
//! divide(f64, f64) -> f64
//! is_even(i32) -> i32
//! ```
//!
//! On other targets it is a plain library so the same functions can be
//! called (and tested) natively.
#![cfg_attr(target_arch = "wasm32", no_std)]

/// Wrapping two's-complement sum.
#[no_mangle]
pub extern "C" fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// IEEE-754 double precision product.
#[no_mangle]
pub extern "C" fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Quotient of `a / b`, or NaN when `b` is zero (either sign).
#[no_mangle]
pub extern "C" fn divide(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        f64::NAN
    } else {
        a / b
    }
}

/// `1` if `num` is even, `0` otherwise.
#[no_mangle]
pub extern "C" fn is_even(num: i32) -> i32 {
    (num % 2 == 0) as i32
}

#[cfg(target_arch = "wasm32")]
#[panic_handler]
fn phandler(_: &core::panic::PanicInfo<'_>) -> ! {
    core::arch::wasm32::unreachable()
}
