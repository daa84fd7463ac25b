//! Guest fixtures and checks shared by the backend tests.

use crate::{exports, Backend};

const ADD: &str = r#"(func (export "add") (param i32 i32) (result i32)
    local.get 0
    local.get 1
    i32.add)"#;

const MULTIPLY: &str = r#"(func (export "multiply") (param f64 f64) (result f64)
    local.get 0
    local.get 1
    f64.mul)"#;

const DIVIDE: &str = r#"(func (export "divide") (param f64 f64) (result f64)
    local.get 1
    f64.const 0
    f64.eq
    if (result f64)
      f64.const nan
    else
      local.get 0
      local.get 1
      f64.div
    end)"#;

const IS_EVEN: &str = r#"(func (export "is_even") (param i32) (result i32)
    local.get 0
    i32.const 2
    i32.rem_s
    i32.eqz)"#;

fn module(funcs: &[&str]) -> Vec<u8> {
    wat::parse_str(format!("(module {})", funcs.join("\n"))).expect("valid wat fixture")
}

/// The full calculator, equivalent to what the `calculator` crate compiles to.
pub fn calculator_wasm() -> Vec<u8> {
    module(&[ADD, MULTIPLY, DIVIDE, IS_EVEN])
}

/// Only the required exports.
pub fn arithmetic_only_wasm() -> Vec<u8> {
    module(&[ADD, MULTIPLY])
}

/// The full calculator minus the export called `name`.
pub fn without_export(name: &str) -> Vec<u8> {
    let funcs: Vec<&str> = exports::ALL
        .into_iter()
        .zip([ADD, MULTIPLY, DIVIDE, IS_EVEN])
        .filter(|(export, _)| *export != name)
        .map(|(_, func)| func)
        .collect();

    module(&funcs)
}

/// `add` exported with 64-bit operands.
pub fn mistyped_add_wasm() -> Vec<u8> {
    module(&[
        r#"(func (export "add") (param i64 i64) (result i64)
            local.get 0
            local.get 1
            i64.add)"#,
        MULTIPLY,
    ])
}

/// `divide` exported with integer operands.
pub fn mistyped_divide_wasm() -> Vec<u8> {
    module(&[
        ADD,
        MULTIPLY,
        r#"(func (export "divide") (param i32 i32) (result i32)
            local.get 0
            local.get 1
            i32.div_s)"#,
    ])
}

/// Build the `calculator` crate for `wasm32-unknown-unknown` and return the
/// module. Needs the wasm32 target installed.
pub fn build_calculator_crate() -> Vec<u8> {
    let target_dir = std::env::temp_dir().join("wasmcalc-calculator-build");
    let status = std::process::Command::new(env!("CARGO"))
        .args(["build", "--release", "--target", "wasm32-unknown-unknown"])
        .arg("--manifest-path")
        .arg(concat!(env!("CARGO_MANIFEST_DIR"), "/calculator/Cargo.toml"))
        .arg("--target-dir")
        .arg(&target_dir)
        .status()
        .expect("run cargo");
    assert!(status.success(), "building calculator for wasm32 failed");

    std::fs::read(target_dir.join("wasm32-unknown-unknown/release/calculator.wasm"))
        .expect("read calculator.wasm")
}

/// `add` traps unconditionally.
pub fn trapping_wasm() -> Vec<u8> {
    module(&[
        r#"(func (export "add") (param i32 i32) (result i32)
            unreachable)"#,
        MULTIPLY,
    ])
}

const INTS: [i32; 8] = [0, 1, -1, 7, -12, 1 << 30, i32::MAX, i32::MIN];
const FLOATS: [f64; 10] = [
    0.0,
    -0.0,
    1.0,
    -2.5,
    1e-310,
    1e300,
    f64::MAX,
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::NAN,
];

fn same_f64(x: f64, y: f64) -> bool {
    (x.is_nan() && y.is_nan()) || x.to_bits() == y.to_bits()
}

/// Scenarios and laws every calculator module must satisfy.
pub fn check_calculator(backend: &mut dyn Backend) {
    assert_eq!(backend.add(2, 3).unwrap(), 5);
    assert_eq!(backend.add(2147483647, 1).unwrap(), -2147483648);
    assert_eq!(backend.multiply(2.0, 3.5).unwrap(), 7.0);
    assert!(backend.multiply(f64::INFINITY, 0.0).unwrap().is_nan());

    for a in INTS {
        assert_eq!(backend.add(0, a).unwrap(), a);
        for b in INTS {
            assert_eq!(backend.add(a, b).unwrap(), backend.add(b, a).unwrap());
        }
    }

    for a in FLOATS {
        if a.is_finite() {
            assert_eq!(backend.multiply(a, 1.0).unwrap().to_bits(), a.to_bits());
        }
        for b in FLOATS {
            let ab = backend.multiply(a, b).unwrap();
            let ba = backend.multiply(b, a).unwrap();
            assert!(same_f64(ab, ba), "{a} * {b}");
        }
    }
}

/// Behaviour of the optional exports.
pub fn check_extras(backend: &mut dyn Backend) {
    assert_eq!(backend.divide(7.0, 2.0).unwrap(), 3.5);
    assert!(backend.divide(1.0, 0.0).unwrap().is_nan());
    assert!(backend.divide(1.0, -0.0).unwrap().is_nan());

    assert!(backend.is_even(4).unwrap());
    assert!(!backend.is_even(-3).unwrap());
    assert!(backend.is_even(i32::MIN).unwrap());
}

/// Compare every export against the natively compiled calculator.
pub fn check_against_native(backend: &mut dyn Backend) {
    for a in INTS {
        assert_eq!(backend.is_even(a).unwrap(), calculator::is_even(a) != 0);
        for b in INTS {
            assert_eq!(backend.add(a, b).unwrap(), calculator::add(a, b));
        }
    }

    for a in FLOATS {
        for b in FLOATS {
            let guest = backend.multiply(a, b).unwrap();
            assert!(same_f64(guest, calculator::multiply(a, b)), "{a} * {b}");

            let guest = backend.divide(a, b).unwrap();
            assert!(same_f64(guest, calculator::divide(a, b)), "{a} / {b}");
        }
    }
}
