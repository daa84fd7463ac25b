use std::fmt;

use crate::exports;

/// WebAssembly value types, as they appear in function signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValType {
    I32,
    I64,
    F32,
    F64,
    FuncRef,
    ExternRef,
}

impl fmt::Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValType::I32 => "i32",
            ValType::I64 => "i64",
            ValType::F32 => "f32",
            ValType::F64 => "f64",
            ValType::FuncRef => "funcref",
            ValType::ExternRef => "externref",
        })
    }
}

/// An exported function and its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub params: Vec<ValType>,
    pub results: Vec<ValType>,
}

impl Signature {
    /// The signature a calculator module has to give the export `name`, or
    /// `None` if backends don't call such an export.
    pub fn expected(name: &str) -> Option<Signature> {
        use ValType::*;

        let (params, results) = match name {
            exports::ADD => (vec![I32, I32], vec![I32]),
            exports::MULTIPLY | exports::DIVIDE => (vec![F64, F64], vec![F64]),
            exports::IS_EVEN => (vec![I32], vec![I32]),
            _ => return None,
        };

        Some(Signature {
            name: name.to_string(),
            params,
            results,
        })
    }

    /// Whether this export is one backends call, with the type they expect.
    pub fn is_calculator_export(&self) -> bool {
        Signature::expected(&self.name).as_ref() == Some(self)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")?;

        match self.results.as_slice() {
            [] => Ok(()),
            [result] => write!(f, " -> {result}"),
            results => {
                f.write_str(" -> (")?;
                for (idx, result) in results.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{result}")?;
                }
                f.write_str(")")
            }
        }
    }
}
