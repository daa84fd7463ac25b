use std::{fmt, str::FromStr};

use anyhow::{bail, Context};

use crate::{exports, Backend};

/// One callable export, selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Multiply,
    Divide,
    IsEven,
}

impl Operation {
    pub fn export_name(&self) -> &'static str {
        match self {
            Operation::Add => exports::ADD,
            Operation::Multiply => exports::MULTIPLY,
            Operation::Divide => exports::DIVIDE,
            Operation::IsEven => exports::IS_EVEN,
        }
    }

    /// Number of operands the export takes.
    pub fn arity(&self) -> usize {
        match self {
            Operation::IsEven => 1,
            _ => 2,
        }
    }

    /// Parse `operands` for this operation and call it on `backend`.
    ///
    /// Integer operations take `i32` operands, floating point ones take
    /// anything [`f64::from_str`] accepts (including `inf` and `NaN`).
    pub fn call(&self, backend: &mut dyn Backend, operands: &[String]) -> anyhow::Result<Value> {
        if operands.len() != self.arity() {
            bail!(
                "`{}` takes {} operand(s), got {}",
                self.export_name(),
                self.arity(),
                operands.len()
            );
        }

        log::debug!("calling {}({})", self.export_name(), operands.join(", "));

        let value = match self {
            Operation::Add => Value::I32(backend.add(int(operands, 0)?, int(operands, 1)?)?),
            Operation::Multiply => {
                Value::F64(backend.multiply(float(operands, 0)?, float(operands, 1)?)?)
            }
            Operation::Divide => {
                Value::F64(backend.divide(float(operands, 0)?, float(operands, 1)?)?)
            }
            Operation::IsEven => Value::Bool(backend.is_even(int(operands, 0)?)?),
        };

        Ok(value)
    }
}

fn int(operands: &[String], idx: usize) -> anyhow::Result<i32> {
    operands[idx]
        .parse()
        .with_context(|| format!("operand {} ({:?}) is not a 32-bit integer", idx + 1, operands[idx]))
}

fn float(operands: &[String], idx: usize) -> anyhow::Result<f64> {
    operands[idx]
        .parse()
        .with_context(|| format!("operand {} ({:?}) is not a number", idx + 1, operands[idx]))
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            exports::ADD => Ok(Operation::Add),
            exports::MULTIPLY => Ok(Operation::Multiply),
            exports::DIVIDE => Ok(Operation::Divide),
            exports::IS_EVEN => Ok(Operation::IsEven),
            _ => Err(format!(
                "unknown operation '{s}', expected one of: {}",
                exports::ALL.join(", ")
            )),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.export_name())
    }
}

/// Result of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I32(i32),
    F64(f64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}
