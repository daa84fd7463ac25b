//! Export names of a calculator module.

pub const ADD: &str = "add";
pub const MULTIPLY: &str = "multiply";
pub const DIVIDE: &str = "divide";
pub const IS_EVEN: &str = "is_even";

/// Exports every calculator module must provide. Anything else is optional.
pub const REQUIRED: [&str; 2] = [ADD, MULTIPLY];

/// Every export a backend knows how to call.
pub const ALL: [&str; 4] = [ADD, MULTIPLY, DIVIDE, IS_EVEN];
