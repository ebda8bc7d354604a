// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::context::{Binding, Context, Scalar, Scope};
use crate::loops::process_loops;
use crate::sections::process_sections;
use crate::variables::substitute_variables;

/// Runs the full pipeline over `template`: sections, then loops, then
/// variables, always in that order and always exactly once.
pub fn render(template: &str, context: &Context) -> String {
    let scope = Scope::new(context);
    let sections = process_sections(template, &scope);
    let loops = process_loops(&sections, &scope);
    substitute_variables(&loops, &scope)
}

/// Classifies a looked-up binding for conditional sections. Absent is falsy.
pub fn is_truthy(binding: Option<&Binding>) -> bool {
    binding.is_some_and(Binding::is_truthy)
}

impl Binding {
    /// Absent, null, blank, zero and empty sequences are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Binding::Scalar(scalar) => scalar.is_truthy(),
            Binding::Sequence(items) => !items.is_empty(),
        }
    }
}

impl Scalar {
    /// Per-value truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Null => false,
            Scalar::Bool(flag) => *flag,
            Scalar::Str(text) => !text.trim().is_empty(),
            Scalar::Int(int) => *int != 0,
            Scalar::Decimal(decimal) => !decimal.is_zero(),
        }
    }
}

/// String form used by variable substitution.
pub fn binding_to_string(binding: &Binding) -> String {
    match binding {
        Binding::Scalar(scalar) => scalar_to_string(scalar),
        Binding::Sequence(items) => format!("[sequence; {}]", items.len()),
    }
}

/// String form of a scalar; `Null` is empty.
pub fn scalar_to_string(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => String::new(),
        Scalar::Bool(flag) => flag.to_string(),
        Scalar::Str(text) => text.clone(),
        Scalar::Int(int) => int.to_string(),
        Scalar::Decimal(decimal) => decimal.to_string(),
    }
}
