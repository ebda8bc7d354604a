// SPDX-License-Identifier: Apache-2.0 OR MIT
use crate::context::{Binding, Scope};
use crate::runtime::binding_to_string;
use crate::scan::replace_variables;

/// Replaces each bare `{{Name}}` with its bound value's string form.
///
/// Absent and null names become empty strings. Substituted text is final and
/// is never scanned for further markers.
pub fn substitute_variables(template: &str, scope: &Scope<'_>) -> String {
    replace_variables(template, |name| match scope.lookup(name) {
        Some(binding @ Binding::Sequence(_)) => {
            tracing::trace!(name, "sequence referenced in variable position");
            binding_to_string(binding)
        }
        Some(binding) => binding_to_string(binding),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, Scalar};

    fn vars(template: &str, ctx: &Context) -> String {
        substitute_variables(template, &Scope::new(ctx))
    }

    #[test]
    fn replaces_bound_names() {
        let ctx = Context::new().with("Total", "$1,375.00").with("Qty", 2_i64);
        assert_eq!(vars("Total: {{Total}} x{{Qty}}", &ctx), "Total: $1,375.00 x2");
    }

    #[test]
    fn missing_and_null_become_empty() {
        let ctx = Context::new().with("Notes", Scalar::Null);
        assert_eq!(vars("[{{Missing}}][{{Notes}}]", &ctx), "[][]");
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        let ctx = Context::new()
            .with("Notes", "{{Secret}}")
            .with("Secret", "leak");
        assert_eq!(vars("{{Notes}}", &ctx), "{{Secret}}");
    }

    #[test]
    fn no_escaping_is_applied() {
        let ctx = Context::new().with("Html", "<b>&</b>");
        assert_eq!(vars("{{Html}}", &ctx), "<b>&</b>");
    }

    #[test]
    fn block_markers_are_left_alone() {
        let ctx = Context::new().with("A", "x");
        assert_eq!(vars("{{#A}}{{A}}{{/A}}{{^A}}", &ctx), "{{#A}}x{{/A}}{{^A}}");
    }

    #[test]
    fn sequence_in_variable_position_uses_placeholder() {
        let ctx = Context::new().with("Items", vec![Context::new()]);
        assert_eq!(vars("{{Items}}", &ctx), "[sequence; 1]");
    }
}
