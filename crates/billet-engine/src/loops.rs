// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::borrow::Cow;

use crate::context::{Binding, Scope};
use crate::scan::{replace_blocks, Sigil};
use crate::sections::process_sections;
use crate::telemetry;
use crate::variables::substitute_variables;

/// Expands every remaining `{{#Name}}...{{/Name}}` block.
///
/// Blocks whose name is not bound to a sequence collapse to an empty string.
/// For sequences, each element is overlaid on `scope` and the item body goes
/// through the section and variable passes under that derived scope. Item
/// bodies do not get a loop pass of their own.
pub fn process_loops(template: &str, scope: &Scope<'_>) -> String {
    replace_blocks(template, Sigil::Section, |block| {
        let Some(Binding::Sequence(items)) = scope.lookup(block.name) else {
            return Cow::Borrowed("");
        };
        telemetry::record_loop(block.name, items.len());

        let mut output = String::new();
        for item in items {
            let derived = scope.push(item);
            let resolved = process_sections(block.body, &derived);
            output.push_str(&substitute_variables(&resolved, &derived));
        }
        Cow::Owned(output)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    fn row(value: &str) -> Context {
        Context::new().with("V", value)
    }

    fn loops(template: &str, ctx: &Context) -> String {
        process_loops(template, &Scope::new(ctx))
    }

    #[test]
    fn expands_once_per_element_in_order() {
        let ctx = Context::new().with("Items", vec![row("a"), row("b"), row("c")]);
        assert_eq!(loops("{{#Items}}{{V}},{{/Items}}", &ctx), "a,b,c,");
    }

    #[test]
    fn empty_sequence_renders_nothing() {
        let ctx = Context::new().with("Items", Vec::<Context>::new());
        assert_eq!(loops("<{{#Items}}{{V}}{{/Items}}>", &ctx), "<>");
    }

    #[test]
    fn element_missing_field_renders_empty_segment() {
        let ctx = Context::new().with("Items", vec![row("a"), Context::new(), row("c")]);
        assert_eq!(loops("{{#Items}}[{{V}}]{{/Items}}", &ctx), "[a][][c]");
    }

    #[test]
    fn non_sequence_blocks_collapse() {
        let ctx = Context::new().with("Flag", true);
        assert_eq!(loops("x{{#Flag}}y{{/Flag}}z{{#Gone}}w{{/Gone}}", &ctx), "xz");
    }

    #[test]
    fn item_fields_shadow_parent_and_parent_fields_remain_visible() {
        let ctx = Context::new()
            .with("V", "parent")
            .with("Currency", "$")
            .with("Items", vec![row("child"), Context::new()]);
        let out = loops("{{#Items}}{{Currency}}{{V}};{{/Items}}", &ctx);
        assert_eq!(out, "$child;$parent;");
    }

    #[test]
    fn item_scoped_sections_resolve_per_iteration() {
        let ctx = Context::new().with(
            "Items",
            vec![
                Context::new().with("Name", "a").with("Note", "fragile"),
                Context::new().with("Name", "b").with("Note", ""),
            ],
        );
        let out = loops(
            "{{#Items}}{{Name}}{{#Note}}({{Note}}){{/Note}}{{^Note}}-{{/Note}} {{/Items}}",
            &ctx,
        );
        assert_eq!(out, "a(fragile) b- ");
    }
}
