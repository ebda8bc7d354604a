// SPDX-License-Identifier: Apache-2.0 OR MIT
use std::borrow::Cow;

use crate::context::{Binding, Scope};
use crate::runtime::is_truthy;
use crate::scan::{replace_blocks, Sigil};

/// Resolves conditional sections against `scope`.
///
/// The positive pass runs to completion before the negative pass starts.
/// Positive blocks bound to a sequence are left untouched for the loop pass.
/// A kept body is copied verbatim: markers inside it are left for the
/// following passes.
pub fn process_sections(template: &str, scope: &Scope<'_>) -> String {
    let positive = replace_blocks(template, Sigil::Section, |block| {
        match scope.lookup(block.name) {
            Some(Binding::Sequence(_)) => Cow::Borrowed(block.source),
            binding if is_truthy(binding) => Cow::Borrowed(block.body),
            _ => Cow::Borrowed(""),
        }
    });

    replace_blocks(&positive, Sigil::Inverted, |block| {
        if is_truthy(scope.lookup(block.name)) {
            Cow::Borrowed("")
        } else {
            Cow::Borrowed(block.body)
        }
    })
}
