// SPDX-License-Identifier: Apache-2.0 OR MIT
use thiserror::Error;

/// Unified error type for the billet crates.
///
/// Rendering itself never fails: missing names and malformed markers degrade
/// to empty or literal text. Errors only come from the construction helpers
/// around the pipeline, such as converting external data into a
/// [`Context`](crate::Context) or resolving a template by name.
#[derive(Debug, Error)]
pub enum Error {
    /// Input data cannot be turned into a binding context.
    #[error("binding error: {message}")]
    Binding {
        /// What went wrong.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// A template could not be selected or loaded.
    #[error("template error: {message}")]
    Template {
        /// What went wrong.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Builds an [`Error::Binding`] without a source.
    pub fn binding(message: impl Into<String>) -> Self {
        Error::Binding {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an [`Error::Binding`] wrapping the underlying error.
    pub fn binding_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Binding {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Builds an [`Error::Template`].
    pub fn template(message: impl Into<String>) -> Self {
        Error::Template {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_includes_category_and_message() {
        let err = Error::template("unknown template kind \"fancy\"");
        assert_eq!(
            err.to_string(),
            "template error: unknown template kind \"fancy\""
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn binding_error_keeps_source() {
        let cause = "x".parse::<i64>().unwrap_err();
        let err = Error::binding_with_source("field `Qty` is not numeric", cause);
        assert!(err.to_string().starts_with("binding error:"));
        assert!(err.source().is_some());
    }
}
