//! Editor integration for Lucene queries.
//!
//! Connects the query core to a host editor: [`LanguageSession`] registers the language,
//! its highlighter and bracket configuration through an [`EditorApi`] implementation, and
//! installs a [`CompletionProvider`] that turns cursor positions into completion items.

#![warn(missing_docs)]

mod api;
mod position;
mod provider;
mod session;

pub use api::{
    EditorApi, LANGUAGE_ID, LanguageConfiguration, ProviderId, THEMES, TokensProvider,
};
pub use position::{Position, TextRange, text_before_position, word_until_position};
pub use provider::{CompletionItem, CompletionItemKind, CompletionProvider};
pub use session::LanguageSession;
