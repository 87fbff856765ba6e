//! Language registration against a host editor.

use lucene_query::{FieldSchema, highlight};
use tracing::debug;

use crate::{
    CompletionProvider,
    api::{EditorApi, LANGUAGE_ID, LanguageConfiguration, ProviderId, THEMES},
};

/// Owns the query language's registration in one editor.
///
/// The language, its highlighter and its bracket configuration are registered on the first
/// call to [`register`](Self::register) only. Every call redefines the themes and swaps in a
/// fresh completion provider, disposing the one it replaces. Dropping the session disposes
/// the active provider.
#[derive(Debug)]
pub struct LanguageSession<E: EditorApi> {
    /// The host editor.
    editor: E,
    /// Language features have been registered.
    registered: bool,
    /// The completion provider currently installed, if any.
    provider: Option<ProviderId>,
}

impl<E: EditorApi> LanguageSession<E> {
    /// Creates a session that has not registered anything yet.
    pub fn new(editor: E) -> Self {
        Self {
            editor,
            registered: false,
            provider: None,
        }
    }

    /// Registers the language with a completion provider for `schema`.
    pub fn register(&mut self, schema: &[FieldSchema]) {
        self.register_provider(CompletionProvider::new(schema.to_vec()));
    }

    /// Registers the language with a preconfigured completion provider.
    pub fn register_provider(&mut self, provider: CompletionProvider) {
        if !self.registered {
            self.editor.register_language(LANGUAGE_ID);
            self.editor.set_tokens_provider(LANGUAGE_ID, highlight);
            self.editor
                .set_language_configuration(LANGUAGE_ID, &LanguageConfiguration::lucene());
            self.registered = true;
            debug!(language = LANGUAGE_ID, "registered language");
        }

        for theme in THEMES {
            self.editor.define_theme(theme);
        }

        self.dispose();
        let fields = provider.schema().len();
        let id = self
            .editor
            .register_completion_provider(LANGUAGE_ID, provider);
        self.provider = Some(id);
        debug!(?id, fields, "installed completion provider");
    }

    /// Disposes the active completion provider, if any.
    ///
    /// The language itself stays registered.
    pub fn dispose(&mut self) {
        if let Some(id) = self.provider.take() {
            self.editor.dispose_completion_provider(id);
            debug!(?id, "disposed completion provider");
        }
    }

    /// Returns true once the language features have been registered.
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// The host editor.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// The host editor, mutably.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }
}

impl<E: EditorApi> Drop for LanguageSession<E> {
    fn drop(&mut self) {
        self.dispose();
    }
}
