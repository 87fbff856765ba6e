//! The host editor surface.
//!
//! Editors differ in how they register languages and completion sources. [`EditorApi`] is
//! the narrow set of calls a [`LanguageSession`](crate::LanguageSession) needs; hosts
//! implement it over their own plugin interface.

use lucene_query::{BRACKETS, HighlightSpan, KEYWORDS, OPERATORS};

use crate::CompletionProvider;

/// Language identifier used for every registration.
pub const LANGUAGE_ID: &str = "lucene";

/// Theme identifiers defined on every registration, dark first.
pub const THEMES: [&str; 2] = ["lucene-dark-theme", "lucene-light-theme"];

/// Produces highlight spans for one line or document of query text.
pub type TokensProvider = fn(&str) -> Vec<HighlightSpan>;

/// Handle for a registered completion provider, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderId(pub u64);

/// Calls a host editor must support to host the query language.
pub trait EditorApi {
    /// Registers a language identifier.
    fn register_language(&mut self, language: &str);

    /// Installs the syntax highlighter for a language.
    fn set_tokens_provider(&mut self, language: &str, provider: TokensProvider);

    /// Installs bracket and auto-closing behavior for a language.
    fn set_language_configuration(&mut self, language: &str, config: &LanguageConfiguration);

    /// Defines (or redefines) a named color theme.
    fn define_theme(&mut self, name: &str);

    /// Registers a completion provider and returns a handle for disposing it.
    fn register_completion_provider(
        &mut self,
        language: &str,
        provider: CompletionProvider,
    ) -> ProviderId;

    /// Removes a previously registered completion provider.
    fn dispose_completion_provider(&mut self, id: ProviderId);
}

impl<T: EditorApi + ?Sized> EditorApi for &mut T {
    fn register_language(&mut self, language: &str) {
        (**self).register_language(language);
    }

    fn set_tokens_provider(&mut self, language: &str, provider: TokensProvider) {
        (**self).set_tokens_provider(language, provider);
    }

    fn set_language_configuration(&mut self, language: &str, config: &LanguageConfiguration) {
        (**self).set_language_configuration(language, config);
    }

    fn define_theme(&mut self, name: &str) {
        (**self).define_theme(name);
    }

    fn register_completion_provider(
        &mut self,
        language: &str,
        provider: CompletionProvider,
    ) -> ProviderId {
        (**self).register_completion_provider(language, provider)
    }

    fn dispose_completion_provider(&mut self, id: ProviderId) {
        (**self).dispose_completion_provider(id);
    }
}

/// Bracket matching, auto-closing pairs and reserved words for a language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfiguration {
    /// Reserved words, for hosts that highlight or complete by word list.
    pub keywords: Vec<&'static str>,
    /// Operator spellings.
    pub operators: Vec<&'static str>,
    /// Matching bracket pairs.
    pub brackets: Vec<(char, char)>,
    /// Pairs closed automatically when the opener is typed.
    pub auto_closing_pairs: Vec<(char, char)>,
    /// Pairs used to wrap a selection.
    pub surrounding_pairs: Vec<(char, char)>,
}

impl LanguageConfiguration {
    /// Configuration for the query language: `()`, `[]`, `{}` brackets, plus `""` for
    /// auto-closing and surrounding, with the language's keywords and operators.
    pub fn lucene() -> Self {
        let brackets: Vec<(char, char)> = BRACKETS.iter().map(|b| (b.open, b.close)).collect();
        let mut pairs = brackets.clone();
        pairs.push(('"', '"'));

        Self {
            keywords: KEYWORDS.to_vec(),
            operators: OPERATORS.to_vec(),
            brackets,
            auto_closing_pairs: pairs.clone(),
            surrounding_pairs: pairs,
        }
    }
}
