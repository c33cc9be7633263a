use crate::api::{LANGUAGES, Language};

/// Prints the supported languages.
pub fn languages() {
    print!("{}", render_languages(LANGUAGES));
}

pub fn render_languages(languages: &[Language]) -> String {
    languages
        .iter()
        .map(|language| format!("{:<6}{}\n", language.code, language.name))
        .collect()
}
