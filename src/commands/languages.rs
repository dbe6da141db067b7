//! Language catalogue commands

use crate::commands::single_error;
use crate::core::model::{LinguaError, ResultItem, ResultSet};
use crate::translate::languages;

/// List catalogue languages, optionally filtered
pub fn run_languages(filter: Option<&str>) -> ResultSet {
    languages::search(filter)
        .into_iter()
        .map(|(code, name)| ResultItem::language(code, name))
        .collect()
}

/// Resolve a display name to its code, or a code to its display name
pub fn run_lookup(input: &str) -> ResultSet {
    let item = match languages::code_for_name(input) {
        Ok(code) => ResultItem::language(code, input.trim().to_lowercase()),
        Err(e) => {
            let code = input.trim().to_lowercase();
            match languages::name_for_code(&code) {
                Some(name) => ResultItem::language(code, name),
                None => return single_error(LinguaError::from(&e)),
            }
        }
    };
    std::iter::once(item).collect()
}
