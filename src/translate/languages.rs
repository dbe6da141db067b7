//! Language catalogue - Provider language codes and display names
//!
//! The table mirrors the provider's supported languages in catalogue order.
//! Name lookups are case-insensitive exact matches; the first match wins.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::translate::TranslateError;

/// Supported languages as (code, display name)
pub static LANGUAGES: &[(&str, &str)] = &[
    ("af", "afrikaans"),
    ("sq", "albanian"),
    ("am", "amharic"),
    ("ar", "arabic"),
    ("hy", "armenian"),
    ("az", "azerbaijani"),
    ("eu", "basque"),
    ("be", "belarusian"),
    ("bn", "bengali"),
    ("bs", "bosnian"),
    ("bg", "bulgarian"),
    ("ca", "catalan"),
    ("ceb", "cebuano"),
    ("ny", "chichewa"),
    ("zh-cn", "chinese (simplified)"),
    ("zh-tw", "chinese (traditional)"),
    ("co", "corsican"),
    ("hr", "croatian"),
    ("cs", "czech"),
    ("da", "danish"),
    ("nl", "dutch"),
    ("en", "english"),
    ("eo", "esperanto"),
    ("et", "estonian"),
    ("tl", "filipino"),
    ("fi", "finnish"),
    ("fr", "french"),
    ("fy", "frisian"),
    ("gl", "galician"),
    ("ka", "georgian"),
    ("de", "german"),
    ("el", "greek"),
    ("gu", "gujarati"),
    ("ht", "haitian creole"),
    ("ha", "hausa"),
    ("haw", "hawaiian"),
    ("iw", "hebrew"),
    ("he", "hebrew"),
    ("hi", "hindi"),
    ("hmn", "hmong"),
    ("hu", "hungarian"),
    ("is", "icelandic"),
    ("ig", "igbo"),
    ("id", "indonesian"),
    ("ga", "irish"),
    ("it", "italian"),
    ("ja", "japanese"),
    ("jw", "javanese"),
    ("kn", "kannada"),
    ("kk", "kazakh"),
    ("km", "khmer"),
    ("ko", "korean"),
    ("ku", "kurdish (kurmanji)"),
    ("ky", "kyrgyz"),
    ("lo", "lao"),
    ("la", "latin"),
    ("lv", "latvian"),
    ("lt", "lithuanian"),
    ("lb", "luxembourgish"),
    ("mk", "macedonian"),
    ("mg", "malagasy"),
    ("ms", "malay"),
    ("ml", "malayalam"),
    ("mt", "maltese"),
    ("mi", "maori"),
    ("mr", "marathi"),
    ("mn", "mongolian"),
    ("my", "myanmar (burmese)"),
    ("ne", "nepali"),
    ("no", "norwegian"),
    ("or", "odia"),
    ("ps", "pashto"),
    ("fa", "persian"),
    ("pl", "polish"),
    ("pt", "portuguese"),
    ("pa", "punjabi"),
    ("ro", "romanian"),
    ("ru", "russian"),
    ("sm", "samoan"),
    ("gd", "scots gaelic"),
    ("sr", "serbian"),
    ("st", "sesotho"),
    ("sn", "shona"),
    ("sd", "sindhi"),
    ("si", "sinhala"),
    ("sk", "slovak"),
    ("sl", "slovenian"),
    ("so", "somali"),
    ("es", "spanish"),
    ("su", "sundanese"),
    ("sw", "swahili"),
    ("sv", "swedish"),
    ("tg", "tajik"),
    ("ta", "tamil"),
    ("te", "telugu"),
    ("th", "thai"),
    ("tr", "turkish"),
    ("uk", "ukrainian"),
    ("ur", "urdu"),
    ("ug", "uyghur"),
    ("uz", "uzbek"),
    ("vi", "vietnamese"),
    ("cy", "welsh"),
    ("xh", "xhosa"),
    ("yi", "yiddish"),
    ("yo", "yoruba"),
    ("zu", "zulu"),
];

// Lower-cased display name -> code, keeping the first code per name
static BY_NAME: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::with_capacity(LANGUAGES.len());
    for (code, name) in LANGUAGES {
        index.entry(*name).or_insert(*code);
    }
    index
});

static BY_CODE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LANGUAGES.iter().copied().collect());

/// Resolve a display name to its code
pub fn code_for_name(name: &str) -> Result<&'static str, TranslateError> {
    BY_NAME
        .get(name.trim().to_lowercase().as_str())
        .copied()
        .ok_or_else(|| TranslateError::InvalidLanguage(name.trim().to_string()))
}

/// Resolve a code to its display name
pub fn name_for_code(code: &str) -> Option<&'static str> {
    BY_CODE.get(code).copied()
}

/// Whether the provider supports a code
pub fn is_supported(code: &str) -> bool {
    name_for_code(code).is_some()
}

/// Resolve user input that may be either a display name or a code
pub fn resolve(input: &str) -> Result<&'static str, TranslateError> {
    if let Ok(code) = code_for_name(input) {
        return Ok(code);
    }
    let trimmed = input.trim().to_lowercase();
    BY_CODE
        .get_key_value(trimmed.as_str())
        .map(|(code, _)| *code)
        .ok_or_else(|| TranslateError::InvalidLanguage(input.trim().to_string()))
}

/// Catalogue entries whose code or name contains `filter` (case-insensitive)
pub fn search(filter: Option<&str>) -> Vec<(&'static str, &'static str)> {
    let needle = filter.map(|f| f.trim().to_lowercase());
    LANGUAGES
        .iter()
        .copied()
        .filter(|(code, name)| match &needle {
            Some(n) => code.contains(n.as_str()) || name.contains(n.as_str()),
            None => true,
        })
        .collect()
}
