//! Spoken words for operators and function keys.
//!
//! Every table falls back to English for a tag it does not know.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculator::{Function, Operator};
use crate::error::CalcError;

/// Languages with a localization table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageTag {
    #[default]
    EnUs,
    EsEs,
    FrFr,
    ZhCn,
    ZhHk,
}

impl LanguageTag {
    pub const ALL: [LanguageTag; 5] = [
        Self::EnUs,
        Self::EsEs,
        Self::FrFr,
        Self::ZhCn,
        Self::ZhHk,
    ];

    /// BCP 47 tag handed to the speech sink.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EsEs => "es-ES",
            Self::FrFr => "fr-FR",
            Self::ZhCn => "zh-CN",
            Self::ZhHk => "zh-HK",
        }
    }

    /// Name of the language in itself, for the language picker.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::EnUs => "English",
            Self::EsEs => "Español",
            Self::FrFr => "Français",
            Self::ZhCn => "中文",
            Self::ZhHk => "廣東話",
        }
    }

    /// Resolve a tag, falling back to English when there is no table for it.
    pub fn from_tag_or_default(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            tracing::warn!("No localization for language {:?}, using en-US", tag);
            Self::default()
        })
    }
}

impl FromStr for LanguageTag {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CalcError::UnsupportedLanguage(s.to_string()))
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for LanguageTag {
    fn from(tag: String) -> Self {
        Self::from_tag_or_default(&tag)
    }
}

impl From<LanguageTag> for String {
    fn from(lang: LanguageTag) -> Self {
        lang.as_str().to_string()
    }
}

/// Spoken word for an operator.
pub fn operator_word(lang: LanguageTag, op: Operator) -> &'static str {
    use LanguageTag::*;
    use Operator::*;

    match (lang, op) {
        (ZhCn, Add) => "加",
        (ZhCn, Sub) => "减",
        (ZhCn, Mul) => "乘以",
        (ZhCn, Div) => "除以",

        (ZhHk, Add) => "加",
        (ZhHk, Sub) => "減",
        (ZhHk, Mul) => "乘",
        (ZhHk, Div) => "除",

        (EsEs, Add) => "más",
        (EsEs, Sub) => "menos",
        (EsEs, Mul) => "por",
        (EsEs, Div) => "entre",

        (FrFr, Add) => "plus",
        (FrFr, Sub) => "moins",
        (FrFr, Mul) => "fois",
        (FrFr, Div) => "divisé par",

        (EnUs, Add) => "plus",
        (EnUs, Sub) => "minus",
        (EnUs, Mul) => "times",
        (EnUs, Div) => "divided by",
    }
}

/// Spoken word for a function key.
pub fn function_word(lang: LanguageTag, function: Function) -> &'static str {
    use Function::*;
    use LanguageTag::*;

    match (lang, function) {
        (ZhCn, Clear) => "清除",
        (ZhCn, Point) => "点",
        (ZhCn, Equals) => "等于",
        (ZhCn, Negate) => "负",
        (ZhCn, Percent) => "百分比",

        (ZhHk, Clear) => "清除",
        (ZhHk, Point) => "點",
        (ZhHk, Equals) => "等於",
        (ZhHk, Negate) => "負",
        (ZhHk, Percent) => "百分比",

        (EsEs, Clear) => "borrar",
        (EsEs, Point) => "punto",
        (EsEs, Equals) => "igual",
        (EsEs, Negate) => "negativo",
        (EsEs, Percent) => "por ciento",

        (FrFr, Clear) => "effacer",
        (FrFr, Point) => "point",
        (FrFr, Equals) => "égal",
        (FrFr, Negate) => "négatif",
        (FrFr, Percent) => "pour cent",

        (EnUs, Clear) => "clear",
        (EnUs, Point) => "point",
        (EnUs, Equals) => "equals",
        (EnUs, Negate) => "negative",
        (EnUs, Percent) => "percent",
    }
}
