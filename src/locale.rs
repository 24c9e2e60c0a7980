use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Site languages. Russian is the base language every record is written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    Kz,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Kz => "kz",
            Locale::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "kz" | "kk" => Ok(Locale::Kz),
            "en" => Ok(Locale::En),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the variant for `locale`, falling back to the base (russian) value
/// when the variant is missing or blank.
pub fn resolve<'a>(
    locale: Locale,
    base: &'a str,
    kz: Option<&'a str>,
    en: Option<&'a str>,
) -> &'a str {
    let variant = match locale {
        Locale::Ru => None,
        Locale::Kz => kz,
        Locale::En => en,
    };

    match variant {
        Some(value) if !value.is_empty() => value,
        _ => base,
    }
}

/// Same as [`resolve`] for list fields such as homepage tags.
pub fn resolve_list<'a>(
    locale: Locale,
    base: &'a [String],
    kz: &'a [String],
    en: &'a [String],
) -> &'a [String] {
    let variant = match locale {
        Locale::Ru => base,
        Locale::Kz => kz,
        Locale::En => en,
    };

    if variant.is_empty() {
        base
    } else {
        variant
    }
}

/// Serde glue for nullable locale variants.
///
/// The file form stores a missing translation as `""`, the relational form as
/// `NULL`. Both land in memory as `None`, and `None` is written back as `""`.
pub mod variant {
    use super::*;

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.is_empty()))
    }
}
