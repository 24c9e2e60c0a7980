use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

pub const MAX_SLUG_LEN: usize = 50;

static SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        // kazakh
        'ә' => "a",
        'ғ' => "g",
        'қ' => "q",
        'ң' => "n",
        'ө' => "o",
        'ұ' => "u",
        'ү' => "u",
        'һ' => "h",
        'і' => "i",
        _ => return None,
    };
    Some(latin)
}

/// Turns a title into a lowercase ascii slug, at most [`MAX_SLUG_LEN`] chars.
///
/// Returns an empty string when nothing slug-worthy is left (e.g. a title made
/// only of punctuation); callers pick their own fallback.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        let piece: String = if c.is_ascii_alphanumeric() {
            c.to_string()
        } else if let Some(latin) = transliterate(c) {
            latin.to_string()
        } else {
            pending_hyphen = true;
            continue;
        };

        if piece.is_empty() {
            continue;
        }
        if pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        pending_hyphen = false;
        slug.push_str(&piece);
    }

    truncate(&slug, MAX_SLUG_LEN)
}

/// Appends `-2`, `-3`, ... until `taken` says the slug is free.
pub fn unique_slug<F>(base: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !taken(base) {
        return base.to_string();
    }

    let mut counter = 2;
    loop {
        let suffix = format!("-{counter}");
        let head = truncate(base, MAX_SLUG_LEN - suffix.len());
        let candidate = format!("{head}{suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() <= MAX_SLUG_LEN && SLUG_REGEX.is_match(slug)
}

/// Field validator for caller-supplied slugs.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_slug"))
    }
}

// Slugs are pure ascii at this point, so byte slicing is safe.
fn truncate(slug: &str, max: usize) -> String {
    let cut = if slug.len() > max { &slug[..max] } else { slug };
    cut.trim_matches('-').to_string()
}
