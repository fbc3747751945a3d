//! URL slug generation.
//!
//! Slugs are derived from article titles: lowercased, common Turkish
//! characters transliterated, and every run of non-alphanumeric characters
//! collapsed to a single hyphen. Collision handling (the `-1`, `-2` suffix
//! search) lives in the editorial service because it needs a uniqueness
//! read from the store.

/// Normalize a title into its base slug.
///
/// Returns an empty string when the title contains no usable characters;
/// callers treat that as a validation error.
///
/// # Examples
///
/// ```
/// use masthead_core::slug::slugify;
///
/// assert_eq!(slugify("Gece"), "gece");
/// assert_eq!(slugify("Şiir Gecesi!"), "siir-gecesi");
/// assert_eq!(slugify("A Winter's Tale"), "a-winter-s-tale");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        let mapped = match ch {
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            'ç' | 'Ç' => Some('c'),
            'ğ' | 'Ğ' => Some('g'),
            'ı' | 'İ' => Some('i'),
            'ö' | 'Ö' => Some('o'),
            'ş' | 'Ş' => Some('s'),
            'ü' | 'Ü' => Some('u'),
            _ => None,
        };

        match mapped {
            Some(c) => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            }
            // Separators and unknown characters collapse into one hyphen.
            None => pending_hyphen = true,
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_plain_titles() {
        assert_eq!(slugify("Gece"), "gece");
    }

    #[test]
    fn collapses_whitespace_and_punctuation() {
        assert_eq!(slugify("Hello,   World!"), "hello-world");
    }

    #[test]
    fn transliterates_turkish_characters() {
        assert_eq!(slugify("Şiir Gecesi"), "siir-gecesi");
        assert_eq!(slugify("Güz Yağmuru"), "guz-yagmuru");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  --hello--  "), "hello");
    }

    #[test]
    fn empty_for_unusable_titles() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(slugify("Issue 42"), "issue-42");
    }
}
