// crates/geodash-core/src/text.rs

/// Convert a string into a folded key suitable for comparing region names.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Tamil Nādu` -> `Tamil Nadu`)
/// 2\) Normalize to lowercase
/// 3\) Collapse runs of whitespace, `&` is spelled out as `and`
///
/// Boundary files disagree on spelling ("ANDAMAN & NICOBAR" vs
/// "Andaman and Nicobar"), and parent references are plain names, so every
/// parent/child match goes through this function.
///
/// # Examples
///
/// ```rust
/// use geodash_core::text::fold_key;
///
/// assert_eq!(fold_key("Tamil Nādu"), "tamil nadu");
/// assert_eq!(fold_key("ANDAMAN  &  NICOBAR"), "andaman and nicobar");
/// ```
pub fn fold_key(s: &str) -> String {
    let folded = deunicode::deunicode(s).to_lowercase().replace('&', " and ");
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compares two names for equality after folding.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Name-based matching helpers for types that expose a display name.
///
/// Implementors provide a `&str` view of their name via
/// [`NameMatch::name_str`] and get accent/case-insensitive helpers.
///
/// # Examples
/// ```rust
/// use geodash_core::text::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Puducherry").is_named("PUDUCHERRY"));
/// assert!(Place("Dādra and Nagar Haveli").name_contains("nagar"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Accent-insensitive and case-insensitive name comparison.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }

    /// Accent-insensitive + case-insensitive substring match.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_accents_and_ampersands() {
        assert_eq!(fold_key("Jammu & Kashmir"), "jammu and kashmir");
        assert!(equals_folded("Jammu and Kashmir", "JAMMU & KASHMIR"));
        assert!(equals_folded("Mahārāshtra", "maharashtra"));
        assert!(!equals_folded("Goa", "Gujarat"));
    }

    #[test]
    fn fold_collapses_whitespace() {
        assert_eq!(fold_key("  West   Bengal "), "west bengal");
    }
}
