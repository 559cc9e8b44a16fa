//! URL slugs derived from category names.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::name::CategoryName;

/// A URL-safe identifier derived from a [`CategoryName`].
///
/// Slugs are never set directly by clients; the only constructor is
/// [`Slug::from_name`], so a slug always matches the name it came from.
///
/// ## Derivation
///
/// 1. Latin letters with diacritics are folded to ASCII (`ó` -> `o`, `ß` -> `ss`)
/// 2. `@` becomes `-at-` and `_` becomes `-`
/// 3. Everything is lowercased
/// 4. Characters that are not letters, digits, whitespace or `-` are dropped
/// 5. Runs of whitespace and `-` collapse to a single `-`, trimmed at both ends
///
/// ```
/// use catalog_core::{CategoryName, Slug};
///
/// let name = CategoryName::parse("Electrónica & Gadgets").unwrap();
/// assert_eq!(Slug::from_name(&name).as_str(), "electronica-gadgets");
/// ```
///
/// A name made only of punctuation produces an empty slug; callers must treat
/// that as invalid input (see [`Slug::is_empty`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive the slug for a category name.
    #[must_use]
    pub fn from_name(name: &CategoryName) -> Self {
        let mut folded = String::with_capacity(name.as_str().len());
        for c in name.as_str().chars() {
            match c {
                '@' => folded.push_str("-at-"),
                '_' => folded.push('-'),
                _ => match fold_latin(c) {
                    Some(ascii) => folded.push_str(ascii),
                    None => folded.extend(c.to_lowercase()),
                },
            }
        }

        let mut slug = String::with_capacity(folded.len());
        let mut pending_separator = false;
        for c in folded.chars().flat_map(char::to_lowercase) {
            if c == '-' || c.is_whitespace() {
                pending_separator = true;
            } else if c.is_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(c);
            }
        }

        Self(slug)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the name contained no letters or digits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Fold common Latin letters with diacritics to their ASCII spelling.
const fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ą' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ą' => "A",
        'æ' => "ae",
        'Æ' => "AE",
        'ç' | 'ć' | 'č' => "c",
        'Ç' | 'Ć' | 'Č' => "C",
        'ď' | 'đ' => "d",
        'Ď' | 'Đ' => "D",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ę' | 'Ě' => "E",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' => "I",
        'ł' => "l",
        'Ł' => "L",
        'ñ' | 'ń' | 'ň' => "n",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' => "O",
        'œ' => "oe",
        'Œ' => "OE",
        'ř' => "r",
        'Ř' => "R",
        'ś' | 'š' => "s",
        'Ś' | 'Š' => "S",
        'ß' => "ss",
        'ť' => "t",
        'Ť' => "T",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' | 'Ÿ' => "Y",
        'ź' | 'ż' | 'ž' => "z",
        'Ź' | 'Ż' | 'Ž' => "Z",
        _ => return None,
    };
    Some(folded)
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn slug(name: &str) -> String {
        Slug::from_name(&CategoryName::parse(name).unwrap()).into_inner()
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(slug("Toys"), "toys");
    }

    #[test]
    fn test_spaces_become_single_dash() {
        assert_eq!(slug("Home   and  Garden"), "home-and-garden");
    }

    #[test]
    fn test_diacritics_are_folded() {
        assert_eq!(slug("Electrónica"), "electronica");
        assert_eq!(slug("Alimentación"), "alimentacion");
        assert_eq!(slug("Straße"), "strasse");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(slug("Books, Magazines & More!"), "books-magazines-more");
    }

    #[test]
    fn test_underscore_and_at() {
        assert_eq!(slug("kids_toys"), "kids-toys");
        assert_eq!(slug("deals@home"), "deals-at-home");
    }

    #[test]
    fn test_leading_and_trailing_separators_trimmed() {
        assert_eq!(slug("-- Sale --"), "sale");
    }

    #[test]
    fn test_non_latin_letters_are_kept() {
        assert_eq!(slug("Книги"), "книги");
    }

    #[test]
    fn test_punctuation_only_is_empty() {
        assert!(Slug::from_name(&CategoryName::parse("!!!").unwrap()).is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(slug("Sports & Fitness"), slug("Sports & Fitness"));
    }
}
