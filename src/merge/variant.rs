//! Discriminator-based selection from a closed variant set.

use crate::error::ConfigurationError;
use std::fmt::Display;

/// A value tagged with a discriminator from a closed set.
pub trait Discriminated {
    type Kind: Copy + Eq + Display;

    fn kind(&self) -> Self::Kind;
}

/// Pick the single variant whose discriminator equals `kind`.
///
/// Zero matches is [`ConfigurationError::NotFound`]; more than one is
/// [`ConfigurationError::Ambiguous`].
pub fn select<V: Discriminated>(variants: &[V], kind: V::Kind) -> Result<&V, ConfigurationError> {
    let mut matches = variants.iter().filter(|v| v.kind() == kind);
    let first = matches.next().ok_or_else(|| ConfigurationError::NotFound {
        kind: kind.to_string(),
    })?;
    let extra = matches.count();
    if extra > 0 {
        return Err(ConfigurationError::Ambiguous {
            kind: kind.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Flavor {
        Salt,
        Sweet,
        Sour,
    }

    impl Display for Flavor {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    #[derive(Debug)]
    struct Tagged(Flavor, u8);

    impl Discriminated for Tagged {
        type Kind = Flavor;

        fn kind(&self) -> Flavor {
            self.0
        }
    }

    #[test]
    fn test_select_single_match() {
        let variants = [
            Tagged(Flavor::Salt, 1),
            Tagged(Flavor::Sweet, 2),
            Tagged(Flavor::Sour, 3),
        ];
        assert_eq!(select(&variants, Flavor::Sweet).unwrap().1, 2);
    }

    #[test]
    fn test_select_not_found() {
        let variants = [Tagged(Flavor::Salt, 1)];
        assert_eq!(
            select(&variants, Flavor::Sour).err(),
            Some(ConfigurationError::NotFound {
                kind: "Sour".into()
            })
        );
        assert!(select::<Tagged>(&[], Flavor::Salt).is_err());
    }

    #[test]
    fn test_select_ambiguous() {
        let variants = [
            Tagged(Flavor::Sweet, 1),
            Tagged(Flavor::Salt, 2),
            Tagged(Flavor::Sweet, 3),
            Tagged(Flavor::Sweet, 4),
        ];
        let err = select(&variants, Flavor::Sweet).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::Ambiguous {
                kind: "Sweet".into(),
                count: 3
            }
        );
        assert_eq!(err.to_string(), "3 settings variants share the discriminator Sweet");
        // Other kinds in the same list still resolve.
        assert_eq!(select(&variants, Flavor::Salt).unwrap().1, 2);
    }
}
