//! Parsing of `functor/arity` predicate signatures.

use crate::TermError;

/// Splits `signature` on its last `/`.
fn split(signature: &str) -> Result<(&str, &str), TermError> {
    match signature.rfind('/') {
        Some(pos) if pos > 0 => Ok((&signature[..pos], &signature[pos + 1..])),
        _ => Err(TermError::InvalidSignature(signature.into())),
    }
}

/// Returns the functor part of a `functor/arity` signature.
///
/// ```
/// # use logic_terms::functor_from_signature;
/// assert_eq!(functor_from_signature("toto/4").unwrap(), "toto");
/// assert_eq!(functor_from_signature("a/b/2").unwrap(), "a/b");
/// assert!(functor_from_signature("toto4").is_err());
/// ```
pub fn functor_from_signature(signature: &str) -> Result<&str, TermError> {
    split(signature).map(|(functor, _)| functor)
}

/// Returns the arity part of a `functor/arity` signature.
pub fn arity_from_signature(signature: &str) -> Result<usize, TermError> {
    let (_, arity) = split(signature)?;
    arity
        .parse()
        .map_err(|_| TermError::InvalidSignature(signature.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn functor_and_arity() {
        assert_eq!(functor_from_signature("toto/4").unwrap(), "toto");
        assert_eq!(arity_from_signature("toto/4").unwrap(), 4);
        assert_eq!(functor_from_signature("=/2").unwrap(), "=");
        assert_eq!(functor_from_signature("//2").unwrap(), "/");
        assert_eq!(arity_from_signature("//2").unwrap(), 2);
        assert_eq!(arity_from_signature("true/0").unwrap(), 0);
    }

    #[test]
    fn missing_separator() {
        assert!(matches!(
            functor_from_signature("toto4"),
            Err(TermError::InvalidSignature(s)) if s == "toto4"
        ));
        assert!(matches!(
            arity_from_signature("toto4"),
            Err(TermError::InvalidSignature(_))
        ));
    }

    #[test]
    fn leading_separator_is_rejected() {
        assert!(functor_from_signature("/4").is_err());
        assert!(arity_from_signature("/4").is_err());
        assert!(functor_from_signature("").is_err());
    }

    #[test]
    fn bad_arity() {
        assert!(arity_from_signature("toto/").is_err());
        assert!(arity_from_signature("toto/x").is_err());
        assert!(arity_from_signature("toto/-1").is_err());
        assert_eq!(functor_from_signature("toto/N").unwrap(), "toto");
    }
}
