//! Defines [`TermDisplay`], a formatter for rendering [`Term`] values,
//! and [`quote_if_needed`] for functor names.

use crate::{Arena, Term, TermError, View};
use std::borrow::Cow;
use std::fmt;

/// Returns `text` unchanged if it is a plain lowercase atom name or the
/// cut, otherwise the text in single quotes.
///
/// Inside quotes a single quote is doubled, and newline and carriage
/// return are written as the two characters `\n` and `\r`.  Other
/// characters, backslash and tab included, are copied as is.
///
/// ```
/// # use logic_terms::quote_if_needed;
/// assert_eq!(quote_if_needed("ab"), "ab");
/// assert_eq!(quote_if_needed("Ab"), "'Ab'");
/// assert_eq!(quote_if_needed("it's"), "'it''s'");
/// assert_eq!(quote_if_needed(""), "''");
/// ```
pub fn quote_if_needed(text: &str) -> Cow<'_, str> {
    if is_unquoted_atom(text) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    Cow::Owned(out)
}

fn is_unquoted_atom(s: &str) -> bool {
    if s == "!" {
        return true;
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A wrapper that ties together a [`Term`] and its [`Arena`] so the term
/// can be used with the standard formatting macros.
///
/// Structs print as their quoted functor followed by the arguments in
/// parentheses, separated by `", "`; a zero-arity struct prints without
/// parentheses.  Plain atoms print verbatim, numbers in decimal, and
/// variables by name.  The alternate flag (`{:#}`) adds the index to
/// every variable, as in `X#0`.
///
/// ```rust
/// use logic_terms::{Arena, func};
/// let mut arena = Arena::new();
/// let term = func!("foo"; 1, "X", "hello world" => &mut arena).unwrap();
/// assert_eq!(term.display(&arena).to_string(), "foo(1, X, hello world)");
/// ```
///
/// Construct instances via [`Term::display`] or [`Arena::display`].
pub struct TermDisplay<'a> {
    /// The term to display.
    term: &'a Term,
    /// The arena where the term is stored.
    arena: &'a Arena,
}

impl Term {
    /// Return a [`TermDisplay`] suitable for formatting with [`fmt::Display`].
    #[inline]
    pub fn display<'a>(&'a self, arena: &'a Arena) -> TermDisplay<'a> {
        TermDisplay { term: self, arena }
    }
}

impl Arena {
    #[inline]
    pub fn display<'a>(&'a self, term: &'a Term) -> TermDisplay<'a> {
        term.display(self)
    }

    /// Renders a struct as `functor(arg1, arg2, …)`.
    pub fn format_struct(&self, term: Term) -> Result<String, TermError> {
        match self.view(&term)? {
            View::Struct(..) => Ok(term.display(self).to_string()),
            _ => Err(TermError::UnexpectedKind {
                expected: "struct",
                found: term.kind_name(),
            }),
        }
    }
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term.view(self.arena).map_err(|_e| fmt::Error)? {
            View::Int(i) => write!(f, "{i}"),
            View::Real(r) => {
                if r.fract() == 0.0 {
                    write!(f, "{:.1}", r)
                } else {
                    write!(f, "{}", r)
                }
            }
            View::Atom(a) => f.write_str(a),
            View::Opaque(value) => write!(f, "{}", value),
            View::Var(name) => {
                if f.alternate() {
                    let index = self.arena.index(*self.term).map_err(|_e| fmt::Error)?;
                    write!(f, "{name}#{index}")
                } else {
                    f.write_str(name)
                }
            }
            View::Struct(ar, name, args) => {
                f.write_str(&quote_if_needed(name))?;
                if args.is_empty() {
                    return Ok(());
                }
                f.write_str("(")?;
                for (i, t) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if f.alternate() {
                        write!(f, "{:#}", t.display(ar))?;
                    } else {
                        write!(f, "{}", t.display(ar))?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Opaque, TermIndex, func};
    use proptest::prelude::*;

    #[test]
    fn quoting() {
        assert_eq!(quote_if_needed(""), "''");
        assert_eq!(quote_if_needed("ab"), "ab");
        assert_eq!(quote_if_needed("a_B9"), "a_B9");
        assert_eq!(quote_if_needed("Ab"), "'Ab'");
        assert_eq!(quote_if_needed("it's"), "'it''s'");
        assert_eq!(quote_if_needed(" "), "' '");
        assert_eq!(quote_if_needed("a''b"), "'a''''b'");
        assert_eq!(quote_if_needed("'that'"), "'''that'''");
        assert_eq!(quote_if_needed("a\nb"), "'a\\nb'");
        assert_eq!(quote_if_needed("a\rb"), "'a\\rb'");
        assert_eq!(quote_if_needed("a\tb"), "'a\tb'");
        assert_eq!(quote_if_needed("a\\b"), "'a\\b'");
        assert_eq!(quote_if_needed("1.5"), "'1.5'");
        assert_eq!(quote_if_needed("a.b"), "'a.b'");
        assert_eq!(quote_if_needed("_x"), "'_x'");
        assert_eq!(quote_if_needed("hello world"), "'hello world'");
        assert_eq!(quote_if_needed("été"), "'été'");
        assert_eq!(quote_if_needed("!"), "!");
    }

    #[test]
    fn absent_text_stays_absent() {
        let text: Option<&str> = None;
        assert_eq!(text.map(quote_if_needed), None);
    }

    #[test]
    fn unquoted_text_is_borrowed() {
        assert!(matches!(quote_if_needed("foo"), Cow::Borrowed("foo")));
        assert!(matches!(quote_if_needed("Foo"), Cow::Owned(_)));
    }

    #[test]
    fn format_structs() {
        let a = &mut Arena::new();
        let t = func!("f"; 1, "X", func!("g"; "a", 2.0) => a).unwrap();
        assert_eq!(a.format_struct(t).unwrap(), "f(1, X, g(a, 2.0))");

        let q = func!("Hello"; 1 => a).unwrap();
        assert_eq!(a.format_struct(q).unwrap(), "'Hello'(1)");

        let p = a.func("p", []).unwrap();
        assert_eq!(a.format_struct(p).unwrap(), "p");
        assert_eq!(a.format_struct(Term::TRUE).unwrap(), "true");
        assert_eq!(a.format_struct(Term::CUT).unwrap(), "!");

        let empty = a.term("").unwrap();
        assert_eq!(a.format_struct(empty).unwrap(), "''");

        assert!(a.format_struct(Term::int(1)).is_err());
    }

    #[test]
    fn arguments_are_not_requoted() {
        let a = &mut Arena::new();
        let t = func!("f"; "hello world", func!("it's"; 1) => a).unwrap();
        assert_eq!(a.display(&t).to_string(), "f(hello world, 'it''s'(1))");
    }

    #[test]
    fn display_scalars() {
        let a = &mut Arena::new();
        assert_eq!(Term::int(-42).display(a).to_string(), "-42");
        assert_eq!(Term::real(3.0).display(a).to_string(), "3.0");
        assert_eq!(Term::real(3.25).display(a).to_string(), "3.25");
        assert_eq!(Term::ANON.display(a).to_string(), "_");
        let o = a.term(Opaque(17u16)).unwrap();
        assert_eq!(o.display(a).to_string(), "17");
    }

    #[test]
    fn alternate_shows_var_indexes() {
        let a = &mut Arena::new();
        let x = a.var("X").unwrap();
        let t = a.func("f", [x, Term::ANON]).unwrap();
        assert_eq!(format!("{:#}", a.display(&t)), "f(X#?, _#_)");
        a.set_index(x, TermIndex::Assigned(0));
        assert_eq!(format!("{:#}", a.display(&t)), "f(X#0, _#_)");
        assert_eq!(format!("{}", a.display(&t)), "f(X, _)");
    }

    proptest! {
        #[test]
        fn prop_quoted_text_round_trips(text in "\\PC{0,12}") {
            let quoted = quote_if_needed(&text);
            if is_unquoted_atom(&text) {
                prop_assert_eq!(&*quoted, text.as_str());
            } else {
                prop_assert!(quoted.len() >= 2);
                prop_assert!(quoted.starts_with('\'') && quoted.ends_with('\''));
                let inner = &quoted[1..quoted.len() - 1];
                let unescaped = inner
                    .replace("''", "'")
                    .replace("\\n", "\n")
                    .replace("\\r", "\r");
                if !text.contains('\\') {
                    prop_assert_eq!(unescaped, text);
                }
            }
        }
    }
}
