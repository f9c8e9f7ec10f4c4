//! Defines the [`Arena`] type, which owns the nodes of variables,
//! compound terms and opaque payloads referenced by [`Term`] handles.
//!
//! Provides constructors, accessors, and the side tables for the two
//! mutable slots of a node: its normalization index and its content.

use crate::term::{Handle, NodeRef, OpaqueValue};
use crate::{InternalTermError, IntoTerm, Symbol, Term, TermError, VarType, View};
use smartstring::alias::String;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The arena stores variables, compound terms and opaque host values.
///
/// An `Arena` owns all memory for these nodes.  Terms store only the
/// position of their node and remain valid as long as the arena is alive.
/// Nodes are immutable once created: a struct may only reference
/// arguments that already exist, so a term graph can never contain a
/// cycle.  Only the index and content side tables change after
/// construction.
///
/// A clone keeps the arena id, so handles created before cloning resolve
/// in both copies.  Once the two copies grow independently, a handle
/// created in one of them may resolve to an unrelated node of the other
/// without a [`TermError::ForeignTerm`] error.  Only use handles with the
/// copy that created them, or with copies cloned after they were created.
///
/// ```
/// # use logic_terms::{Arena, Term};
/// let mut arena = Arena::with_capacity(1024, 4096);
/// let x = arena.var("X").unwrap();
/// let t = arena.func("f", [x, Term::int(1)]).unwrap();
/// assert_eq!(arena.signature(t).unwrap(), "f/2");
/// ```
#[derive(Clone, Debug)]
pub struct Arena {
    /// Randomly generated Arena ID
    pub(crate) arena_id: ArenaID,

    /// Variables, structs and opaque values, addressed by node id.
    pub(crate) nodes: Vec<Node>,

    /// Argument storage.  Each struct owns a contiguous run of handles.
    pub(crate) terms: Vec<Term>,

    /// Normalization index of every node, parallel to `nodes`.
    pub(crate) indexes: Vec<TermIndex>,

    /// Optional payload attached to struct nodes.
    pub(crate) contents: HashMap<u32, Arc<dyn Any + Send + Sync>>,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaID(pub(crate) u32); // Random Arena ID

#[derive(Debug, Clone, Copy)]
pub struct ArenaStats {
    pub nodes_len: usize,
    pub terms_len: usize,
    pub contents_len: usize,
}

/// A run of argument handles in [`Arena::terms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slice {
    pub(crate) index: u32,
    pub(crate) len: u32,
}

#[derive(Clone, Debug)]
pub(crate) enum Node {
    Var {
        name: Symbol,
        ty: VarType,
    },
    Struct {
        name: Symbol,
        signature: Symbol,
        args: Slice,
    },
    Opaque(Arc<dyn OpaqueValue>),
}

/// The normalization index of a term.
///
/// A term starts `Unassigned`.  Index assignment gives every ordinary
/// variable its position in the binding frame and every struct the
/// number of variables found under it; the anonymous variable is marked
/// `Anonymous` and never takes a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermIndex {
    #[default]
    Unassigned,
    Anonymous,
    Assigned(u32),
}

impl TermIndex {
    #[inline]
    pub fn is_assigned(self) -> bool {
        !matches!(self, TermIndex::Unassigned)
    }

    /// Returns the numeric index, if one has been assigned.
    #[inline]
    pub fn value(self) -> Option<u32> {
        match self {
            TermIndex::Assigned(i) => Some(i),
            _ => None,
        }
    }
}

impl fmt::Display for TermIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermIndex::Unassigned => f.write_str("?"),
            TermIndex::Anonymous => f.write_str("_"),
            TermIndex::Assigned(i) => write!(f, "{i}"),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// Create a new, empty arena with given capacities.
    pub fn with_capacity(nodes_capacity: usize, terms_capacity: usize) -> Self {
        Self {
            arena_id: ArenaID(rand::random()),
            nodes: Vec::with_capacity(nodes_capacity),
            terms: Vec::with_capacity(terms_capacity),
            indexes: Vec::with_capacity(nodes_capacity),
            contents: HashMap::new(),
        }
    }

    /// Create a new, empty arena with default capacities.
    pub fn new() -> Self {
        Self::with_capacity(1024, 4096)
    }

    /// Returns stats.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            nodes_len: self.nodes.len(),
            terms_len: self.terms.len(),
            contents_len: self.contents.len(),
        }
    }

    /// Convert a `value` into `Term`.
    #[inline]
    pub fn term<T: IntoTerm>(&mut self, value: T) -> Result<Term, TermError> {
        value.into_term(self)
    }

    #[inline]
    pub fn int(&mut self, i: impl Into<i64>) -> Term {
        Term::int(i)
    }

    #[inline]
    pub fn real(&mut self, r: impl Into<f64>) -> Term {
        Term::real(r)
    }

    /// Returns the canonical atom for `name`, see [`Term::atom`].
    #[inline]
    pub fn atom(&mut self, name: impl AsRef<str>) -> Term {
        Term::atom(name)
    }

    /// Stores a host value as an opaque atomic term.
    pub fn opaque<T>(&mut self, value: T) -> Term
    where
        T: Any + fmt::Debug + fmt::Display + PartialEq + Send + Sync,
    {
        let id = self.push_node(Node::Opaque(Arc::new(value)));
        Term(Handle::Opaque(self.node_ref(id)))
    }

    /// Construct a new compound term from already built arguments.
    ///
    /// Every argument must belong to this arena.  A struct of positive
    /// arity needs a non-empty functor.  With no arguments the result is a
    /// zero-arity struct, or the shared constant for `!`, `true` and
    /// `false`.
    pub fn func(
        &mut self,
        functor: impl AsRef<str>,
        args: impl IntoIterator<Item = Term>,
    ) -> Result<Term, TermError> {
        let functor = functor.as_ref();
        let start = self.terms.len();
        for arg in args {
            if let Err(e) = self.verify(arg) {
                self.terms.truncate(start);
                return Err(e);
            }
            self.terms.push(arg);
        }
        let arity = self.terms.len() - start;
        if arity == 0 {
            let name = Symbol::intern(functor);
            return Ok(match name {
                Symbol::CUT | Symbol::TRUE | Symbol::FALSE => Term::atom_symbol(name),
                _ => self.push_struct(name, Slice { index: start as u32, len: 0 }),
            });
        }
        if functor.is_empty() {
            self.terms.truncate(start);
            return Err(TermError::EmptyFunctor);
        }
        let slice = Slice {
            index: start as u32,
            len: arity as u32,
        };
        Ok(self.push_struct(Symbol::intern(functor), slice))
    }

    /// Construct a new compound term, coercing each argument with
    /// [`IntoTerm`].  An absent argument is reported with its position.
    pub fn func_of<T: IntoTerm>(
        &mut self,
        functor: impl AsRef<str>,
        args: impl IntoIterator<Item = T>,
    ) -> Result<Term, TermError> {
        let functor = functor.as_ref();
        let mut terms = Vec::new();
        for (index, arg) in args.into_iter().enumerate() {
            match arg.into_term(self) {
                Ok(t) => terms.push(t),
                Err(TermError::AbsentValue) => {
                    return Err(TermError::MissingArgument {
                        functor: String::from(functor),
                        index,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        self.func(functor, terms)
    }

    /// Returns a new struct with the name and content of `term` and the
    /// given arguments.  The signature follows the new arity and the index
    /// of the copy is unassigned.
    pub fn clone_with_new_arguments(
        &mut self,
        term: Term,
        args: impl IntoIterator<Item = Term>,
    ) -> Result<Term, TermError> {
        let name = self.struct_name(term)?;
        let content = match term.0 {
            Handle::Struct(r) => self.contents.get(&r.id).cloned(),
            _ => None,
        };
        let copy = self.func(name.as_str(), args)?;
        if let (Some(content), Handle::Struct(r)) = (content, copy.0) {
            self.contents.insert(r.id, content);
        }
        Ok(copy)
    }

    /// Converts text into a term following Prolog's naming convention.
    ///
    /// `_` is the anonymous variable, the empty string is a zero-arity
    /// struct with an empty name, text starting with an uppercase letter
    /// or an underscore is a new variable, anything else is an atom.
    pub fn value_of_str(&mut self, text: &str) -> Result<Term, TermError> {
        if text == "_" {
            return Ok(Term::ANON);
        }
        let Some(first) = text.chars().next() else {
            return Ok(self.push_struct(Symbol::EMPTY, Slice { index: 0, len: 0 }));
        };
        if first.is_uppercase() || first == '_' {
            return self.new_var(text, VarType::Str);
        }
        Ok(Term(Handle::Atom(Symbol::intern(text))))
    }

    /// Returns the name of a struct, atom, or variable.
    pub fn name(&self, term: Term) -> Result<&'static str, TermError> {
        match term.0 {
            Handle::Atom(s) => Ok(s.as_str()),
            Handle::Anon => Ok(Symbol::ANON.as_str()),
            Handle::WholeSolution => Ok(Symbol::WHOLE_SOLUTION.as_str()),
            Handle::Cut => Ok(Symbol::CUT.as_str()),
            Handle::True => Ok(Symbol::TRUE.as_str()),
            Handle::False => Ok(Symbol::FALSE.as_str()),
            Handle::Var(r) => match self.node(term, r)? {
                Node::Var { name, .. } => Ok(name.as_str()),
                _ => Err(TermError::ForeignTerm(term)),
            },
            Handle::Struct(r) => match self.node(term, r)? {
                Node::Struct { name, .. } => Ok(name.as_str()),
                _ => Err(TermError::ForeignTerm(term)),
            },
            _ => Err(TermError::UnexpectedKind {
                expected: "var, atom, struct",
                found: term.kind_name(),
            }),
        }
    }

    /// Returns the number of arguments of a struct.  Atoms have arity 0.
    pub fn arity(&self, term: Term) -> Result<usize, TermError> {
        Ok(self.args(term)?.len())
    }

    /// Returns the arguments of a struct.  Atoms have none.
    pub fn args(&self, term: Term) -> Result<&[Term], TermError> {
        match term.0 {
            Handle::Atom(_) | Handle::Cut | Handle::True | Handle::False => Ok(&[]),
            Handle::Struct(r) => match self.node(term, r)? {
                Node::Struct { args, .. } => self
                    .term_slice(args)
                    .map_err(|_| TermError::ForeignTerm(term)),
                _ => Err(TermError::ForeignTerm(term)),
            },
            _ => Err(TermError::UnexpectedKind {
                expected: "struct",
                found: term.kind_name(),
            }),
        }
    }

    /// Returns the argument of a struct at position `index`.
    pub fn arg(&self, term: Term, index: usize) -> Result<Term, TermError> {
        let args = self.args(term)?;
        args.get(index)
            .copied()
            .ok_or(TermError::ArgumentOutOfRange {
                index,
                arity: args.len(),
            })
    }

    /// Returns the `name/arity` signature of a struct.
    pub fn signature(&self, term: Term) -> Result<&'static str, TermError> {
        match term.0 {
            Handle::Struct(r) => match self.node(term, r)? {
                Node::Struct { signature, .. } => Ok(signature.as_str()),
                _ => Err(TermError::ForeignTerm(term)),
            },
            Handle::Atom(name) => Ok(Symbol::intern(&format!("{name}/0")).as_str()),
            Handle::Cut => Ok("!/0"),
            Handle::True => Ok("true/0"),
            Handle::False => Ok("false/0"),
            _ => Err(TermError::UnexpectedKind {
                expected: "struct",
                found: term.kind_name(),
            }),
        }
    }

    /// Left hand side of a binary struct.
    pub fn lhs(&self, term: Term) -> Result<Term, TermError> {
        match self.args(term)? {
            [lhs, _] => Ok(*lhs),
            _ => Err(TermError::NotBinary(term)),
        }
    }

    /// Right hand side of a binary struct.
    pub fn rhs(&self, term: Term) -> Result<Term, TermError> {
        match self.args(term)? {
            [_, rhs] => Ok(*rhs),
            _ => Err(TermError::NotBinary(term)),
        }
    }

    /// Returns `true` for plain atoms and zero-arity structs.
    pub fn is_atom(&self, term: Term) -> bool {
        match term.0 {
            Handle::Atom(_) | Handle::Cut | Handle::True | Handle::False => true,
            Handle::Struct(_) => self.args(term).is_ok_and(|args| args.is_empty()),
            _ => false,
        }
    }

    /// Returns `true` for atoms and numbers.
    pub fn is_atomic(&self, term: Term) -> bool {
        term.is_number() || self.is_atom(term)
    }

    /// Returns the arguments of `term` if it is a struct, optionally
    /// checking its functor and arity.
    pub fn unpack_struct(
        &self,
        term: Term,
        functor: Option<&str>,
        arity: Option<usize>,
    ) -> Result<&[Term], TermError> {
        if !term.is_struct() {
            return Err(TermError::UnexpectedKind {
                expected: "struct",
                found: term.kind_name(),
            });
        }
        if let Some(functor) = functor {
            if self.name(term)? != functor {
                return Err(TermError::UnexpectedName(term));
            }
        }
        let args = self.args(term)?;
        if let Some(arity) = arity {
            if args.len() != arity {
                return Err(TermError::UnexpectedArity {
                    expected: arity,
                    found: args.len(),
                });
            }
        }
        Ok(args)
    }

    /// Returns the normalization index of a term.
    ///
    /// The anonymous variable always reads `Anonymous`.  Numbers, plain
    /// atoms and the shared control structs have no slot and read
    /// `Unassigned`.
    pub fn index(&self, term: Term) -> Result<TermIndex, TermError> {
        match term.0 {
            Handle::Anon => Ok(TermIndex::Anonymous),
            Handle::Var(r) | Handle::Struct(r) | Handle::Opaque(r) => {
                self.node(term, r)?;
                Ok(self.indexes[r.id as usize])
            }
            _ => Ok(TermIndex::Unassigned),
        }
    }

    #[inline]
    pub fn has_index(&self, term: Term) -> bool {
        self.index(term).is_ok_and(TermIndex::is_assigned)
    }

    /// Sets the index of a variable or struct node.  Other terms have no
    /// slot and are left alone.
    pub(crate) fn set_index(&mut self, term: Term, index: TermIndex) {
        if let Handle::Var(r) | Handle::Struct(r) = term.0 {
            if let Some(slot) = self.index_slot(r) {
                *slot = index;
            }
        }
    }

    pub(crate) fn clear_index(&mut self, term: Term) {
        self.set_index(term, TermIndex::Unassigned)
    }

    fn index_slot(&mut self, r: NodeRef) -> Option<&mut TermIndex> {
        if r.arena_id != self.arena_id {
            return None;
        }
        self.indexes.get_mut(r.id as usize)
    }

    /// Returns the content attached to a struct, if it has one of type `T`.
    pub fn content<T: Any + Send + Sync>(&self, term: Term) -> Option<&T> {
        match term.0 {
            Handle::Struct(r) if r.arena_id == self.arena_id => {
                self.contents.get(&r.id)?.downcast_ref::<T>()
            }
            _ => None,
        }
    }

    /// Attaches a content value to a struct.  Content plays no part in
    /// equality or signatures and is shared by structs cloned from this one.
    pub fn set_content<T: Any + Send + Sync>(
        &mut self,
        term: Term,
        content: T,
    ) -> Result<(), TermError> {
        match term.0 {
            Handle::Struct(r) => {
                self.node(term, r)?;
                self.contents.insert(r.id, Arc::new(content));
                Ok(())
            }
            _ => Err(TermError::UnexpectedKind {
                expected: "struct",
                found: term.kind_name(),
            }),
        }
    }

    /// Returns an error if `term` refers to a node outside this arena.
    #[inline]
    pub(crate) fn verify(&self, term: Term) -> Result<(), TermError> {
        match term.node_ref() {
            Some(r) => self.node(term, r).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Looks up the node behind a handle, reporting the handle on failure.
    #[inline]
    pub(crate) fn node(&self, term: Term, r: NodeRef) -> Result<&Node, TermError> {
        self.node_by_ref(r).map_err(|_| TermError::ForeignTerm(term))
    }

    #[inline]
    fn node_by_ref(&self, r: NodeRef) -> Result<&Node, InternalTermError> {
        if r.arena_id != self.arena_id {
            return Err(InternalTermError::ForeignArena(r.arena_id));
        }
        self.nodes
            .get(r.id as usize)
            .ok_or(InternalTermError::InvalidNode(r.id))
    }

    /// Borrow the arguments of a struct node.
    #[inline]
    pub(crate) fn term_slice(&self, slice: &Slice) -> Result<&[Term], InternalTermError> {
        let start = slice.index as usize;
        self.terms
            .get(start..start + slice.len as usize)
            .ok_or(InternalTermError::InvalidSlice(*slice))
    }

    pub(crate) fn new_var(&mut self, name: &str, ty: VarType) -> Result<Term, TermError> {
        if name.trim().is_empty() {
            return Err(TermError::BlankVarName);
        }
        let name = Symbol::intern(name);
        if name == Symbol::ANON || name == Symbol::WHOLE_SOLUTION {
            return Err(TermError::ReservedVarName);
        }
        Ok(self.push_var(name, ty))
    }

    pub(crate) fn push_var(&mut self, name: Symbol, ty: VarType) -> Term {
        let id = self.push_node(Node::Var { name, ty });
        Term(Handle::Var(self.node_ref(id)))
    }

    fn push_struct(&mut self, name: Symbol, args: Slice) -> Term {
        let signature = Symbol::intern(&format!("{}/{}", name, args.len));
        let id = self.push_node(Node::Struct {
            name,
            signature,
            args,
        });
        Term(Handle::Struct(self.node_ref(id)))
    }

    fn push_node(&mut self, node: Node) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(node);
        self.indexes.push(TermIndex::Unassigned);
        id
    }

    #[inline]
    fn node_ref(&self, id: u32) -> NodeRef {
        NodeRef {
            arena_id: self.arena_id,
            id,
        }
    }

    /// Returns the functor of a struct as a symbol.
    pub(crate) fn struct_name(&self, term: Term) -> Result<Symbol, TermError> {
        match term.0 {
            Handle::Cut => Ok(Symbol::CUT),
            Handle::True => Ok(Symbol::TRUE),
            Handle::False => Ok(Symbol::FALSE),
            Handle::Struct(r) => match self.node(term, r)? {
                Node::Struct { name, .. } => Ok(*name),
                _ => Err(TermError::ForeignTerm(term)),
            },
            _ => Err(TermError::UnexpectedKind {
                expected: "struct",
                found: term.kind_name(),
            }),
        }
    }

    /// Returns the variable name and type stored for a variable handle.
    pub(crate) fn var_node(&self, term: Term) -> Option<(Symbol, VarType)> {
        match term.0 {
            Handle::Var(r) => match self.node_by_ref(r) {
                Ok(Node::Var { name, ty }) => Some((*name, *ty)),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn opaque_value(&self, term: Term) -> Option<&dyn OpaqueValue> {
        match term.0 {
            Handle::Opaque(r) => match self.node_by_ref(r) {
                Ok(Node::Opaque(value)) => Some(&**value),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns `true` if `term` is an opaque value equal to `value`.
    pub fn opaque_eq<T>(&self, term: Term, value: &T) -> bool
    where
        T: Any + fmt::Debug + fmt::Display + PartialEq + Send + Sync,
    {
        self.opaque_value(term)
            .and_then(|v| v.as_any().downcast_ref::<T>())
            .is_some_and(|v| v == value)
    }

    /// Produce a [`View`] of `term` borrowing from this arena.
    #[inline]
    pub fn view<'a>(&'a self, term: &Term) -> Result<View<'a>, TermError> {
        term.view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{atom, func};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn arena_stats() {
        init();
        let mut a = Arena::with_capacity(16, 16);
        let x = a.var("X").unwrap();
        let t = a.func("f", [x, Term::int(1)]).unwrap();
        a.set_content(t, 42u8).unwrap();
        let stats = a.stats();
        assert_eq!(stats.nodes_len, 2);
        assert_eq!(stats.terms_len, 2);
        assert_eq!(stats.contents_len, 1);
    }

    #[test]
    fn func_builds_signature() {
        let a = &mut Arena::new();
        let t = func!("toto"; 1, 2, 3, 4 => a).unwrap();
        assert_eq!(a.name(t).unwrap(), "toto");
        assert_eq!(a.arity(t).unwrap(), 4);
        assert_eq!(a.signature(t).unwrap(), "toto/4");
        assert_eq!(a.arg(t, 2).unwrap(), Term::int(3));
        assert!(matches!(
            a.arg(t, 4),
            Err(TermError::ArgumentOutOfRange { index: 4, arity: 4 })
        ));
    }

    #[test]
    fn zero_arity_func() {
        let a = &mut Arena::new();
        let t = a.func("foo", []).unwrap();
        assert!(t.is_struct());
        assert!(a.is_atom(t));
        assert_eq!(a.signature(t).unwrap(), "foo/0");
        assert_eq!(a.func("true", []).unwrap(), Term::TRUE);
        assert_eq!(a.func("!", []).unwrap(), Term::CUT);
        let empty = a.func("", []).unwrap();
        assert_eq!(a.name(empty).unwrap(), "");
    }

    #[test]
    fn empty_functor_with_arguments_fails() {
        let a = &mut Arena::new();
        let before = a.stats().terms_len;
        assert!(matches!(
            a.func("", [Term::int(1)]),
            Err(TermError::EmptyFunctor)
        ));
        assert_eq!(a.stats().terms_len, before);
    }

    #[test]
    fn func_of_reports_missing_argument() {
        let a = &mut Arena::new();
        let args = [Some(1), None, Some(3)];
        match a.func_of("p", args) {
            Err(TermError::MissingArgument { functor, index }) => {
                assert_eq!(functor, "p");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        let ok = a.func_of("p", ["X", "a"]).unwrap();
        assert!(a.arg(ok, 0).unwrap().is_var());
        assert_eq!(a.arg(ok, 1).unwrap(), Term::atom("a"));
    }

    #[test]
    fn foreign_terms_are_rejected() {
        let mut a1 = Arena::new();
        let mut a2 = Arena::new();
        let x = a1.var("X").unwrap();
        assert!(matches!(
            a2.func("f", [x]),
            Err(TermError::ForeignTerm(t)) if t == x
        ));
        assert!(a2.name(x).is_err());
        assert!(a2.view(&x).is_err());
        // inline values belong to every arena
        assert!(a2.func("f", [Term::int(1), Term::atom("a")]).is_ok());
    }

    #[test]
    fn cloned_arena_shares_handles() {
        let mut a1 = Arena::new();
        let t = a1.func("f", [Term::int(1)]).unwrap();
        let a2 = a1.clone();
        assert_eq!(a2.signature(t).unwrap(), "f/1");
    }

    #[test]
    fn clones_diverge_after_cloning() {
        let mut a1 = Arena::new();
        a1.func("f", [Term::int(1)]).unwrap();
        let mut a2 = a1.clone();
        let g = a2.func("g", [Term::int(2)]).unwrap();
        // unknown to the original until it grows
        assert!(matches!(a1.name(g), Err(TermError::ForeignTerm(_))));
        a1.func("h", [Term::int(3)]).unwrap();
        assert_eq!(a1.name(g).unwrap(), "h");
        assert_eq!(a2.name(g).unwrap(), "g");
    }

    #[test]
    fn lhs_and_rhs() {
        let a = &mut Arena::new();
        let t = func!("="; "X", 2 => a).unwrap();
        assert!(a.lhs(t).unwrap().is_var());
        assert_eq!(a.rhs(t).unwrap(), Term::int(2));

        let u = func!("f"; 1 => a).unwrap();
        assert!(matches!(a.lhs(u), Err(TermError::NotBinary(_))));
        assert!(matches!(a.rhs(u), Err(TermError::NotBinary(_))));
    }

    #[test]
    fn clone_with_new_arguments_recomputes_signature() {
        let a = &mut Arena::new();
        let t = func!("f"; 1, 2 => a).unwrap();
        a.set_content(t, std::string::String::from("payload")).unwrap();
        let c = a
            .clone_with_new_arguments(t, [Term::int(1), Term::int(2), Term::int(3)])
            .unwrap();
        assert_ne!(c, t);
        assert_eq!(a.signature(c).unwrap(), "f/3");
        assert_eq!(
            a.content::<std::string::String>(c).map(|s| s.as_str()),
            Some("payload")
        );
        assert_eq!(a.index(c).unwrap(), TermIndex::Unassigned);
    }

    #[test]
    fn content_requires_struct() {
        let a = &mut Arena::new();
        let x = a.var("X").unwrap();
        assert!(a.set_content(x, 1u32).is_err());
        let t = atom!("p" => a).unwrap();
        assert!(a.set_content(t, 1u32).is_err());
        let s = a.func("s", [x]).unwrap();
        assert!(a.content::<u32>(s).is_none());
        a.set_content(s, 7u32).unwrap();
        assert_eq!(a.content::<u32>(s), Some(&7));
        assert_eq!(a.content::<i64>(s), None);
    }

    #[test]
    fn unpack_struct_checks() {
        let a = &mut Arena::new();
        let t = func!("point"; 1, 2 => a).unwrap();
        assert_eq!(a.unpack_struct(t, Some("point"), Some(2)).unwrap().len(), 2);
        assert_eq!(a.unpack_struct(t, None, None).unwrap().len(), 2);
        assert!(matches!(
            a.unpack_struct(t, Some("line"), None),
            Err(TermError::UnexpectedName(_))
        ));
        assert!(matches!(
            a.unpack_struct(t, None, Some(3)),
            Err(TermError::UnexpectedArity {
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            a.unpack_struct(Term::int(1), None, None),
            Err(TermError::UnexpectedKind { expected: "struct", found: "int" })
        ));
    }

    #[test]
    fn index_slots() {
        let a = &mut Arena::new();
        let x = a.var("X").unwrap();
        assert_eq!(a.index(x).unwrap(), TermIndex::Unassigned);
        assert!(!a.has_index(x));
        a.set_index(x, TermIndex::Assigned(3));
        assert_eq!(a.index(x).unwrap().value(), Some(3));
        assert!(a.has_index(x));
        a.clear_index(x);
        assert!(!a.has_index(x));

        assert_eq!(a.index(Term::ANON).unwrap(), TermIndex::Anonymous);
        a.set_index(Term::TRUE, TermIndex::Assigned(1));
        assert_eq!(a.index(Term::TRUE).unwrap(), TermIndex::Unassigned);
        assert_eq!(a.index(Term::int(5)).unwrap(), TermIndex::Unassigned);
    }

    #[test]
    fn opaque_values() {
        let a = &mut Arena::new();
        let t = a.opaque(3.5f32);
        assert!(a.opaque_eq(t, &3.5f32));
        assert!(!a.opaque_eq(t, &3.5f64));
        assert!(!a.is_atom(t));
        assert!(!a.is_atomic(t));
        assert!(a.is_atomic(Term::int(1)));
        assert!(a.is_atomic(Term::TRUE));
    }
}
