//! # Logic Terms Results
//!
//! Projection of solutions onto plain values.
//!
//! [`Results`] needs a single method, [`Results::list`]; every check of
//! cardinality, every conversion, page and aggregate is derived from it
//! and may be overridden where a cheaper answer exists.
//! [`Solutions`] holds the binding frames produced for a normalized goal
//! and projects them through typed [`Var`] keys, or as whole
//! instantiated goals.
//!
//! ```rust
//! # use logic_terms::{Arena, Term, TermIndex};
//! # use logic_terms_results::{Results, Solutions};
//! let mut arena = Arena::new();
//! let x = arena.typed_var::<i64>("X").unwrap();
//! let goal = arena.func("p", [x.term()]).unwrap();
//! let goal = arena.normalize(goal).unwrap();
//! assert_eq!(arena.index(goal).unwrap(), TermIndex::Assigned(1));
//!
//! let solutions = Solutions::for_goal(goal, vec![vec![Term::int(1)], vec![Term::int(2)]]);
//! let xs = solutions.var(&arena, &x).unwrap();
//! assert_eq!(xs.list(), &[1, 2]);
//! assert_eq!(xs.sum::<i64>(), 3);
//!
//! let whole = solutions.whole(&mut arena).unwrap();
//! let printed = whole.map(|t| t.display(&arena).to_string());
//! assert_eq!(printed.list(), &["p(1)", "p(2)"]);
//! ```
//!
//! ## License
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0 or
//! (at your option) any later version (LGPL-3.0-or-later).

use logic_terms::{Arena, Term, TermError, TermValue, Var, VarType};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use std::iter::Sum;
use thiserror::Error;

/// Errors raised while projecting or constraining results.
#[derive(Debug, Clone, Error)]
pub enum ResultsError {
    #[error("cannot obtain the unique element of empty results")]
    Empty,

    #[error("expected {bound} {expected} result(s), found {found}")]
    Cardinality {
        bound: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("variable {0} has no index (the goal was not normalized)")]
    NotIndexed(&'static str),

    #[error("variable {var} is unbound in solution {solution}")]
    UnboundVar { var: &'static str, solution: usize },

    #[error("value of variable {var} in solution {solution} is not of type {expected:?}")]
    TypeMismatch {
        var: &'static str,
        solution: usize,
        expected: VarType,
    },

    #[error("the whole solution needs the goal the solutions belong to")]
    NoGoal,

    #[error(transparent)]
    Term(#[from] TermError),
}

/// A read-only sequence of results.
///
/// Only [`Results::list`] is required.
pub trait Results<T> {
    fn list(&self) -> &[T];

    #[inline]
    fn count(&self) -> usize {
        self.list().len()
    }

    #[inline]
    fn is_present(&self) -> bool {
        !self.is_empty()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// At most one result.
    #[inline]
    fn is_single(&self) -> bool {
        self.count() <= 1
    }

    /// Exactly one result.
    #[inline]
    fn is_unique(&self) -> bool {
        self.count() == 1
    }

    #[inline]
    fn is_multiple(&self) -> bool {
        self.count() > 1
    }

    #[inline]
    fn first(&self) -> Option<&T> {
        self.list().first()
    }

    /// The single result, if any.  Further results are ignored; use
    /// [`Results::at_most`] to reject them.
    #[inline]
    fn single(&self) -> Option<&T> {
        self.first()
    }

    /// The result that must exist.  Further results are ignored; use
    /// [`Results::exactly`] to reject them.
    fn unique(&self) -> Result<&T, ResultsError> {
        self.first().ok_or(ResultsError::Empty)
    }

    #[inline]
    fn iter(&self) -> std::slice::Iter<'_, T> {
        self.list().iter()
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.list().to_vec()
    }

    fn set(&self) -> HashSet<T>
    where
        T: Clone + Eq + Hash,
    {
        self.list().iter().cloned().collect()
    }

    /// The first `n` results.
    fn limit(&self, n: usize) -> ListResults<T>
    where
        T: Clone,
    {
        self.list().iter().take(n).cloned().collect()
    }

    /// Up to `n` results starting at position `first`.
    fn page(&self, first: usize, n: usize) -> ListResults<T>
    where
        T: Clone,
    {
        self.list().iter().skip(first).take(n).cloned().collect()
    }

    /// The results without duplicates, in order of first occurrence.
    fn distinct(&self) -> ListResults<T>
    where
        T: Clone + Eq + Hash,
    {
        let mut seen = HashSet::new();
        self.list()
            .iter()
            .filter(|t| seen.insert(*t))
            .cloned()
            .collect()
    }

    fn exactly(&self, n: usize) -> Result<ListResults<T>, ResultsError>
    where
        T: Clone,
    {
        self.check_cardinality("exactly", n, |found| found == n)
    }

    fn at_most(&self, n: usize) -> Result<ListResults<T>, ResultsError>
    where
        T: Clone,
    {
        self.check_cardinality("at most", n, |found| found <= n)
    }

    fn at_least(&self, n: usize) -> Result<ListResults<T>, ResultsError>
    where
        T: Clone,
    {
        self.check_cardinality("at least", n, |found| found >= n)
    }

    #[doc(hidden)]
    fn check_cardinality(
        &self,
        bound: &'static str,
        expected: usize,
        accept: impl FnOnce(usize) -> bool,
    ) -> Result<ListResults<T>, ResultsError>
    where
        T: Clone,
    {
        let found = self.count();
        if accept(found) {
            Ok(self.to_vec().into())
        } else {
            Err(ResultsError::Cardinality {
                bound,
                expected,
                found,
            })
        }
    }

    fn min_by<F>(&self, compare: F) -> Option<&T>
    where
        F: FnMut(&&T, &&T) -> Ordering,
    {
        self.list().iter().min_by(compare)
    }

    fn max_by<F>(&self, compare: F) -> Option<&T>
    where
        F: FnMut(&&T, &&T) -> Ordering,
    {
        self.list().iter().max_by(compare)
    }

    fn min(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.list().iter().min()
    }

    fn max(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.list().iter().max()
    }

    fn sum<S>(&self) -> S
    where
        S: for<'a> Sum<&'a T>,
    {
        self.list().iter().sum()
    }

    fn map<R, F>(&self, f: F) -> ListResults<R>
    where
        F: FnMut(&T) -> R,
    {
        self.list().iter().map(f).collect()
    }
}

/// Results held in a vector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListResults<T>(Vec<T>);

impl<T> ListResults<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self(values)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Results<T> for ListResults<T> {
    #[inline]
    fn list(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for ListResults<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<T> FromIterator<T> for ListResults<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for ListResults<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The solutions of a normalized goal.
///
/// Each solution is a binding frame: the value of the variable of index
/// `i` is at position `i`.  A slot holding a variable is unbound.  The
/// frames hold handles of the arena the goal was built in, which is
/// passed to every projection.
#[derive(Debug, Clone, Default)]
pub struct Solutions {
    goal: Option<Term>,
    frames: Vec<Vec<Term>>,
}

impl Solutions {
    pub fn new(frames: Vec<Vec<Term>>) -> Self {
        Self { goal: None, frames }
    }

    /// Solutions of `goal`, which can then be projected as a whole with
    /// [`Solutions::whole`].
    pub fn for_goal(goal: Term, frames: Vec<Vec<Term>>) -> Self {
        Self {
            goal: Some(goal),
            frames,
        }
    }

    #[inline]
    pub fn goal(&self) -> Option<Term> {
        self.goal
    }

    pub fn push(&mut self, frame: Vec<Term>) {
        self.frames.push(frame);
    }

    /// Returns the bound value of `var` in every solution.
    ///
    /// [`Term::WHOLE_SOLUTION`] has no slot; project it with
    /// [`Solutions::whole`].
    pub fn term(&self, arena: &Arena, var: Term) -> Result<ListResults<Term>, ResultsError> {
        let name = arena.var_name(var)?;
        let index = arena
            .index(var)?
            .value()
            .ok_or(ResultsError::NotIndexed(name))?;
        let values = self
            .frames
            .iter()
            .enumerate()
            .map(|(solution, frame)| match frame.get(index as usize) {
                Some(value) if !value.is_var() => Ok(*value),
                _ => Err(ResultsError::UnboundVar {
                    var: name,
                    solution,
                }),
            })
            .collect::<Result<ListResults<_>, _>>()?;
        log::debug!(
            "projected {} over {} solution(s)",
            name,
            self.frames.len()
        );
        Ok(values)
    }

    /// Returns the value of `var` in every solution, read as `T`.
    pub fn var<T: TermValue>(
        &self,
        arena: &Arena,
        var: &Var<T>,
    ) -> Result<ListResults<T>, ResultsError> {
        let name = var.name(arena)?;
        self.term(arena, var.term())?
            .into_iter()
            .enumerate()
            .map(|(solution, value)| {
                T::from_term(arena, value).ok_or(ResultsError::TypeMismatch {
                    var: name,
                    solution,
                    expected: T::TYPE,
                })
            })
            .collect()
    }

    /// Returns the goal instantiated by every solution, the value of
    /// [`Term::WHOLE_SOLUTION`].  Unbound variables stay in place.
    pub fn whole(&self, arena: &mut Arena) -> Result<ListResults<Term>, ResultsError> {
        let goal = self.goal.ok_or(ResultsError::NoGoal)?;
        let values = self
            .frames
            .iter()
            .map(|frame| arena.substitute(goal, frame))
            .collect::<Result<ListResults<_>, _>>()?;
        log::debug!(
            "instantiated {} over {} solution(s)",
            goal.display(arena),
            self.frames.len()
        );
        Ok(values)
    }
}

impl Results<Vec<Term>> for Solutions {
    #[inline]
    fn list(&self) -> &[Vec<Term>] {
        &self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_terms::func;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn words() -> ListResults<&'static str> {
        ListResults::new(vec!["some", "values", "some", "more"])
    }

    /// Implements only the required method.
    struct Minimal(Vec<u32>);

    impl Results<u32> for Minimal {
        fn list(&self) -> &[u32] {
            &self.0
        }
    }

    #[test]
    fn cardinality() {
        let r = words();
        assert_eq!(r.count(), 4);
        assert!(r.is_present());
        assert!(!r.is_empty());
        assert!(!r.is_single());
        assert!(!r.is_unique());
        assert!(r.is_multiple());

        let empty = ListResults::<u8>::default();
        assert!(empty.is_empty());
        assert!(empty.is_single());
        assert!(!empty.is_unique());
        assert!(!empty.is_multiple());
    }

    #[test]
    fn single_and_unique() {
        let one = ListResults::new(vec![7]);
        assert_eq!(one.first(), Some(&7));
        assert_eq!(one.single(), Some(&7));
        assert_eq!(*one.unique().unwrap(), 7);

        let none = ListResults::<i32>::default();
        assert_eq!(none.first(), None);
        assert_eq!(none.single(), None);
        assert!(matches!(none.unique(), Err(ResultsError::Empty)));

        // extra results are ignored
        let two = ListResults::new(vec![1, 2]);
        assert_eq!(two.single(), Some(&1));
        assert_eq!(*two.unique().unwrap(), 1);
        assert!(two.at_most(1).is_err());
        assert!(two.exactly(1).is_err());
    }

    #[test]
    fn conversions() {
        let r = words();
        assert_eq!(r.to_vec(), ["some", "values", "some", "more"]);
        assert_eq!(r.iter().count(), 4);
        let set: HashSet<_> = r.set();
        assert_eq!(set.len(), 3);
        assert!(set.contains("values"));
        assert_eq!(r.map(|w| w.len()).list(), &[4, 6, 4, 4]);
    }

    #[test]
    fn pagination() {
        let r = words();
        assert_eq!(r.limit(2).list(), &["some", "values"]);
        assert_eq!(r.limit(10).count(), 4);
        assert_eq!(r.page(1, 2).list(), &["values", "some"]);
        assert!(r.page(9, 2).is_empty());
        assert_eq!(r.distinct().list(), &["some", "values", "more"]);
        assert!(r.distinct().exactly(3).unwrap().is_present());
    }

    #[test]
    fn cardinality_filters() {
        let r = words();
        assert_eq!(r.exactly(4).unwrap().count(), 4);
        assert!(r.exactly(3).is_err());
        assert!(r.at_most(4).is_ok());
        assert!(matches!(
            r.at_most(3),
            Err(ResultsError::Cardinality { bound: "at most", expected: 3, found: 4 })
        ));
        assert_eq!(r.at_least(1).unwrap().list(), r.list());
        assert!(r.at_least(5).is_err());
    }

    #[test]
    fn aggregation() {
        let r = ListResults::new(vec![3.5f64, -1.0, 2.0]);
        assert_eq!(r.min_by(|a, b| a.total_cmp(b)), Some(&-1.0));
        assert_eq!(r.max_by(|a, b| a.total_cmp(b)), Some(&3.5));
        assert_eq!(r.sum::<f64>(), 4.5);

        let m = Minimal(vec![4, 9, 1]);
        assert_eq!(m.min(), Some(&1));
        assert_eq!(m.max(), Some(&9));
        assert_eq!(m.sum::<u32>(), 14);
        assert_eq!(m.count(), 3);
        assert!(m.is_multiple());
        assert!(Minimal(vec![]).max().is_none());
    }

    #[test]
    fn project_typed_vars() {
        init();
        let mut arena = Arena::new();
        let x = arena.typed_var::<i64>("X").unwrap();
        let b = arena.typed_var::<bool>("B").unwrap();
        let goal = func!("p"; x, b => &mut arena).unwrap();
        let goal = arena.normalize(goal).unwrap();
        assert_eq!(arena.arg(goal, 0).unwrap(), x.term());

        let mut solutions = Solutions::new(vec![]);
        assert!(solutions.var(&arena, &x).unwrap().is_empty());
        solutions.push(vec![Term::int(1), Term::TRUE]);
        solutions.push(vec![Term::int(2), Term::FALSE]);
        assert_eq!(solutions.count(), 2);

        let xs = solutions.var(&arena, &x).unwrap();
        assert_eq!(xs.list(), &[1, 2]);
        assert_eq!(xs.max(), Some(&2));
        assert_eq!(solutions.var(&arena, &b).unwrap().list(), &[true, false]);
    }

    #[test]
    fn projection_errors() {
        init();
        let mut arena = Arena::new();
        let x = arena.typed_var::<i64>("X").unwrap();
        let solutions = Solutions::new(vec![vec![Term::int(1)]]);
        assert!(matches!(
            solutions.var(&arena, &x),
            Err(ResultsError::NotIndexed("X"))
        ));

        let mut arena = Arena::new();
        let x = arena.typed_var::<i64>("X").unwrap();
        arena.assign_indexes(x.term(), 0).unwrap();
        let y = arena.var("Y").unwrap();
        let solutions = Solutions::new(vec![vec![Term::int(1)], vec![y]]);
        assert!(matches!(
            solutions.var(&arena, &x),
            Err(ResultsError::UnboundVar { var: "X", solution: 1 })
        ));

        let solutions = Solutions::new(vec![vec![Term::real(1.5)]]);
        assert!(matches!(
            solutions.var(&arena, &x),
            Err(ResultsError::TypeMismatch { var: "X", solution: 0, expected: VarType::Long })
        ));

        let solutions = Solutions::new(vec![vec![]]);
        assert!(solutions.term(&arena, x.term()).is_err());
        assert!(matches!(
            solutions.term(&arena, Term::int(3)),
            Err(ResultsError::Term(_))
        ));
    }

    #[test]
    fn untyped_projection() {
        let mut arena = Arena::new();
        let x = arena.var("X").unwrap();
        arena.assign_indexes(x, 0).unwrap();
        let s = arena.term("some").unwrap();
        let v = arena.term("values").unwrap();
        let solutions = Solutions::new(vec![vec![s], vec![v], vec![s]]);
        let found = solutions.term(&arena, x).unwrap();
        assert_eq!(found.count(), 3);
        assert_eq!(found.first(), Some(&s));
        let names = found.map(|t| t.display(&arena).to_string());
        assert_eq!(names.list(), &["some", "values", "some"]);
        assert_eq!(names.distinct().count(), 2);
    }

    #[test]
    fn project_whole_solutions() {
        init();
        let mut arena = Arena::new();
        let goal = func!("likes"; "X", func!("f"; "Y"), "X" => &mut arena).unwrap();
        let goal = arena.normalize(goal).unwrap();
        let whole = arena.find_var(goal, ".").unwrap();
        assert_eq!(whole, Term::WHOLE_SOLUTION);
        assert!(matches!(
            Solutions::new(vec![]).term(&arena, whole),
            Err(ResultsError::NotIndexed("."))
        ));

        let a = arena.term("a").unwrap();
        let frames = vec![vec![a, Term::int(1)], vec![Term::int(2)]];
        let solutions = Solutions::for_goal(goal, frames.clone());
        assert_eq!(solutions.goal(), Some(goal));
        let printed = solutions
            .whole(&mut arena)
            .unwrap()
            .map(|t| t.display(&arena).to_string());
        assert_eq!(printed.list(), &["likes(a, f(1), a)", "likes(2, f(Y), 2)"]);

        assert!(matches!(
            Solutions::new(frames).whole(&mut arena),
            Err(ResultsError::NoGoal)
        ));
    }
}
