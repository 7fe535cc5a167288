// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module defines the traits used to encapsulate solver heuristics.
//!
//! Namely, it defines :
//!
//!  - the `StateRanking` which discriminates the most promising from the least
//!    promising states when nodes must be deleted or merged
//!  - the `VariableHeuristic` which is used to control the order in which the
//!    variables are selected (major impact on the size of an MDD)
//!  - the `WidthHeuristic` which is used to control the maximum width of an MDD
//!  - the `SubProblemRanking` which orders the subproblems on the solver
//!    frontier

use std::cmp::Ordering;

use crate::{SubProblem, Variable, VarSet};

/// A state ranking is an heuristic that imposes a partial order on states.
/// This order is used by the framework as a means to discriminate the most
/// promising nodes from the least promising ones when it needs to squash the
/// size of a layer. The greater a state, the more promising it is considered
/// to be; in other words `compare(a, b) == Greater` means `a` should rather
/// be kept intact while `b` should rather be merged or dropped.
pub trait StateRanking {
    /// As is the case for `Problem` and `Relaxation`, a `StateRanking` must
    /// tell the type of state it is able to operate on.
    type State;
    /// This method compares two states and determines which is the most
    /// desirable to keep.
    fn compare(&self, a: &Self::State, b: &Self::State) -> Ordering;
}

/// This trait defines an heuristic to determine the best variable to branch on
/// while developing an MDD. At each layer, the heuristic is given the set of
/// variables that have not been assigned yet along with the states of the
/// layer about to be expanded.
pub trait VariableHeuristic<T> {
    /// Returns the best variable to branch on from the set of `free_vars`
    /// or `None` in case no branching is useful (no decision can be made about
    /// any of the states in the next layer).
    fn next_variable(&self,
                     free_vars: &VarSet,
                     next_layer: &mut dyn Iterator<Item = &T>) -> Option<Variable>;
}

/// This trait defines an heuristic to determine the maximum allowed width of a
/// layer in a relaxed or restricted MDD. The width is derived once per
/// compilation, from the state at the root of the subproblem being compiled.
pub trait WidthHeuristic<T> {
    /// Estimates a good maximum width for an MDD rooted in the given state
    fn max_width(&self, state: &T) -> usize;
}

/// This trait is used to rank the subproblems on the solver frontier: it
/// defines a total order telling which subproblem should be popped first.
/// Greater means more promising, hence popped sooner.
pub trait SubProblemRanking {
    /// The type of state that is pervasive in the subproblems being compared.
    type State;
    /// This method compares two subproblems and determines which is the most
    /// desirable to explore first. Greater means that `a` is more promising.
    fn compare(&self, a: &SubProblem<Self::State>, b: &SubProblem<Self::State>) -> Ordering;
}
