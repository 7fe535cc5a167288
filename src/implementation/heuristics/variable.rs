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

//! This module provides the implementation of the default variable ordering.

use crate::{Variable, VariableHeuristic, VarSet};

/// This is the default variable branching heuristic: it always selects the
/// unassigned variable having the lowest identifier. Because the variables of
/// a `VarSet` are iterated by increasing id, the choice is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVariableHeuristic;

impl<T> VariableHeuristic<T> for DefaultVariableHeuristic {
    fn next_variable(&self, free_vars: &VarSet, _: &mut dyn Iterator<Item = &T>) -> Option<Variable> {
        free_vars.iter().next()
    }
}
