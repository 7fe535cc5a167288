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

//! This module provides the implementation of various maximum width heuristics.

use crate::WidthHeuristic;

/// This strategy specifies a fixed maximum width for all the layers of an
/// approximate MDD. This is a *static* heuristic as the width will remain
/// fixed regardless of the subproblem to process.
///
/// # Example
/// Assuming a fixed width of 100, the heuristic will return 100 no matter the
/// state at the root of the MDD being compiled.
///
/// ```
/// # use bbmdd::*;
/// let heuristic = FixedWidth(100);
/// assert_eq!(100, heuristic.max_width(&'a'));
/// ```
#[derive(Debug, Copy, Clone)]
pub struct FixedWidth(pub usize);
impl <X> WidthHeuristic<X> for FixedWidth {
    fn max_width(&self, _: &X) -> usize {
        self.0
    }
}

/// This strategy acts as a decorator for an other max width heuristic. It
/// multiplies the maximum width of the strategy it delegates to by a constant
/// (configured) factor. It is typically used in conjunction with a dynamic
/// width heuristic to allow larger DDs.
///
/// # Example
/// ```
/// # use bbmdd::*;
/// let inner = FixedWidth(5);
/// assert_eq!(50, Times(10, inner).max_width(&'a'));
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Times<X>(pub usize, pub X);

impl <S, X: WidthHeuristic<S>> WidthHeuristic<S> for Times<X> {
    fn max_width(&self, state: &S) -> usize {
        self.0 * self.1.max_width(state)
    }
}

/// This strategy acts as a decorator for an other max width heuristic. It
/// divides the maximum width of the strategy it delegates to by a constant
/// (configured) factor. It is typically used in conjunction with a dynamic
/// width heuristic to limit the final size of the DDs.
///
/// # Example
/// ```
/// # use bbmdd::*;
/// let inner = FixedWidth(50);
/// assert_eq!(5, DivBy(10, inner).max_width(&'a'));
/// ```
#[derive(Debug, Copy, Clone)]
pub struct DivBy<X>(pub usize, pub X);

impl <S, X: WidthHeuristic<S>> WidthHeuristic<S> for DivBy<X> {
    fn max_width(&self, state: &S) -> usize {
        self.1.max_width(state) / self.0
    }
}

#[cfg(test)]
mod test_widths {
    use crate::*;

    #[test]
    fn fixed_width_returns_the_same_width_for_any_state() {
        let heu = FixedWidth(42);
        assert_eq!(42, heu.max_width(&'a'));
        assert_eq!(42, heu.max_width(&'z'));
    }
    #[test]
    fn times_multiplies_the_inner_width() {
        let heu = Times(3, FixedWidth(7));
        assert_eq!(21, heu.max_width(&'a'));
    }
    #[test]
    fn div_by_divides_the_inner_width() {
        let heu = DivBy(2, FixedWidth(7));
        assert_eq!(3, heu.max_width(&'a'));
    }
}
