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


//! # BBMDD
//! BBMDD is a truly generic framework to develop MDD-based combinatorial
//! optimization solvers in Rust. Its goal is to let you describe your
//! optimization problem as a dynamic program (see `Problem`) along with a
//! `Relaxation`. When the dynamic program of the problem is considered as a
//! transition system, the relaxation serves the purpose of merging different
//! nodes of the transition system into an other node standing for them all.
//! In that setup, the sole condition to ensure the correctness of the
//! optimization algorithm is that the replacement node must be an over
//! approximation of all what is feasible from the merged nodes.
//!
//! ## Side benefit
//! As a side benefit from using `bbmdd`, you will be able to exploit all of
//! your hardware to solve your optimization problem in parallel: the branch
//! and bound with MDD paradigm parallelizes remarkably well.
//!
//! ## Quick Example
//! The following presents a minimalistic use of bbmdd. It implements a solver
//! for the knapsack problem which uses all the available computing resources
//! to complete its task. This example is shown for illustration purpose
//! because it is pretty simple and chances are high anybody is already
//! comfortable with the problem definition.
//!
//! #### Describe the problem as dynamic program
//! The first thing to do in this example is to describe the binary knapsack
//! problem in terms of a dynamic program. Here, the state of a node is a
//! simple structure that comprises the remaining capacity of the sack (usize)
//! and a depth to denote the number of variables that have already been
//! assigned.
//! ```
//! /// In our DP model, we consider a state that simply consists of the
//! /// remaining capacity in the knapsack. Additionally, we also consider the
//! /// *depth* (number of assigned variables) as part of the state since it
//! /// is useful when it comes to forbid the assignment of one same variable
//! /// twice.
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! struct KnapsackState {
//!     /// the number of variables that have already been decided upon in the
//!     /// complete problem.
//!     depth: usize,
//!     /// the remaining capacity in the knapsack. That is the maximum load
//!     /// the sack can bear without cracking **given what is already in it**.
//!     capacity: usize
//! }
//! ```
//!
//! Additionally, we also define a Knapsack structure to store the parameters
//! of the instance being solved. Knapsack is the structure that actually
//! implements the dynamic programming model for the problem at hand.
//! ```
//! use bbmdd::*;
//! #
//! # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! # struct KnapsackState {
//! #     depth: usize,
//! #     capacity: usize
//! # }
//! #
//! /// This structure represents a particular instance of the knapsack problem.
//! /// This is the structure that will implement the knapsack model.
//! struct Knapsack {
//!     /// The maximum capacity of the sack (when empty)
//!     capacity: usize,
//!     /// the profit of each item
//!     profit: Vec<usize>,
//!     /// the weight of each item.
//!     weight: Vec<usize>,
//! }
//!
//! /// For each variable in the decision problem, there are two possible
//! /// choices: either we take the item in the sack, or we decide to leave it
//! /// out. This constant is used to indicate that the item is to be taken.
//! const TAKE_IT: isize = 1;
//! /// This constant is used to indicate that the item is to be left out of
//! /// the sack.
//! const LEAVE_IT_OUT: isize = 0;
//!
//! /// This is how you implement the labeled transition system (LTS) semantics
//! /// of a simple dynamic program solving the knapsack problem. The
//! /// definition of each of the methods should be pretty clear and easy to
//! /// grasp. Should you want more details on the role of each of these
//! /// methods, you are encouraged to go checking the documentation of the
//! /// `Problem` trait.
//! impl Problem for Knapsack {
//!     type State = KnapsackState;
//!
//!     fn nb_variables(&self) -> usize {
//!         self.profit.len()
//!     }
//!     fn initial_state(&self) -> Self::State {
//!         KnapsackState{ depth: 0, capacity: self.capacity }
//!     }
//!     fn initial_value(&self) -> isize {
//!         0
//!     }
//!     fn transition(&self, state: &Self::State, dec: Decision) -> Self::State {
//!         let mut ret = *state;
//!         ret.depth  += 1;
//!         if dec.value == TAKE_IT {
//!             ret.capacity -= self.weight[dec.variable.id()]
//!         }
//!         ret
//!     }
//!     fn transition_cost(&self, _state: &Self::State, dec: Decision) -> isize {
//!         self.profit[dec.variable.id()] as isize * dec.value
//!     }
//!     // This function is designed to perform a call to the callback `f` for
//!     // each possible decision regarding a given state and variable. In
//!     // other words, it calls the callback `f` for each value in the domain
//!     // of `variable` given that the current state is `state`.
//!     fn for_each_in_domain(&self, variable: Variable, state: &Self::State, f: &mut dyn DecisionCallback)
//!     {
//!         if state.capacity >= self.weight[variable.id()] {
//!             f.apply(Decision { variable, value: TAKE_IT });
//!             f.apply(Decision { variable, value: LEAVE_IT_OUT });
//!         } else {
//!             f.apply(Decision { variable, value: LEAVE_IT_OUT });
//!         }
//!     }
//! }
//! ```
//!
//! #### Define a Relaxation
//! The relaxation we will define is probably the simplest you can think of.
//! When one needs to define a new state to replace those exceeding the
//! maximum width of the MDD, we will simply keep the state with the maximum
//! capacity as it enables at least all the possibly behaviors feasible with
//! lesser capacities.
//!
//! Optionally, we could also implement a rough upper bound estimator for our
//! problem in the relaxation. However, we wont do it in this minimalistic
//! example since the framework provides you with a default implementation.
//! If you were to override the default implementation you would need to
//! implement the `fast_upper_bound()` method of the `Relaxation` trait.
//!
//! ```
//! # use bbmdd::*;
//! #
//! # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! # struct KnapsackState {
//! #     depth: usize,
//! #     capacity: usize
//! # }
//! #
//! # struct Knapsack {
//! #     capacity: usize,
//! #     profit: Vec<usize>,
//! #     weight: Vec<usize>,
//! # }
//! struct KPRelax<'a>{pb: &'a Knapsack}
//! impl Relaxation for KPRelax<'_> {
//!     // The type of states which this relaxation operates on is
//!     // KnapsackState, just like the problem definition.
//!     type State = KnapsackState;
//!
//!     // This method creates and returns a new KnapsackState that will stand
//!     // for all the states returned by the 'states' iterator. The newly
//!     // created state will replace all these nodes in a relaxed DD that has
//!     // too many nodes.
//!     fn merge_states(&self, states: &mut dyn Iterator<Item = &Self::State>) -> Self::State {
//!         states.max_by_key(|node| node.capacity).copied().unwrap()
//!     }
//!     // This method is used to offset a portion of the cost that would be
//!     // lost in the merge operations towards the edges entering the merged
//!     // node. It is important to know this method exists, even though most
//!     // of the time you will simply return the cost of the relaxed edge.
//!     fn relax_edge(&self, _src: &Self::State, _dst: &Self::State, _merged: &Self::State, _decision: Decision, cost: isize) -> isize {
//!         cost
//!     }
//! }
//! ```
//!
//! #### State Ranking
//! The state ranking is an heuristic used to discriminate the most promising
//! states from the least promising ones. That way, the solver isn't blind
//! when it needs to decide which nodes to delete or merge as it compiles
//! restricted and relaxed DDs for you.
//!
//! For instance, in the case of the knapsack, when all else is equal, you
//! will obviously prefer that the solver leaves the states with a higher
//! remaining capacity untouched and merge or delete the others.
//! ```
//! use bbmdd::*;
//! #
//! # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! # struct KnapsackState {
//! #     depth: usize,
//! #     capacity: usize
//! # }
//! #
//! struct KPRanking;
//! impl StateRanking for KPRanking {
//!     type State = KnapsackState;
//!
//!     // It compares two states and returns an ordering. Greater means that
//!     // state a is preferred over state b. Less means that state b should be
//!     // preferred over state a. And Equal means you don't care.
//!     fn compare(&self, a: &Self::State, b: &Self::State) -> std::cmp::Ordering {
//!         a.capacity.cmp(&b.capacity)
//!     }
//! }
//! ```
//!
//! #### Instantiate your Solver
//! As soon as you have defined a problem, a relaxation and a state ranking,
//! you are good to go. The only thing you still need to do is to write your
//! main method and spin your solver to solve actual problems. Here is how
//! you would do it.
//!
//! ```
//! # use bbmdd::*;
//! #
//! # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! # struct KnapsackState {
//! #     depth: usize,
//! #     capacity: usize
//! # }
//! #
//! # struct Knapsack {
//! #     capacity: usize,
//! #     profit: Vec<usize>,
//! #     weight: Vec<usize>,
//! # }
//! #
//! # const TAKE_IT: isize = 1;
//! # const LEAVE_IT_OUT: isize = 0;
//! #
//! # impl Problem for Knapsack {
//! #     type State = KnapsackState;
//! #     fn nb_variables(&self) -> usize {
//! #         self.profit.len()
//! #     }
//! #     fn initial_state(&self) -> Self::State {
//! #         KnapsackState{ depth: 0, capacity: self.capacity }
//! #     }
//! #     fn initial_value(&self) -> isize {
//! #         0
//! #     }
//! #     fn transition(&self, state: &Self::State, dec: Decision) -> Self::State {
//! #         let mut ret = *state;
//! #         ret.depth  += 1;
//! #         if dec.value == TAKE_IT {
//! #             ret.capacity -= self.weight[dec.variable.id()]
//! #         }
//! #         ret
//! #     }
//! #     fn transition_cost(&self, _state: &Self::State, dec: Decision) -> isize {
//! #         self.profit[dec.variable.id()] as isize * dec.value
//! #     }
//! #     fn for_each_in_domain(&self, variable: Variable, state: &Self::State, f: &mut dyn DecisionCallback)
//! #     {
//! #         if state.capacity >= self.weight[variable.id()] {
//! #             f.apply(Decision { variable, value: TAKE_IT });
//! #             f.apply(Decision { variable, value: LEAVE_IT_OUT });
//! #         } else {
//! #             f.apply(Decision { variable, value: LEAVE_IT_OUT });
//! #         }
//! #     }
//! # }
//! # struct KPRelax<'a>{pb: &'a Knapsack}
//! # impl Relaxation for KPRelax<'_> {
//! #     type State = KnapsackState;
//! #
//! #     fn merge_states(&self, states: &mut dyn Iterator<Item = &Self::State>) -> Self::State {
//! #         states.max_by_key(|node| node.capacity).copied().unwrap()
//! #     }
//! #     fn relax_edge(&self, _src: &Self::State, _dst: &Self::State, _merged: &Self::State, _decision: Decision, cost: isize) -> isize {
//! #         cost
//! #     }
//! # }
//! #
//! # struct KPRanking;
//! # impl StateRanking for KPRanking {
//! #     type State = KnapsackState;
//! #
//! #     fn compare(&self, a: &Self::State, b: &Self::State) -> std::cmp::Ordering {
//! #         a.capacity.cmp(&b.capacity)
//! #     }
//! # }
//!
//! // 1. Create an instance of our knapsack problem
//! let problem = Knapsack {
//!     capacity: 50,
//!     profit  : vec![60, 100, 120],
//!     weight  : vec![10,  20,  30]
//! };
//!
//! // 2. Create a relaxation of the problem
//! let relaxation = KPRelax{pb: &problem};
//!
//! // 3. Create a ranking to discriminate the promising and uninteresting states
//! let heuristic = KPRanking;
//!
//! // 4. Choose the variable branching order (the default one picks the
//! //    unassigned variable with the lowest id)
//! let var_heu = DefaultVariableHeuristic;
//!
//! // 5. Define the policy you will want to use regarding the maximum width
//! //    of the DD (here we mean max 100 nodes per layer)
//! let width = FixedWidth(100);
//!
//! // 6. Create the solver frontier
//! let mut frontier = SimpleFrontier::new(MaxUB::new(&heuristic));
//!
//! // 7. Instantiate your solver
//! let mut solver = DefaultSolver::new(
//!       &problem,
//!       &relaxation,
//!       &var_heu,
//!       &heuristic,
//!       &width,
//!       &mut frontier);
//!
//! // 8. Maximize your objective function
//! // the outcome provides the value of the best solution that was found for
//! // the problem (if one was found). An unsatisfiable problem would have
//! // `outcome.best_value == None`.
//! let outcome = solver.maximize();
//! // The best solution (if one exists) is retrieved with
//! let solution = solver.best_solution();
//!
//! // 9. Do whatever you like with the optimal solution.
//! assert_eq!(Some(220), outcome.best_value);
//! println!("Solution");
//! for decision in solution.unwrap().iter() {
//!     if decision.value == 1 {
//!         println!("{}", decision.variable.id());
//!     }
//! }
//! ```
//!
//! ## Going further / Getting a grasp on the codebase
//! The easiest way to get your way around with BBMDD is probably to start
//! exploring the available APIs and then to move to the exploration of the
//! tests. (Or the other way around, that's really up to you !). For the
//! exploration of the APIs, you are encouraged to start with the types
//! `bbmdd::Problem` and `bbmdd::Relaxation` which define the core
//! abstractions you will need to implement. After that, it is also
//! interesting to have a look at the various heuristics available and the
//! configuration options you can use when customizing the behavior of your
//! solver and mdd. That should get you covered and you should be able to get
//! a deep understanding of how to use our library.

// I don't want to emit a lint warning because of the main method appearing
// in the crate documentation. It is specifically the purpose of that doc to
// show an example (including the main) of how to use the bbmdd library.
#![allow(clippy::needless_doctest_main)]

mod common;
mod abstraction;
mod implementation;

pub use common::*;
pub use abstraction::*;
pub use implementation::*;
