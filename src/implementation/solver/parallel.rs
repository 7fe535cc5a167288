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

//! This module provides the implementation of a parallel mdd solver. That is
//! a solver that will solve the problem using as many threads as requested.
//! By default, it uses as many threads as the number of hardware threads
//! available on the machine.

use std::{hash::Hash, marker::PhantomData, sync::Arc};

use parking_lot::{Condvar, Mutex};

use crate::{
    CompilationInput, CompilationType, Completion, DecisionDiagram, Frontier, Problem,
    Relaxation, Solution, Solver, StateRanking, SubProblem, VariableHeuristic, WidthHeuristic,
};

/// The shared data that may only be manipulated within critical sections
struct Critical<'a, State> {
    /// This is the frontier: the set of nodes that must still be explored
    /// before the problem can be considered 'solved'.
    ///
    /// # Note:
    /// This frontier orders the nodes by upper bound (so the highest ub is
    /// going to pop first). So, it is guaranteed that the upper bound of the
    /// first node being popped is an upper bound on the value reachable by
    /// exploring any of the nodes remaining on the frontier. As a consequence,
    /// the exploration can be stopped as soon as a node with an ub <= current
    /// best lower bound is popped.
    frontier: &'a mut (dyn Frontier<State = State> + Send + Sync),
    /// This is the number of nodes that are currently being explored.
    ///
    /// # Note
    /// This information may seem innocuous/superfluous, whereas in fact it is
    /// very important. Indeed, this is the piece of information that lets us
    /// distinguish between a node-starvation and the completion of the problem
    /// resolution. The bottom line is, this counter needs to be carefully
    /// managed to guarantee the termination of all threads.
    ongoing: usize,
    /// This is a counter that tracks the number of nodes that have effectively
    /// been explored. That is, the number of nodes that have been popped from
    /// the frontier, and for which a restricted and relaxed mdd have been
    /// developed.
    explored: usize,
    /// This is the value of the best known lower bound.
    best_lb: isize,
    /// This is the value of the best known upper bound.
    /// *WARNING* This one only gets set when the termination condition is met
    best_ub: isize,
    /// If set, this keeps the info about the best solution so far.
    best_sol: Option<Solution>,
    /// This vector is used to store the upper bound on the node which is
    /// currently processed by each thread.
    ///
    /// # Note
    /// When a thread is idle (or more generally when it is done with
    /// processing its node), it should place the value isize::MAX in its
    /// corresponding cell.
    upper_bounds: Vec<isize>,
}

/// The state which is shared among the many running threads: it provides an
/// access to the critical data (protected by a mutex) as well as a monitor
/// (condvar) to park threads in case of node-starvation.
struct Shared<'a, State> {
    /// A reference to the problem being solved with branch-and-bound MDD
    problem: &'a (dyn Problem<State = State> + Send + Sync),
    /// The relaxation used when a DD layer grows too large
    relaxation: &'a (dyn Relaxation<State = State> + Send + Sync),
    /// The heuristic used to decide the variable to branch on next
    var_heu: &'a (dyn VariableHeuristic<State> + Send + Sync),
    /// The ranking heuristic used to discriminate the most promising from
    /// the least promising states
    ranking: &'a (dyn StateRanking<State = State> + Send + Sync),
    /// The maximum width heuristic used to enforce a given maximum memory
    /// usage when compiling mdds
    width_heu: &'a (dyn WidthHeuristic<State> + Send + Sync),

    /// This is the shared state data which can only be accessed within
    /// critical sections. Therefore, it is protected by a mutex which prevents
    /// concurrent reads/writes.
    critical: Mutex<Critical<'a, State>>,
    /// This is the monitor on which threads must wait when facing an empty
    /// frontier. The corollary is that whenever a thread has completed the
    /// processing of a subproblem, it must wake-up all parked threads waiting
    /// on this monitor.
    monitor: Condvar,
}

/// The workload a thread can get from the shared state
enum WorkLoad<T> {
    /// There is no work left to be done: you can safely terminate
    Complete,
    /// There is nothing you can do right now. Check again when you wake up
    Starvation,
    /// The item to process
    WorkItem { node: SubProblem<T> },
}

/// This is the structure implementing the multi-threaded MDD solver. It works
/// a bit like a thread pool: the solver spawns a bunch of long running threads
/// which repeatedly fetch a subproblem off the frontier, compile a restricted
/// then possibly a relaxed decision diagram for it, update the best known
/// bounds and feed the frontier back with the cutset of the relaxed dd.
///
/// # Example Usage
/// ```
/// # use bbmdd::*;
/// # use std::sync::Arc;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # struct KnapsackState { depth: usize, capacity: usize }
/// # struct Knapsack { capacity: usize, profit: Vec<usize>, weight: Vec<usize> }
/// # impl Problem for Knapsack {
/// #     type State = KnapsackState;
/// #     fn nb_variables(&self) -> usize { self.profit.len() }
/// #     fn initial_state(&self) -> Self::State {
/// #         KnapsackState { depth: 0, capacity: self.capacity }
/// #     }
/// #     fn initial_value(&self) -> isize { 0 }
/// #     fn transition(&self, state: &Self::State, dec: Decision) -> Self::State {
/// #         let mut ret = *state;
/// #         ret.depth += 1;
/// #         if dec.value == 1 { ret.capacity -= self.weight[dec.variable.id()] }
/// #         ret
/// #     }
/// #     fn transition_cost(&self, _: &Self::State, dec: Decision) -> isize {
/// #         self.profit[dec.variable.id()] as isize * dec.value
/// #     }
/// #     fn for_each_in_domain(&self, variable: Variable, state: &Self::State, f: &mut dyn DecisionCallback) {
/// #         if state.capacity >= self.weight[variable.id()] {
/// #             f.apply(Decision { variable, value: 1 });
/// #         }
/// #         f.apply(Decision { variable, value: 0 });
/// #     }
/// # }
/// # struct KPRelax<'a>{ pb: &'a Knapsack }
/// # impl Relaxation for KPRelax<'_> {
/// #     type State = KnapsackState;
/// #     fn merge_states(&self, states: &mut dyn Iterator<Item = &Self::State>) -> Self::State {
/// #         states.max_by_key(|s| s.capacity).copied().unwrap()
/// #     }
/// #     fn relax_edge(&self, _: &Self::State, _: &Self::State, _: &Self::State, _: Decision, cost: isize) -> isize {
/// #         cost
/// #     }
/// # }
/// # struct KPRanking;
/// # impl StateRanking for KPRanking {
/// #     type State = KnapsackState;
/// #     fn compare(&self, a: &Self::State, b: &Self::State) -> std::cmp::Ordering {
/// #         a.capacity.cmp(&b.capacity)
/// #     }
/// # }
/// // 1. create an instance of the problem, a relaxation and the heuristics
/// let problem = Knapsack {
///     capacity: 50,
///     profit  : vec![60, 100, 120],
///     weight  : vec![10,  20,  30]
/// };
/// let relaxation = KPRelax { pb: &problem };
/// let ranking = KPRanking;
/// let var_heu = DefaultVariableHeuristic;
/// let width = FixedWidth(100);
/// let mut frontier = SimpleFrontier::new(MaxUB::new(&ranking));
///
/// // 2. instantiate the solver and maximize the objective function
/// let mut solver = DefaultSolver::new(
///     &problem,
///     &relaxation,
///     &var_heu,
///     &ranking,
///     &width,
///     &mut frontier);
/// let outcome = solver.maximize();
///
/// assert_eq!(Some(220), outcome.best_value);
/// ```
pub struct ParallelSolver<'a, State, D>
where
    D: DecisionDiagram<State = State> + Default,
{
    /// This is the shared state. Each thread is going to take a reference to it.
    shared: Shared<'a, State>,
    /// This is a configuration parameter that tunes the number of threads that
    /// will be spawned to solve the problem. By default, this number amounts
    /// to the number of hardware threads available on the machine.
    nb_threads: usize,
    /// This is just a marker that allows us to remember the exact type of the
    /// mdds to be instantiated.
    _phantom: PhantomData<D>,
}

impl<'a, State, D> ParallelSolver<'a, State, D>
where
    State: Eq + Hash + Clone,
    D: DecisionDiagram<State = State> + Default,
{
    pub fn new(
        problem: &'a (dyn Problem<State = State> + Send + Sync),
        relaxation: &'a (dyn Relaxation<State = State> + Send + Sync),
        var_heu: &'a (dyn VariableHeuristic<State> + Send + Sync),
        ranking: &'a (dyn StateRanking<State = State> + Send + Sync),
        width_heu: &'a (dyn WidthHeuristic<State> + Send + Sync),
        frontier: &'a mut (dyn Frontier<State = State> + Send + Sync),
    ) -> Self {
        Self::custom(problem, relaxation, var_heu, ranking, width_heu, frontier, num_cpus::get())
    }

    pub fn custom(
        problem: &'a (dyn Problem<State = State> + Send + Sync),
        relaxation: &'a (dyn Relaxation<State = State> + Send + Sync),
        var_heu: &'a (dyn VariableHeuristic<State> + Send + Sync),
        ranking: &'a (dyn StateRanking<State = State> + Send + Sync),
        width_heu: &'a (dyn WidthHeuristic<State> + Send + Sync),
        frontier: &'a mut (dyn Frontier<State = State> + Send + Sync),
        nb_threads: usize,
    ) -> Self {
        ParallelSolver {
            shared: Shared {
                problem,
                relaxation,
                var_heu,
                ranking,
                width_heu,
                //
                monitor: Condvar::new(),
                critical: Mutex::new(Critical {
                    frontier,
                    ongoing: 0,
                    explored: 0,
                    best_lb: isize::MIN,
                    best_ub: isize::MAX,
                    best_sol: None,
                    upper_bounds: vec![isize::MAX; nb_threads],
                }),
            },
            nb_threads,
            _phantom: Default::default(),
        }
    }

    /// This method initializes the problem resolution. Put more simply, this
    /// method posts the root node of the mdd onto the frontier so that a
    /// thread can pick it up and the processing can be bootstrapped.
    fn initialize(&mut self) {
        let root = self.root_node();
        let mut critical = self.shared.critical.lock();
        critical.frontier.push(root);
    }

    fn root_node(&self) -> SubProblem<State> {
        let shared = &self.shared;
        SubProblem {
            state: Arc::new(shared.problem.initial_state()),
            value: shared.problem.initial_value(),
            path: vec![],
            ub: isize::MAX,
        }
    }

    /// This method processes the given `node`. To do so, it reads the current
    /// best lower bound from the critical data. Then it expands a restricted
    /// and possibly a relaxed mdd rooted in `node`. If that is necessary,
    /// it stores cutset nodes onto the frontier for further parallel
    /// processing.
    fn process_one_node(mdd: &mut D, shared: &Shared<'a, State>, node: SubProblem<State>) {
        // 1. RESTRICTION
        let best_lb = Self::best_lb(shared);
        if node.ub <= best_lb {
            return;
        }

        let width = shared.width_heu.max_width(node.state.as_ref());
        let mut compilation = CompilationInput {
            comp_type: CompilationType::Restricted,
            problem: shared.problem,
            relaxation: shared.relaxation,
            var_heu: shared.var_heu,
            ranking: shared.ranking,
            residual: &node,
            max_width: width,
            best_lb,
        };

        let Completion { is_exact, .. } = mdd.compile(&compilation);
        Self::maybe_update_best(mdd, shared);
        if is_exact {
            return;
        }

        // 2. RELAXATION
        compilation.comp_type = CompilationType::Relaxed;
        compilation.best_lb = Self::best_lb(shared);

        let Completion { is_exact, .. } = mdd.compile(&compilation);
        if is_exact {
            Self::maybe_update_best(mdd, shared);
        } else {
            Self::enqueue_cutset(mdd, shared);
        }
    }

    fn best_lb(shared: &Shared<'a, State>) -> isize {
        shared.critical.lock().best_lb
    }

    /// This private method updates the shared best known node and lower bound
    /// in case the best value of the current `mdd` expansion improves the
    /// current bounds.
    fn maybe_update_best(mdd: &D, shared: &Shared<'a, State>) {
        let mut critical = shared.critical.lock();
        if let Some(value) = mdd.best_value() {
            if value > critical.best_lb {
                critical.best_lb = value;
                critical.best_sol = mdd.best_solution();
            }
        }
    }

    /// Adds the relevant nodes from the cutset of `mdd` to the shared
    /// frontier: only the subproblems which might improve on the best known
    /// lower bound are worth exploring.
    fn enqueue_cutset(mdd: &mut D, shared: &Shared<'a, State>) {
        let mut critical = shared.critical.lock();
        let best_lb = critical.best_lb;
        mdd.drain_cutset(|cutset_node| {
            if cutset_node.ub > best_lb {
                critical.frontier.push(cutset_node);
            }
        });
    }

    /// Acknowledges that a thread finished processing its node.
    fn notify_node_finished(shared: &Shared<'a, State>, thread_id: usize) {
        let mut critical = shared.critical.lock();
        critical.ongoing -= 1;
        critical.upper_bounds[thread_id] = isize::MAX;
        shared.monitor.notify_all();
    }

    /// Consults the shared state to fetch a workload. Depending on the current
    /// state, the workload can either be:
    ///
    ///   + Complete, when the problem is solved and all threads should stop
    ///   + Starvation, when there is no subproblem available for processing
    ///     at the time being (but some subproblem are still being processed
    ///     and thus the problem cannot be considered solved).
    ///   + WorkItem, when the thread successfully obtained a subproblem to
    ///     process.
    fn get_workload(shared: &Shared<'a, State>, thread_id: usize) -> WorkLoad<State> {
        let mut critical = shared.critical.lock();

        // Are we done ?
        if critical.ongoing == 0 && critical.frontier.is_empty() {
            critical.best_ub = critical.best_lb;
            shared.monitor.notify_all();
            return WorkLoad::Complete;
        }

        // Nothing to do yet ? => Wait for someone to post jobs
        if critical.frontier.is_empty() {
            shared.monitor.wait(&mut critical);
            return WorkLoad::Starvation;
        }

        // Nothing relevant ? => Wait for someone to post jobs
        let nn = critical.frontier.pop().unwrap();
        if nn.ub <= critical.best_lb {
            critical.frontier.clear();
            shared.monitor.wait(&mut critical);
            return WorkLoad::Starvation;
        }

        // Consume the current node and process it
        critical.ongoing += 1;
        critical.explored += 1;
        critical.upper_bounds[thread_id] = nn.ub;

        WorkLoad::WorkItem { node: nn }
    }
}

impl<'a, State, D> Solver for ParallelSolver<'a, State, D>
where
    State: Eq + PartialEq + Hash + Clone,
    D: DecisionDiagram<State = State> + Default,
{
    /// Applies the branch and bound algorithm proposed by Bergman et al. to
    /// solve the problem to optimality. To do so, it spawns `nb_threads`
    /// workers (long running threads); each of which will continually get a
    /// workload and process it until the problem is solved.
    fn maximize(&mut self) -> Completion {
        self.initialize();

        std::thread::scope(|s| {
            for i in 0..self.nb_threads {
                let shared = &self.shared;
                s.spawn(move || {
                    let mut mdd = D::default();
                    loop {
                        match Self::get_workload(shared, i) {
                            WorkLoad::Complete => break,
                            WorkLoad::Starvation => continue,
                            WorkLoad::WorkItem { node } => {
                                Self::process_one_node(&mut mdd, shared, node);
                                Self::notify_node_finished(shared, i);
                            }
                        }
                    }
                });
            }
        });

        let mut critical = self.shared.critical.lock();
        if let Some(sol) = critical.best_sol.as_mut() {
            sol.sort_unstable_by_key(|d| d.variable.0)
        }
        Completion {
            is_exact: true,
            best_value: critical.best_sol.as_ref().map(|_| critical.best_lb),
        }
    }

    /// Returns the best solution that has been identified for this problem.
    fn best_solution(&self) -> Option<Solution> {
        self.shared.critical.lock().best_sol.clone()
    }
    /// Returns the value of the best solution that has been identified for
    /// this problem.
    fn best_value(&self) -> Option<isize> {
        let critical = self.shared.critical.lock();
        critical.best_sol.as_ref().map(|_sol| critical.best_lb)
    }
    /// Returns the value of the best lower bound that has been identified for
    /// this problem.
    fn best_lower_bound(&self) -> isize {
        self.shared.critical.lock().best_lb
    }
    /// Returns the value of the best upper bound that has been identified for
    /// this problem.
    fn best_upper_bound(&self) -> isize {
        self.shared.critical.lock().best_ub
    }
    /// Returns the number of subproblems that have been explored so far.
    fn explored(&self) -> usize {
        self.shared.critical.lock().explored
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

/// Unlike the rest of the library, the solver module is not tested in depth
/// with unit tests (this is way too hard to do).
/// So we basically unit test the configuration capabilities of the solver
/// and then resort to the solving of small instances with known optimum
/// solution to validate the behavior of the maximize function.

#[cfg(test)]
mod test_solver {
    use std::cmp::Ordering;

    use crate::*;

    type Dd<'a, T> = ParallelSolver<'a, T, LinkedDecisionDiagram<T>>;

    #[test]
    fn by_default_best_lb_is_min_infinity() {
        let problem = Knapsack {
            capacity: 50,
            profit  : vec![60, 100, 120],
            weight  : vec![10,  20,  30]
        };
        let relax = KPRelax { pb: &problem };
        let ranking = KPRanking;
        let var_heu = DefaultVariableHeuristic;
        let width = FixedWidth(100);
        let mut frontier = SimpleFrontier::new(MaxUB::new(&ranking));
        let solver = Dd::custom(
            &problem,
            &relax,
            &var_heu,
            &ranking,
            &width,
            &mut frontier,
            1,
        );

        assert_eq!(isize::MIN, solver.best_lower_bound());
    }
    #[test]
    fn by_default_best_ub_is_plus_infinity() {
        let problem = Knapsack {
            capacity: 50,
            profit  : vec![60, 100, 120],
            weight  : vec![10,  20,  30]
        };
        let relax = KPRelax { pb: &problem };
        let ranking = KPRanking;
        let var_heu = DefaultVariableHeuristic;
        let width = FixedWidth(100);
        let mut frontier = SimpleFrontier::new(MaxUB::new(&ranking));
        let solver = Dd::custom(
            &problem,
            &relax,
            &var_heu,
            &ranking,
            &width,
            &mut frontier,
            1,
        );

        assert_eq!(isize::MAX, solver.best_upper_bound());
    }
    #[test]
    fn no_solution_nor_explored_node_before_solving() {
        let problem = Knapsack {
            capacity: 50,
            profit  : vec![60, 100, 120],
            weight  : vec![10,  20,  30]
        };
        let relax = KPRelax { pb: &problem };
        let ranking = KPRanking;
        let var_heu = DefaultVariableHeuristic;
        let width = FixedWidth(100);
        let mut frontier = SimpleFrontier::new(MaxUB::new(&ranking));
        let solver = Dd::custom(
            &problem,
            &relax,
            &var_heu,
            &ranking,
            &width,
            &mut frontier,
            1,
        );

        assert!(solver.best_value().is_none());
        assert!(solver.best_solution().is_none());
        assert_eq!(0, solver.explored());
    }
    #[test]
    fn when_the_problem_is_solved_both_bounds_are_the_best_value() {
        let problem = Knapsack {
            capacity: 50,
            profit  : vec![60, 100, 120],
            weight  : vec![10,  20,  30]
        };
        let relax = KPRelax { pb: &problem };
        let ranking = KPRanking;
        let var_heu = DefaultVariableHeuristic;
        let width = FixedWidth(100);
        let mut frontier = SimpleFrontier::new(MaxUB::new(&ranking));
        let mut solver = Dd::custom(
            &problem,
            &relax,
            &var_heu,
            &ranking,
            &width,
            &mut frontier,
            1,
        );

        let _ = solver.maximize();
        assert_eq!(220, solver.best_lower_bound());
        assert_eq!(220, solver.best_upper_bound());
    }

    #[test]
    fn maximize_yields_the_optimum() {
        let problem = Knapsack {
            capacity: 50,
            profit  : vec![60, 100, 120],
            weight  : vec![10,  20,  30]
        };
        let relax = KPRelax { pb: &problem };
        let ranking = KPRanking;
        let var_heu = DefaultVariableHeuristic;
        let width = FixedWidth(2);
        let mut frontier = SimpleFrontier::new(MaxUB::new(&ranking));
        let mut solver = Dd::custom(
            &problem,
            &relax,
            &var_heu,
            &ranking,
            &width,
            &mut frontier,
            1,
        );

        let maximized = solver.maximize();

        assert_eq!(maximized.best_value, Some(220));
        assert!(solver.best_solution().is_some());

        let sln = solver.best_solution().unwrap();
        assert_eq!(sln, vec![
            Decision { variable: Variable(0), value: 0 },
            Decision { variable: Variable(1), value: 1 },
            Decision { variable: Variable(2), value: 1 },
        ]);
    }

    #[test]
    fn maximize_yields_the_optimum_on_a_larger_instance() {
        let problem = Knapsack {
            capacity: 50,
            profit  : vec![60, 210, 12, 5, 100, 120, 110],
            weight  : vec![10,  45, 20, 4,  20,  30,  50]
        };
        let relax = KPRelax { pb: &problem };
        let ranking = KPRanking;
        let var_heu = DefaultVariableHeuristic;
        let width = FixedWidth(2);
        let mut frontier = SimpleFrontier::new(MaxUB::new(&ranking));
        let mut solver = Dd::custom(
            &problem,
            &relax,
            &var_heu,
            &ranking,
            &width,
            &mut frontier,
            1,
        );

        let maximized = solver.maximize();

        assert_eq!(maximized.best_value, Some(220));

        let sln = solver.best_solution().unwrap();
        assert_eq!(sln, vec![
            Decision { variable: Variable(0), value: 0 },
            Decision { variable: Variable(1), value: 0 },
            Decision { variable: Variable(2), value: 0 },
            Decision { variable: Variable(3), value: 0 },
            Decision { variable: Variable(4), value: 1 },
            Decision { variable: Variable(5), value: 1 },
            Decision { variable: Variable(6), value: 0 }
        ]);
    }

    #[test]
    fn the_number_of_threads_does_not_change_the_optimum() {
        let problem = Knapsack {
            capacity: 50,
            profit  : vec![60, 210, 12, 5, 100, 120, 110],
            weight  : vec![10,  45, 20, 4,  20,  30,  50]
        };
        let relax = KPRelax { pb: &problem };
        let ranking = KPRanking;
        let var_heu = DefaultVariableHeuristic;
        let width = FixedWidth(2);

        for nb_threads in [1, 2, 4] {
            let mut frontier = SimpleFrontier::new(MaxUB::new(&ranking));
            let mut solver = Dd::custom(
                &problem,
                &relax,
                &var_heu,
                &ranking,
                &width,
                &mut frontier,
                nb_threads,
            );
            let maximized = solver.maximize();
            assert_eq!(maximized.best_value, Some(220));
        }
    }

    #[test]
    fn an_unsatisfiable_problem_admits_no_solution() {
        let problem = Knapsack {
            capacity: 50,
            profit  : vec![60, 100, 120],
            weight  : vec![10,  20,  30]
        };
        let relax = KPRelax { pb: &problem };
        let ranking = KPRanking;
        let var_heu = DefaultVariableHeuristic;
        let width = FixedWidth(100);
        let mut frontier = SimpleFrontier::new(MaxUB::new(&ranking));
        let no_domain = NoDomain { pb: &problem };
        let mut solver = Dd::custom(
            &no_domain,
            &relax,
            &var_heu,
            &ranking,
            &width,
            &mut frontier,
            1,
        );

        let maximized = solver.maximize();
        assert_eq!(maximized.best_value, None);
        assert!(solver.best_solution().is_none());
        assert_eq!(1, solver.explored());
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct KnapsackState {
        depth: usize,
        capacity: usize
    }
    struct Knapsack {
        capacity: usize,
        profit: Vec<usize>,
        weight: Vec<usize>,
    }

    const TAKE_IT: isize = 1;
    const LEAVE_IT_OUT: isize = 0;

    impl Problem for Knapsack {
        type State = KnapsackState;
        fn nb_variables(&self) -> usize {
            self.profit.len()
        }
        fn initial_state(&self) -> Self::State {
            KnapsackState{ depth: 0, capacity: self.capacity }
        }
        fn initial_value(&self) -> isize {
            0
        }
        fn transition(&self, state: &Self::State, dec: Decision) -> Self::State {
            let mut ret = *state;
            ret.depth  += 1;
            if dec.value == TAKE_IT {
                ret.capacity -= self.weight[dec.variable.id()]
            }
            ret
        }
        fn transition_cost(&self, _state: &Self::State, dec: Decision) -> isize {
            self.profit[dec.variable.id()] as isize * dec.value
        }
        fn for_each_in_domain(&self, variable: Variable, state: &Self::State, f: &mut dyn DecisionCallback)
        {
            if state.capacity >= self.weight[variable.id()] {
                f.apply(Decision { variable, value: TAKE_IT });
                f.apply(Decision { variable, value: LEAVE_IT_OUT });
            } else {
                f.apply(Decision { variable, value: LEAVE_IT_OUT });
            }
        }
    }
    struct KPRelax<'a>{ pb: &'a Knapsack }
    impl Relaxation for KPRelax<'_> {
        type State = KnapsackState;

        fn merge_states(&self, states: &mut dyn Iterator<Item = &Self::State>) -> Self::State {
            states.max_by_key(|state| state.capacity).copied().unwrap()
        }
        fn relax_edge(&self, _src: &Self::State, _dst: &Self::State, _merged: &Self::State, _decision: Decision, cost: isize) -> isize {
            cost
        }
        fn fast_upper_bound(&self, state: &Self::State, vars: &VarSet) -> isize {
            let mut tot = 0;
            for var in vars.iter() {
                if self.pb.weight[var.id()] <= state.capacity {
                    tot += self.pb.profit[var.id()];
                }
            }
            tot as isize
        }
    }
    struct KPRanking;
    impl StateRanking for KPRanking {
        type State = KnapsackState;

        fn compare(&self, a: &Self::State, b: &Self::State) -> Ordering {
            a.capacity.cmp(&b.capacity)
        }
    }

    /// A variant of the knapsack where no variable can ever be assigned
    struct NoDomain<'a> { pb: &'a Knapsack }
    impl Problem for NoDomain<'_> {
        type State = KnapsackState;
        fn nb_variables(&self) -> usize {
            self.pb.nb_variables()
        }
        fn initial_state(&self) -> Self::State {
            self.pb.initial_state()
        }
        fn initial_value(&self) -> isize {
            self.pb.initial_value()
        }
        fn transition(&self, state: &Self::State, dec: Decision) -> Self::State {
            self.pb.transition(state, dec)
        }
        fn transition_cost(&self, state: &Self::State, dec: Decision) -> isize {
            self.pb.transition_cost(state, dec)
        }
        fn for_each_in_domain(&self, _: Variable, _: &Self::State, _: &mut dyn DecisionCallback) {
            /* empty domain */
        }
    }
}
