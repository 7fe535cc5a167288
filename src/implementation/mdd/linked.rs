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

//! This module provides the implementation of the decision diagram compiler.
//! The diagram is materialized as a layered graph whose nodes and edges live
//! in preallocated vectors (good cache locality, no per-node allocation) and
//! which is wholly recycled from one compilation to the next.

use std::{collections::hash_map::Entry, hash::Hash, sync::Arc};

use fxhash::FxHashMap;

use crate::{
    CompilationInput, CompilationType, Completion, Decision, DecisionDiagram, Solution,
    SubProblem, VarSet,
};

/// The identifier of a node: it indicates the position of the referenced node
/// in the 'nodes' vector of the mdd structure.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct NodeId(usize);

/// The identifier of an edge: it indicates the position of the referenced edge
/// in the 'edges' vector of the mdd structure.
#[derive(Debug, Clone, Copy)]
struct EdgeId(usize);

/// The identifier of an edge list: it indicates the position of an edge list
/// in the 'edgelists' vector of the mdd structure.
#[derive(Debug, Clone, Copy)]
struct EdgesListId(usize);

/// The identifier of a layer: it indicates the position of the referenced layer
/// in the 'layers' vector of the mdd structure.
#[derive(Debug, Clone, Copy)]
struct LayerId(usize);

/// Represents an effective node from the decision diagram
#[derive(Debug, Clone)]
struct Node<T> {
    /// The state associated to this node
    state: Arc<T>,
    /// The length of the longest path between the root of this dd and this
    /// specific node
    value: isize,
    /// The length of the longest path between this node and the terminal node.
    ///
    /// ### Note
    /// This field is only ever populated for relaxed diagrams, when the local
    /// bounds are computed after the dd has been fully unrolled. A node whose
    /// suffix is absent at that point cannot reach the terminal.
    suffix: Option<isize>,
    /// The rough upper bound associated to this node: the length of the
    /// longest path to this node plus the client's optimistic estimate of
    /// what can still be collected from here on. It is (re)set at the time
    /// when the node's layer gets expanded.
    ub: isize,
    /// The identifier of the last edge on the longest path between the root
    /// of this dd and this node if it exists.
    best: Option<EdgeId>,
    /// The identifier of the latest edge having been added to the adjacency
    /// list of this node. (Edges, by themselves form a kind of linked structure)
    inbound: EdgesListId,
}

/// Materializes one edge a.k.a arc from the decision diagram. It logically
/// connects two nodes and annotates the link with a decision and a cost.
#[derive(Debug, Clone, Copy)]
struct Edge {
    /// The identifier of the node at the **source** of this edge.
    from: NodeId,
    /// The identifier of the node at the **destination** of this edge.
    to: NodeId,
    /// This is the decision label associated to this edge. It gives the
    /// information "what variable" is assigned to "what value".
    decision: Decision,
    /// This is the transition cost of making this decision from the state
    /// associated with the source node of this edge.
    cost: isize,
}

/// Represents a 'node' in the linked list that forms the adjacent edges list
/// of a node
#[derive(Debug, Clone, Copy)]
enum EdgesList {
    Cons { head: EdgeId, tail: EdgesListId },
    Nil,
}

/// Represents a 'layer' in the decision diagram: the nodes belonging to one
/// layer form a contiguous sequence in the 'nodes' vector.
#[derive(Debug, Clone, Copy)]
struct Layer {
    from: usize,
    to: usize,
}

const NIL: EdgesListId = EdgesListId(0);

/// The decision diagram in itself. This structure essentially keeps track
/// of the nodes composing the diagram as well as the edges connecting these
/// nodes in two vectors (enabling preallocation and good cache locality).
/// In addition to that, it also keeps track of the path (path_to_root) from
/// the problem root to the root of this decision diagram (which explores a
/// subproblem), of the identifier of the last exact layer (lel) whenever the
/// diagram had to be shrunk, and of the next layer under construction
/// (next_l, indexed on the states so that two transitions to one same state
/// in one same layer reach one single node).
#[derive(Debug, Clone)]
pub struct LinkedDecisionDiagram<T>
where
    T: Eq + PartialEq + Hash + Clone,
{
    /// This vector stores the information about the structure of all the
    /// layers in this decision diagram
    layers: Vec<Layer>,
    /// All the nodes composing this decision diagram. The vector comprises
    /// nodes from all layers in the DD. A nice property is that all nodes
    /// belonging to one same layer form a sequence in the 'nodes' vector.
    nodes: Vec<Node<T>>,
    /// This vector stores the information about all edges connecting the
    /// nodes of the decision diagram.
    edges: Vec<Edge>,
    /// This vector stores the information about all edge lists constituting
    /// linked lists between edges
    edgelists: Vec<EdgesList>,
    /// The nodes from the next layer; those are the result of an application
    /// of the transition function to a node of the layer being expanded.
    next_l: FxHashMap<Arc<T>, NodeId>,
    /// Keeps track of the decisions that have been taken to reach the root
    /// of this DD, starting from the problem root.
    path_to_root: Vec<Decision>,
    /// The identifier of the last exact layer (should this dd be inexact)
    lel: Option<LayerId>,
    /// The identifier of the best terminal node of the diagram (None when
    /// the problem compiled into this dd is infeasible)
    best_node: Option<NodeId>,
}

impl<T> Default for LinkedDecisionDiagram<T>
where
    T: Eq + PartialEq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DecisionDiagram for LinkedDecisionDiagram<T>
where
    T: Eq + PartialEq + Hash + Clone,
{
    type State = T;

    fn compile(&mut self, input: &CompilationInput<T>) -> Completion {
        self._compile(input)
    }

    fn is_exact(&self) -> bool {
        self.lel.is_none()
    }

    fn best_value(&self) -> Option<isize> {
        self.best_node.map(|id| self.nodes[id.0].value)
    }

    fn best_solution(&self) -> Option<Solution> {
        self.best_node.map(|id| {
            Self::_best_path_partial_borrow(id, &self.path_to_root, &self.nodes, &self.edges)
        })
    }

    fn drain_cutset<F>(&mut self, func: F)
    where
        F: FnMut(SubProblem<T>),
    {
        self._drain_cutset(func)
    }
}

impl<T> LinkedDecisionDiagram<T>
where
    T: Eq + PartialEq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            layers: vec![],
            nodes: vec![],
            edges: vec![],
            edgelists: vec![],
            next_l: Default::default(),
            path_to_root: vec![],
            lel: None,
            best_node: None,
        }
    }

    /// Resets the state of this dd so that its buffers can be reused by the
    /// next compilation.
    fn _clear(&mut self) {
        self.layers.clear();
        self.nodes.clear();
        self.edges.clear();
        self.edgelists.clear();
        self.next_l.clear();
        self.path_to_root.clear();
        self.lel = None;
        self.best_node = None;
    }

    fn _compile(&mut self, input: &CompilationInput<T>) -> Completion {
        // make sure we dont have any stale data left
        self._clear();
        self._initialize(input);

        let mut vars = VarSet::all(input.problem.nb_variables());
        for d in input.residual.path.iter() {
            vars.remove(d.variable);
        }

        let mut curr_l = vec![];
        let mut depth = 0;

        while !vars.is_empty() {
            // 1. decide the next variable to branch on, while the states of
            //    the layer about to be expanded are still keyed in next_l
            let var = input
                .var_heu
                .next_variable(&vars, &mut self.next_l.keys().map(|s| s.as_ref()));
            let Some(var) = var else {
                // no decision can be made about any of the remaining states
                self._clear();
                return Completion { is_exact: true, best_value: None };
            };

            // 2. rotate the layers: what used to be the next layer is now the
            //    layer being expanded. Each node gets its rough upper bound.
            curr_l.clear();
            for (_, id) in self.next_l.drain() {
                curr_l.push(id);
            }
            for id in curr_l.iter() {
                let node = &self.nodes[id.0];
                let est = input.relaxation.fast_upper_bound(node.state.as_ref(), &vars);
                let rub = node.value.saturating_add(est);
                self.nodes[id.0].ub = rub;
            }

            // 3. when the layer being expanded is empty, there is no feasible
            //    solution to this subproblem and the compilation can stop here
            if curr_l.is_empty() {
                return Completion { is_exact: self.lel.is_none(), best_value: None };
            }

            vars.remove(var);

            // 4. squash the layer if it violates the maximum width
            //
            // Note: the check is on depth 2 because _maybe_save_lel() records
            // the parent of the squashed layer. At least one layer must be
            // developed per compiled mdd, otherwise the lel would be the root
            // of this dd and the enclosing branch-and-bound could not make
            // progress.
            if depth >= 2 && curr_l.len() > input.max_width {
                match input.comp_type {
                    CompilationType::Exact => { /* the complete dd must be explored */ }
                    CompilationType::Restricted => {
                        self._maybe_save_lel();
                        self._restrict(input, &mut curr_l);
                    }
                    CompilationType::Relaxed => {
                        self._maybe_save_lel();
                        self._relax(input, &mut curr_l);
                    }
                }
            }
            self._push_layer();

            // 5. expand the layer: apply every applicable transition to every
            //    node whose rough upper bound does not rule it out
            for id in curr_l.iter().copied() {
                if self.nodes[id.0].ub <= input.best_lb {
                    continue;
                }
                let state = self.nodes[id.0].state.clone();
                input
                    .problem
                    .for_each_in_domain(var, state.as_ref(), &mut |decision| {
                        self._branch_on(id, decision, input.problem)
                    });
            }

            depth += 1;
        }

        self._finalize(input);

        Completion {
            is_exact: self.lel.is_none(),
            best_value: self.best_node.map(|id| self.nodes[id.0].value),
        }
    }

    fn _initialize(&mut self, input: &CompilationInput<T>) {
        self.edgelists.push(EdgesList::Nil);
        self.path_to_root.extend_from_slice(&input.residual.path);

        let root = Node {
            state: input.residual.state.clone(),
            value: input.residual.value,
            suffix: None,
            ub: input.residual.ub,
            best: None,
            inbound: NIL,
        };
        self.nodes.push(root);
        self.next_l.insert(input.residual.state.clone(), NodeId(0));
    }

    /// Appends a layer record covering all the nodes created since the last
    /// recorded layer.
    fn _push_layer(&mut self) {
        let from = self.layers.last().map_or(0, |l| l.to);
        self.layers.push(Layer { from, to: self.nodes.len() });
    }

    /// Saves the last exact layer if needed: that layer is the parent of the
    /// layer being squashed.
    fn _maybe_save_lel(&mut self) {
        if self.lel.is_none() {
            self.lel = Some(LayerId(self.layers.len() - 1));
        }
    }

    /// Performs a restriction of the given layer: it sorts the nodes from the
    /// most promising to the least promising and drops the surplus.
    fn _restrict(&mut self, input: &CompilationInput<T>, curr_l: &mut Vec<NodeId>) {
        curr_l.sort_unstable_by(|a, b| {
            self.nodes[a.0]
                .value
                .cmp(&self.nodes[b.0].value)
                .then_with(|| {
                    input
                        .ranking
                        .compare(self.nodes[a.0].state.as_ref(), self.nodes[b.0].state.as_ref())
                })
                .reverse() // reverse because greater means more likely to be kept
        });

        curr_l.truncate(input.max_width);
    }

    /// Performs a relaxation of the given layer: it sorts the nodes from the
    /// most promising to the least promising, keeps the `max_width - 1` best
    /// ones and merges all the others into a single inexact node.
    fn _relax(&mut self, input: &CompilationInput<T>, curr_l: &mut Vec<NodeId>) {
        curr_l.sort_unstable_by(|a, b| {
            self.nodes[a.0]
                .value
                .cmp(&self.nodes[b.0].value)
                .then_with(|| {
                    input
                        .ranking
                        .compare(self.nodes[a.0].state.as_ref(), self.nodes[b.0].state.as_ref())
                })
                .reverse() // reverse because greater means more likely to be kept
        });

        let merge = curr_l.split_off(input.max_width - 1);
        let merged = Arc::new(
            input
                .relaxation
                .merge_states(&mut merge.iter().map(|id| self.nodes[id.0].state.as_ref())),
        );

        // the merged state may already be represented by one of the nodes
        // which were kept intact; in that case no new node is created
        let recycled = curr_l
            .iter()
            .find(|id| self.nodes[id.0].state.as_ref().eq(merged.as_ref()))
            .copied();

        let merged_id = recycled.unwrap_or_else(|| {
            let node_id = NodeId(self.nodes.len());
            self.nodes.push(Node {
                state: merged.clone(),
                value: isize::MIN,
                suffix: None,
                ub: isize::MIN,
                best: None,
                inbound: NIL,
            });
            node_id
        });

        // redirect and relax all arcs entering the merged node
        for drop_id in merge {
            self.nodes[merged_id.0].ub = self.nodes[merged_id.0].ub.max(self.nodes[drop_id.0].ub);

            let mut list = self.nodes[drop_id.0].inbound;
            while let EdgesList::Cons { head, tail } = self.edgelists[list.0] {
                let edge = self.edges[head.0];
                let rcost = input.relaxation.relax_edge(
                    self.nodes[edge.from.0].state.as_ref(),
                    self.nodes[edge.to.0].state.as_ref(),
                    merged.as_ref(),
                    edge.decision,
                    edge.cost,
                );

                self.edges[head.0] = Edge { to: merged_id, cost: rcost, ..edge };

                let cell = EdgesListId(self.edgelists.len());
                self.edgelists.push(EdgesList::Cons {
                    head,
                    tail: self.nodes[merged_id.0].inbound,
                });
                self.nodes[merged_id.0].inbound = cell;

                let value = self.nodes[edge.from.0].value.saturating_add(rcost);
                let node = &mut self.nodes[merged_id.0];
                if value > node.value {
                    node.value = value;
                    node.best = Some(head);
                }

                list = tail;
            }
        }

        if recycled.is_none() {
            curr_l.push(merged_id);
        }
    }

    /// This method performs the branching from the node identified by
    /// `from_id`, making the given decision and behaving as per the problem
    /// definition.
    fn _branch_on(
        &mut self,
        from_id: NodeId,
        decision: Decision,
        problem: &dyn crate::Problem<State = T>,
    ) {
        let (next_state, cost, value) = {
            let node = &self.nodes[from_id.0];
            let state = node.state.as_ref();
            let next_state = Arc::new(problem.transition(state, decision));
            let cost = problem.transition_cost(state, decision);
            (next_state, cost, node.value.saturating_add(cost))
        };

        match self.next_l.entry(next_state.clone()) {
            Entry::Vacant(e) => {
                let node_id = NodeId(self.nodes.len());
                self.nodes.push(Node {
                    state: next_state,
                    value,
                    suffix: None,
                    ub: isize::MAX,
                    best: None,
                    inbound: NIL,
                });
                e.insert(node_id);
                self._append_edge_to(node_id, Edge { from: from_id, to: node_id, decision, cost });
            }
            Entry::Occupied(e) => {
                let node_id = *e.get();
                self._append_edge_to(node_id, Edge { from: from_id, to: node_id, decision, cost });
            }
        }
    }

    /// This method appends an edge to the adjacency list of a given node and
    /// updates the longest path to that node if the new edge improves it.
    fn _append_edge_to(&mut self, id: NodeId, edge: Edge) {
        let eid = EdgeId(self.edges.len());
        let cell = EdgesListId(self.edgelists.len());
        self.edges.push(edge);
        self.edgelists.push(EdgesList::Cons { head: eid, tail: self.nodes[id.0].inbound });

        let value = self.nodes[edge.from.0].value.saturating_add(edge.cost);
        let node = &mut self.nodes[id.0];
        node.inbound = cell;
        if value >= node.value {
            node.best = Some(eid);
            node.value = value;
        }
    }

    fn _finalize(&mut self, input: &CompilationInput<T>) {
        self._finalize_layers();
        self._find_best_node();
        if input.comp_type == CompilationType::Relaxed {
            self._compute_local_bounds();
        }
    }

    /// Appends the layer record of the terminal layer.
    fn _finalize_layers(&mut self) {
        if !self.next_l.is_empty() {
            self._push_layer();
        }
    }

    fn _find_best_node(&mut self) {
        self.best_node = None;
        for id in self.next_l.values() {
            match self.best_node {
                None => self.best_node = Some(*id),
                Some(best) => {
                    if self.nodes[id.0].value > self.nodes[best.0].value {
                        self.best_node = Some(*id);
                    }
                }
            }
        }
    }

    /// Performs a bottom up traversal of the mdd to compute the local bounds
    /// of the nodes standing in the last exact layer.
    fn _compute_local_bounds(&mut self) {
        let Some(lel) = self.lel else { return };

        // initialize the terminal layer
        let terminal = self.layers[self.layers.len() - 1];
        for node in self.nodes[terminal.from..terminal.to].iter_mut() {
            node.suffix = Some(0);
        }

        // traverse bottom-up, stopping once the lel has been fully visited
        for layer in (lel.0..self.layers.len()).rev() {
            let Layer { from, to } = self.layers[layer];
            for id in from..to {
                // a node which cannot reach the terminal must not propagate
                let Some(suffix) = self.nodes[id].suffix else { continue };

                let mut list = self.nodes[id].inbound;
                while let EdgesList::Cons { head, tail } = self.edgelists[list.0] {
                    let edge = self.edges[head.0];
                    let through = suffix.saturating_add(edge.cost);
                    let parent = &mut self.nodes[edge.from.0];
                    parent.suffix = Some(parent.suffix.map_or(through, |s| s.max(through)));
                    list = tail;
                }
            }
        }
    }

    fn _drain_cutset<F>(&mut self, mut func: F)
    where
        F: FnMut(SubProblem<T>),
    {
        let Some(lel) = self.lel else { return };

        let Layer { from, to } = self.layers[lel.0];
        for id in from..to {
            let node = &self.nodes[id];
            let locb = node
                .suffix
                .map_or(isize::MIN, |s| node.value.saturating_add(s));

            func(SubProblem {
                state: node.state.clone(),
                value: node.value,
                path: Self::_best_path_partial_borrow(
                    NodeId(id),
                    &self.path_to_root,
                    &self.nodes,
                    &self.edges,
                ),
                ub: node.ub.min(locb),
            })
        }
    }

    fn _best_path_partial_borrow(
        id: NodeId,
        root_pa: &[Decision],
        nodes: &[Node<T>],
        edges: &[Edge],
    ) -> Vec<Decision> {
        let mut sol = root_pa.to_owned();
        let mut edge_id = nodes[id.0].best;
        while let Some(eid) = edge_id {
            let edge = edges[eid.0];
            sol.push(edge.decision);
            edge_id = nodes[edge.from.0].best;
        }
        sol
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
