//! Plain directed graphs over dense vertex ordinals.
//!
//! The decision procedures strip an automaton down to one of these: a
//! vertex per state and an edge per transition, symbols discarded.

use std::collections::VecDeque;

use bit_set::BitSet;

pub type Vertex = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionGraph {
    successors: Vec<BitSet>,
}

impl TransitionGraph {
    /// A graph on `[0, vertices)` without edges.
    pub fn new(vertices: usize) -> Self {
        TransitionGraph {
            successors: vec![BitSet::new(); vertices],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    pub fn add_edge(&mut self, from: Vertex, to: Vertex) {
        self.successors[from].insert(to);
    }

    #[inline]
    pub fn has_edge(&self, from: Vertex, to: Vertex) -> bool {
        self.successors[from].contains(to)
    }

    #[inline]
    pub fn has_self_loop(&self, vertex: Vertex) -> bool {
        self.has_edge(vertex, vertex)
    }

    #[inline]
    pub fn successors(&self, vertex: Vertex) -> &BitSet {
        &self.successors[vertex]
    }

    /// The same graph with every edge reversed.
    pub fn transpose(&self) -> TransitionGraph {
        let mut transposed = TransitionGraph::new(self.len());
        for (from, succs) in self.successors.iter().enumerate() {
            for to in succs.iter() {
                transposed.add_edge(to, from);
            }
        }
        transposed
    }
}

/// Depth-first traversal from every unvisited vertex in index order.
///
/// Returns the finishing index of each vertex: the vertex that finishes
/// first gets 0, the last one `len - 1`.
pub fn dfs_finish_order(graph: &TransitionGraph) -> Vec<usize> {
    let mut finish = vec![::std::usize::MAX; graph.len()];
    let mut visited = BitSet::with_capacity(graph.len());
    let mut time = 0;
    let mut stack = Vec::new();

    for root in 0..graph.len() {
        if !visited.insert(root) {
            continue;
        }
        stack.push((root, graph.successors(root).iter()));
        while let Some((vertex, succs)) = stack.last_mut() {
            let vertex = *vertex;
            match succs.find(|&to| !visited.contains(to)) {
                Some(to) => {
                    visited.insert(to);
                    stack.push((to, graph.successors(to).iter()));
                }
                None => {
                    finish[vertex] = time;
                    time += 1;
                    stack.pop();
                }
            }
        }
    }

    finish
}

/// Breadth-first search from `start`; the result includes `start`.
pub fn reachable(graph: &TransitionGraph, start: Vertex) -> BitSet {
    reachable_from(graph, Some(start))
}

/// Every vertex reachable from at least one of `sources`, sources included.
pub fn reachable_from<I>(graph: &TransitionGraph, sources: I) -> BitSet
    where I: IntoIterator<Item = Vertex>
{
    let mut seen = BitSet::with_capacity(graph.len());
    let mut queue = VecDeque::new();
    for source in sources {
        if seen.insert(source) {
            queue.push_back(source);
        }
    }
    while let Some(vertex) = queue.pop_front() {
        for to in graph.successors(vertex).iter() {
            if seen.insert(to) {
                queue.push_back(to);
            }
        }
    }
    seen
}
