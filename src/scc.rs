use bit_set::BitSet;

use crate::graph::{dfs_finish_order, TransitionGraph, Vertex};

/// Strongly connected components of a graph, as found by `kosaraju`.
#[derive(Clone, Debug)]
pub struct Sccs {
    components: Vec<Vec<Vertex>>, // in order of discovery by the second pass
    mapping: Vec<usize>,          // Vertex -> index into `components`
}

impl Sccs {
    pub fn components(&self) -> &[Vec<Vertex>] {
        &self.components
    }

    /// Index of the component that contains `vertex`.
    #[inline]
    pub fn component_of(&self, vertex: Vertex) -> usize {
        self.mapping[vertex]
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// A component is trivial when it is a single vertex without a self-loop,
    /// i.e. it lies on no cycle.
    pub fn is_trivial(&self, graph: &TransitionGraph, component: usize) -> bool {
        match self.components[component][..] {
            [vertex] => !graph.has_self_loop(vertex),
            _ => false,
        }
    }

}

/// Kosaraju's algorithm.
///
/// The first pass records finishing times on `graph`; the second walks the
/// transposed graph, taking roots in decreasing finishing order. Each tree
/// of the second pass is one component.
pub fn kosaraju(graph: &TransitionGraph) -> Sccs {
    let finish = dfs_finish_order(graph);
    let mut order: Vec<Vertex> = (0..graph.len()).collect();
    order.sort_unstable_by(|&a, &b| finish[b].cmp(&finish[a]));

    let transposed = graph.transpose();
    let mut assigned = BitSet::with_capacity(graph.len());
    let mut components = Vec::new();
    let mut mapping = vec![::std::usize::MAX; graph.len()];
    let mut todo = Vec::new();

    for root in order {
        if !assigned.insert(root) {
            continue;
        }
        let index = components.len();
        let mut component = Vec::new();
        todo.push(root);
        while let Some(vertex) = todo.pop() {
            mapping[vertex] = index;
            component.push(vertex);
            for pred in transposed.successors(vertex).iter() {
                if assigned.insert(pred) {
                    todo.push(pred);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }

    Sccs { components, mapping }
}
