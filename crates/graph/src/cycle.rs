use crate::types::DependencyGraph;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::NodeIndex;
use std::collections::BTreeSet;

/// Cycles listed for one strongly connected component before the search
/// stops early.
pub const MAX_CYCLES_PER_COMPONENT: usize = 1_000;

/// Edge visits spent searching one component.
const MAX_STEPS_PER_COMPONENT: usize = 200_000;

impl DependencyGraph {
    /// Elementary import cycles of two or more files.
    ///
    /// Each cycle starts at its lexicographically smallest path and keeps
    /// import order; every distinct cycle is reported once and the list is
    /// sorted. Mutual imports are always reported; longer cycles are listed
    /// up to [`MAX_CYCLES_PER_COMPONENT`] per strongly connected component.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let node_count = self.graph.node_count();

        // Neighbors in path order so traversal does not depend on insertion.
        let adjacency: Vec<Vec<NodeIndex>> = self
            .graph
            .node_indices()
            .map(|idx| {
                let mut next: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
                next.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
                next.dedup();
                next
            })
            .collect();

        let mut rank: Vec<Option<usize>> = vec![None; node_count];
        let mut found: BTreeSet<Vec<String>> = BTreeSet::new();

        for mut members in kosaraju_scc(&self.graph) {
            if members.len() < 2 {
                continue;
            }
            members.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
            for (pos, node) in members.iter().enumerate() {
                rank[node.index()] = Some(pos);
            }

            self.mutual_imports(&members, &adjacency, &rank, &mut found);
            self.component_cycles(&members, &adjacency, &rank, &mut found);

            for node in &members {
                rank[node.index()] = None;
            }
        }

        let cycles: Vec<Vec<String>> = found.into_iter().collect();
        log::info!("Found {} import cycle(s) among {} files", cycles.len(), node_count);
        cycles
    }

    fn mutual_imports(
        &self,
        members: &[NodeIndex],
        adjacency: &[Vec<NodeIndex>],
        rank: &[Option<usize>],
        found: &mut BTreeSet<Vec<String>>,
    ) {
        for &from in members {
            for &to in &adjacency[from.index()] {
                let forward = rank[to.index()] > rank[from.index()];
                if forward && adjacency[to.index()].contains(&from) {
                    found.insert(self.paths(&[from, to]));
                }
            }
        }
    }

    /// Lists the cycles of one component. Each search starts at a member and
    /// only walks members ranked above it, so a cycle is found exactly once,
    /// from its smallest path.
    fn component_cycles(
        &self,
        members: &[NodeIndex],
        adjacency: &[Vec<NodeIndex>],
        rank: &[Option<usize>],
        found: &mut BTreeSet<Vec<String>>,
    ) {
        let mut on_path = vec![false; members.len()];
        let mut listed = 0usize;
        let mut steps = 0usize;

        for (start_rank, &start) in members.iter().enumerate() {
            // (node, next neighbor to try)
            let mut stack: Vec<(NodeIndex, usize)> = vec![(start, 0)];
            on_path[start_rank] = true;

            while let Some(top) = stack.last_mut() {
                let (node, pos) = *top;
                let Some(&next) = adjacency[node.index()].get(pos) else {
                    if let Some(r) = rank[node.index()] {
                        on_path[r] = false;
                    }
                    stack.pop();
                    continue;
                };
                top.1 += 1;

                steps += 1;
                if steps > MAX_STEPS_PER_COMPONENT || listed >= MAX_CYCLES_PER_COMPONENT {
                    log::warn!(
                        "Stopped listing cycles in a component of {} files after {} cycle(s)",
                        members.len(),
                        listed
                    );
                    return;
                }

                let Some(next_rank) = rank[next.index()] else {
                    continue;
                };
                if next == start {
                    let path: Vec<NodeIndex> = stack.iter().map(|(n, _)| *n).collect();
                    if found.insert(self.paths(&path)) {
                        listed += 1;
                    }
                } else if next_rank > start_rank && !on_path[next_rank] {
                    on_path[next_rank] = true;
                    stack.push((next, 0));
                }
            }
        }
    }

    fn paths(&self, nodes: &[NodeIndex]) -> Vec<String> {
        let cycle = nodes
            .iter()
            .filter_map(|idx| self.path(*idx).map(str::to_string))
            .collect();
        normalize_cycle(cycle)
    }
}

/// Rotate a cycle so its smallest path comes first, keeping direction.
pub fn normalize_cycle(mut cycle: Vec<String>) -> Vec<String> {
    if let Some(min_pos) = cycle
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
    {
        cycle.rotate_left(min_pos);
    }
    cycle
}
