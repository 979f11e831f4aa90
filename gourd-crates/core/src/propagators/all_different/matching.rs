//! Domain consistent filtering for all-different, following Régin ("A filtering algorithm for
//! constraints of difference in CSPs", AAAI-94).
//!
//! A maximum matching between variables and values is computed. A value can be taken by a
//! variable iff the edge between them lies in some maximum matching, which holds iff the edge is
//! matched, or both endpoints lie in the same strongly connected component of the residual
//! graph:
//! - variable -> its matched value,
//! - value -> every variable which contains it but is not matched to it,
//! - matched value -> sink, sink -> free value.

use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatusCP;
use crate::containers::HashMap;
use crate::engine::propagation::PropagationContext;
use crate::engine::variables::OffsetView;

pub(super) fn prune_unmatchable_values(
    variables: &[OffsetView],
    context: &mut PropagationContext<'_>,
) -> PropagationStatusCP {
    let num_variables = variables.len();

    let mut values: Vec<i32> = Vec::new();
    let mut value_indices: HashMap<i32, usize> = HashMap::default();
    let mut adjacency: Vec<Vec<usize>> = Vec::with_capacity(num_variables);
    for var in variables {
        let mut neighbours = Vec::with_capacity(context.size(var));
        for value in context.iterate_domain(var) {
            let index = *value_indices.entry(value).or_insert_with(|| {
                values.push(value);
                values.len() - 1
            });
            neighbours.push(index);
        }
        adjacency.push(neighbours);
    }

    let num_values = values.len();
    if num_values < num_variables {
        return Err(EmptyDomain);
    }

    let variable_match = find_maximum_matching(&adjacency, num_values).ok_or(EmptyDomain)?;

    // Nodes: variables, then values, then the sink.
    let sink = num_variables + num_values;
    let mut graph: Vec<Vec<usize>> = vec![Vec::new(); sink + 1];
    let mut is_value_matched = vec![false; num_values];
    for (var, &matched_value) in variable_match.iter().enumerate() {
        graph[var].push(num_variables + matched_value);
        is_value_matched[matched_value] = true;
        for &value in &adjacency[var] {
            if value != matched_value {
                graph[num_variables + value].push(var);
            }
        }
    }
    for (value, &is_matched) in is_value_matched.iter().enumerate() {
        if is_matched {
            graph[num_variables + value].push(sink);
        } else {
            graph[sink].push(num_variables + value);
        }
    }

    let component = strongly_connected_components(&graph);

    for (var, neighbours) in adjacency.iter().enumerate() {
        for &value in neighbours {
            if value != variable_match[var] && component[var] != component[num_variables + value]
            {
                context.remove(&variables[var], values[value])?;
            }
        }
    }

    Ok(())
}

/// Computes a matching which covers every variable, or `None` if no such matching exists. At
/// index `i` of the result is the value matched to variable `i`.
fn find_maximum_matching(adjacency: &[Vec<usize>], num_values: usize) -> Option<Vec<usize>> {
    let mut variable_match: Vec<Option<usize>> = vec![None; adjacency.len()];
    let mut value_match: Vec<Option<usize>> = vec![None; num_values];

    // Greedy initial matching, so that few augmenting paths are needed.
    for (var, neighbours) in adjacency.iter().enumerate() {
        if let Some(&value) = neighbours.iter().find(|&&value| value_match[value].is_none()) {
            variable_match[var] = Some(value);
            value_match[value] = Some(var);
        }
    }

    let mut visited = vec![false; num_values];
    for var in 0..adjacency.len() {
        if variable_match[var].is_some() {
            continue;
        }
        visited.iter_mut().for_each(|is_visited| *is_visited = false);
        if !augment(
            var,
            adjacency,
            &mut variable_match,
            &mut value_match,
            &mut visited,
        ) {
            return None;
        }
    }

    variable_match.into_iter().collect()
}

/// Searches an alternating path from `var` to a free value and flips it.
fn augment(
    var: usize,
    adjacency: &[Vec<usize>],
    variable_match: &mut [Option<usize>],
    value_match: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &value in &adjacency[var] {
        if visited[value] {
            continue;
        }
        visited[value] = true;

        let can_take_value = match value_match[value] {
            None => true,
            Some(other) => augment(other, adjacency, variable_match, value_match, visited),
        };
        if can_take_value {
            variable_match[var] = Some(value);
            value_match[value] = Some(var);
            return true;
        }
    }

    false
}

/// Tarjan's algorithm without recursion. Returns for every node the index of its component.
fn strongly_connected_components(graph: &[Vec<usize>]) -> Vec<usize> {
    const UNVISITED: usize = usize::MAX;

    let num_nodes = graph.len();
    let mut index = vec![UNVISITED; num_nodes];
    let mut low_link = vec![0; num_nodes];
    let mut on_stack = vec![false; num_nodes];
    let mut component = vec![UNVISITED; num_nodes];
    let mut stack = Vec::new();
    // (node, position of the next outgoing edge to explore)
    let mut call_stack: Vec<(usize, usize)> = Vec::new();
    let mut next_index = 0;
    let mut num_components = 0;

    for root in 0..num_nodes {
        if index[root] != UNVISITED {
            continue;
        }

        index[root] = next_index;
        low_link[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        call_stack.push((root, 0));

        while let Some(frame) = call_stack.last_mut() {
            let node = frame.0;

            if let Some(&next) = graph[node].get(frame.1) {
                frame.1 += 1;

                if index[next] == UNVISITED {
                    index[next] = next_index;
                    low_link[next] = next_index;
                    next_index += 1;
                    stack.push(next);
                    on_stack[next] = true;
                    call_stack.push((next, 0));
                } else if on_stack[next] {
                    low_link[node] = low_link[node].min(index[next]);
                }
                continue;
            }

            let _ = call_stack.pop();
            if let Some(&(parent, _)) = call_stack.last() {
                low_link[parent] = low_link[parent].min(low_link[node]);
            }

            if low_link[node] == index[node] {
                while let Some(member) = stack.pop() {
                    on_stack[member] = false;
                    component[member] = num_components;
                    if member == node {
                        break;
                    }
                }
                num_components += 1;
            }
        }
    }

    component
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_covers_all_variables_when_possible() {
        // x0 in {a, b}, x1 in {a}, x2 in {b, c}
        let adjacency = vec![vec![0, 1], vec![0], vec![1, 2]];

        let matching = find_maximum_matching(&adjacency, 3).expect("A matching exists");

        assert_eq!(vec![1, 0, 2], matching);
    }

    #[test]
    fn matching_fails_when_values_are_shared() {
        let adjacency = vec![vec![0, 1], vec![0, 1], vec![1, 0]];

        assert!(find_maximum_matching(&adjacency, 2).is_none());
    }

    #[test]
    fn cycle_forms_a_single_component() {
        let graph = vec![vec![1], vec![2], vec![0], vec![0]];

        let component = strongly_connected_components(&graph);

        assert_eq!(component[0], component[1]);
        assert_eq!(component[1], component[2]);
        assert_ne!(component[0], component[3]);
    }

    #[test]
    fn chain_has_a_component_per_node() {
        let graph = vec![vec![1], vec![2], vec![]];

        let component = strongly_connected_components(&graph);

        assert_ne!(component[0], component[1]);
        assert_ne!(component[1], component[2]);
        assert_ne!(component[0], component[2]);
    }
}
