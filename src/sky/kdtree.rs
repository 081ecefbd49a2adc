use std::cmp::Ordering;

/// Trait for types that can be located in N-dimensional Cartesian space.
pub trait KdPoint<const N: usize> {
    fn point(&self) -> [f64; N];
}

/// Axis-aligned KD-Tree node storing a single item index and optional children.
#[derive(Debug, Clone)]
struct KdNode {
    axis: u8,
    point_index: usize,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct KdTree<T, const N: usize>
where
    T: KdPoint<N>,
{
    items: Vec<T>,
    nodes: Vec<KdNode>,
    root: Option<usize>,
}

impl<T, const N: usize> KdTree<T, N>
where
    T: KdPoint<N>,
{
    pub fn build(items: Vec<T>) -> Self {
        if items.is_empty() || N == 0 {
            return Self {
                items,
                nodes: Vec::new(),
                root: None,
            };
        }

        let mut indices: Vec<usize> = (0..items.len()).collect();
        let mut builder = TreeBuilder::new(&items);
        let root = builder.build_recursive(&mut indices, 0);
        let nodes = builder.nodes;

        Self { items, nodes, root }
    }

    /// Collect indices of all items lying within `radius` of the query point,
    /// in no particular order.
    pub fn radius_search(&self, query_point: [f64; N], radius: f64) -> Vec<usize> {
        // Also rejects a NaN radius.
        if !(radius >= 0.0) {
            return Vec::new();
        }

        let root = match self.root {
            Some(idx) => idx,
            None => return Vec::new(),
        };

        let radius2 = radius * radius;
        let mut hits = Vec::new();
        self.radius_recursive(root, &query_point, radius2, &mut hits);
        hits
    }

    fn radius_recursive(
        &self,
        node_idx: usize,
        query_point: &[f64; N],
        radius2: f64,
        hits: &mut Vec<usize>,
    ) {
        let node = &self.nodes[node_idx];
        let point = self.items[node.point_index].point();
        let dist2 = squared_distance(&point, query_point);
        if dist2 <= radius2 {
            hits.push(node.point_index);
        }

        let axis = node.axis as usize;
        let diff = query_point[axis] - point[axis];

        let (near, far) = if diff <= 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(child) = near {
            self.radius_recursive(child, query_point, radius2, hits);
        }

        if diff * diff <= radius2 {
            if let Some(child) = far {
                self.radius_recursive(child, query_point, radius2, hits);
            }
        }
    }
}

fn squared_distance<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

struct TreeBuilder<'a, T, const N: usize>
where
    T: KdPoint<N>,
{
    items: &'a [T],
    nodes: Vec<KdNode>,
}

impl<'a, T, const N: usize> TreeBuilder<'a, T, N>
where
    T: KdPoint<N>,
{
    fn new(items: &'a [T]) -> Self {
        Self {
            items,
            nodes: Vec::with_capacity(items.len()),
        }
    }

    fn build_recursive(&mut self, indices: &mut [usize], depth: usize) -> Option<usize> {
        if indices.is_empty() {
            return None;
        }

        let axis = (depth % N) as u8;
        indices.sort_unstable_by(|a, b| {
            let lhs = self.items[*a].point()[axis as usize];
            let rhs = self.items[*b].point()[axis as usize];
            lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal)
        });

        let median = indices.len() / 2;
        let (left_slice, rest) = indices.split_at_mut(median);
        let (&mut point_index, right_slice) = rest.split_first_mut()?;

        let node_index = self.nodes.len();
        self.nodes.push(KdNode {
            axis,
            point_index,
            left: None,
            right: None,
        });

        let left = self.build_recursive(left_slice, depth + 1);
        let right = self.build_recursive(right_slice, depth + 1);
        self.nodes[node_index].left = left;
        self.nodes[node_index].right = right;
        Some(node_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct P([f64; 2]);

    impl KdPoint<2> for P {
        fn point(&self) -> [f64; 2] {
            self.0
        }
    }

    #[test]
    fn test_radius_search_matches_brute_force() {
        let items: Vec<P> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.37;
                P([t.sin() * (1.0 + 0.01 * i as f64), (1.7 * t).cos()])
            })
            .collect();
        let expected = |q: [f64; 2], r: f64, items: &[P]| {
            let mut v: Vec<usize> = items
                .iter()
                .enumerate()
                .filter(|(_, p)| squared_distance(&p.0, &q) <= r * r)
                .map(|(i, _)| i)
                .collect();
            v.sort_unstable();
            v
        };
        let queries = [([0.0, 0.0], 0.3), ([1.2, -0.5], 0.5), ([5.0, 5.0], 1.0)];
        let wanted: Vec<Vec<usize>> = queries
            .iter()
            .map(|&(q, r)| expected(q, r, &items))
            .collect();

        let tree = KdTree::build(items);
        for ((q, r), want) in queries.iter().zip(wanted) {
            let mut got = tree.radius_search(*q, *r);
            got.sort_unstable();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn test_empty_and_negative_radius() {
        let tree: KdTree<P, 2> = KdTree::build(Vec::new());
        assert!(tree.radius_search([0.0, 0.0], 1.0).is_empty());
        let tree = KdTree::build(vec![P([0.0, 0.0])]);
        assert_eq!(tree.radius_search([0.0, 0.0], 0.0), vec![0]);
        assert!(tree.radius_search([0.0, 0.0], -1.0).is_empty());
        assert!(tree.radius_search([0.0, 0.0], f64::NAN).is_empty());
    }
}
