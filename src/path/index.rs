use super::parameterization::Domain;

/// An implicit balanced binary tree over the sub-paths of a composite path.
///
/// Every node holds the total weight of the leaves beneath it, once for the
/// length domain and once for the intrinsic domain, where each leaf weighs
/// `1 / count`. The tree has `2 * count - 1` nodes. When the count is not a
/// power of two the last level is only partly filled: the leaves for the
/// final `stragglers` sub-paths sit one level higher, at the start of the
/// leaf row, so that leaves still appear in order from left to right.
#[derive(Clone, Debug)]
pub(crate) struct Parameterizations {
    count: usize,
    leaf_offset: usize,
    stragglers: usize,
    lengths: Vec<f64>,
    intrinsics: Vec<f64>,
}

impl Parameterizations {
    /// Builds the index from the lengths of the sub-paths, of which there
    /// must be at least one.
    pub fn new(lengths: impl IntoIterator<Item = f64>) -> Self {
        let lengths: Vec<f64> = lengths.into_iter().collect();
        let count = lengths.len().max(1);
        let size = 2 * count - 1;
        let leaf_offset = count - 1;
        let pwr = 1 << (usize::BITS - 1 - count.leading_zeros());
        let stragglers = if count == pwr { 0 } else { 2 * pwr - count };

        let mut index = Self {
            count,
            leaf_offset,
            stragglers,
            lengths: vec![0.0; size],
            intrinsics: vec![0.0; size],
        };
        let weight = 1.0 / count as f64;
        for i in 0..count {
            let node = index.leaf(i);
            index.lengths[node] = lengths.get(i).copied().unwrap_or(0.0);
            index.intrinsics[node] = weight;
        }
        for node in (0..leaf_offset).rev() {
            index.lengths[node] = index.lengths[2 * node + 1] + index.lengths[2 * node + 2];
            index.intrinsics[node] = index.intrinsics[2 * node + 1] + index.intrinsics[2 * node + 2];
        }
        index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The total length of the sub-paths.
    pub fn length(&self) -> f64 {
        self.lengths[0]
    }

    fn tree(&self, domain: Domain) -> &[f64] {
        match domain {
            Domain::Intrinsic => &self.intrinsics,
            Domain::Length => &self.lengths,
        }
    }

    /// The node holding the leaf for a sub-path.
    fn leaf(&self, index: usize) -> usize {
        let slot = if index >= self.count - self.stragglers {
            index + self.stragglers - self.count
        } else {
            index + self.stragglers
        };
        self.leaf_offset + slot
    }

    /// The sub-path from the node holding its leaf.
    fn index_of(&self, node: usize) -> usize {
        let slot = node - self.leaf_offset;
        if slot < self.stragglers {
            self.count - self.stragglers + slot
        } else {
            slot - self.stragglers
        }
    }

    /// The extent of a single sub-path in a domain.
    pub fn extent(&self, domain: Domain, index: usize) -> f64 {
        self.tree(domain)[self.leaf(index)]
    }

    /// Finds the sub-path containing a parameter, and the parameter local to
    /// that sub-path in the same domain. Local intrinsic parameters are
    /// rescaled to `[0, 1]`.
    pub fn locate(&self, domain: Domain, p: f64) -> (usize, f64) {
        let tree = self.tree(domain);
        let local = |index: usize, p: f64| match domain {
            Domain::Intrinsic => (p * self.count as f64).clamp(0.0, 1.0),
            Domain::Length => p.clamp(0.0, self.extent(Domain::Length, index)),
        };
        if p <= 0.0 || p.is_nan() {
            return (0, 0.0);
        }
        let total = match domain {
            Domain::Intrinsic => 1.0,
            Domain::Length => tree[0],
        };
        if p >= total {
            let last = self.count - 1;
            let end = match domain {
                Domain::Intrinsic => 1.0,
                Domain::Length => self.extent(domain, last),
            };
            return (last, end);
        }
        let mut p = p;
        let mut node = 0;
        while node < self.leaf_offset {
            node = 2 * node + 1;
            if p > tree[node] {
                p -= tree[node];
                node += 1;
            }
        }
        let index = self.index_of(node);
        (index, local(index, p))
    }

    /// The total extent of the sub-paths before `index`.
    pub fn pre_sum(&self, domain: Domain, index: usize) -> f64 {
        let tree = self.tree(domain);
        let mut node = self.leaf(index);
        let mut sum = 0.0;
        while node > 0 {
            // right children have even indices
            if node % 2 == 0 {
                sum += tree[node - 1];
            }
            node = (node - 1) / 2;
        }
        sum
    }
}
