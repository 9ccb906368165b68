//! Disjoint-set forest over a flat arena.
//!
//! Union by rank with full path compression gives amortised near-constant
//! `find`/`union`, so fusing `M` correspondences over `N` features is
//! effectively `O(N + M)`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Node {
    parent: usize,
    rank: u8,
}

#[derive(Clone, Debug, Default)]
pub struct DisjointSet {
    nodes: Vec<Node>,
}

impl DisjointSet {
    /// Create `n` singleton sets `{0}, {1}, …, {n-1}`.
    pub fn new(n: usize) -> Self {
        Self {
            nodes: (0..n).map(|parent| Node { parent, rank: 0 }).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Representative of `x`, compressing the traversed path onto the root.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.nodes[root].parent != root {
            root = self.nodes[root].parent;
        }
        let mut cur = x;
        while cur != root {
            let next = self.nodes[cur].parent;
            self.nodes[cur].parent = root;
            cur = next;
        }
        root
    }

    /// Representative of `x` without touching the forest.
    pub fn find_immutable(&self, x: usize) -> usize {
        let mut root = x;
        while self.nodes[root].parent != root {
            root = self.nodes[root].parent;
        }
        root
    }

    /// Merge the sets of `a` and `b`. Returns `false` if already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (big, small) = if self.nodes[ra].rank >= self.nodes[rb].rank {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.nodes[small].parent = big;
        if self.nodes[big].rank == self.nodes[small].rank {
            self.nodes[big].rank = self.nodes[big].rank.saturating_add(1);
        }
        true
    }

    /// Number of disjoint sets.
    pub fn class_count(&self) -> usize {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(idx, node)| node.parent == *idx)
            .count()
    }

    /// Members of every set, each sorted ascending; sets ordered by their
    /// smallest member.
    pub fn classes(&mut self) -> Vec<Vec<usize>> {
        let n = self.nodes.len();
        let mut slot_of_root = vec![usize::MAX; n];
        let mut classes: Vec<Vec<usize>> = Vec::new();
        for x in 0..n {
            let root = self.find(x);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = classes.len();
                classes.push(Vec::new());
            }
            classes[slot_of_root[root]].push(x);
        }
        classes
    }
}
