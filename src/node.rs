/// Position of a node inside the list's arena. The head sentinel always
/// lives at index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    pub(crate) const HEAD: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// `None` marks the end of a level.
pub(crate) type Link = Option<NodeId>;

/// One element of the list together with its successor at every level it
/// occupies. `nexts_[i]` is the next node that also occupies level `i`.
#[derive(Debug, Clone)]
pub(crate) struct SkipListNode<T> {
    nexts_: Vec<Link>,
    value_: Option<T>,
}

impl<T> SkipListNode<T> {
    /// A node holding `value` that occupies levels `0..=level`.
    pub(crate) fn new(value: T, level: usize) -> Self {
        SkipListNode {
            nexts_: vec![None; level + 1],
            value_: Some(value),
        }
    }

    /// A valueless node occupying levels `0..=level`, used for the head.
    pub(crate) fn dummy(level: usize) -> Self {
        SkipListNode {
            nexts_: vec![None; level + 1],
            value_: None,
        }
    }

    /// Placeholder for a released arena slot.
    pub(crate) fn vacant() -> Self {
        SkipListNode {
            nexts_: vec![],
            value_: None,
        }
    }

    pub(crate) fn value(&self) -> Option<&T> {
        self.value_.as_ref()
    }

    pub(crate) fn into_value(self) -> Option<T> {
        self.value_
    }

    /// Highest level index this node occupies.
    pub(crate) fn level(&self) -> usize {
        self.nexts_.len().saturating_sub(1)
    }

    pub(crate) fn next(&self, level: usize) -> Link {
        self.nexts_.get(level).copied().flatten()
    }

    pub(crate) fn set_next(&mut self, level: usize, next: Link) {
        self.nexts_[level] = next;
    }

    pub(crate) fn clear_links(&mut self) {
        for next in self.nexts_.iter_mut() {
            *next = None;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new() {
        let node = SkipListNode::new("a", 3);
        assert_eq!(Some(&"a"), node.value());
        assert_eq!(3, node.level());
        for level in 0..=3 {
            assert_eq!(None, node.next(level));
        }
        // past the tower there is nothing to follow
        assert_eq!(None, node.next(4));
    }

    #[test]
    fn test_dummy() {
        let mut head: SkipListNode<i32> = SkipListNode::dummy(15);
        assert_eq!(None, head.value());
        assert_eq!(15, head.level());

        head.set_next(7, Some(NodeId::new(3)));
        assert_eq!(Some(NodeId::new(3)), head.next(7));
        head.clear_links();
        assert_eq!(None, head.next(7));
    }

    #[test]
    fn test_vacant() {
        let node: SkipListNode<i32> = SkipListNode::vacant();
        assert_eq!(None, node.value());
        assert_eq!(0, node.level());
        assert_eq!(None, node.next(0));
        assert_eq!(None, node.into_value());
    }
}
