use std::collections::VecDeque;
use std::iter::Iterator;

use super::TreeNode;

/// Level-order (BFT) iterator of nodes in a decision tree
pub struct NodeIter<'a, F> {
    queue: VecDeque<&'a TreeNode<F>>,
}

impl<'a, F> NodeIter<'a, F> {
    pub fn new(queue: VecDeque<&'a TreeNode<F>>) -> Self {
        NodeIter { queue }
    }
}

impl<'a, F> Iterator for NodeIter<'a, F> {
    type Item = &'a TreeNode<F>;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|node| {
            if let TreeNode::Split { children, .. } = node {
                children
                    .iter()
                    .for_each(|(_, child)| self.queue.push_back(child));
            }

            node
        })
    }
}
