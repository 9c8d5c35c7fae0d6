use std::fmt;

use tabula::Float;

use super::{DecisionTree, TreeNode};

/// Struct to print a fitted decision tree as indented text
///
/// Every split node prints the attribute it tests followed by one block per branch, leaves print
/// their prediction. The children of a branch are indented by `indent` spaces.
///
/// ```text
/// Split on outlook
/// If outlook = sunny:
///   Split on humidity
///   If humidity = high:
///     Predict: no
/// ```
pub struct TextExport<'a, F> {
    tree: &'a DecisionTree<F>,
    indent: usize,
    with_gain: bool,
}

impl<'a, F: Float> TextExport<'a, F> {
    /// Creates a new export for the tree with the following default parameters:
    ///
    /// * `indent=2`
    /// * `with_gain=false`
    pub fn new(tree: &'a DecisionTree<F>) -> Self {
        TextExport {
            tree,
            indent: 2,
            with_gain: false,
        }
    }

    /// Number of spaces added per level
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Appends the information gain to every split line
    pub fn with_gain(mut self, with_gain: bool) -> Self {
        self.with_gain = with_gain;
        self
    }

    fn format_node(&self, f: &mut fmt::Formatter, node: &TreeNode<F>, level: usize) -> fmt::Result {
        let pad = level * self.indent;

        match node {
            TreeNode::Leaf { prediction, .. } => {
                writeln!(f, "{:pad$}Predict: {}", "", prediction, pad = pad)
            }
            TreeNode::Split {
                feature_name,
                information_gain,
                children,
                ..
            } => {
                if self.with_gain {
                    writeln!(
                        f,
                        "{:pad$}Split on {} (gain {:.4})",
                        "",
                        feature_name,
                        information_gain,
                        pad = pad
                    )?;
                } else {
                    writeln!(f, "{:pad$}Split on {}", "", feature_name, pad = pad)?;
                }

                for (value, child) in children {
                    writeln!(f, "{:pad$}If {} = {}:", "", feature_name, value, pad = pad)?;
                    self.format_node(f, child, level + 1)?;
                }

                Ok(())
            }
        }
    }
}

impl<F: Float> fmt::Display for TextExport<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.format_node(f, self.tree.root_node(), 0)
    }
}
