use std::collections::HashSet;

use log::{debug, trace, warn};
use tabula::{
    dataset::{Dataset, Float, Instance, LabelCounts},
    error::{Error, Result},
    traits::*,
};

use super::NodeIter;
use super::TextExport;
use crate::DecisionTreeValidParams;

/// A node in the decision tree
///
/// Split nodes own one child per value of the domain of their attribute, in domain order.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode<F> {
    Leaf {
        prediction: String,
        depth: usize,
    },
    Split {
        feature_name: String,
        information_gain: F,
        /// Majority class of the instances which reached this node
        prediction: String,
        depth: usize,
        children: Vec<(String, TreeNode<F>)>,
    },
}

impl<F: Float> TreeNode<F> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Depth of this node, the root has depth zero
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { depth, .. } | TreeNode::Split { depth, .. } => *depth,
        }
    }

    /// Label of a leaf, or the majority label of a split node
    pub fn prediction(&self) -> &str {
        match self {
            TreeNode::Leaf { prediction, .. } | TreeNode::Split { prediction, .. } => {
                prediction.as_str()
            }
        }
    }

    /// Name of the attribute a split node tests, `None` for leaves
    pub fn feature_name(&self) -> Option<&str> {
        match self {
            TreeNode::Split { feature_name, .. } => Some(feature_name.as_str()),
            TreeNode::Leaf { .. } => None,
        }
    }

    pub fn information_gain(&self) -> Option<F> {
        match self {
            TreeNode::Split {
                information_gain, ..
            } => Some(*information_gain),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Branches of a split node, empty for leaves
    pub fn children(&self) -> &[(String, TreeNode<F>)] {
        match self {
            TreeNode::Split { children, .. } => children,
            TreeNode::Leaf { .. } => &[],
        }
    }

    /// Returns the branch taken for `value`
    pub fn child(&self, value: &str) -> Option<&TreeNode<F>> {
        self.children()
            .iter()
            .find(|(x, _)| x == value)
            .map(|(_, node)| node)
    }
}

/// A fitted decision tree model for classification.
///
/// ### Structure
/// A decision tree structure is a tree where each split node tests a discrete attribute and
/// owns one branch per value of the attribute's domain. The leaves hold the predicted class.
///
/// ### Algorithm
/// Starting with a single root node, decision trees are trained recursively by applying the
/// following rule to every node considered:
///
/// * Stop with a leaf if the node is at the maximum depth, holds fewer than `min_samples`
///   instances, has no attributes left to test or all of its instances share one class
/// * Otherwise find the attribute with the highest information gain. Attributes are considered
///   in declaration order and the first one wins ties
/// * Stop with a leaf if the highest gain is not positive, otherwise split the instances by the
///   values of the attribute and recurse on every non-empty part with the attribute removed.
///   Values no instance takes get a leaf with the majority class of the node
///
/// ### Predictions
/// Predictions descend from the root following the branch of the instance's value. If the
/// instance has no branch to take, because the value is missing or was unseen, the majority
/// class of the whole training set is predicted.
///
/// ### Example
///
/// ```rust
/// use tabula::prelude::*;
/// use tabula_trees::DecisionTree;
///
/// let dataset = tabula_datasets::weather_nominal();
/// let tree = DecisionTree::params("play").fit(&dataset).unwrap();
///
/// assert_eq!(tree.root_node().feature_name(), Some("outlook"));
///
/// let day = Instance::new().with("outlook", "overcast");
/// assert_eq!(tree.predict(&day), "yes");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree<F> {
    root_node: TreeNode<F>,
    target: String,
    feature_names: Vec<String>,
    fallback: String,
}

impl<F: Float> Predict<F> for DecisionTree<F> {
    fn predict(&self, instance: &Instance<F>) -> String {
        make_prediction(instance, &self.root_node)
            .unwrap_or(self.fallback.as_str())
            .to_string()
    }
}

impl<F: Float> Fit<F, Error> for DecisionTreeValidParams<F> {
    type Object = DecisionTree<F>;

    /// Fit a decision tree using `hyperparamters` on the dataset. Every attribute except the
    /// target has to be discrete.
    fn fit(&self, dataset: &Dataset<F>) -> Result<Self::Object> {
        let targets = dataset.targets(self.target())?;

        let features = dataset
            .feature_indices(self.target())
            .into_iter()
            .map(|idx| {
                let attribute = &dataset.attributes()[idx];
                dataset
                    .column(idx)
                    .as_discrete()
                    .map(|column| Feature {
                        name: attribute.name(),
                        domain: dataset.domain_at(idx).unwrap_or(&[]),
                        column,
                    })
                    .ok_or_else(|| Error::NumericAttribute(attribute.name().to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let indices = (0..dataset.nsamples())
            .filter(|idx| targets[*idx].is_some())
            .collect::<Vec<_>>();

        if indices.len() < dataset.nsamples() {
            warn!(
                "ignoring {} instances without a value for target {}",
                dataset.nsamples() - indices.len(),
                self.target()
            );
        }

        let fallback = LabelCounts::from_indices(targets, &indices)
            .majority()
            .ok_or(Error::NotEnoughSamples)?
            .to_string();

        let builder = Id3 {
            params: self,
            targets,
            features: &features,
        };
        let available = (0..features.len()).collect::<Vec<_>>();
        let root_node = builder.build_tree(&indices, &available, 0);

        let tree = DecisionTree {
            root_node,
            target: self.target().to_string(),
            feature_names: features.iter().map(|x| x.name.to_string()).collect(),
            fallback,
        };

        debug!(
            "fitted decision tree on {} instances with depth {} and {} leaves",
            indices.len(),
            tree.max_depth(),
            tree.num_leaves()
        );

        Ok(tree)
    }
}

impl<F: Float> DecisionTree<F> {
    /// Create a node iterator in level-order (BFT)
    pub fn iter_nodes(&self) -> NodeIter<F> {
        // queue of nodes yet to explore
        let queue = vec![&self.root_node].into();

        NodeIter::new(queue)
    }

    /// Return the names of the attributes used for splitting, in level-order of first use
    pub fn features(&self) -> Vec<&str> {
        let mut seen = HashSet::new();

        self.iter_nodes()
            .filter_map(|node| node.feature_name())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Names of all attributes the tree was trained on, in declaration order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Name of the predicted attribute
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Class predicted when the tree has no branch for an instance
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Return the mean information gain for each feature, aligned with `feature_names`
    pub fn mean_information_gain(&self) -> Vec<F> {
        let mut gain = vec![F::zero(); self.feature_names.len()];
        let mut num_nodes = vec![0; self.feature_names.len()];

        for node in self.iter_nodes() {
            if let (Some(name), Some(node_gain)) = (node.feature_name(), node.information_gain()) {
                if let Some(idx) = self.feature_names.iter().position(|x| x == name) {
                    gain[idx] += node_gain;
                    num_nodes[idx] += 1;
                }
            }
        }

        gain.into_iter()
            .zip(num_nodes.into_iter())
            .map(|(val, n)| if n == 0 { F::zero() } else { val / F::cast(n) })
            .collect()
    }

    /// Return the feature importance, i.e. the relative mean information gain, for each feature
    ///
    /// A tree without any split has zero importance for every feature.
    pub fn feature_importance(&self) -> Vec<F> {
        let mean_gain = self.mean_information_gain();
        let sum: F = mean_gain.iter().cloned().sum();

        if sum <= F::zero() {
            return mean_gain;
        }

        mean_gain.into_iter().map(|x| x / sum).collect()
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode<F> {
        &self.root_node
    }

    /// Return max depth of the tree
    pub fn max_depth(&self) -> usize {
        self.iter_nodes()
            .fold(0, |max, node| usize::max(max, node.depth()))
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }

    /// Generates a [`TextExport`](struct.TextExport.html) structure to print the fitted tree as
    /// indented text, one line per test and per leaf
    pub fn export_text(&self) -> TextExport<F> {
        TextExport::new(self)
    }
}

/// Classify an instance recursively using the tree node `node`, `None` if no branch matches
fn make_prediction<'a, F: Float>(instance: &Instance<F>, node: &'a TreeNode<F>) -> Option<&'a str> {
    match node {
        TreeNode::Leaf { prediction, .. } => Some(prediction.as_str()),
        TreeNode::Split { feature_name, .. } => {
            let value = instance.discrete(feature_name)?;
            make_prediction(instance, node.child(value)?)
        }
    }
}

/// Given the class frequencies calculates the entropy of the subset in bits.
fn entropy<F: Float>(class_freq: &LabelCounts) -> F {
    let n_samples = class_freq.total();
    if n_samples == 0 {
        return F::zero();
    }
    let n_samples = F::cast(n_samples);

    class_freq
        .iter()
        .map(|(_, count)| F::cast(count) / n_samples)
        .map(|x| if x > F::zero() { -x * x.log2() } else { F::zero() })
        .sum()
}

/// A discrete attribute considered for splitting
struct Feature<'a> {
    name: &'a str,
    domain: &'a [String],
    column: &'a [Option<String>],
}

impl<'a> Feature<'a> {
    /// Groups `indices` by the value of this attribute, missing values form their own group
    fn partition(&self, indices: &[usize]) -> Vec<(Option<&'a str>, Vec<usize>)> {
        let mut groups: Vec<(Option<&'a str>, Vec<usize>)> = Vec::new();

        for idx in indices {
            let value = self.column[*idx].as_deref();
            match groups.iter_mut().find(|(x, _)| *x == value) {
                Some((_, group)) => group.push(*idx),
                None => groups.push((value, vec![*idx])),
            }
        }

        groups
    }
}

/// Recursive tree induction over a borrowed training set
struct Id3<'a, F> {
    params: &'a DecisionTreeValidParams<F>,
    targets: &'a [Option<String>],
    features: &'a [Feature<'a>],
}

impl<'a, F: Float> Id3<'a, F> {
    fn class_freq(&self, indices: &[usize]) -> LabelCounts<'a> {
        LabelCounts::from_indices(self.targets, indices)
    }

    /// Entropy of the parent minus the size weighted entropy of every part of the partition
    fn information_gain(&self, indices: &[usize], feature: &Feature) -> F {
        let n_samples = F::cast(indices.len());
        let parent = entropy::<F>(&self.class_freq(indices));

        let children = feature
            .partition(indices)
            .iter()
            .map(|(_, group)| {
                F::cast(group.len()) / n_samples * entropy::<F>(&self.class_freq(group))
            })
            .sum::<F>();

        parent - children
    }

    fn build_tree(&self, indices: &[usize], available: &[usize], depth: usize) -> TreeNode<F> {
        let class_freq = self.class_freq(indices);
        let prediction = class_freq.majority().unwrap_or_default().to_string();

        if depth >= self.params.max_depth()
            || indices.len() < self.params.min_samples()
            || available.is_empty()
            || class_freq.len() <= 1
        {
            trace!(
                "leaf {} at depth {} with {} instances",
                prediction,
                depth,
                indices.len()
            );
            return TreeNode::Leaf { prediction, depth };
        }

        let best = available
            .iter()
            .map(|pos| (*pos, self.information_gain(indices, &self.features[*pos])))
            .fold(None, |acc: Option<(usize, F)>, (pos, gain)| match acc {
                Some((_, best_gain)) if best_gain >= gain => acc,
                _ => Some((pos, gain)),
            });

        let (best_pos, information_gain) = match best {
            Some((pos, gain)) if gain > F::zero() => (pos, gain),
            _ => {
                trace!("no informative attribute left at depth {}", depth);
                return TreeNode::Leaf { prediction, depth };
            }
        };

        let feature = &self.features[best_pos];
        trace!(
            "split on {} at depth {} with gain {}",
            feature.name,
            depth,
            information_gain
        );

        let remaining = available
            .iter()
            .copied()
            .filter(|pos| *pos != best_pos)
            .collect::<Vec<_>>();

        let children = feature
            .domain
            .iter()
            .map(|value| {
                let subset = indices
                    .iter()
                    .copied()
                    .filter(|idx| feature.column[*idx].as_deref() == Some(value.as_str()))
                    .collect::<Vec<_>>();

                let child = if subset.is_empty() {
                    TreeNode::Leaf {
                        prediction: prediction.clone(),
                        depth: depth + 1,
                    }
                } else {
                    self.build_tree(&subset, &remaining, depth + 1)
                };

                (value.clone(), child)
            })
            .collect();

        TreeNode::Split {
            feature_name: feature.name.to_string(),
            information_gain,
            prediction,
            depth,
            children,
        }
    }
}
