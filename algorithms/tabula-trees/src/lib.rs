//!
//! # Decision tree learning
//! `tabula-trees` provides an ID3 decision tree learner for categorical attributes.
//!
//! # The big picture
//!
//! `tabula-trees` is a crate in the `tabula` toolkit, a set of classical classifiers for
//! tabular data with mixed numeric and categorical attributes.
//!
//! Decision Trees (DTs) are a non-parametric supervised learning method. The goal is to create
//! a model that predicts the value of a target attribute by learning simple decision rules
//! inferred from the remaining attributes.
//!
//! # Current state
//!
//! `tabula-trees` provides an [implementation](DecisionTree) of ID3: every split node tests a
//! single discrete attribute and has one child per value of its domain. The attribute with the
//! highest information gain is chosen. Growth stops early at a maximum depth or when a node holds
//! too few instances.
//!

mod decision_trees;

pub use decision_trees::*;
pub use tabula::error::Result;
