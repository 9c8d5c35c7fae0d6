use std::iter::FromIterator;

/// Counted labels in first-seen order
///
/// Keeps the order in which labels were first encountered, so that the majority label is
/// resolved deterministically: if two labels have the same count the one counted first wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelCounts<'a> {
    counts: Vec<(&'a str, usize)>,
}

impl<'a> LabelCounts<'a> {
    pub fn new() -> Self {
        LabelCounts { counts: Vec::new() }
    }

    /// Counts labels of the instances at `indices`, skipping missing labels
    pub fn from_indices(labels: &'a [Option<String>], indices: &[usize]) -> Self {
        indices
            .iter()
            .filter_map(|idx| labels[*idx].as_deref())
            .collect()
    }

    pub fn add(&mut self, label: &'a str) {
        match self.counts.iter_mut().find(|(x, _)| *x == label) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((label, 1)),
        }
    }

    /// Returns the count of a label, zero if it was never counted
    pub fn get(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|(x, _)| *x == label)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Total number of counted labels
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Finds the most frequent label. If two labels have the same count then the label
    /// encountered first is returned.
    pub fn majority(&self) -> Option<&'a str> {
        self.counts
            .iter()
            .fold(None, |acc: Option<(&'a str, usize)>, &(label, count)| match acc {
                Some((_, best)) if best >= count => acc,
                _ => Some((label, count)),
            })
            .map(|(label, _)| label)
    }
}

impl<'a> FromIterator<&'a str> for LabelCounts<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = LabelCounts::new();
        for label in iter {
            counts.add(label);
        }

        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_of_labels() {
        let counts: LabelCounts = vec!["b", "a", "a", "c", "a"].into_iter().collect();

        assert_eq!(counts.majority(), Some("a"));
        assert_eq!(counts.get("a"), 3);
        assert_eq!(counts.get("d"), 0);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn ties_go_to_first_encountered_label() {
        let counts: LabelCounts = vec!["yes", "no", "no", "yes"].into_iter().collect();
        assert_eq!(counts.majority(), Some("yes"));

        let counts: LabelCounts = vec!["no", "yes", "yes", "no"].into_iter().collect();
        assert_eq!(counts.majority(), Some("no"));
    }

    #[test]
    fn no_majority_without_labels() {
        assert_eq!(LabelCounts::new().majority(), None);
    }

    #[test]
    fn counting_skips_missing_labels() {
        let labels = vec![Some("a".to_string()), None, Some("b".to_string()), Some("b".to_string())];
        let counts = LabelCounts::from_indices(&labels, &[0, 1, 2]);

        assert_eq!(counts.total(), 2);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("a", 1), ("b", 1)]);
    }
}
