//! Label grouping
//!
//! Labels only need equality and hashing; groups are formed by a stable
//! partition so both the first-seen order of labels and the original order
//! of items inside each group survive.
//!
//! `partition_by_label` groups every item.
//! `stable_order` flattens those groups back into one index sequence.
//! `select_per_class` truncates the partition for class summaries.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use tracing::debug;

use crate::error::{VizError, VizResult};

/// Anything usable as a class label.
pub trait Label: Eq + Hash + Clone + Display {}

impl<T: Eq + Hash + Clone + Display> Label for T {}

/// Indices of the items sharing one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGroup<L> {
    pub label: L,
    pub indices: Vec<usize>,
}

impl<L> LabelGroup<L> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Group item indices by label, groups ordered by first occurrence.
pub fn partition_by_label<L: Label>(labels: &[L]) -> Vec<LabelGroup<L>> {
    let mut slot_of: HashMap<&L, usize> = HashMap::new();
    let mut groups: Vec<LabelGroup<L>> = Vec::new();

    for (index, label) in labels.iter().enumerate() {
        let slot = *slot_of.entry(label).or_insert_with(|| {
            groups.push(LabelGroup {
                label: label.clone(),
                indices: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].indices.push(index);
    }

    groups
}

/// Item indices reordered so equal labels are contiguous.
pub fn stable_order<L: Label>(labels: &[L]) -> Vec<usize> {
    partition_by_label(labels)
        .into_iter()
        .flat_map(|group| group.indices)
        .collect()
}

/// Keep the first `num_classes` labels and the first `per_class` items of each.
///
/// Labels beyond `num_classes` are dropped without error.
pub fn select_per_class<L: Label>(
    labels: &[L],
    per_class: usize,
    num_classes: usize,
) -> VizResult<Vec<LabelGroup<L>>> {
    if per_class == 0 {
        return Err(VizError::invalid_argument(
            "num_images_per_class must be at least 1",
        ));
    }
    if num_classes == 0 {
        return Err(VizError::invalid_argument("num_classes must be at least 1"));
    }

    let mut groups = partition_by_label(labels);
    let total_classes = groups.len();
    groups.truncate(num_classes);
    for group in &mut groups {
        group.indices.truncate(per_class);
    }

    debug!(
        "selected {} of {} classes, at most {} items each",
        groups.len(),
        total_classes,
        per_class
    );

    Ok(groups)
}
