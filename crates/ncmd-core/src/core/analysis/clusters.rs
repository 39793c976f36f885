use crate::core::models::partition::ComponentPartition;

/// Reports the particle count of every component, in partition order.
///
/// An empty partition yields an empty report; unlike aggregation, "no clusters" is a
/// valid answer here.
pub fn cluster_sizes(partition: &ComponentPartition) -> Vec<usize> {
    partition
        .components()
        .map(|(_, component)| component.len())
        .collect()
}
