use models::ServiceListing;

/// Merge override records into `base`, keyed by id.
///
/// A record whose id already exists replaces it in place; any other record is
/// appended in override order. Nothing is ever removed, so applying the same
/// overrides twice gives the same result as applying them once.
pub fn reconcile(mut base: Vec<ServiceListing>, overrides: &[ServiceListing]) -> Vec<ServiceListing> {
    for record in overrides {
        match base.iter_mut().find(|l| l.id == record.id) {
            Some(slot) => *slot = record.clone(),
            None => base.push(record.clone()),
        }
    }
    base
}
