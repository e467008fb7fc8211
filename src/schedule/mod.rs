use dto::class_offering::ClassOffering;

/// Whether the candidate class overlaps any of the given classes
/// on at least one shared weekday.
pub(crate) fn conflicts_with_any(candidate: &ClassOffering, existing: &[ClassOffering]) -> bool {
    existing.iter().any(|offering| overlaps(candidate, offering))
}

/// Half-open interval overlap, gated on a shared weekday.
/// A class ending exactly when another starts doesn't conflict.
/// An offering claiming no weekday (e.g. a malformed legacy pattern,
/// already reported when the row was read) can't conflict with anything.
fn overlaps(first: &ClassOffering, second: &ClassOffering) -> bool {
    first.weekdays().intersects(second.weekdays())
        && first.start_time() < second.end_time()
        && second.start_time() < first.end_time()
}
