use crate::animation::segment::{Property, Segment, Target};

/// Every segment animating one `(target, property)` pair, ordered by start.
///
/// Sampling is a pure function of the scroll position, so seeking backward is the same
/// operation as seeking forward.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    target: Target,
    property: Property,
    segments: Vec<Segment>, // sorted by start, ties keep schedule order
}

impl Track {
    pub(crate) fn new(target: Target, property: Property) -> Self {
        Self {
            target,
            property,
            segments: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        debug_assert!(segment.target == self.target && segment.property == self.property);
        let idx = self.segments.partition_point(|s| s.start <= segment.start);
        self.segments.insert(idx, segment);
    }

    /// Animated element.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Animated property.
    pub fn property(&self) -> Property {
        self.property
    }

    /// Segments in start order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Value at global scroll position `p`.
    ///
    /// Before the first segment the track rests at that segment's `from`; afterwards the most
    /// recently started segment decides the value.
    pub fn sample(&self, p: f64) -> Option<f64> {
        let first = self.segments.first()?;
        let idx = self.segments.partition_point(|s| s.start <= p);
        if idx == 0 {
            return Some(first.from);
        }
        Some(self.segments[idx - 1].value_at(p))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
