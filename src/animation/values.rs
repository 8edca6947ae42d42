//! Per-attribute value table produced for one window each frame.

use super::attribute::Attribute;
use super::value::FPx2;

/// Current animated value of each attribute on a window.
///
/// Indexed by [`Attribute::index`]; attributes with no active animation are
/// absent and the paint step keeps the window's own value for them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttributeValues {
    slots: [Option<FPx2>; Attribute::COUNT],
}

impl AttributeValues {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `attribute`, if animated.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> Option<FPx2> {
        self.slots[attribute.index()]
    }

    /// Value of `attribute`, or its neutral value if not animated.
    #[must_use]
    pub fn get_or_neutral(&self, attribute: Attribute) -> FPx2 {
        self.get(attribute).unwrap_or_else(|| attribute.neutral())
    }

    /// Set `attribute`, replacing any earlier value.
    pub fn set(&mut self, attribute: Attribute, value: FPx2) {
        self.slots[attribute.index()] = Some(value);
    }

    /// Whether `attribute` has a value.
    #[must_use]
    pub fn contains(&self, attribute: Attribute) -> bool {
        self.slots[attribute.index()].is_some()
    }

    /// Number of animated attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no attribute is animated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Animated attributes and their values, in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, FPx2)> + '_ {
        Attribute::ALL
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(attribute, slot)| slot.map(|v| (*attribute, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_previous_value() {
        let mut values = AttributeValues::new();
        values.set(Attribute::Opacity, FPx2::splat(0.2));
        values.set(Attribute::Opacity, FPx2::splat(0.9));
        assert_eq!(values.get(Attribute::Opacity), Some(FPx2::splat(0.9)));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn missing_attributes_fall_back_to_neutral() {
        let values = AttributeValues::new();
        assert!(values.is_empty());
        assert_eq!(values.get(Attribute::Scale), None);
        assert_eq!(values.get_or_neutral(Attribute::Scale), FPx2::splat(1.0));
    }

    #[test]
    fn iter_yields_in_attribute_order() {
        let mut values = AttributeValues::new();
        values.set(Attribute::Clip, FPx2::splat(0.5));
        values.set(Attribute::Brightness, FPx2::splat(0.8));
        let attrs: Vec<Attribute> = values.iter().map(|(a, _)| a).collect();
        assert_eq!(attrs, vec![Attribute::Brightness, Attribute::Clip]);
        assert!(values.contains(Attribute::Clip));
    }
}
