use std::collections::BTreeMap;

use crate::timeline::track::{Property, Value};

/// The rendering seam: the core computes values, a `Stage` writes them to
/// whatever the host renders with (DOM, canvas, retained scene graph).
///
/// Implementations are plain sinks; they must not feed state back into
/// evaluation.
pub trait Stage {
    /// Write one computed property value to a named element.
    fn apply(&mut self, target: &str, property: Property, value: Value);

    /// Make `index` the single visible frame of the sequence.
    fn show_frame(&mut self, index: usize, id: &str);

    /// Report a stagger item's reveal fraction. The item's derived property
    /// values arrive through [`apply`](Self::apply) against the item's own
    /// target.
    fn reveal(&mut self, stagger_id: &str, index: usize, target: &str, fraction: f64);
}

/// In-memory stage recording the last write per channel, for tests and the
/// CLI's dry runs.
#[derive(Debug, Default)]
pub struct MemoryStage {
    pub properties: BTreeMap<(String, Property), Value>,
    pub frame: Option<(usize, String)>,
    pub reveals: BTreeMap<String, f64>,
}

impl MemoryStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, target: &str, property: Property) -> Option<&Value> {
        self.properties.get(&(target.to_string(), property))
    }
}

impl Stage for MemoryStage {
    fn apply(&mut self, target: &str, property: Property, value: Value) {
        self.properties.insert((target.to_string(), property), value);
    }

    fn show_frame(&mut self, index: usize, id: &str) {
        self.frame = Some((index, id.to_string()));
    }

    fn reveal(&mut self, _stagger_id: &str, _index: usize, target: &str, fraction: f64) {
        self.reveals.insert(target.to_string(), fraction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_stage_keeps_the_last_write() {
        let mut stage = MemoryStage::new();
        stage.apply("header", Property::Opacity, Value::Scalar(0.2));
        stage.apply("header", Property::Opacity, Value::Scalar(0.9));
        assert_eq!(
            stage.property("header", Property::Opacity),
            Some(&Value::Scalar(0.9))
        );

        stage.show_frame(3, "frame-004.jpg");
        assert_eq!(stage.frame.as_ref().unwrap().0, 3);
    }
}
