//! Values exchanged between a creature and its controller.

use crate::signals::{InputSignal, OutputSignal};
use serde::{Deserialize, Serialize};

/// Sensor data sampled from the creature right before it thinks
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Heading in degrees
    pub rotation: f32,
    pub stored_energy: f32,
    /// Food available on the tile under the creature
    pub vision_food: f32,
}

impl SensorSnapshot {
    pub fn value(&self, signal: InputSignal) -> f32 {
        match signal {
            InputSignal::Rotation => self.rotation,
            InputSignal::StoredEnergy => self.stored_energy,
            InputSignal::VisionFoodAtPosition => self.vision_food,
            InputSignal::Constant => 1.0,
        }
    }
}

/// Output layer values after an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Outputs {
    values: [f32; OutputSignal::COUNT],
}

impl Outputs {
    pub fn new(position_delta: f32, rotation_delta: f32, eat: f32, mate: f32) -> Self {
        Self {
            values: [position_delta, rotation_delta, eat, mate],
        }
    }

    pub fn get(&self, signal: OutputSignal) -> f32 {
        self.values[signal.index()]
    }

    pub fn set(&mut self, signal: OutputSignal, value: f32) {
        self.values[signal.index()] = value;
    }

    pub fn position_delta(&self) -> f32 {
        self.get(OutputSignal::PositionDelta)
    }

    pub fn rotation_delta(&self) -> f32 {
        self.get(OutputSignal::RotationDelta)
    }

    pub fn eat(&self) -> f32 {
        self.get(OutputSignal::Eat)
    }

    pub fn mate(&self) -> f32 {
        self.get(OutputSignal::Mate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_input_is_one() {
        let snapshot = SensorSnapshot::default();
        assert_eq!(snapshot.value(InputSignal::Constant), 1.0);
    }

    #[test]
    fn test_outputs_accessors() {
        let mut outputs = Outputs::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(outputs.position_delta(), 1.0);
        assert_eq!(outputs.rotation_delta(), 2.0);
        assert_eq!(outputs.eat(), 3.0);
        assert_eq!(outputs.mate(), 4.0);

        outputs.set(OutputSignal::Mate, 6.0);
        assert_eq!(outputs.get(OutputSignal::Mate), 6.0);
    }
}
