//! Named input and output signals of the controller network.

use serde::{Deserialize, Serialize};

/// Sensed values fed into the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputSignal {
    Rotation,
    StoredEnergy,
    VisionFoodAtPosition,
    Constant,
}

impl InputSignal {
    pub const COUNT: usize = 4;

    pub fn all() -> [InputSignal; Self::COUNT] {
        [
            InputSignal::Rotation,
            InputSignal::StoredEnergy,
            InputSignal::VisionFoodAtPosition,
            InputSignal::Constant,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Actions read from the output layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputSignal {
    PositionDelta,
    RotationDelta,
    Eat,
    Mate,
}

impl OutputSignal {
    pub const COUNT: usize = 4;

    pub fn all() -> [OutputSignal; Self::COUNT] {
        [
            OutputSignal::PositionDelta,
            OutputSignal::RotationDelta,
            OutputSignal::Eat,
            OutputSignal::Mate,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Hidden layer size: one neuron per input and output, plus the bias neuron
pub const HIDDEN_COUNT: usize = InputSignal::COUNT + OutputSignal::COUNT + 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_order() {
        for (i, signal) in InputSignal::all().iter().enumerate() {
            assert_eq!(signal.index(), i);
        }
        for (i, signal) in OutputSignal::all().iter().enumerate() {
            assert_eq!(signal.index(), i);
        }
    }

    #[test]
    fn test_hidden_count() {
        assert_eq!(HIDDEN_COUNT, 9);
    }
}
