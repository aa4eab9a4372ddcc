//! Fixed-topology feed-forward controller driving a creature.
//!
//! The network has three layers:
//! - an input layer of named, unweighted neurons (see [`InputSignal`])
//! - a hidden layer of [`HIDDEN_COUNT`] axons, the last of which is a bias
//!   neuron with weight fixed at 1
//! - an output layer of named axons (see [`OutputSignal`])
//!
//! Every axon carries a single weight that is applied uniformly to all of its
//! incoming connections. Weights are drawn once at construction and never
//! change afterwards.

pub mod context;
pub mod signals;

pub use context::{Outputs, SensorSnapshot};
pub use signals::{InputSignal, OutputSignal, HIDDEN_COUNT};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unweighted input neuron
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Neuron {
    pub value: f32,
}

/// Weighted neuron used in the hidden and output layers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Axon {
    pub value: f32,
    weight: f32,
}

impl Axon {
    fn with_weight(weight: f32) -> Self {
        Self { value: 0.0, weight }
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }
}

const BIAS_WEIGHT: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    inputs: [Neuron; InputSignal::COUNT],
    hidden: [Axon; HIDDEN_COUNT],
    outputs: [Axon; OutputSignal::COUNT],
}

impl Controller {
    /// Build a controller with weights drawn uniformly from `[0, 1)`.
    ///
    /// The stored-energy and constant inputs are pre-seeded so the network
    /// holds sensible values before its first evaluation.
    pub fn random<R: Rng>(rng: &mut R, initial_energy: f32) -> Self {
        let mut output_weights = [0.0; OutputSignal::COUNT];
        for weight in &mut output_weights {
            *weight = rng.gen::<f32>();
        }

        let mut hidden_weights = [0.0; HIDDEN_COUNT - 1];
        for weight in &mut hidden_weights {
            *weight = rng.gen::<f32>();
        }

        let mut controller = Self::with_weights(hidden_weights, output_weights);
        controller.inputs[InputSignal::StoredEnergy.index()].value = initial_energy;
        controller.inputs[InputSignal::Constant.index()].value = 1.0;
        controller
    }

    /// Build a controller from explicit weights. The bias neuron is appended
    /// to the hidden layer with its fixed weight.
    pub fn with_weights(
        hidden_weights: [f32; HIDDEN_COUNT - 1],
        output_weights: [f32; OutputSignal::COUNT],
    ) -> Self {
        let mut hidden = [Axon::default(); HIDDEN_COUNT];
        for (axon, weight) in hidden.iter_mut().zip(hidden_weights) {
            *axon = Axon::with_weight(weight);
        }
        hidden[HIDDEN_COUNT - 1] = Axon::with_weight(BIAS_WEIGHT);

        Self {
            inputs: [Neuron::default(); InputSignal::COUNT],
            hidden,
            outputs: output_weights.map(Axon::with_weight),
        }
    }

    /// Run one forward pass over a fresh sensor snapshot.
    ///
    /// Only this controller's neuron values change; the result depends solely
    /// on the snapshot and the fixed weights.
    pub fn evaluate(&mut self, snapshot: &SensorSnapshot) -> Outputs {
        for signal in InputSignal::all() {
            self.inputs[signal.index()].value = snapshot.value(signal);
        }

        for axon in &mut self.hidden {
            let mut sum = 0.0;
            for input in &self.inputs {
                sum += input.value * axon.weight;
            }
            axon.value = sum;
        }

        let mut result = Outputs::default();
        for signal in OutputSignal::all() {
            let axon = &mut self.outputs[signal.index()];
            let mut sum = 0.0;
            for hidden in &self.hidden {
                sum += hidden.value * axon.weight;
            }
            axon.value = sum;
            result.set(signal, sum);
        }

        result
    }

    pub fn input(&self, signal: InputSignal) -> f32 {
        self.inputs[signal.index()].value
    }

    pub fn hidden(&self) -> &[Axon; HIDDEN_COUNT] {
        &self.hidden
    }

    pub fn output(&self, signal: OutputSignal) -> &Axon {
        &self.outputs[signal.index()]
    }

    /// Output values from the most recent evaluation
    pub fn last_outputs(&self) -> Outputs {
        let mut result = Outputs::default();
        for signal in OutputSignal::all() {
            result.set(signal, self.outputs[signal.index()].value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn snapshot() -> SensorSnapshot {
        SensorSnapshot {
            rotation: 90.0,
            stored_energy: 8.0,
            vision_food: 0.75,
        }
    }

    #[test]
    fn test_random_weights_in_unit_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let controller = Controller::random(&mut rng, 8.0);

        for axon in &controller.hidden()[..HIDDEN_COUNT - 1] {
            assert!((0.0..1.0).contains(&axon.weight()));
        }
        assert_eq!(controller.hidden()[HIDDEN_COUNT - 1].weight(), 1.0);
        for signal in OutputSignal::all() {
            assert!((0.0..1.0).contains(&controller.output(signal).weight()));
        }
    }

    #[test]
    fn test_inputs_pre_seeded() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let controller = Controller::random(&mut rng, 8.0);
        assert_eq!(controller.input(InputSignal::StoredEnergy), 8.0);
        assert_eq!(controller.input(InputSignal::Constant), 1.0);
        assert_eq!(controller.input(InputSignal::Rotation), 0.0);
    }

    #[test]
    fn test_uniform_weight_forward_pass() {
        let hidden = [0.5; HIDDEN_COUNT - 1];
        let outputs = [0.1, 0.2, 0.0, 1.0];
        let mut controller = Controller::with_weights(hidden, outputs);

        let result = controller.evaluate(&snapshot());

        // Sum of inputs, each hidden neuron scales it by its single weight
        let input_sum = 90.0 + 8.0 + 0.75 + 1.0;
        let hidden_sum = input_sum * 0.5 * (HIDDEN_COUNT - 1) as f32 + input_sum * 1.0;
        assert!((controller.hidden()[0].value - input_sum * 0.5).abs() < 1e-3);
        assert!((controller.hidden()[HIDDEN_COUNT - 1].value - input_sum).abs() < 1e-3);
        assert!((result.position_delta() - hidden_sum * 0.1).abs() < 1e-2);
        assert!((result.rotation_delta() - hidden_sum * 0.2).abs() < 1e-2);
        assert_eq!(result.eat(), 0.0);
        assert!((result.mate() - hidden_sum).abs() < 1e-2);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut controller = Controller::random(&mut rng, 8.0);
        let twin = controller.clone();

        let first = controller.evaluate(&snapshot());
        let second = controller.evaluate(&snapshot());
        assert_eq!(first, second);

        // Weights are untouched by evaluation
        for (a, b) in controller.hidden().iter().zip(twin.hidden()) {
            assert_eq!(a.weight(), b.weight());
        }
        assert_eq!(controller.last_outputs(), first);
    }

    #[test]
    fn test_zero_weights_give_zero_outputs() {
        let mut controller =
            Controller::with_weights([0.0; HIDDEN_COUNT - 1], [0.0; OutputSignal::COUNT]);
        let result = controller.evaluate(&snapshot());
        assert_eq!(result, Outputs::default());
    }

    #[test]
    fn test_controller_serialization() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let controller = Controller::random(&mut rng, 8.0);
        let json = serde_json::to_string(&controller).unwrap();
        let restored: Controller = serde_json::from_str(&json).unwrap();
        assert_eq!(controller, restored);
    }
}
