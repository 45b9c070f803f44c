//! Fixed-Weight Dense Network
//!
//! A small feed-forward classifier (7 → 32 → 16 → 8 → 3, ReLU hidden layers,
//! softmax output). Weights are drawn once from a seeded `StdRng` using
//! Glorot-uniform limits with zero biases, then frozen, so two networks built
//! from the same seed score identically.

use nalgebra as na;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::scoring::{ClassProbabilities, FeatureVector, ScoringStrategy, FEATURE_COUNT};

/// Seed used when the caller does not choose one
pub const DEFAULT_SEED: u64 = 42;

/// Units per layer, input first
pub const LAYER_SIZES: [usize; 5] = [FEATURE_COUNT, 32, 16, 8, 3];

#[derive(Clone, Debug)]
struct DenseLayer {
    /// `outputs x inputs`
    weights: na::DMatrix<f64>,
    biases: na::DVector<f64>,
}

impl DenseLayer {
    fn glorot(inputs: usize, outputs: usize, rng: &mut StdRng) -> Self {
        let limit = (6.0 / (inputs + outputs) as f64).sqrt();
        let weights = na::DMatrix::from_fn(outputs, inputs, |_, _| rng.gen_range(-limit..=limit));

        Self { weights, biases: na::DVector::zeros(outputs) }
    }

    fn forward(&self, input: &na::DVector<f64>) -> na::DVector<f64> {
        &self.weights * input + &self.biases
    }
}

/// Deterministic placeholder for a trained classifier
#[derive(Clone, Debug)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
    seed: u64,
}

impl Default for DenseNetwork {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

impl DenseNetwork {
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let layers = LAYER_SIZES
            .windows(2)
            .map(|pair| DenseLayer::glorot(pair[0], pair[1], &mut rng))
            .collect();

        Self { layers, seed }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw output-layer activations before softmax
    fn logits(&self, features: &FeatureVector) -> [f64; 3] {
        let last = self.layers.len() - 1;
        let mut activations = na::DVector::from_row_slice(&features.to_array());

        for (i, layer) in self.layers.iter().enumerate() {
            activations = layer.forward(&activations);
            if i < last {
                activations = activations.map(|a| a.max(0.0));
            }
        }

        [activations[0], activations[1], activations[2]]
    }
}

impl ScoringStrategy for DenseNetwork {
    fn score(&self, features: &FeatureVector) -> ClassProbabilities {
        ClassProbabilities::from_logits(self.logits(features))
    }

    fn name(&self) -> &str {
        "dense-network"
    }
}
