//! Feedforward neural network for rocket brains.
//!
//! Supports forward inference with sigmoid activation, supervised
//! backpropagation training, Gaussian weight perturbation for evolution, and
//! genome export/load for persistence. The evolutionary loop only uses
//! inference and perturbation; the training path is a standalone capability.

use ndarray::{Array1, Array2, Axis};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single fully-connected layer.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Layer {
    /// Creates a layer with weights and biases drawn from Uniform(-1, 1).
    pub fn new_random(input_size: usize, output_size: usize) -> Self {
        Self {
            weights: Array2::random((output_size, input_size), Uniform::new(-1.0, 1.0)),
            biases: Array1::random(output_size, Uniform::new(-1.0, 1.0)),
        }
    }

    /// Weighted sum plus bias, squashed by the logistic sigmoid.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        output.mapv_inplace(sigmoid);
        output
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed in terms of its output.
fn sigmoid_derivative(y: f32) -> f32 {
    y * (1.0 - y)
}

/// Serializable genome: layer sizes plus plain nested weight and bias data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genome {
    /// Ordered layer sizes, input first.
    pub layer_sizes: Vec<usize>,
    /// Per layer: `output_size` rows of `input_size` weights.
    pub weights: Vec<Vec<Vec<f32>>>,
    /// Per layer: `output_size` biases.
    pub biases: Vec<Vec<f32>>,
}

impl Genome {
    /// Checks that every weight matrix and bias vector matches the declared
    /// layer sizes.
    pub fn is_consistent(&self) -> bool {
        if self.layer_sizes.len() < 2 {
            return false;
        }
        if self.weights.len() != self.layer_sizes.len() - 1 {
            return false;
        }
        if self.biases.len() != self.weights.len() {
            return false;
        }
        for (layer, (weights, biases)) in self.weights.iter().zip(&self.biases).enumerate() {
            let rows = self.layer_sizes[layer + 1];
            let cols = self.layer_sizes[layer];
            if weights.len() != rows || biases.len() != rows {
                return false;
            }
            if weights.iter().any(|row| row.len() != cols) {
                return false;
            }
        }
        true
    }
}

/// A fixed-topology feedforward network.
///
/// The activation snapshot of the last forward pass is kept for introspection
/// (network visualization); backpropagation deltas are recomputed per call and
/// never persisted.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    /// Ordered layer sizes, input first.
    pub layer_sizes: Vec<usize>,
    /// Trainable layers, one per non-input layer size.
    pub layers: Vec<Layer>,
    /// Learning rate for the supervised training path.
    pub learning_rate: f32,
    /// Activations of every layer from the most recent forward pass,
    /// input included.
    pub activations: Vec<Array1<f32>>,
}

impl NeuralNetwork {
    /// Creates a network with random weights for the given layer sizes.
    pub fn new(layer_sizes: &[usize], learning_rate: f32) -> Self {
        let layers = layer_sizes
            .windows(2)
            .map(|pair| Layer::new_random(pair[0], pair[1]))
            .collect();

        Self {
            layer_sizes: layer_sizes.to_vec(),
            layers,
            learning_rate,
            activations: Vec::new(),
        }
    }

    /// Runs a forward pass, caching every layer's activations.
    ///
    /// Deterministic for fixed weights and input.
    pub fn forward(&mut self, input: &Array1<f32>) -> Array1<f32> {
        let mut current = input.clone();
        self.activations.clear();
        self.activations.push(current.clone());

        for layer in &self.layers {
            current = layer.forward(&current);
            self.activations.push(current.clone());
        }

        current
    }

    /// Index of the maximum output value; ties go to the lowest index.
    pub fn argmax(output: &Array1<f32>) -> usize {
        let mut max_idx = 0;
        let mut max_val = f32::NEG_INFINITY;
        for (i, &value) in output.iter().enumerate() {
            if value > max_val {
                max_val = value;
                max_idx = i;
            }
        }
        max_idx
    }

    /// One backpropagation step against `target`, using the activations of the
    /// most recent forward pass. Does nothing if no forward pass has been run.
    pub fn backward(&mut self, target: &Array1<f32>) {
        if self.activations.len() != self.layers.len() + 1 {
            return;
        }

        let output = &self.activations[self.layers.len()];
        let mut delta = (output - target) * &output.mapv(sigmoid_derivative);

        for layer_idx in (0..self.layers.len()).rev() {
            // Delta for the layer below must use this layer's pre-update weights.
            let lower_delta = if layer_idx > 0 {
                let error = self.layers[layer_idx].weights.t().dot(&delta);
                Some(error * &self.activations[layer_idx].mapv(sigmoid_derivative))
            } else {
                None
            };

            let gradient = delta
                .clone()
                .insert_axis(Axis(1))
                .dot(&self.activations[layer_idx].clone().insert_axis(Axis(0)));

            let rate = self.learning_rate;
            self.layers[layer_idx].weights.scaled_add(-rate, &gradient);
            self.layers[layer_idx].biases.scaled_add(-rate, &delta);

            if let Some(lower) = lower_delta {
                delta = lower;
            }
        }
    }

    /// Gradient-descent training over the given samples for a fixed number of
    /// passes. Independent of the evolutionary loop.
    pub fn train(&mut self, inputs: &[Array1<f32>], targets: &[Array1<f32>], epochs: usize) {
        for _ in 0..epochs {
            for (input, target) in inputs.iter().zip(targets) {
                self.forward(input);
                self.backward(target);
            }
        }
    }

    /// Perturbs every weight and bias independently: with probability
    /// `mutation_chance`, adds Gaussian noise with mean 0 and standard
    /// deviation `sigma`.
    pub fn perturb_weights(&mut self, sigma: f32, mutation_chance: f32) {
        let mut rng = rand::rng();

        for layer in &mut self.layers {
            for weight in layer.weights.iter_mut() {
                if rng.random::<f32>() < mutation_chance {
                    *weight += gaussian(&mut rng, 0.0, sigma);
                }
            }
            for bias in layer.biases.iter_mut() {
                if rng.random::<f32>() < mutation_chance {
                    *bias += gaussian(&mut rng, 0.0, sigma);
                }
            }
        }
    }

    /// Exports the genome (layer sizes, weights, biases) as plain nested data,
    /// independent of transient buffers.
    pub fn export(&self) -> Genome {
        Genome {
            layer_sizes: self.layer_sizes.clone(),
            weights: self
                .layers
                .iter()
                .map(|layer| {
                    layer
                        .weights
                        .rows()
                        .into_iter()
                        .map(|row| row.to_vec())
                        .collect()
                })
                .collect(),
            biases: self.layers.iter().map(|layer| layer.biases.to_vec()).collect(),
        }
    }

    /// Loads a genome wholesale. A genome whose dimensions do not match its
    /// declared layer sizes, or whose topology differs from this network's,
    /// reinitializes the network randomly instead of adopting state it
    /// cannot run inference with.
    pub fn load(&mut self, genome: &Genome) {
        if !genome.is_consistent() || genome.layer_sizes != self.layer_sizes {
            let sizes = self.layer_sizes.clone();
            *self = Self::new(&sizes, self.learning_rate);
            return;
        }

        self.layers = genome
            .weights
            .iter()
            .zip(&genome.biases)
            .map(|(weights, biases)| {
                let rows = weights.len();
                let cols = weights.first().map_or(0, Vec::len);
                let flat: Vec<f32> = weights.iter().flatten().copied().collect();
                Layer {
                    weights: Array2::from_shape_vec((rows, cols), flat)
                        .unwrap_or_else(|_| Array2::zeros((rows, cols))),
                    biases: Array1::from_vec(biases.clone()),
                }
            })
            .collect();
        self.activations.clear();
    }
}

/// Gaussian sample via the Box-Muller transform from two uniform draws.
fn gaussian(rng: &mut impl Rng, mean: f32, std_dev: f32) -> f32 {
    let mut u: f32 = 0.0;
    let mut v: f32 = 0.0;
    while u == 0.0 {
        u = rng.random();
    }
    while v == 0.0 {
        v = rng.random();
    }
    mean + std_dev * (-2.0 * u.ln()).sqrt() * (std::f32::consts::TAU * v).cos()
}
