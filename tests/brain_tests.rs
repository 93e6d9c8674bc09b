#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::{Array1, array};
use orbevo::simulation::brain::{Genome, NeuralNetwork};

const LAYER_SIZES: [usize; 3] = [12, 8, 5];
const LEARNING_RATE: f32 = 0.1;

fn test_network() -> NeuralNetwork {
    NeuralNetwork::new(&LAYER_SIZES, LEARNING_RATE)
}

#[test]
fn test_construction_matches_topology() {
    let network = test_network();

    assert_eq!(network.layers.len(), 2);
    assert_eq!(network.layers[0].weights.dim(), (8, 12));
    assert_eq!(network.layers[0].biases.len(), 8);
    assert_eq!(network.layers[1].weights.dim(), (5, 8));
    assert_eq!(network.layers[1].biases.len(), 5);
}

#[test]
fn test_forward_is_deterministic_and_sigmoid_bounded() {
    let mut network = test_network();
    let input = Array1::from_elem(12, 0.5);

    let first = network.forward(&input);
    let second = network.forward(&input);

    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
    assert!(first.iter().all(|&v| v > 0.0 && v < 1.0));
}

#[test]
fn test_forward_caches_all_layer_activations() {
    let mut network = test_network();
    let input = Array1::from_elem(12, 0.1);

    let output = network.forward(&input);

    assert_eq!(network.activations.len(), 3);
    assert_eq!(network.activations[0], input);
    assert_eq!(network.activations[2], output);
}

#[test]
fn test_argmax_tie_breaks_to_lowest_index() {
    let output = array![0.5, 0.5, 0.2, 0.1, 0.0];
    assert_eq!(NeuralNetwork::argmax(&output), 0);
}

#[test]
fn test_argmax_picks_maximum() {
    let output = array![0.1, 0.9, 0.2];
    assert_eq!(NeuralNetwork::argmax(&output), 1);
}

#[test]
fn test_perturb_with_zero_chance_is_a_no_op() {
    let mut network = test_network();
    let before = network.export();

    network.perturb_weights(0.05, 0.0);

    let after = network.export();
    assert_eq!(before.weights, after.weights);
    assert_eq!(before.biases, after.biases);
}

#[test]
fn test_perturb_with_full_chance_changes_everything() {
    let mut network = test_network();
    let before = network.export();

    network.perturb_weights(0.05, 1.0);

    let after = network.export();
    for (layer_before, layer_after) in before.weights.iter().zip(&after.weights) {
        for (row_before, row_after) in layer_before.iter().zip(layer_after) {
            for (&w_before, &w_after) in row_before.iter().zip(row_after) {
                assert_ne!(w_before, w_after);
            }
        }
    }
    for (biases_before, biases_after) in before.biases.iter().zip(&after.biases) {
        for (&b_before, &b_after) in biases_before.iter().zip(biases_after) {
            assert_ne!(b_before, b_after);
        }
    }
}

#[test]
fn test_genome_round_trip_is_identical() {
    let mut original = test_network();
    let genome = original.export();

    let mut restored = NeuralNetwork::new(&LAYER_SIZES, LEARNING_RATE);
    restored.load(&genome);

    assert_eq!(restored.layer_sizes, original.layer_sizes);
    let reexported = restored.export();
    assert_eq!(reexported.weights, genome.weights);
    assert_eq!(reexported.biases, genome.biases);

    // Identical networks produce identical outputs
    let input = Array1::from_elem(12, 0.3);
    assert_eq!(original.forward(&input), restored.forward(&input));
}

#[test]
fn test_load_malformed_genome_reinitializes() {
    let mut network = test_network();

    let malformed = Genome {
        layer_sizes: vec![12, 8, 5],
        weights: vec![vec![vec![0.1; 3]; 8], vec![vec![0.2; 8]; 5]],
        biases: vec![vec![0.0; 8], vec![0.0; 5]],
    };
    assert!(!malformed.is_consistent());

    network.load(&malformed);

    // The corrupt weights were not adopted; the topology survives
    assert_eq!(network.layer_sizes, vec![12, 8, 5]);
    assert_eq!(network.layers[0].weights.dim(), (8, 12));
    assert_eq!(network.layers[1].weights.dim(), (5, 8));

    let output = network.forward(&Array1::from_elem(12, 0.5));
    assert!(output.iter().all(|v| v.is_finite()));
}

#[test]
fn test_load_genome_with_different_topology_reinitializes() {
    let mut network = test_network();

    // Internally consistent, but built for a 10-input network
    let mismatched = NeuralNetwork::new(&[10, 8, 5], LEARNING_RATE).export();
    assert!(mismatched.is_consistent());

    network.load(&mismatched);

    // The running topology is kept and inference still accepts 12 inputs
    assert_eq!(network.layer_sizes, vec![12, 8, 5]);
    assert_eq!(network.layers[0].weights.dim(), (8, 12));

    let output = network.forward(&Array1::from_elem(12, 0.5));
    assert_eq!(output.len(), 5);
    assert!(output.iter().all(|v| v.is_finite()));
}

#[test]
fn test_load_empty_genome_reinitializes() {
    let mut network = test_network();

    let empty = Genome {
        layer_sizes: Vec::new(),
        weights: Vec::new(),
        biases: Vec::new(),
    };
    network.load(&empty);

    assert_eq!(network.layer_sizes, vec![12, 8, 5]);
    assert_eq!(network.layers.len(), 2);
}

#[test]
fn test_backward_without_forward_is_a_no_op() {
    let mut network = test_network();
    let before = network.export();

    network.backward(&Array1::from_elem(5, 1.0));

    let after = network.export();
    assert_eq!(before.weights, after.weights);
}

#[test]
fn test_training_reduces_error() {
    let mut network = NeuralNetwork::new(&[2, 4, 1], 0.5);
    let inputs = vec![array![0.0, 1.0], array![1.0, 0.0]];
    let targets = vec![array![1.0], array![0.0]];

    let error = |network: &mut NeuralNetwork| -> f32 {
        inputs
            .iter()
            .zip(&targets)
            .map(|(input, target)| {
                let output = network.forward(input);
                (output[0] - target[0]).powi(2)
            })
            .sum()
    };

    let before = error(&mut network);
    network.train(&inputs, &targets, 2000);
    let after = error(&mut network);

    assert!(after < before);
    assert!(after < 0.05);
}
