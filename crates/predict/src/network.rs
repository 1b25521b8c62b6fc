/// Trainable function the model drives.
///
/// Inputs are positional encodings (`Model::input_size` long), outputs are
/// one-hot targets and predictions (`Model::output_size` long). Layer
/// construction, propagation and loss are up to the implementation.
pub trait Network {
    /// Probability-like scores, one per vocabulary index.
    fn predict(&self, input: &[f64]) -> Vec<f64>;

    /// One training pass over the batch; returns the loss afterwards.
    fn train(&mut self, inputs: &[Vec<f64>], outputs: &[Vec<f64>], learning_rate: f64) -> f64;
}

