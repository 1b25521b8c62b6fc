#![forbid(unsafe_code)]

use rand::Rng;
use rayon::prelude::*;
use tokenize::Tokenizer;
use tracing::{debug, info, warn};

use crate::config::ModelConfig;
use crate::encoder::{Encoder, Encoding};
use crate::masker::{Sample, SentenceMasker};
use crate::network::Network;
use crate::onehot::OneHotEncoder;
use crate::positional::PositionalEncoder;
use crate::PredictError;

/// Outcome of [`Model::forward`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainingReport {
    /// training passes run
    pub epochs: usize,
    /// loss returned by the last pass
    pub loss: f64,
    /// whether the loss reached `target_loss`
    pub converged: bool,
}

/// Wires masked samples, encoders and an external `Network` together.
///
/// The tokenizer is fitted once at construction (mask marker first, so it
/// always holds index 0 on a fresh tokenizer) and only read afterwards.
pub struct Model {
    tokenizer: Tokenizer,
    config: ModelConfig,
    positional: PositionalEncoder,
    onehot: OneHotEncoder,
}

impl Model {
    /// Fit `tokenizer` on the mask marker and on every context and answer.
    pub fn new(mut tokenizer: Tokenizer, samples: &[Sample], config: ModelConfig) -> Self {
        tokenizer.fit(&config.mask_token);
        for sample in samples {
            let context = tokenizer.tokenize(&sample.context);
            tokenizer.fit_all(&context);
            let answer = tokenizer.tokenize(&sample.answer);
            tokenizer.fit_all(&answer);
        }
        info!(
            vocab_size = tokenizer.vocab_size(),
            samples = samples.len(),
            "tokenizer fitted"
        );
        let positional = PositionalEncoder::new(config.max_positions);
        Self { tokenizer, config, positional, onehot: OneHotEncoder }
    }

    /// The fitted tokenizer.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Active configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Width a network input layer must have.
    pub fn input_size(&self) -> usize {
        self.positional.output_len(&self.tokenizer)
    }

    /// Width a network output layer must have.
    pub fn output_size(&self) -> usize {
        self.onehot.output_len(&self.tokenizer)
    }

    /// Mask one unit of each sentence. A fresh masker seeded from the
    /// configuration is used per call, so repeated calls agree.
    pub fn generate_samples<I, S>(&self, sentences: I) -> Result<Vec<Sample>, PredictError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut masker = SentenceMasker::new(self.config.seed, self.config.mask_token.as_str());
        sentences
            .into_iter()
            .map(|s| masker.mask(s.as_ref()))
            .collect()
    }

    /// Positional inputs and one-hot outputs for every sample, in order.
    pub fn encode_samples(&self, samples: &[Sample]) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let encoded: Vec<(Encoding, Encoding)> = samples
            .par_iter()
            .map(|s| {
                (
                    self.positional.encode(&self.tokenizer, &s.context),
                    self.onehot.encode(&self.tokenizer, &s.answer),
                )
            })
            .collect();

        let truncated = encoded.iter().filter(|(input, _)| input.is_truncated()).count();
        if truncated > 0 {
            warn!(truncated, total = samples.len(), "samples lost trailing tokens");
        }
        encoded
            .into_iter()
            .map(|(input, output)| (input.into_values(), output.into_values()))
            .unzip()
    }

    /// Train `network` on `samples` until the loss reaches `target_loss` or
    /// `max_epochs` passes have run.
    pub fn forward<N: Network>(
        &self,
        network: &mut N,
        samples: &[Sample],
    ) -> Result<TrainingReport, PredictError> {
        if samples.is_empty() {
            return Err(PredictError::NoSamples);
        }
        let (inputs, outputs) = self.encode_samples(samples);
        info!(shape = self.input_size(), samples = samples.len(), "training");

        let mut loss = f64::INFINITY;
        let mut epochs = 0usize;
        while loss > self.config.target_loss && epochs < self.config.max_epochs {
            loss = network.train(&inputs, &outputs, self.config.learning_rate);
            epochs += 1;
            debug!(epoch = epochs, loss, "epoch");
        }

        let converged = loss <= self.config.target_loss;
        if converged {
            info!(epochs, loss, "training converged");
        } else {
            warn!(epochs, loss, target_loss = self.config.target_loss, "training stopped before target loss");
        }
        Ok(TrainingReport { epochs, loss, converged })
    }

    /// Predict the vocabulary token for the mask marker in `text`.
    pub fn predict_token<N: Network, R: Rng + ?Sized>(
        &self,
        network: &N,
        text: &str,
        temperature: f64,
        rng: &mut R,
    ) -> Result<String, PredictError> {
        let mask = self.config.mask_token.as_str();
        if !text.contains(mask) {
            return Err(PredictError::MissingMask {
                mask: mask.to_string(),
                index: self.tokenizer.index_of(mask),
            });
        }
        let input = self.positional.encode(&self.tokenizer, text);
        let probabilities = network.predict(&input.values);
        let index = sampler::sample(&probabilities, temperature, rng)?;
        self.tokenizer
            .token_of(index)
            .map(str::to_string)
            .ok_or(PredictError::UnknownIndex(index))
    }

    /// Replace the mask marker in `text` with the predicted token.
    ///
    /// A temperature of exactly `1.0` picks the arg-max deterministically.
    pub fn generate<N: Network, R: Rng + ?Sized>(
        &self,
        network: &N,
        text: &str,
        temperature: f64,
        rng: &mut R,
    ) -> Result<String, PredictError> {
        let token = self.predict_token(network, text, temperature, rng)?;
        Ok(text.replace(self.config.mask_token.as_str(), &token))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::core::make_rng;
    use tokenize::TokenizerBuilder;

    /// Always predicts a fixed distribution; loss decays geometrically.
    struct FixedNetwork {
        output: Vec<f64>,
        loss: f64,
        calls: usize,
        seen_input_len: usize,
    }

    impl Network for FixedNetwork {
        fn predict(&self, _input: &[f64]) -> Vec<f64> {
            self.output.clone()
        }

        fn train(&mut self, inputs: &[Vec<f64>], _outputs: &[Vec<f64>], _rate: f64) -> f64 {
            self.calls += 1;
            self.seen_input_len = inputs[0].len();
            self.loss *= 0.5;
            self.loss
        }
    }

    fn model(config: ModelConfig) -> Model {
        let samples = vec![
            Sample::new("hello how MASK you", "are"),
            Sample::new("what are you MASK", "doing"),
        ];
        Model::new(TokenizerBuilder::new().build().unwrap(), &samples, config)
    }

    #[test]
    fn mask_is_fitted_first() {
        let m = model(ModelConfig::default());
        assert_eq!(m.tokenizer().index_of("MASK"), Some(0));
        // MASK hello how you are what doing
        assert_eq!(m.output_size(), 7);
        assert_eq!(m.input_size(), 32 * 8);
    }

    #[test]
    fn generate_requires_mask() {
        let m = model(ModelConfig::default());
        let net = FixedNetwork { output: vec![0.0; 7], loss: 1.0, calls: 0, seen_input_len: 0 };
        let err = m.generate(&net, "hello how are you", 1.0, &mut make_rng(0)).unwrap_err();
        assert!(matches!(err, PredictError::MissingMask { index: Some(0), .. }));
    }

    #[test]
    fn generate_fills_argmax_at_unit_temperature() {
        let m = model(ModelConfig::default());
        let are = m.tokenizer().index_of("are").unwrap();
        let mut output = vec![0.01; 7];
        output[are] = 0.9;
        let net = FixedNetwork { output, loss: 1.0, calls: 0, seen_input_len: 0 };
        let text = m.generate(&net, "hello how MASK you", 1.0, &mut make_rng(0)).unwrap();
        assert_eq!(text, "hello how are you");
    }

    #[test]
    fn out_of_range_prediction_is_reported() {
        let m = model(ModelConfig::default());
        let mut output = vec![0.0; 9];
        output[8] = 1.0;
        let net = FixedNetwork { output, loss: 1.0, calls: 0, seen_input_len: 0 };
        let err = m.generate(&net, "MASK", 1.0, &mut make_rng(0)).unwrap_err();
        assert!(matches!(err, PredictError::UnknownIndex(8)));
    }

    #[test]
    fn forward_stops_at_target_loss() {
        let m = model(ModelConfig { target_loss: 0.1, ..ModelConfig::default() });
        let mut net = FixedNetwork { output: vec![], loss: 1.0, calls: 0, seen_input_len: 0 };
        let samples = vec![Sample::new("hello how MASK you", "are")];
        let report = m.forward(&mut net, &samples).unwrap();
        // 0.5, 0.25, 0.125, 0.0625
        assert_eq!(report.epochs, 4);
        assert!(report.converged);
        assert_eq!(net.calls, 4);
        assert_eq!(net.seen_input_len, m.input_size());
    }

    #[test]
    fn forward_respects_epoch_cap() {
        let m = model(ModelConfig { target_loss: 0.0, max_epochs: 3, ..ModelConfig::default() });
        let mut net = FixedNetwork { output: vec![], loss: 1.0, calls: 0, seen_input_len: 0 };
        let report = m.forward(&mut net, &[Sample::new("MASK", "are")]).unwrap();
        assert_eq!(report.epochs, 3);
        assert!(!report.converged);
    }

    #[test]
    fn forward_without_samples_fails() {
        let m = model(ModelConfig::default());
        let mut net = FixedNetwork { output: vec![], loss: 1.0, calls: 0, seen_input_len: 0 };
        assert!(matches!(m.forward(&mut net, &[]), Err(PredictError::NoSamples)));
    }

    #[test]
    fn generate_samples_is_reproducible() {
        let m = model(ModelConfig::default());
        let sentences = ["a b c d", "the sun is shining"];
        let first = m.generate_samples(sentences).unwrap();
        let second = m.generate_samples(sentences).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().all(|s| s.context.contains("MASK")));
    }

    #[test]
    fn encoded_rows_have_model_shapes() {
        let m = model(ModelConfig { max_positions: 4, ..ModelConfig::default() });
        let samples = vec![
            Sample::new("hello how MASK you", "are"),
            Sample::new("what are you MASK", "doing"),
        ];
        let (inputs, outputs) = m.encode_samples(&samples);
        assert_eq!(inputs.len(), 2);
        assert!(inputs.iter().all(|r| r.len() == m.input_size()));
        assert!(outputs.iter().all(|r| r.len() == m.output_size()));
        assert_eq!(outputs[1][m.tokenizer().index_of("doing").unwrap()], 1.0);
    }
}
