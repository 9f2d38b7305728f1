//! Encoder sampling: the producer side of the input handoff.
//!
//! Runs at `SAMPLE_PERIOD_US` in its own task, fully decoupled from the
//! menu loop. Every sample decodes the quadrature channels, converts the
//! pulse count to detents and debounces the switch, then publishes both into
//! the shared [`InputHandoff`].

use menu_common::input::{DetentCounter, InputHandoff};

use crate::button::ButtonDebouncer;
use crate::quadrature::QuadratureDecoder;

/// Decoder, detent counter and debouncer for one encoder.
pub struct EncoderSampler {
    decoder: QuadratureDecoder,
    detents: DetentCounter,
    button: ButtonDebouncer,
}

impl EncoderSampler {
    /// `a` and `b` are the channel levels at start-up.
    pub fn new(
        a: bool,
        b: bool,
    ) -> Self {
        let decoder = QuadratureDecoder::new(a, b);
        let mut detents = DetentCounter::new();
        detents.update(decoder.count());
        Self {
            decoder,
            detents,
            button: ButtonDebouncer::new(),
        }
    }

    /// Take one sample and publish it. `sw_low` is the raw switch level.
    pub fn sample(
        &mut self,
        a: bool,
        b: bool,
        sw_low: bool,
        handoff: &InputHandoff,
    ) {
        self.decoder.update(a, b);
        handoff.publish_steps(self.detents.update(self.decoder.count()));

        let button = self.button.sample(sw_low);
        handoff.publish_button(button.held, button.pressed);
    }
}

#[cfg(test)]
mod tests {
    use menu_common::config::DEBOUNCE_SAMPLES;

    use super::*;

    const CW: [(bool, bool); 4] = [(true, false), (true, true), (false, true), (false, false)];

    #[test]
    fn test_one_detent_publishes_one_step() {
        let handoff = InputHandoff::new();
        let mut sampler = EncoderSampler::new(false, false);
        for (a, b) in CW {
            sampler.sample(a, b, false, &handoff);
        }
        assert_eq!(handoff.take().steps, 1);
    }

    #[test]
    fn test_partial_detent_publishes_nothing() {
        let handoff = InputHandoff::new();
        let mut sampler = EncoderSampler::new(false, false);
        for (a, b) in CW.iter().take(3) {
            sampler.sample(*a, *b, false, &handoff);
        }
        assert_eq!(handoff.take().steps, 0);
    }

    #[test]
    fn test_steps_accumulate_between_polls() {
        let handoff = InputHandoff::new();
        let mut sampler = EncoderSampler::new(false, false);
        for _ in 0..3 {
            for (a, b) in CW {
                sampler.sample(a, b, false, &handoff);
            }
        }
        assert_eq!(handoff.take().steps, 3);
        assert_eq!(handoff.take().steps, 0);
    }

    #[test]
    fn test_debounced_press_reaches_consumer() {
        let handoff = InputHandoff::new();
        let mut sampler = EncoderSampler::new(true, true);
        for _ in 0..DEBOUNCE_SAMPLES {
            sampler.sample(true, true, true, &handoff);
        }
        // released again before the menu loop polls
        for _ in 0..DEBOUNCE_SAMPLES {
            sampler.sample(true, true, false, &handoff);
        }
        let raw = handoff.take();
        assert!(raw.pressed);
        assert!(!raw.held);
        assert_eq!(raw.steps, 0);
    }
}
