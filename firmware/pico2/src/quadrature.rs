//! Quadrature decoding for the rotary encoder.
//!
//! The encoder's two channels follow a Gray code. Each valid transition
//! between consecutive states is one pulse; a KY-040 produces four pulses per
//! mechanical detent. Invalid transitions (both channels changed at once,
//! usually contact bounce) count as zero.

/// Pulse delta indexed by `(prev << 2) | curr`, states encoded as `A << 1 | B`.
const TRANSITIONS: [i8; 16] = [
    // prev=00: 00, 01, 10, 11
    0, -1, 1, 0, //
    // prev=01: 00, 01, 10, 11
    1, 0, 0, -1, //
    // prev=10: 00, 01, 10, 11
    -1, 0, 0, 1, //
    // prev=11: 00, 01, 10, 11
    0, 1, -1, 0,
];

/// Running pulse count of one encoder.
#[derive(Clone, Copy, Debug)]
pub struct QuadratureDecoder {
    state: u8,
    count: i32,
}

impl QuadratureDecoder {
    /// Start from the current pin levels so the first sample is not a step.
    pub const fn new(
        a: bool,
        b: bool,
    ) -> Self {
        Self {
            state: encode(a, b),
            count: 0,
        }
    }

    /// Feed one sample of both channels. Returns the pulse delta (-1, 0, 1).
    #[inline]
    pub fn update(
        &mut self,
        a: bool,
        b: bool,
    ) -> i32 {
        let curr = encode(a, b);
        let delta = i32::from(TRANSITIONS[usize::from((self.state << 2) | curr)]);
        self.state = curr;
        self.count = self.count.wrapping_add(delta);
        delta
    }

    /// Absolute pulse count since construction.
    #[inline]
    pub const fn count(&self) -> i32 { self.count }
}

#[inline]
const fn encode(
    a: bool,
    b: bool,
) -> u8 {
    ((a as u8) << 1) | b as u8
}
