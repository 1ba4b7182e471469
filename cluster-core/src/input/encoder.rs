//! Rotary encoder decoding
//!
//! Decodes the CLK/DT quadrature pair of the panel encoder into detents. The
//! decoder walks a small state machine so contact bounce that returns to
//! the rest position never produces a detent.

/// One encoder detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Clockwise detent
    Clockwise,
    /// Counter-clockwise detent
    CounterClockwise,
}

/// Decoder states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature state machine
///
/// ```text
/// CW:  Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> detent on release
/// CCW: Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> detent on release
/// ```
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: State,
    last_clk: bool,
    last_dt: bool,
}

impl QuadratureDecoder {
    /// Create a decoder from the current pin levels
    pub fn new(clk: bool, dt: bool) -> Self {
        Self {
            state: State::Idle,
            last_clk: clk,
            last_dt: dt,
        }
    }

    /// Feed a new sample of both pins
    pub fn update(&mut self, clk: bool, dt: bool) -> Option<Rotation> {
        if clk == self.last_clk && dt == self.last_dt {
            return None;
        }
        self.last_clk = clk;
        self.last_dt = dt;

        match self.state {
            State::Idle => {
                if !clk && dt {
                    self.state = State::CwStep1;
                } else if clk && !dt {
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 | State::CcwStep1 => {
                if !clk && !dt {
                    self.state = if self.state == State::CwStep1 {
                        State::CwStep2
                    } else {
                        State::CcwStep2
                    };
                } else if clk && dt {
                    // Bounced back to rest
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 if clk || dt => {
                self.state = State::Idle;
                Some(Rotation::Clockwise)
            }
            State::CcwStep2 if clk || dt => {
                self.state = State::Idle;
                Some(Rotation::CounterClockwise)
            }
            State::CwStep2 | State::CcwStep2 => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(decoder: &mut QuadratureDecoder, samples: &[(bool, bool)]) -> Option<Rotation> {
        let mut out = None;
        for &(clk, dt) in samples {
            if let Some(r) = decoder.update(clk, dt) {
                out = Some(r);
            }
        }
        out
    }

    #[test]
    fn test_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new(true, true);
        let detent = feed(
            &mut decoder,
            &[(false, true), (false, false), (true, false), (true, true)],
        );
        assert_eq!(detent, Some(Rotation::Clockwise));
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new(true, true);
        let detent = feed(
            &mut decoder,
            &[(true, false), (false, false), (false, true), (true, true)],
        );
        assert_eq!(detent, Some(Rotation::CounterClockwise));
    }

    #[test]
    fn test_bounce_is_ignored() {
        let mut decoder = QuadratureDecoder::new(true, true);
        let detent = feed(
            &mut decoder,
            &[(false, true), (true, true), (false, true), (true, true)],
        );
        assert_eq!(detent, None);
    }
}
