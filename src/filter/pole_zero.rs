use crate::complex::Complex;

/// Pole/zero staging area used while a design moves through the S- and
/// Z-plane
///
/// Both arrays are allocated to `max_size` up front; `num_poles` and
/// `num_zeroes` track how many slots are in use. Once the final counts are
/// known, [`shrink`](Self::shrink) truncates the arrays to them.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexCoefficients {
    pub poles: Vec<Complex>,
    pub zeroes: Vec<Complex>,
    pub num_poles: usize,
    pub num_zeroes: usize,
    max_size: usize,
}

impl ComplexCoefficients {
    pub fn new(max_size: usize) -> Self {
        Self {
            poles: vec![Complex::default(); max_size],
            zeroes: vec![Complex::default(); max_size],
            num_poles: 0,
            num_zeroes: 0,
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Append a pole to the used region
    pub fn push_pole(&mut self, pole: Complex) {
        self.poles[self.num_poles] = pole;
        self.num_poles += 1;
    }

    /// Append a zero to the used region
    pub fn push_zero(&mut self, zero: Complex) {
        self.zeroes[self.num_zeroes] = zero;
        self.num_zeroes += 1;
    }

    pub fn active_poles(&self) -> &[Complex] {
        &self.poles[..self.num_poles]
    }

    pub fn active_zeroes(&self) -> &[Complex] {
        &self.zeroes[..self.num_zeroes]
    }

    /// Release the unused slots
    pub fn shrink(&mut self) {
        self.poles.truncate(self.num_poles);
        self.zeroes.truncate(self.num_zeroes);
        self.max_size = self.num_poles.max(self.num_zeroes);
    }

    pub fn log(&self) {
        log::debug!(
            "ComplexCoefficients: {} poles and {} zeroes",
            self.num_poles,
            self.num_zeroes
        );
        log::debug!("Poles: {}", join_pairs(self.active_poles()));
        log::debug!("Zeroes: {}", join_pairs(self.active_zeroes()));
    }
}

fn join_pairs(values: &[Complex]) -> String {
    values.iter().map(|v| format!("{:.10}, ", v)).collect()
}
