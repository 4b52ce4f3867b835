//! Random transfer amounts.

use rand::Rng;

use crate::port::{AmountRange, AmountSource};

/// Draws amounts uniformly from the requested range.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformAmounts;

impl AmountSource for UniformAmounts {
    fn next_amount(&self, range: AmountRange) -> u128 {
        rand::thread_rng().gen_range(range.min..=range.max)
    }
}
