/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Reducing a sorted gas price sample to one representative number per
//! priority tier.

use crate::types::PriorityTier;

/// Median of an ascending-sorted slice. For an even length the lower of
/// the two middle elements is taken, so the result is always a price
/// that was actually observed.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some(sorted[n / 2 - 1])
    }
}

/// Representative price for a tier:
/// - `Low`: median of the bottom 10% of the sample (by count, slice
///   boundary truncating toward zero),
/// - `High`: median of the top 10%,
/// - `Medium` / `Unspecified`: median of the whole sample.
///
/// An empty sample, or a tier slice that truncates to nothing, yields
/// the configured network floor.
pub fn estimate_for_tier(sorted_prices: &[f64], tier: PriorityTier, floor: f64) -> f64 {
    let n = sorted_prices.len();
    let slice = match tier {
        PriorityTier::Low => &sorted_prices[..n * 10 / 100],
        PriorityTier::High => &sorted_prices[n * 90 / 100..],
        PriorityTier::Medium | PriorityTier::Unspecified => sorted_prices,
    };
    median(slice).unwrap_or(floor)
}
