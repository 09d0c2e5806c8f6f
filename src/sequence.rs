//! Ease-each sequencing
//!
//! Orders a selection top-to-bottom, left-to-right and applies a transform
//! to each item scaled by its eased position in that order: the first item
//! gets `ease(0)` of the transform, the last gets `ease(1)`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::easing::Ease;
use crate::geometry::{Anchor, Bounds};
use crate::host::{HostError, TransformHost};

/// An item handle together with the bounds used to order it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedItem<I> {
    pub item: I,
    pub bounds: Bounds,
}

/// Page reading order: higher `top` first, then smaller `left`.
/// NaN coordinates use the IEEE total order.
fn position_order(a: &Bounds, b: &Bounds) -> Ordering {
    b.top.total_cmp(&a.top).then_with(|| a.left.total_cmp(&b.left))
}

/// Sort items top-to-bottom, then left-to-right.
///
/// The sort is stable: items at the same `(top, left)` keep their input order.
pub fn sort_by_position<I>(items: &mut [PositionedItem<I>]) {
    items.sort_by(|a, b| position_order(&a.bounds, &b.bounds));
}

/// Parameters for one ease-each run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EaseParams {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Rotation in degrees, counter-clockwise
    pub angle: f64,
    pub ease: Ease,
    pub anchor: Anchor,
}

impl Default for EaseParams {
    fn default() -> Self {
        Self { delta_x: 0.0, delta_y: 0.0, angle: 0.0, ease: Ease::Linear, anchor: Anchor::Center }
    }
}

impl EaseParams {
    pub fn translates(&self) -> bool {
        self.delta_x != 0.0 || self.delta_y != 0.0
    }

    pub fn rotates(&self) -> bool {
        self.angle != 0.0
    }
}

/// The eased progress of one item in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformStep {
    pub index: usize,
    pub total: usize,
    pub progress: f64,
}

/// Eased progress for each of `total` items.
///
/// Item `i` gets `ease(i / (total - 1))`. A lone item gets `ease(1)`, the
/// whole transform.
pub fn progress_steps(total: usize, ease: Ease) -> Vec<TransformStep> {
    match total {
        0 => return Vec::new(),
        1 => return vec![TransformStep { index: 0, total, progress: ease.apply(1.0) }],
        _ => {}
    }

    let end = (total - 1) as f64;
    (0..total)
        .map(|index| TransformStep { index, total, progress: ease.apply(index as f64 / end) })
        .collect()
}

/// Apply `params` progressively across `items`.
///
/// Items are sorted with [`sort_by_position`] first. The first host failure
/// stops the run; items already transformed stay transformed.
pub fn ease_each<H: TransformHost>(
    host: &mut H,
    items: &[H::Item],
    params: &EaseParams,
) -> Result<Vec<TransformStep>, HostError> {
    let mut positioned = items
        .iter()
        .map(|&item| Ok(PositionedItem { item, bounds: host.bounds(item)? }))
        .collect::<Result<Vec<_>, HostError>>()?;
    sort_by_position(&mut positioned);

    let steps = progress_steps(positioned.len(), params.ease);

    for (entry, step) in positioned.iter().zip(&steps) {
        debug!(index = step.index, progress = step.progress, "ease-each step");

        if params.translates() {
            host.translate(
                entry.item,
                params.delta_x * step.progress,
                params.delta_y * step.progress,
            )?;
        }

        if params.rotates() {
            host.rotate(entry.item, params.angle * step.progress, params.anchor)?;
        }
    }

    Ok(steps)
}
