//! Template matching over a bounded search window.

use ndarray::{ArrayView3, Zip, s};

use crate::tracker::frame::{COLOR_CHANNELS, Frame};
use crate::tracker::rect::PatchRect;

/// Best candidate found by [`search_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub rect: PatchRect,
    pub score: u64,
}

/// Similarity between two equally sized patches.
///
/// Sums the inverted absolute difference (`255 - |a - b|`) over the color
/// channels of every `stride`-th pixel in both directions. Higher is better;
/// identical patches score the maximum. Returns `None` when the patches differ
/// in shape or have fewer than three channels.
pub fn match_score(
    template: &ArrayView3<u8>,
    candidate: &ArrayView3<u8>,
    stride: usize,
) -> Option<u64> {
    if template.dim() != candidate.dim() || template.dim().2 < COLOR_CHANNELS {
        return None;
    }
    let step = stride.max(1) as isize;
    let t = template.slice(s![..;step, ..;step, ..COLOR_CHANNELS]);
    let c = candidate.slice(s![..;step, ..;step, ..COLOR_CHANNELS]);

    Some(
        Zip::from(&t)
            .and(&c)
            .fold(0u64, |acc, &a, &b| acc + u64::from(u8::MAX - a.abs_diff(b))),
    )
}

/// Search every even pixel offset within `radius` of `previous` for the patch
/// most similar to `template`.
///
/// Offsets are scanned row by row, top to bottom and left to right; on equal
/// scores the first candidate wins. Candidates that leave the frame are
/// skipped. Returns `None` when no candidate fits or the template
/// shape does not match `previous` and the frame format.
pub fn search_window(
    frame: &Frame<'_>,
    template: &ArrayView3<u8>,
    previous: PatchRect,
    radius: usize,
    stride: usize,
) -> Option<MatchResult> {
    let size = previous.size;
    if template.dim() != (size, size, frame.channels()) {
        return None;
    }
    let reach = (radius / 2 * 2) as i64;
    let pixels = frame.pixels();

    let mut best: Option<MatchResult> = None;
    for dy in (-reach..=reach).step_by(2) {
        for dx in (-reach..=reach).step_by(2) {
            let Some(rect) = PatchRect::at(
                previous.x as i64 + dx,
                previous.y as i64 + dy,
                size,
                frame.width(),
                frame.height(),
            ) else {
                continue;
            };

            let candidate = pixels.slice(s![rect.y..rect.y + size, rect.x..rect.x + size, ..]);
            let Some(score) = match_score(template, &candidate, stride) else {
                continue;
            };
            if best.is_none_or(|b| score > b.score) {
                best = Some(MatchResult { rect, score });
            }
        }
    }
    best
}
