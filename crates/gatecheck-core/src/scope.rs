//! Scope extraction: how much surrounding text a rule may inspect.
//!
//! Two extractors, both pure functions over a slice of lines:
//!
//! - [`preceding_window`] — a fixed-size backward line window.
//! - [`balanced_block`] — a syntactically-bounded block found by balanced
//!   delimiter counting from a signature line.
//!
//! The block scan is deliberately line-based and textual, not a lexer:
//! braces inside string or char literals are counted too. Scope here serves
//! heuristic gating, not parsing correctness.

/// State of the balanced-block scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockScan {
    /// Before the first opening delimiter has been seen.
    SeekingOpen,
    /// Inside the block; balance is positive.
    Counting,
}

/// Returns up to `window` lines strictly preceding `index`.
///
/// The slice is empty when `index` is 0; a window larger than the available
/// prefix is clamped to the start of the file.
#[must_use]
pub fn preceding_window<'a>(lines: &'a [&'a str], index: usize, window: usize) -> &'a [&'a str] {
    let index = index.min(lines.len());
    let start = index.saturating_sub(window);
    &lines[start..index]
}

/// Finds the balanced `{`..`}` block starting at the signature line `start`.
///
/// Scans forward at most `max_lookahead` lines (counting from `start`),
/// tracking the running balance of opening vs closing braces. Returns the
/// inclusive line range `(start, end)` where `end` is the line on which the
/// balance first returns to zero after the first `{`.
///
/// Returns `None` when no opening brace appears within the bound, or the
/// balance never closes within it — the caller treats that as "body not
/// found" and skips rather than guessing a range. Closing braces seen before
/// the first opening brace are ignored; trailing text on the signature line
/// (`} else {` style carry-over) must not poison the count.
#[must_use]
pub fn balanced_block(
    lines: &[&str],
    start: usize,
    max_lookahead: usize,
) -> Option<(usize, usize)> {
    if start >= lines.len() {
        return None;
    }

    let mut state = BlockScan::SeekingOpen;
    let mut balance: usize = 0;
    let bound = start.saturating_add(max_lookahead).min(lines.len());

    for (i, line) in lines.iter().enumerate().take(bound).skip(start) {
        for ch in line.chars() {
            match ch {
                '{' => {
                    balance += 1;
                    state = BlockScan::Counting;
                }
                '}' if state == BlockScan::Counting => {
                    balance -= 1;
                    if balance == 0 {
                        return Some((start, i));
                    }
                }
                _ => {}
            }
        }
    }

    None
}
