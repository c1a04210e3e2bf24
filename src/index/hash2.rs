//! Secondary hash: a wider (64-bit), never-modded sample-based hash used as
//! a direct equality key during chain cleanup.
//!
//! Its five sample positions are fixed at `{0, 23, 11, 5, 17}` regardless of
//! R — not scaled to the window the way `hash1`'s 24 samples are. This is
//! the source's under-documented behavior the design notes call out
//! ("implementers should mirror it exactly"), not an oversight here.

const LAST: usize = 23;
const WIDTH: u32 = 64;

fn sample_positions() -> [usize; 5] {
    [0, LAST, LAST / 2, LAST / 4, 3 * LAST / 4]
}

/// Compute `hash2` for the window starting at global position `i`.
/// `token_id(pos)` may be called for `pos` up to `i + 23`, which can run
/// past `i + r` when `r < 24`; `token_id` should return the sentinel id for
/// any position outside the token array rather than panic.
pub fn hash2(mut token_id: impl FnMut(usize) -> u32) -> u64 {
    let mut acc: u64 = 0;
    for (k, pos) in sample_positions().into_iter().enumerate() {
        let shift = (WIDTH as usize * k) / 5;
        acc ^= (token_id(pos) as u64) << shift;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_40_bits_wide() {
        assert!(WIDTH >= 40);
    }

    #[test]
    fn deterministic_for_same_window() {
        let ids = [9u32, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        let f = |pos: usize| ids[pos % ids.len()];
        assert_eq!(hash2(f), hash2(f));
    }

    #[test]
    fn differs_for_different_content() {
        let a = |pos: usize| pos as u32;
        let b = |pos: usize| (pos as u32).wrapping_mul(17) + 3;
        assert_ne!(hash2(a), hash2(b));
    }

    #[test]
    fn sample_positions_fixed_regardless_of_caller() {
        assert_eq!(sample_positions(), [0, 23, 11, 5, 17]);
    }
}
