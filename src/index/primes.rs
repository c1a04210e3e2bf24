//! The ascending prime table used to size `last_index` in the primary pass.
//!
//! The spec calls for primes of the form `4k+3`, each at least twice the
//! previous, spanning from ~14,000 to ~9.4×10^11. Rather than transcribe
//! ~30 large numbers by hand (and risk a silent primality mistake with no
//! toolchain to catch it), the table is generated once by trial division
//! and cached for the process lifetime.

use std::sync::OnceLock;

const FIRST: u64 = 14_009; // smallest table entry, ≡ 3 (mod 4), prime
const LAST_MIN: u64 = 940_000_000_000; // table must reach at least this far

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest prime `p >= from` with `p % 4 == 3`.
fn next_prime_4k_plus_3(from: u64) -> u64 {
    let mut n = from;
    if n % 4 != 3 {
        n += 3 - (n % 4) % 4;
        if n < from {
            n += 4;
        }
    }
    loop {
        if is_prime(n) {
            return n;
        }
        n += 4;
    }
}

fn build_prime_table() -> Vec<u64> {
    let mut table = Vec::new();
    let mut p = next_prime_4k_plus_3(FIRST);
    table.push(p);
    while *table.last().unwrap() < LAST_MIN {
        let next_floor = p.saturating_mul(2);
        p = next_prime_4k_plus_3(next_floor);
        table.push(p);
    }
    table
}

fn table() -> &'static [u64] {
    static TABLE: OnceLock<Vec<u64>> = OnceLock::new();
    TABLE.get_or_init(build_prime_table)
}

/// The smallest table entry `>= l`, or `None` if `l` exceeds the table's
/// reach (in practice this only happens for absurdly large token arrays).
pub fn smallest_at_least(l: usize) -> Option<u64> {
    table().iter().copied().find(|&p| p >= l as u64)
}

/// Step down to the next-smaller entry in the table, for the degraded-hash
/// fallback under memory pressure. `None` once the table is exhausted.
pub fn step_down(current: u64) -> Option<u64> {
    let t = table();
    let idx = t.iter().position(|&p| p == current)?;
    if idx == 0 {
        None
    } else {
        Some(t[idx - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_is_prime_and_3_mod_4() {
        let t = table();
        assert!(is_prime(t[0]));
        assert_eq!(t[0] % 4, 3);
    }

    #[test]
    fn table_is_strictly_doubling_or_more() {
        let t = table();
        for w in t.windows(2) {
            assert!(w[1] >= w[0] * 2, "{} should be >= 2*{}", w[1], w[0]);
            assert_eq!(w[1] % 4, 3);
            assert!(is_prime(w[1]));
        }
    }

    #[test]
    fn table_reaches_required_span() {
        let t = table();
        assert!(*t.first().unwrap() <= 20_000);
        assert!(*t.last().unwrap() >= LAST_MIN);
    }

    #[test]
    fn smallest_at_least_picks_correct_entry() {
        let p = smallest_at_least(100).unwrap();
        assert!(p >= 100);
        assert!(is_prime(p));
    }

    #[test]
    fn step_down_moves_to_smaller_entry() {
        let t = table();
        let stepped = step_down(t[1]).unwrap();
        assert_eq!(stepped, t[0]);
        assert!(step_down(t[0]).is_none());
    }
}
