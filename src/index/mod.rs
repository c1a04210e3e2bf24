//! The forward-reference index: the algorithmic heart of the engine.
//!
//! `F[1..L]` maps each token position to the next position that plausibly
//! starts an equal R-window, built in two passes over the token store: a
//! primary pass that threads positions sharing a 32-bit rolling hash
//! (`hash1`) into chains bucketed by a prime-sized table, and a secondary
//! pass that walks each chain forward past false positives using a wider,
//! unmodded hash (`hash2`).

mod hash1;
mod hash2;
mod primes;

use crate::error::{Result, SimError};
use crate::store::TokenStore;

/// Diagnostics surfaced by `-M`.
#[derive(Debug, Clone, Copy)]
pub struct IndexStats {
    pub token_count: usize,
    /// Byte size of `T`, the token store's buffer.
    pub t_bytes: usize,
    pub prime_table_size: u64,
    pub f_bytes: usize,
}

/// `F[0..L]`, with `F[0] = 0` always. Built once per run and freed after
/// the Run Scanner has consumed it.
pub struct ForwardIndex {
    f: Vec<usize>,
    stats: IndexStats,
}

fn token_id_clamped(store: &TokenStore, pos: usize) -> u32 {
    if pos == 0 || pos > store.length() {
        0
    } else {
        store.token(pos).id
    }
}

impl ForwardIndex {
    /// Build F over the whole store for minimum run size `r`.
    pub fn build(store: &TokenStore, r: usize) -> Result<Self> {
        let l = store.length();
        let mut f = vec![0usize; l + 1];

        if l == 0 || r == 0 {
            return Ok(ForwardIndex {
                f,
                stats: IndexStats {
                    token_count: l,
                    t_bytes: store.token_bytes(),
                    prime_table_size: 0,
                    f_bytes: 0,
                },
            });
        }

        let (last_index, prime) = allocate_last_index(l)?;
        let mut last_index = last_index;

        primary_pass(store, r, prime, &mut last_index, &mut f);
        secondary_pass(store, r, &mut f);

        let stats = IndexStats {
            token_count: l,
            t_bytes: store.token_bytes(),
            prime_table_size: prime,
            f_bytes: f.len() * std::mem::size_of::<usize>(),
        };
        Ok(ForwardIndex { f, stats })
    }

    /// `forward(i)` returns `F[i]`; fails if `i = 0` or `i >= L`.
    pub fn forward(&self, i: usize) -> Result<usize> {
        let l = self.f.len() - 1;
        if i == 0 || i >= l {
            return Err(SimError::Internal(format!(
                "forward-reference lookup out of range: {i} (L = {l})"
            )));
        }
        Ok(self.f[i])
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Release F. Named to match the spec's explicit access contract;
    /// ordinary `Drop` would do the same, but the driver calls this
    /// explicitly once the Run Scanner has finished with the index.
    pub fn free(self) {
        drop(self);
    }
}

/// Allocate `last_index`, stepping down through the prime table on
/// allocation failure. Returns the table and the prime actually chosen.
fn allocate_last_index(l: usize) -> Result<(Vec<usize>, u64)> {
    let mut prime = primes::smallest_at_least(l).ok_or(SimError::OutOfMemory)?;
    loop {
        let mut v: Vec<usize> = Vec::new();
        if v.try_reserve_exact(prime as usize).is_ok() {
            v.resize(prime as usize, 0);
            return Ok((v, prime));
        }
        match primes::step_down(prime) {
            Some(smaller) => prime = smaller,
            None => return Err(SimError::OutOfMemory),
        }
    }
}

fn primary_pass(
    store: &TokenStore,
    r: usize,
    prime: u64,
    last_index: &mut [usize],
    f: &mut [usize],
) {
    for text in store.texts() {
        if text.len() < r {
            continue;
        }
        for i in text.start..=(text.limit - r) {
            if !store.token(i).may_start_run {
                continue;
            }
            let h = hash1::hash1(r, |offset| store.token(i + offset).id);
            let bucket = (h as u64 % prime) as usize;
            let prev = last_index[bucket];
            if prev != 0 {
                f[prev] = i;
            }
            last_index[bucket] = i;
        }
    }
}

fn secondary_pass(store: &TokenStore, r: usize, f: &mut [usize]) {
    let l = store.length();
    if l < r {
        return;
    }
    for i in 1..=(l - r) {
        let h2 = hash2::hash2(|offset| token_id_clamped(store, i + offset));
        let mut j = f[i];
        while j != 0 {
            let h2j = hash2::hash2(|offset| token_id_clamped(store, j + offset));
            if h2j == h2 {
                break;
            }
            j = f[j];
        }
        f[i] = j;
    }
}
