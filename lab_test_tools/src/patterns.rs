use std::env;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use rand::prelude::*;

/// Provides a set of input patterns for testing and benchmarking the lab
/// kernels. Limited to i32 values, like the labs themselves.

// --- Public ---

/// The deterministic lab fill: `v[0]` from the seed, then
/// `v[i] = ((v[i-1] + 1) * i * 104723) mod len`.
///
/// Not random at all, but spread out enough to exercise a sort, and exactly
/// reproducible across runs and languages.
pub fn recurrence(len: usize) -> Vec<i32> {
    recurrence_with_seed(len, random_init_seed())
}

pub fn recurrence_with_seed(len: usize, seed: u64) -> Vec<i32> {
    let modulus = len.max(1) as i128;
    let mut v = Vec::with_capacity(len);
    let mut prev = (seed % modulus as u64) as i128;
    for i in 0..len {
        let val = if i == 0 {
            prev
        } else {
            ((prev + 1) * i as i128 * 104_723) % modulus
        };
        v.push(val as i32);
        prev = val;
    }
    v
}

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = new_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::
    let mut rng = new_rng();
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    (0..len).map(|_| 66).collect::<Vec<_>>()
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect::<Vec<_>>()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect::<Vec<_>>()
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);
    let saw_directions = random_uniform((len / chunks_size.max(1)) + 1, 0..=1);

    for (i, chunk) in vals.chunks_mut(chunks_size.max(1)).enumerate() {
        if saw_directions[i] == 0 {
            chunk.sort();
        } else {
            chunk.sort_by_key(|&e| std::cmp::Reverse(e));
        }
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random(len);

    let first_half = &mut vals[0..(len / 2)];
    first_half.sort();

    let second_half = &mut vals[(len / 2)..len];
    second_half.sort_by_key(|&e| std::cmp::Reverse(e));

    vals
}

/// The per-process seed all random patterns derive from. Printed by the test
/// harness and overridable via the OVERRIDE_SEED env var, so failures
/// reproduce.
pub fn random_init_seed() -> u64 {
    static SEED: OnceCell<u64> = OnceCell::new();

    *SEED.get_or_init(|| {
        env::var("OVERRIDE_SEED")
            .ok()
            .map(|seed| u64::from_str(&seed).expect("OVERRIDE_SEED must be a u64"))
            .unwrap_or_else(|| thread_rng().gen())
    })
}

// --- Private ---

fn new_rng() -> StdRng {
    rand::SeedableRng::seed_from_u64(random_init_seed())
}
