use std::collections::HashSet;

use rand::Rng;

pub const ACTIVATION_CODE_LENGTH: usize = 8;

// No 0/O or 1/I, so codes survive being read out over the phone.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub fn generate_activation_code() -> String {
    let mut rng = rand::thread_rng();
    (0..ACTIVATION_CODE_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generates `count` codes, distinct from each other and from `taken`.
pub fn generate_distinct_codes(count: usize, taken: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(count);
    let mut codes = Vec::with_capacity(count);
    while codes.len() < count {
        let code = generate_activation_code();
        if !taken.contains(&code) && seen.insert(code.clone()) {
            codes.push(code);
        }
    }
    codes
}
