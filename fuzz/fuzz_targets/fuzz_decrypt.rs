#![no_main]

use jwkit::{Jwk, JwkParams, SymmetricJwk};
use libfuzzer_sys::fuzz_target;

const ALGS: [&str; 6] = [
    "A128GCM",
    "A192GCM",
    "A256GCM",
    "A128CBC-HS256",
    "A192CBC-HS384",
    "A256CBC-HS512",
];

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let (selector, rest) = data.split_at(1);
    let alg = ALGS[usize::from(selector[0]) % ALGS.len()];
    let Ok(jwk) = SymmetricJwk::generate_for_alg(alg, JwkParams::new()) else {
        return;
    };
    // Hostile iv/tag/ciphertext must fail cleanly, never panic
    let split = rest.len() / 3;
    let (iv, tail) = rest.split_at(split);
    let (tag, ciphertext) = tail.split_at(split.min(tail.len()));
    let _ = jwk.decrypt(ciphertext, tag, iv, None, None);
});
