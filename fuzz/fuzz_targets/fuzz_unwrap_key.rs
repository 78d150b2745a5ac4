#![no_main]

use jwkit::{JwkParams, SymmetricJwk};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(kek) = SymmetricJwk::from_bytes(&[0x42; 32], JwkParams::new()) else {
        return;
    };
    for alg in ["A256KW", "A256GCMKW", "dir"] {
        let _ = kek.unwrap_key(data, Some(alg));
    }
});
