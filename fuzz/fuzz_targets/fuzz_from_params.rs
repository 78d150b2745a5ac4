#![no_main]

use jwkit::{Jwk, JwkParams, OkpJwk, SymmetricJwk};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Lines of `name=value` become a parameter mapping
    let params: JwkParams = data
        .lines()
        .filter_map(|line| line.split_once('='))
        .collect();
    let oct: JwkParams = params.iter().collect();
    if let Ok(jwk) = SymmetricJwk::from_params(oct) {
        let _ = jwk.thumbprint();
        let _ = jwk.supported_encryption_algorithms();
    }
    if let Ok(jwk) = OkpJwk::from_params(params) {
        let _ = jwk.thumbprint();
        let _ = jwk.public_jwk();
        let _ = jwk.eddsa();
    }
});
