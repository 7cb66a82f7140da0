#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use rampshare::SecretSharing;

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub threshold: u8,
    pub secret: Vec<u8>,
    pub n_shares: u8,
}

fuzz_target!(|params: Parameters| {
    let sss = SecretSharing::default();
    let _shares = sss.split(
        &params.secret,
        params.n_shares as usize,
        params.threshold as usize,
    );
});
