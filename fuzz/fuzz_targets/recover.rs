#![no_main]
use core::convert::TryFrom;
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use rampshare::{SecretSharing, Share};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub shares: Vec<Vec<u8>>,
}

fuzz_target!(|params: Parameters| {
    let shares: Vec<Share> = params
        .shares
        .iter()
        .filter_map(|bytes| Share::try_from(bytes.as_slice()).ok())
        .collect();

    let sss = SecretSharing::default();
    let _secret = sss.reconstruct(&shares);
});
