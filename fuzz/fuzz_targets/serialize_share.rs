#![no_main]
use core::convert::TryFrom;
use libfuzzer_sys::fuzz_target;

use rampshare::Share;

fuzz_target!(|data: &[u8]| {
    if let Ok(share) = Share::try_from(data) {
        // Parsed coordinates are at most one word wide, so serialization
        // cannot refuse them.
        let bytes = Vec::<u8>::try_from(&share).expect("parsed share must serialize");
        let reparsed = Share::try_from(bytes.as_slice()).expect("serialized share must parse");
        assert_eq!(reparsed, share);
    }
});
