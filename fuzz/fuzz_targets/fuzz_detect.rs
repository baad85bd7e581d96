#![no_main]

use std::future::IntoFuture;

use futures::executor::block_on;
use libfuzzer_sys::fuzz_target;
use zenconvert::{DataType, Value, convert_to, detect};

// Any string detects as a textual tag and converts to bytes under that tag.
// A string accepted under a base64 hint always decodes.
fuzz_target!(|input: &str| {
    let tag = detect(&Value::from(input)).expect("strings always detect");
    assert!(tag.is_textual());

    let conversion = convert_to(DataType::Bytes, input, Some(tag)).expect("detected tag accepted");
    block_on(conversion.into_future()).expect("detected string converts to bytes");

    for hint in [DataType::Base64, DataType::Base64Url] {
        if let Ok(conversion) = convert_to(DataType::Bytes, input, Some(hint)) {
            block_on(conversion.into_future()).expect("accepted base64 decodes");
        }
    }
});
