#![no_main]

use arbitrary::Arbitrary;
use futures::executor::block_on;
use libfuzzer_sys::fuzz_target;
use zenconvert::{ConvertOptions, ConvertRequest, DataType};

#[derive(Arbitrary, Debug)]
struct Input {
    data: Vec<u8>,
    url_safe: bool,
    data_url: bool,
}

// Base64 output of any options decodes back to the original bytes.
fuzz_target!(|input: Input| {
    let options = ConvertOptions::default()
        .with_url_safe(input.url_safe)
        .with_data_url(input.data_url);

    let encoded = block_on(
        ConvertRequest::new(input.data.clone())
            .with_options(&options)
            .to_base64(),
    )
    .expect("bytes always encode");

    if encoded.is_empty() {
        return;
    }
    let source = if input.url_safe && !input.data_url {
        DataType::Base64Url
    } else {
        DataType::Base64
    };
    let decoded = block_on(ConvertRequest::new(encoded).with_source(source).to_bytes())
        .expect("encoded output always decodes");
    assert_eq!(&decoded[..], &input.data[..]);
});
