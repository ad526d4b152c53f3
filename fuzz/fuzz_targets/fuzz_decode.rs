// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use safeparcel::schema::RecordDescriptorBuilder;
use safeparcel::{decode, encode, FieldKind, RecordDescriptor};
use std::sync::OnceLock;

fn descriptor() -> &'static RecordDescriptor {
    static DESCRIPTOR: OnceLock<RecordDescriptor> = OnceLock::new();
    DESCRIPTOR.get_or_init(|| {
        let item = RecordDescriptorBuilder::new("Item")
            .required(1, FieldKind::Int32)
            .field(2, FieldKind::String)
            .build_handle()
            .expect("item");
        RecordDescriptorBuilder::new("Envelope")
            .version()
            .field(1, FieldKind::Int64)
            .field(2, FieldKind::Float64)
            .field(3, FieldKind::Bytes)
            .field(4, FieldKind::StringArray)
            .record(5, &item)
            .record_array(6, &item)
            .field(7, FieldKind::Bool)
            .build()
            .expect("envelope")
    })
}

fuzz_target!(|data: &[u8]| {
    // Whatever decodes must re-encode to a fixed point. Bytes are compared
    // rather than values so NaN payloads still match.
    if let Ok(values) = decode(descriptor(), data) {
        let bytes = encode(descriptor(), &values).expect("decoded values re-encode");
        let again = decode(descriptor(), &bytes).expect("re-encoded bytes decode");
        let rewritten = encode(descriptor(), &again).expect("second encode");
        assert_eq!(bytes, rewritten);
    }
});
