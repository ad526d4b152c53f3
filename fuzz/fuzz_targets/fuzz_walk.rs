// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(entries) = safeparcel::walk(data) {
        for entry in entries {
            let Ok(entry) = entry else { break };
            assert!(entry.offset + entry.payload.len() <= data.len());
        }
    }
});
