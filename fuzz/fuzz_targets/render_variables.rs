// SPDX-License-Identifier: Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use secapi_core::TemplateValues;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let values = TemplateValues::from([
            ("first".to_string(), "5".to_string()),
            ("name".to_string(), "\"x\"".to_string()),
        ]);
        let _ = secapi_core::query::render_variables(s, &values);
    }
});
