#![no_main]
use htmlwhitelist::{sanitize, SanitizePolicy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let policy: SanitizePolicy = "p b i a[href|title] img[src|alt] br"
        .parse()
        .expect("static policy parses");

    let once = sanitize(input, &policy);
    // Sanitized output must come back unchanged
    let twice = sanitize(&once, &policy);
    assert_eq!(once, twice, "input: {:?}", input);
    assert!(!once.contains("<script"), "input: {:?}", input);
});
