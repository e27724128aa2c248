#![no_main]
use htmlwhitelist::AllowList;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(list) = text.parse::<AllowList>() {
        let rendered = list.to_string();
        assert_eq!(rendered.parse::<AllowList>().ok(), Some(list));
    }
});
