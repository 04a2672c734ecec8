#![no_main]
use libfuzzer_sys::fuzz_target;

use calcex::eval_str;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = eval_str::<f64>(s);
        let _ = eval_str::<i64>(s);
        let _ = eval_str::<i8>(s);
    }
});
