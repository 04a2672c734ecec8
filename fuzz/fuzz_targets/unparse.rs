#![no_main]
use libfuzzer_sys::fuzz_target;

use calcex::IntegerCalculator;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let calculator = IntegerCalculator::default();
        if let Ok(expr) = calculator.parse(s) {
            let unparsed = expr.unparse();
            let reparsed = calculator.parse(&unparsed).unwrap();
            assert_eq!(reparsed.unparse(), unparsed);
            let _ = expr.simplify().eval();
        }
    }
});
