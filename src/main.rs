use calcex::RealCalculator;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calculator = RealCalculator::default();
    let mut buffer = String::new();
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    loop {
        stdout.write_all("> ".as_bytes())?;
        stdout.flush()?;
        buffer.clear();
        if stdin.read_line(&mut buffer)? == 0 || buffer.trim().is_empty() {
            break;
        }
        match calculator.evaluate(buffer.trim()) {
            Ok(x) => println!("{x}"),
            Err(e) => eprintln!("Error {e}"),
        }
    }
    Ok(())
}
