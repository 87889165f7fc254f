// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    // Using a raw string literal for the multi-line banner
    let banner = r#"
                 _ _
__   _____ _ __(_) | ___   __ _
\ \ / / _ \ '__| | |/ _ \ / _` |
 \ V /  __/ |  | | | (_) | (_| |
  \_/ \___|_|  |_|_|\___/ \__, |
                          |___/

    Verilog Compile & Simulate Service
"#;
    println!("{}", banner);
}
