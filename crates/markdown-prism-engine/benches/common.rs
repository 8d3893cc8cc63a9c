// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold**, *italic* and `code`.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_inline_content(spans: usize) -> String {
    let mut content = String::new();
    for i in 0..spans {
        content.push_str(&format!(
            "word{i} **bold {i}** <sub>{i}</sub> ![img](u{i}) "
        ));
    }
    content
}
