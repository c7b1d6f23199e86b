use sha2::{Digest, Sha256};

use crate::ReportParts;

pub const REPORT_SUBTITLE: &str = "Master Level Educational Analysis Report";
pub const REPORT_FOOTER: &str = "Mathematical Education Research & Design Institute";

/// Assembles the printable markdown document: topic header, the stage
/// outputs that exist, and the institute footer.
pub fn build_report_document(topic: &str, generated_utc: &str, parts: &ReportParts) -> String {
    let mut doc = String::new();
    doc.push_str(&format!("# {topic}\n\n"));
    doc.push_str(&format!("*{REPORT_SUBTITLE}*\n\n"));
    if !generated_utc.is_empty() {
        doc.push_str(&format!("Generated: {generated_utc}\n\n"));
    }
    for part in [&parts.part1, &parts.part2, &parts.part3] {
        if part.is_empty() {
            continue;
        }
        doc.push_str("---\n\n");
        doc.push_str(part.trim_end());
        doc.push_str("\n\n");
    }
    doc.push_str("---\n\n");
    doc.push_str(REPORT_FOOTER);
    doc.push('\n');
    doc
}

/// Windows-safe, deterministic filename: `{sanitized_topic}--{short_hash(topic)}.md`
pub fn report_filename(topic: &str) -> String {
    let sanitized = sanitize_topic(topic);
    let hash = short_hash(topic);
    format!("{sanitized}--{hash}.md")
}

fn sanitize_topic(input: &str) -> String {
    let mut cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.is_empty() {
        cleaned = "analysis".to_string();
    }
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    let mut final_name = truncate_at_boundary(compacted, 80);
    if is_reserved_windows_name(&final_name) {
        final_name.push('_');
    }
    final_name
}

fn truncate_at_boundary(mut name: String, max_bytes: usize) -> String {
    if name.len() <= max_bytes {
        return name;
    }
    let mut end = max_bytes;
    while end > 0 && !name.is_char_boundary(end) {
        end -= 1;
    }
    name.truncate(end);
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
