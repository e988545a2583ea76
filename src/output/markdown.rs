//! Terminal rendering of documentation markdown
//!
//! Only line-level structure is styled: headings, fenced code blocks and
//! block quotes. Everything else is printed as written.

use colored::Colorize;

const FENCE: &str = "```";

/// Style a markdown document for the terminal
pub fn render(markdown: &str) -> String {
    let mut in_code = false;
    let mut out = Vec::new();

    for line in markdown.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with(FENCE) {
            in_code = !in_code;
            out.push(line.dimmed().to_string());
        } else if in_code {
            out.push(line.yellow().to_string());
        } else if let Some(level) = heading_level(trimmed) {
            let text = trimmed[level..].trim();
            out.push(match level {
                1 => text.bold().underline().cyan().to_string(),
                2 => text.bold().cyan().to_string(),
                _ => text.bold().to_string(),
            });
        } else if let Some(quote) = trimmed.strip_prefix('>') {
            out.push(format!("{} {}", "│".dimmed(), quote.trim_start().italic()));
        } else {
            out.push(line.to_string());
        }
    }

    out.join("\n")
}

fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|&c| c == '#').count();
    let rest = &line[level..];
    let valid = (1..=6).contains(&level) && (rest.is_empty() || rest.starts_with(' '));
    valid.then_some(level)
}
