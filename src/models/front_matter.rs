//! YAML front matter handling
//!
//! Registry documents usually start with a YAML header fenced by `---`
//! lines. The header is metadata for the registry site; only the Markdown
//! body is shown.

use serde_yaml::{Mapping, Value};

const DELIMITER: &str = "---";

/// Split a document into its front matter and Markdown body.
///
/// The header is only recognised when the very first line is `---` and a
/// later line is `---` as well. A header that is not valid YAML (or not a
/// mapping) is dropped and the body after it is still returned. Without a
/// header the whole text is the body.
pub fn split_front_matter(contents: &str) -> (Mapping, String) {
    let mut lines = contents.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return (Mapping::new(), String::new());
    };
    if trim_eol(first) != DELIMITER {
        return (Mapping::new(), contents.to_string());
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if trim_eol(line) == DELIMITER {
            let header = &contents[header_start..offset];
            let body = &contents[offset + line.len()..];
            return (parse_header(header), body.to_string());
        }
        offset += line.len();
    }

    (Mapping::new(), contents.to_string())
}

/// Markdown body of a document, front matter removed
pub fn strip_front_matter(contents: &str) -> String {
    split_front_matter(contents).1
}

fn parse_header(header: &str) -> Mapping {
    match serde_yaml::from_str::<Value>(header) {
        Ok(Value::Mapping(map)) => map,
        Ok(Value::Null) => Mapping::new(),
        Ok(_) => {
            log::debug!("Front matter is not a mapping, ignoring it");
            Mapping::new()
        }
        Err(e) => {
            log::debug!("Malformed front matter: {}", e);
            Mapping::new()
        }
    }
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches('\n').trim_end_matches('\r')
}
