use crate::sections::SectionItem;

/// Merge adjacent comment runs within one section's item sequence.
///
/// Comments are buffered until a non-comment item (or the end of the
/// section) flushes them: a single buffered line becomes `% text`, two or
/// more become one `<!-- ... -->` block with one line each.
pub fn merge(items: Vec<SectionItem>) -> Vec<SectionItem> {
    let mut out = Vec::with_capacity(items.len());
    let mut buffer: Vec<String> = Vec::new();

    for item in items {
        match item {
            SectionItem::Comment(raw) => buffer.extend(clean_lines(&raw)),
            other => {
                flush(&mut buffer, &mut out);
                out.push(other);
            }
        }
    }
    flush(&mut buffer, &mut out);
    out
}

fn flush(buffer: &mut Vec<String>, out: &mut Vec<SectionItem>) {
    match buffer.len() {
        0 => {}
        1 => out.push(SectionItem::Comment(format!("% {}", buffer[0]))),
        _ => out.push(SectionItem::Comment(format!(
            "<!--\n{}\n-->",
            buffer.join("\n")
        ))),
    }
    buffer.clear();
}

/// Strip the source comment markers (`#` and padding) from each line and
/// drop blank lines.
fn clean_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().trim_matches(|c| c == '#' || c == ' '))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
