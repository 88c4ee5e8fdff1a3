//! Minimal HTML scanning helpers for the scraper.
//!
//! Not a parser: elements are located by tag name and class tokens, and the
//! matching close tag is found by counting nested opens of the same tag. That
//! is enough for the handful of page fragments the scraper reads.

/// Elements that never have a closing tag.
const VOID_TAGS: &[&str] = &["img", "source", "br", "meta", "link", "input", "hr"];

/// Returns true if `lc[pos..]` opens `<tag` (and not a longer tag name).
fn is_open_at(lc: &str, pos: usize, tag: &str) -> bool {
    let rest = &lc[pos..];
    if !rest.starts_with('<') || !rest[1..].starts_with(tag) {
        return false;
    }
    matches!(
        rest.as_bytes().get(1 + tag.len()),
        Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
    )
}

fn find_open(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let needle = format!("<{tag}");
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&needle) {
        let at = pos + rel;
        if is_open_at(lc, at, tag) {
            return Some(at);
        }
        pos = at + needle.len();
    }
    None
}

/// Byte offset just past the element starting at `start`.
fn element_end(lc: &str, tag: &str, start: usize) -> Option<usize> {
    let open_end = lc[start..].find('>')? + start + 1;
    if VOID_TAGS.contains(&tag) || lc[start..open_end].ends_with("/>") {
        return Some(open_end);
    }

    let close = format!("</{tag}");
    let mut depth = 1usize;
    let mut pos = open_end;
    loop {
        let next_close = lc[pos..].find(&close)? + pos;
        match find_open(lc, tag, pos) {
            Some(open) if open < next_close => {
                depth += 1;
                pos = open + 1;
            }
            _ => {
                depth -= 1;
                let end = lc[next_close..].find('>')? + next_close + 1;
                if depth == 0 {
                    return Some(end);
                }
                pos = end;
            }
        }
    }
}

/// The opening tag of an element block, e.g. `<a href="..." class="x">`.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(gt) => &block[..=gt],
        None => block,
    }
}

/// Value of attribute `name` on the block's opening tag.
pub fn attr(block: &str, name: &str) -> Option<String> {
    let tag = open_tag(block);
    let lc = tag.to_ascii_lowercase();
    let needle = format!("{}=", name.to_ascii_lowercase());

    let mut pos = 0;
    while let Some(rel) = lc[pos..].find(&needle) {
        let at = pos + rel;
        pos = at + needle.len();
        let preceded_by_space = lc[..at].ends_with(|c: char| c.is_ascii_whitespace());
        if !preceded_by_space {
            continue;
        }
        let rest = &tag[pos..];
        let quote = rest.chars().next()?;
        return if quote == '"' || quote == '\'' {
            let body = &rest[1..];
            body.find(quote).map(|end| decode_entities(&body[..end]))
        } else {
            let end = rest
                .find(|c: char| c.is_ascii_whitespace() || c == '>')
                .unwrap_or(rest.len());
            Some(decode_entities(&rest[..end]))
        };
    }
    None
}

fn has_classes(block: &str, class: &str) -> bool {
    let Some(classes) = attr(block, "class") else {
        return class.is_empty();
    };
    let present: Vec<&str> = classes.split_whitespace().collect();
    class.split_whitespace().all(|wanted| present.contains(&wanted))
}

/// All `tag` elements carrying every class token in `class` (empty matches any),
/// in document order. Nested matches are returned too.
pub fn elements<'a>(html: &'a str, tag: &str, class: &str) -> Vec<&'a str> {
    let lc = html.to_ascii_lowercase();
    let tag = tag.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_open(&lc, &tag, pos) {
        pos = start + 1;
        let Some(end) = element_end(&lc, &tag, start) else {
            break;
        };
        let block = &html[start..end];
        if class.is_empty() || has_classes(block, class) {
            out.push(block);
        }
    }
    out
}

/// First `tag` element carrying every class token in `class`.
pub fn element<'a>(html: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    elements(html, tag, class).into_iter().next()
}

/// Markup between the opening and closing tag of a block.
pub fn inner(block: &str) -> &str {
    let start = open_tag(block).len();
    match block.rfind("</") {
        Some(close) if close >= start => &block[start..close],
        _ => "",
    }
}

pub fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&rsquo;", "'")
        .replace("&lsquo;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of a fragment with whitespace collapsed.
pub fn text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&out))
}

/// Visible text split at tag boundaries, one non-empty trimmed line per text run.
pub fn text_lines(fragment: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => {
                in_tag = true;
                lines.push(std::mem::take(&mut current));
            }
            '>' => in_tag = false,
            '\n' if !in_tag => lines.push(std::mem::take(&mut current)),
            _ if !in_tag => current.push(ch),
            _ => {}
        }
    }
    lines.push(current);

    lines
        .iter()
        .map(|l| normalize_ws(&decode_entities(l)))
        .filter(|l| !l.is_empty())
        .collect()
}
