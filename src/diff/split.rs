use crate::config::DiffConfig;

/// Split text into lines on `\n` or `\r\n`.
///
/// An empty input yields a single empty line. With `drop_trailing_empty_line`
/// set, the empty line produced by a final newline is dropped.
pub fn split_lines<'a>(text: &'a str, config: &DiffConfig) -> Vec<&'a str> {
    let mut pieces: Vec<&str> = text.split('\n').collect();
    let last = pieces.len() - 1;

    // Only pieces that were followed by '\n' can end in the '\r' of a CRLF
    for piece in pieces.iter_mut().take(last) {
        if let Some(stripped) = piece.strip_suffix('\r') {
            *piece = stripped;
        }
    }

    if config.drop_trailing_empty_line && pieces.len() > 1 && pieces[last].is_empty() {
        pieces.pop();
    }

    pieces
}
