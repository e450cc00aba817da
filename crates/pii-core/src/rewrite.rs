//! Single-pass text rewriter

use crate::placeholder::GENERIC_PLACEHOLDER;
use crate::span::Span;

/// Replace every span in `text`, copying everything else verbatim
///
/// `spans` must come out of [`crate::reconcile`]: ordered by start, disjoint,
/// on char boundaries. No validation happens here.
pub fn rewrite(text: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for span in spans {
        out.push_str(&text[cursor..span.start]);
        match span.replacement.render(&text[span.start..span.end]) {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(GENERIC_PLACEHOLDER),
        }
        cursor = span.end;
    }

    out.push_str(&text[cursor..]);
    out
}
