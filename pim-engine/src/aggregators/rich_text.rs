//! Rich text markup
//!
//! Catalog texts are fragments of `<FT>` paragraphs holding plain text and
//! one level of inline formatting tags:
//!
//! ```text
//! <FT>Quiet <b>EC</b> motor</FT><FT/>
//! ```
//!
//! Only top-level `FT` elements become paragraphs. Markup that is not
//! well-formed is rejected.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use shared::models::{EMPTY_PARAGRAPH, Paragraph, Run};

use crate::core::error::{EngineError, EngineResult};

const PARAGRAPH_TAG: &str = "FT";

// Depth of open elements while inside the synthetic wrapper
const PARAGRAPH_DEPTH: usize = 2;
const INLINE_DEPTH: usize = 3;

/// Inline tag to format key; unknown tags keep their own name
fn inline_format(tag: &str) -> &str {
    match tag {
        "b" => "bold",
        "i" => "italic",
        "u" => "underline",
        "bl" => "bullet",
        other => other,
    }
}

#[derive(Default)]
struct Inline {
    format: String,
    text: String,
    nested: bool,
}

#[derive(Default)]
struct Draft {
    runs: Vec<Run>,
    pending: String,
    seen_inline: bool,
    inline: Option<Inline>,
}

impl Draft {
    fn flush_text(&mut self) {
        let text = std::mem::take(&mut self.pending);
        // lead text must carry content; text after an inline tag is kept as is
        let keep = if self.seen_inline {
            !text.is_empty()
        } else {
            !text.trim().is_empty()
        };
        if keep {
            self.runs.push(Run::Text(text));
        }
    }

    fn open_inline(&mut self, tag: &str) {
        self.flush_text();
        self.seen_inline = true;
        self.inline = Some(Inline {
            format: inline_format(tag).to_string(),
            ..Inline::default()
        });
    }

    fn close_inline(&mut self) {
        if let Some(inline) = self.inline.take() {
            self.runs.push(Run::Inline {
                format: inline.format,
                value: vec![inline.text],
            });
        }
    }

    fn text(&mut self, depth: usize, text: &str) {
        match depth {
            PARAGRAPH_DEPTH => self.pending.push_str(text),
            INLINE_DEPTH => {
                if let Some(inline) = self.inline.as_mut().filter(|i| !i.nested) {
                    inline.text.push_str(text);
                }
            }
            _ => {}
        }
    }

    fn nest(&mut self) {
        if let Some(inline) = self.inline.as_mut() {
            inline.nested = true;
        }
    }

    fn finish(mut self) -> Paragraph {
        self.close_inline();
        self.flush_text();
        if self.runs.is_empty() {
            self.runs.push(Run::Text(EMPTY_PARAGRAPH.to_string()));
        }
        Paragraph::new(self.runs)
    }
}

fn malformed(position: usize, reason: impl std::fmt::Display) -> EngineError {
    EngineError::RichText(format!("malformed markup at byte {position}: {reason}"))
}

fn tag_name(start: &BytesStart<'_>, position: usize) -> EngineResult<String> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|e| malformed(position, e))
}

/// Parse a markup fragment into paragraphs
pub fn parse_rich_text(markup: &str) -> EngineResult<Vec<Paragraph>> {
    let fragment = format!("<root>{markup}</root>");
    let mut reader = Reader::from_str(&fragment);

    let mut paragraphs = Vec::new();
    let mut draft: Option<Draft> = None;
    let mut depth = 0usize;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Err(e) => return Err(malformed(position, e)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                depth += 1;
                let name = tag_name(&start, position)?;
                match depth {
                    PARAGRAPH_DEPTH if name == PARAGRAPH_TAG => draft = Some(Draft::default()),
                    INLINE_DEPTH => {
                        if let Some(d) = draft.as_mut() {
                            d.open_inline(&name);
                        }
                    }
                    deeper if deeper > INLINE_DEPTH => {
                        if let Some(d) = draft.as_mut() {
                            d.nest();
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(start)) => {
                let name = tag_name(&start, position)?;
                match depth + 1 {
                    PARAGRAPH_DEPTH if name == PARAGRAPH_TAG => {
                        paragraphs.push(Draft::default().finish());
                    }
                    INLINE_DEPTH => {
                        if let Some(d) = draft.as_mut() {
                            d.open_inline(&name);
                            d.close_inline();
                        }
                    }
                    deeper if deeper > INLINE_DEPTH => {
                        if let Some(d) = draft.as_mut() {
                            d.nest();
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                match depth {
                    PARAGRAPH_DEPTH => {
                        if let Some(d) = draft.take() {
                            paragraphs.push(d.finish());
                        }
                    }
                    INLINE_DEPTH => {
                        if let Some(d) = draft.as_mut() {
                            d.close_inline();
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| malformed(position, e))?;
                if let Some(d) = draft.as_mut() {
                    d.text(depth, &text);
                }
            }
            Ok(Event::CData(data)) => {
                let bytes = data.into_inner();
                let text = std::str::from_utf8(&bytes).map_err(|e| malformed(position, e))?;
                if let Some(d) = draft.as_mut() {
                    d.text(depth, text);
                }
            }
            Ok(_) => {}
        }
    }

    if depth != 0 {
        return Err(malformed(fragment.len(), "unclosed element"));
    }
    Ok(paragraphs)
}

/// Parse optional markup; absent or blank markup yields `None`
pub fn parse_optional(markup: Option<&str>) -> EngineResult<Option<Vec<Paragraph>>> {
    match markup {
        Some(m) if !m.trim().is_empty() => parse_rich_text(m).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Run {
        Run::Text(s.to_string())
    }

    fn inline(format: &str, value: &str) -> Run {
        Run::Inline {
            format: format.to_string(),
            value: vec![value.to_string()],
        }
    }

    #[test]
    fn paragraphs_with_inline_formats() {
        let paragraphs =
            parse_rich_text("<FT>Quiet <b>EC</b> motor, <i>low</i></FT><FT>Second</FT>").unwrap();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(
            paragraphs[0].value,
            vec![text("Quiet "), inline("bold", "EC"), text(" motor, "), inline("italic", "low")]
        );
        assert_eq!(paragraphs[1].value, vec![text("Second")]);
        assert_eq!(paragraphs[0].format, "paragraph");
    }

    #[test]
    fn empty_paragraph_gets_placeholder() {
        let paragraphs = parse_rich_text("<FT/><FT>   </FT>").unwrap();
        assert_eq!(paragraphs.len(), 2);
        for p in &paragraphs {
            assert_eq!(p.value, vec![text(EMPTY_PARAGRAPH)]);
        }
    }

    #[test]
    fn unknown_tags_keep_their_name() {
        let paragraphs = parse_rich_text("<FT><sup>2</sup><bl/></FT>").unwrap();
        assert_eq!(
            paragraphs[0].value,
            vec![inline("sup", "2"), inline("bullet", "")]
        );
    }

    #[test]
    fn only_top_level_paragraphs_count() {
        let paragraphs = parse_rich_text("stray<x><FT>nested</FT></x><FT>top</FT>").unwrap();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].value, vec![text("top")]);
    }

    #[test]
    fn entities_are_decoded() {
        let paragraphs = parse_rich_text("<FT>A &amp; B</FT>").unwrap();
        assert_eq!(paragraphs[0].value, vec![text("A & B")]);
    }

    #[test]
    fn malformed_markup_is_an_error() {
        assert!(matches!(
            parse_rich_text("<FT>open <b>bold</FT>"),
            Err(EngineError::RichText(_))
        ));
        assert!(matches!(parse_rich_text("<FT>"), Err(EngineError::RichText(_))));
    }

    #[test]
    fn blank_markup_is_absent() {
        assert_eq!(parse_optional(None).unwrap(), None);
        assert_eq!(parse_optional(Some("  ")).unwrap(), None);
        assert!(parse_optional(Some("<FT>x</FT>")).unwrap().is_some());
    }
}
