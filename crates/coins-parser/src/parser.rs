//! Extracting COinS spans from HTML.
//!
//! A COinS span is any `<span>` whose class list contains `Z3988`; its
//! `title` attribute holds the ContextObject as a KEV query string.

use std::cell::RefCell;

use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, StartTag, Tag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer,
};
use html5ever::{Attribute, ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::{debug, trace};

use crate::backend::MarkupBackend;
use crate::span::{CoinSpan, CoinSpanList};

/// The class that marks a span as a COinS span.
pub const COINS_CLASS: &str = "Z3988";

/// Extracts spans from markup.
pub struct CoinsParser;

impl CoinsParser {
    /// Return every COinS span in `html`, in document order.
    ///
    /// Markup is untrusted input, so this never fails: malformed HTML is
    /// recovered by the backend, and a COinS span without a `title` yields an
    /// empty span for the caller to reject.
    pub fn parse(html: &str, backend: MarkupBackend) -> CoinSpanList {
        let spans = match backend {
            MarkupBackend::Html5ever => parse_with_html5ever(html),
            MarkupBackend::Scan => parse_with_scan(html),
        };
        debug!(backend = %backend, count = spans.len(), "extracted COinS spans");
        spans
    }
}

/// The span described by a `<span>` element's attributes, if it is a COinS span.
fn coins_span(attrs: &[Attribute]) -> Option<CoinSpan> {
    let attr_value = |attr_name: &str| {
        attrs
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| &*attr.value)
    };

    let class = attr_value("class")?;
    if !class.split_whitespace().any(|class| class == COINS_CLASS) {
        return None;
    }

    let title = attr_value("title").unwrap_or_default();
    trace!(title = %title, "found COinS span");
    Some(CoinSpan::from_kev(title))
}

fn parse_with_html5ever(html: &str) -> CoinSpanList {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    let mut spans = CoinSpanList::new();
    collect_spans(&dom.document, &mut spans);
    spans
}

fn collect_spans(handle: &Handle, spans: &mut CoinSpanList) {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        if &*name.local == "span" {
            spans.extend(coins_span(&attrs.borrow()));
        }
    }

    for child in handle.children.borrow().iter() {
        collect_spans(child, spans);
    }
}

/// Token sink for the scan backend: start tags only, no tree.
#[derive(Default)]
struct SpanSink {
    spans: RefCell<CoinSpanList>,
}

impl SpanSink {
    fn start_tag(&self, tag: &Tag) -> TokenSinkResult<()> {
        match &*tag.name {
            "span" => {
                self.spans.borrow_mut().extend(coins_span(&tag.attrs));
                TokenSinkResult::Continue
            }
            // Element content the tree builder would not parse as markup.
            "script" => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
                TokenSinkResult::RawData(RawKind::Rawtext)
            }
            "textarea" | "title" => TokenSinkResult::RawData(RawKind::Rcdata),
            "plaintext" => TokenSinkResult::Plaintext,
            _ => TokenSinkResult::Continue,
        }
    }
}

impl TokenSink for SpanSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            TagToken(tag) if tag.kind == StartTag => self.start_tag(&tag),
            _ => TokenSinkResult::Continue,
        }
    }
}

fn parse_with_scan(html: &str) -> CoinSpanList {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let tokenizer = Tokenizer::new(SpanSink::default(), Default::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    tokenizer.sink.spans.take()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><body>
  <p>Cite this <span class="note">not coins</span></p>
  <span class="Z3988" title="ctx_ver=Z39.88-2004&amp;rft.title=First&amp;rft.au=Ada+Lovelace"></span>
  <div><span class="coins Z3988" title='ctx_ver=Z39.88-2004&amp;rft.title=Second'></span></div>
</body></html>"#;

    fn titles(spans: &CoinSpanList) -> Vec<&str> {
        spans.iter().filter_map(|s| s.first("rft.title")).collect()
    }

    #[test]
    fn test_html5ever_finds_spans_in_order() {
        let spans = CoinsParser::parse(PAGE, MarkupBackend::Html5ever);
        assert_eq!(spans.len(), 2);
        assert_eq!(titles(&spans), vec!["First", "Second"]);
        assert_eq!(spans[0].first("rft.au"), Some("Ada Lovelace"));
    }

    #[test]
    fn test_scan_agrees_with_html5ever() {
        let tree = CoinsParser::parse(PAGE, MarkupBackend::Html5ever);
        let scan = CoinsParser::parse(PAGE, MarkupBackend::Scan);
        assert_eq!(tree, scan);
    }

    #[test]
    fn test_span_without_title_is_empty() {
        for backend in [MarkupBackend::Html5ever, MarkupBackend::Scan] {
            let spans = CoinsParser::parse(r#"<span class="Z3988"></span>"#, backend);
            assert_eq!(spans.len(), 1);
            assert!(spans[0].is_empty());
        }
    }

    #[test]
    fn test_class_must_match_whole_token() {
        for backend in [MarkupBackend::Html5ever, MarkupBackend::Scan] {
            let spans = CoinsParser::parse(
                r#"<span class="Z39880" title="rft.title=x"></span>"#,
                backend,
            );
            assert!(spans.is_empty());
        }
    }

    #[test]
    fn test_empty_markup() {
        assert!(CoinsParser::parse("", MarkupBackend::Html5ever).is_empty());
        assert!(CoinsParser::parse("", MarkupBackend::Scan).is_empty());
    }

    #[test]
    fn test_backends_agree_on_raw_gt_in_title() {
        let html = r#"<span class="Z3988" title="rft.title=a>b&amp;rft_val_fmt=info%3Aofi%2Ffmt%3Akev%3Amtx%3Adc"></span>"#;
        let tree = CoinsParser::parse(html, MarkupBackend::Html5ever);
        let scan = CoinsParser::parse(html, MarkupBackend::Scan);
        assert_eq!(tree, scan);
        assert_eq!(scan.len(), 1);
        assert_eq!(scan[0].first("rft.title"), Some("a>b"));
        assert_eq!(scan[0].first("rft_val_fmt"), Some("info:ofi/fmt:kev:mtx:dc"));
    }

    #[test]
    fn test_backends_skip_commented_spans() {
        let html = r#"<p><!-- <span class="Z3988" title="rft.title=hidden"></span> --></p>
<script>document.write('<span class="Z3988" title="rft.title=scripted"></span>');</script>
<span class="Z3988" title="rft.title=shown"></span>"#;
        let tree = CoinsParser::parse(html, MarkupBackend::Html5ever);
        let scan = CoinsParser::parse(html, MarkupBackend::Scan);
        assert_eq!(tree, scan);
        assert_eq!(titles(&scan), vec!["shown"]);
    }

    #[test]
    fn test_character_references_in_attributes() {
        let html = r#"<span class="Z3988" title="rft.title=&#65;&#x42;&amp;rft.au=&eacute;"></span>"#;
        for backend in [MarkupBackend::Html5ever, MarkupBackend::Scan] {
            let spans = CoinsParser::parse(html, backend);
            assert_eq!(spans[0].first("rft.title"), Some("AB"));
            assert_eq!(spans[0].first("rft.au"), Some("é"));
        }
    }
}
