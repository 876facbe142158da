// End-to-end highlighting over an in-memory page

use paw_highlight::dom::{DomTree, MemoryDom, NodeId};
use paw_highlight::highlight::{build_segments, markers_under};
use paw_highlight::parse::Tokenizer;
use paw_highlight::utils::{WordSegment, WordSegmenter};
use paw_highlight::{Dictionary, HighlightConfig, HighlightError, HighlightSession, Segment, SessionState};

const WORDS: &str = r#"{"wordInfos": {
    "companies": {"word": "companies", "note": "Big companies pay less.", "originPath": "news", "exp": "firms"},
    "government": {"word": "government", "note": "", "origin_path": "news", "exp": "state"},
    "東京": {"word": "東京", "note": "東京に住んでいます", "origin_path": "nhk", "exp": "Tokyo"}
}}"#;

struct Page {
    dom: MemoryDom,
    body: NodeId,
    paragraph: NodeId,
    bubble: NodeId,
    script: NodeId,
}

fn page() -> Page {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let paragraph = dom.add_element(body, "p");
    dom.add_text(paragraph, "The Companies and the government disagree.");
    let link = dom.add_element(body, "a");
    dom.add_text(link, "government site");
    let bubble = dom.add_element_with_class(body, "div", "xqdd_bubble_note");
    dom.add_text(bubble, "companies in the bubble");
    let script = dom.add_element(body, "script");
    dom.add_text(script, "var companies = 1;");
    Page {
        dom,
        body,
        paragraph,
        bubble,
        script,
    }
}

fn sync(session: &mut HighlightSession, page: &mut Page, body: &str) -> paw_highlight::Result<()> {
    let root = page.body;
    let ticket = session.begin_sync();
    session
        .complete_sync(&mut page.dom, &root, ticket, Ok(body.to_string()))
        .map(|_| ())
}

#[test]
fn test_highlighting_keeps_page_text() {
    let mut page = page();
    let before = page.dom.text_content(&page.body);
    let mut session = HighlightSession::new(HighlightConfig::default());
    sync(&mut session, &mut page, WORDS).unwrap();

    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(page.dom.text_content(&page.body), before);
}

#[test]
fn test_markers_keep_page_casing() {
    let mut page = page();
    let mut session = HighlightSession::new(HighlightConfig::default());
    sync(&mut session, &mut page, WORDS).unwrap();

    let markers = markers_under(&page.dom, &page.paragraph);
    assert_eq!(markers.len(), 2);
    assert_eq!(page.dom.text_content(&markers[0]), "Companies");
    assert_eq!(page.dom.attribute(&markers[0], "word").as_deref(), Some("companies"));
    assert_eq!(page.dom.text_content(&markers[1]), "government");
}

#[test]
fn test_ineligible_parents_untouched() {
    let mut page = page();
    let bubble_html = page.dom.inner_html(page.bubble);
    let script_html = page.dom.inner_html(page.script);
    let mut session = HighlightSession::new(HighlightConfig::default());
    sync(&mut session, &mut page, WORDS).unwrap();

    assert_eq!(page.dom.inner_html(page.bubble), bubble_html);
    assert_eq!(page.dom.inner_html(page.script), script_html);
}

#[test]
fn test_links_become_inline_block() {
    let mut page = page();
    let mut session = HighlightSession::new(HighlightConfig::default());
    sync(&mut session, &mut page, WORDS).unwrap();

    let link = page.dom.elements_by_tag(&page.body, "A")[0];
    assert_eq!(
        page.dom.attribute(&link, "style").as_deref(),
        Some("display: inline-block; margin: auto;")
    );
}

#[test]
fn test_repeated_enable_is_stable() {
    let mut page = page();
    let mut session = HighlightSession::new(HighlightConfig::default());
    sync(&mut session, &mut page, WORDS).unwrap();
    let once = page.dom.inner_html(page.body);

    sync(&mut session, &mut page, WORDS).unwrap();
    assert_eq!(page.dom.inner_html(page.body), once);
}

#[test]
fn test_no_match_leaves_page_alone() {
    let mut page = page();
    let before = page.dom.inner_html(page.body);
    let mut session = HighlightSession::new(HighlightConfig::default());
    sync(&mut session, &mut page, r#"{"wordInfos": {"zebra": {"word": "zebra"}}}"#).unwrap();

    assert_eq!(page.dom.inner_html(page.body), before);
}

#[test]
fn test_delete_unwraps_and_forgets_word() {
    let mut page = page();
    let root = page.body;
    let mut session = HighlightSession::new(HighlightConfig::default());
    sync(&mut session, &mut page, WORDS).unwrap();

    let removed = session.delete_word(&mut page.dom, &root, "government").unwrap();
    assert_eq!(removed, 2);
    assert!(session.dictionary().lookup("government").is_none());
    assert_eq!(markers_under(&page.dom, &root).len(), 1);
    assert_eq!(
        page.dom.text_content(&page.paragraph),
        "The Companies and the government disagree."
    );
}

#[test]
fn test_disable_then_delete_is_rejected() {
    let mut page = page();
    let root = page.body;
    let mut session = HighlightSession::new(HighlightConfig::default());
    sync(&mut session, &mut page, WORDS).unwrap();
    session.disable(&mut page.dom, &root).unwrap();

    assert_eq!(
        session.delete_word(&mut page.dom, &root, "companies"),
        Err(HighlightError::SessionInactive)
    );
    assert_eq!(markers_under(&page.dom, &root).len(), 3);
}

struct JapaneseSegmenter;

impl WordSegmenter for JapaneseSegmenter {
    fn segment(&self, text: &str) -> Vec<WordSegment> {
        let words = ["東京", "に", "住んで", "います"];
        if words.concat() == text {
            words.iter().map(|w| WordSegment::new(*w, true)).collect()
        } else {
            vec![WordSegment::new(text, true)]
        }
    }
}

#[test]
fn test_cjk_text_uses_word_segmentation() {
    let config = HighlightConfig::default();
    let tokenizer = Tokenizer::with_segmenter(&config, Box::new(JapaneseSegmenter));
    let dictionary = Dictionary::from_json(WORDS).unwrap();
    let text = "東京に住んでいます";

    let tokens = tokenizer.tokenize(text, "www3.nhk.or.jp");
    assert_eq!(tokens, vec!["東京", "に", "住んで", "います"]);
    assert_eq!(
        build_segments(text, &tokens, &dictionary),
        vec![
            Segment::highlighted("東京", "東京"),
            Segment::literal("に住んでいます"),
        ]
    );
}

#[test]
fn test_site_rule_keeps_hyphenated_tokens_apart() {
    let tokenizer = Tokenizer::new(&HighlightConfig::for_host("www.lingq.com"));
    assert_eq!(
        tokenizer.tokenize("well-known companies!", "www.lingq.com"),
        vec!["wellknown", "companies"]
    );
}
