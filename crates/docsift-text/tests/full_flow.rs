use docsift_core::types::{Document, PageRange, UNRESOLVED_PAGE};
use docsift_text::{CorpusIndexBuilder, PageMapper, RuleSplitter, SentenceSegmenter};

fn manual() -> Document {
    // Page 1 holds the first two sentences, the third crosses into page 2.
    let text = "Unplug the device. Remove the cover. Lift the battery out of the tray. Reinstall the cover.";
    Document::new(text, vec![PageRange::new(0, 45), PageRange::new(46, 90)])
}

#[test]
fn document_to_corpus_flow() {
    let doc = manual();
    let segmenter = SentenceSegmenter::new(Box::new(RuleSplitter::default()));
    let segments = segmenter.segment(&doc.text);
    let sentences = PageMapper::new(&doc.page_ranges).assign(segments);

    let pages: Vec<u32> = sentences.iter().map(|s| s.page).collect();
    assert_eq!(pages, vec![1, 1, 1, 2]);
    assert!(sentences.iter().all(|s| s.page != UNRESOLVED_PAGE));

    let corpus = CorpusIndexBuilder::build(sentences);
    assert_eq!(corpus.len(), 4);
    assert_eq!(corpus.id_of("Reinstall the cover."), Some(3));
    assert_eq!(corpus.page_of("Lift the battery out of the tray."), Some(1));
    assert_eq!(corpus.tokenized()[1], vec!["Remove", "the", "cover."]);
}

#[test]
fn empty_document_builds_empty_corpus() {
    let doc = Document::new("   ", vec![PageRange::new(0, 2)]);
    let segmenter = SentenceSegmenter::new(Box::new(RuleSplitter::default()));
    let sentences = PageMapper::new(&doc.page_ranges).assign(segmenter.segment(&doc.text));
    assert!(CorpusIndexBuilder::build(sentences).is_empty());
}
