use docsift_core::types::{IdMap, PageMap, PageNumber, Sentence, SentenceId};
use tracing::info;

/// Split on single spaces; consecutive spaces produce empty tokens.
pub fn tokenize(text: &str) -> Vec<&str> { text.split(' ').collect() }

/// The ordered sentence corpus of one document plus its lookup tables.
///
/// Duplicate sentence text stays in the corpus but collapses to a single
/// entry in the id and page maps, whichever occurrence came last.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sentences: Vec<Sentence>,
    id_map: IdMap,
    page_map: PageMap,
}

impl Corpus {
    pub fn len(&self) -> usize { self.sentences.len() }

    pub fn is_empty(&self) -> bool { self.sentences.is_empty() }

    pub fn sentences(&self) -> &[Sentence] { &self.sentences }

    pub fn get(&self, position: usize) -> Option<&Sentence> { self.sentences.get(position) }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ { self.sentences.iter().map(|s| s.text.as_str()) }

    pub fn id_of(&self, text: &str) -> Option<SentenceId> { self.id_map.get(text).copied() }

    pub fn page_of(&self, text: &str) -> Option<PageNumber> { self.page_map.get(text).copied() }

    pub fn id_map(&self) -> &IdMap { &self.id_map }

    pub fn page_map(&self) -> &PageMap { &self.page_map }

    pub fn tokenized(&self) -> Vec<Vec<&str>> { self.texts().map(tokenize).collect() }
}

pub struct CorpusIndexBuilder;

impl CorpusIndexBuilder {
    pub fn build(sentences: Vec<Sentence>) -> Corpus {
        let (id_map, page_map) = Self::build_maps(sentences.iter().map(|s| (s.text.as_str(), s.page)));
        info!(sentences = sentences.len(), unique = id_map.len(), "total corpus size");
        Corpus { sentences, id_map, page_map }
    }

    /// Id by enumeration order and page per sentence text, last write wins.
    pub fn build_maps<'a, I>(entries: I) -> (IdMap, PageMap)
    where
        I: IntoIterator<Item = (&'a str, PageNumber)>,
    {
        let mut id_map = IdMap::new();
        let mut page_map = PageMap::new();
        for (id, (text, page)) in entries.into_iter().enumerate() {
            id_map.insert(text.to_string(), id);
            page_map.insert(text.to_string(), page);
        }
        (id_map, page_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_core::types::Span;

    fn sentence(text: &str, page: PageNumber) -> Sentence { Sentence { text: text.to_string(), span: Span::new(0, 0), page } }

    #[test]
    fn ids_follow_enumeration_order() {
        let corpus = CorpusIndexBuilder::build(vec![sentence("a b", 1), sentence("c d", 2)]);
        assert_eq!(corpus.id_of("a b"), Some(0));
        assert_eq!(corpus.id_of("c d"), Some(1));
        assert_eq!(corpus.page_of("c d"), Some(2));
        assert_eq!(corpus.id_of("missing"), None);
    }

    #[test]
    fn duplicate_text_keeps_last_id_and_page() {
        let texts = ["s0", "s1", "s2", "hello world", "s4", "s5", "s6", "hello world"];
        let sentences = texts.iter().enumerate().map(|(i, t)| sentence(t, i as PageNumber + 1)).collect();
        let corpus = CorpusIndexBuilder::build(sentences);
        assert_eq!(corpus.len(), 8);
        assert_eq!(corpus.id_of("hello world"), Some(7));
        assert_eq!(corpus.page_of("hello world"), Some(8));
        assert_eq!(corpus.id_map().len(), 7);
    }

    #[test]
    fn building_twice_is_idempotent() {
        let make = || vec![sentence("x y", 1), sentence("y z", 1), sentence("x y", 2)];
        let a = CorpusIndexBuilder::build(make());
        let b = CorpusIndexBuilder::build(make());
        assert_eq!(a.id_map(), b.id_map());
        assert_eq!(a.page_map(), b.page_map());
    }

    #[test]
    fn tokenizer_splits_on_single_spaces() {
        assert_eq!(tokenize("the cat  sat"), vec!["the", "cat", "", "sat"]);
        assert_eq!(tokenize(""), vec![""]);
        let corpus = CorpusIndexBuilder::build(vec![sentence("a b", 1)]);
        assert_eq!(corpus.tokenized(), vec![vec!["a", "b"]]);
    }

    #[test]
    fn empty_corpus() {
        let corpus = CorpusIndexBuilder::build(Vec::new());
        assert!(corpus.is_empty());
        assert!(corpus.tokenized().is_empty());
    }
}
