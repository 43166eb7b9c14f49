use anyhow::Result;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::{Index, IndexReader, IndexWriter, TantivyDocument, TantivyError, Term};
use tracing::info;

use docsift_core::error::Error;
use docsift_core::traits::Ranker;

use crate::tantivy_utils::{build_schema, pre_tokenized_doc, POSITION_FIELD, TEXT_FIELD};

const WRITER_MEMORY_BUDGET: usize = 20_000_000;

fn ranking_error(e: TantivyError) -> Error { Error::Ranking(e.to_string()) }

/// BM25 ranking backed by an in-RAM tantivy index.
///
/// Documents are indexed from the caller's tokens rather than a tantivy
/// tokenizer, so both backends see the same terms. Scores follow tantivy's
/// BM25 and are reported as `f64`; documents without a matching term score 0.
pub struct TantivyRanker {
	reader: IndexReader,
	text_field: Field,
	position_field: Field,
	doc_count: usize,
}

impl TantivyRanker {
	pub fn new<D, T>(tokenized_corpus: &[D]) -> Result<Self>
	where
		D: AsRef<[T]>,
		T: AsRef<str>,
	{
		let schema = build_schema();
		let index = Index::create_in_ram(schema.clone());
		let text_field = schema.get_field(TEXT_FIELD).map_err(ranking_error)?;
		let position_field = schema.get_field(POSITION_FIELD).map_err(ranking_error)?;
		let mut index_writer: IndexWriter = index.writer_with_num_threads(1, WRITER_MEMORY_BUDGET).map_err(ranking_error)?;
		for (position, doc) in tokenized_corpus.iter().enumerate() {
			index_writer.add_document(pre_tokenized_doc(text_field, position_field, position, doc.as_ref())).map_err(ranking_error)?;
		}
		index_writer.commit().map_err(ranking_error)?;
		let reader = index.reader().map_err(ranking_error)?;
		info!(documents = tokenized_corpus.len(), "built tantivy ranking index");
		Ok(Self { reader, text_field, position_field, doc_count: tokenized_corpus.len() })
	}

	fn query_for(&self, query_tokens: &[&str]) -> Option<BooleanQuery> {
		let clauses: Vec<(Occur, Box<dyn Query>)> = query_tokens
			.iter()
			.filter(|t| !t.is_empty())
			.map(|t| {
				let term = Term::from_field_text(self.text_field, t);
				(Occur::Should, Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs)) as Box<dyn Query>)
			})
			.collect();
		if clauses.is_empty() { None } else { Some(BooleanQuery::new(clauses)) }
	}
}

impl Ranker for TantivyRanker {
	fn len(&self) -> usize { self.doc_count }

	fn score(&self, query_tokens: &[&str]) -> Result<Vec<f64>> {
		let mut scores = vec![0.0; self.doc_count];
		let Some(query) = self.query_for(query_tokens) else { return Ok(scores) };
		if self.doc_count == 0 { return Ok(scores); }
		let searcher = self.reader.searcher();
		let top_docs = searcher.search(&query, &TopDocs::with_limit(self.doc_count)).map_err(ranking_error)?;
		for (score, addr) in top_docs {
			let doc = searcher.doc::<TantivyDocument>(addr).map_err(ranking_error)?;
			let position = doc.get_first(self.position_field).and_then(|v| v.as_u64());
			if let Some(slot) = position.and_then(|p| scores.get_mut(p as usize)) {
				*slot = f64::from(score);
			}
		}
		Ok(scores)
	}
}
