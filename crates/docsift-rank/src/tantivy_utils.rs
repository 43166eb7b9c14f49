use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED};
use tantivy::tokenizer::{PreTokenizedString, Token};
use tantivy::TantivyDocument;

pub const TEXT_FIELD: &str = "text";
pub const POSITION_FIELD: &str = "position";

/// Sentence text indexed from caller-supplied tokens, plus the sentence's corpus position.
pub fn build_schema() -> Schema {
	let mut schema_builder = Schema::builder();
	let text_field_indexing = TextFieldIndexing::default().set_tokenizer("raw").set_index_option(IndexRecordOption::WithFreqs);
	let text_options = TextOptions::default().set_indexing_options(text_field_indexing);
	let _text_field = schema_builder.add_text_field(TEXT_FIELD, text_options);
	let _position_field = schema_builder.add_u64_field(POSITION_FIELD, STORED);
	schema_builder.build()
}

/// Build a document whose text field carries exactly `tokens`; empty tokens are not indexable and are skipped.
pub fn pre_tokenized_doc<T: AsRef<str>>(text_field: Field, position_field: Field, position: usize, tokens: &[T]) -> TantivyDocument {
	let mut offset = 0usize;
	let mut kept = Vec::with_capacity(tokens.len());
	for (i, tok) in tokens.iter().enumerate() {
		let tok = tok.as_ref();
		let from = offset;
		offset += tok.len() + 1;
		if tok.is_empty() { continue; }
		kept.push(Token { offset_from: from, offset_to: from + tok.len(), position: i, text: tok.to_string(), position_length: 1 });
	}
	let text = tokens.iter().map(|t| t.as_ref()).collect::<Vec<&str>>().join(" ");
	let mut doc = TantivyDocument::default();
	doc.add_pre_tokenized_text(text_field, PreTokenizedString { text, tokens: kept });
	doc.add_u64(position_field, position as u64);
	doc
}
