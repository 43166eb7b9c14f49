use std::fs;
use tempfile::TempDir;

use docsift_core::config::{Config, RankingBackend};
use docsift_core::document_store::DocumentStore;
use docsift_core::types::PageRange;

#[test]
fn load_dir_reads_json_and_text_documents() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(
        dir.join("report.json"),
        r#"{"text": "First page. Second page.", "token_indices_per_page": [[0, 10], [11, 23]]}"#,
    )
    .unwrap();
    fs::create_dir(dir.join("scans")).unwrap();
    fs::write(dir.join("scans/notes.txt"), "page one\x0cpage two").unwrap();
    fs::write(dir.join("ignored.md"), "# not a document").unwrap();

    let store = DocumentStore::load_dir(dir).expect("load");
    assert_eq!(store.len(), 2);

    let report = store.get("report.json").expect("report");
    assert_eq!(report.page_ranges, vec![PageRange::new(0, 10), PageRange::new(11, 23)]);

    let notes = store.get("notes.txt").expect("notes");
    assert_eq!(notes.page_count(), 2);
    assert_eq!(notes.page_ranges[1], PageRange::new(9, 16));
}

#[test]
fn load_dir_reports_malformed_json() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();
    let err = DocumentStore::load_dir(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn config_layers_file_and_env() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
            [ranking]
            k1 = 1.2
            backend = "tantivy"

            [retrieval]
            default_top_n = 3
            "#,
        )?;
        jail.create_file("config.test.toml", "[retrieval]\nmax_top_n = 20\n")?;
        jail.set_env("APP_RANKING__EPSILON", "0.5");

        let config = Config::load_for_env("test").map_err(|e| e.to_string())?;
        let s = config.settings();
        assert_eq!(s.ranking.k1, 1.2);
        assert_eq!(s.ranking.b, 0.75);
        assert_eq!(s.ranking.epsilon, 0.5);
        assert_eq!(s.ranking.backend, RankingBackend::Tantivy);
        assert_eq!(s.retrieval.default_top_n, 3);
        assert_eq!(s.retrieval.max_top_n, 20);
        assert!(!s.segmenter.abbreviations.is_empty());

        let k1: f64 = config.get("ranking.k1").map_err(|e| e.to_string())?;
        assert_eq!(k1, 1.2);
        Ok(())
    });
}

#[test]
fn config_rejects_invalid_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[retrieval]\ndefault_top_n = 0\n")?;
        assert!(Config::load_for_env("dev").is_err());
        Ok(())
    });
}
