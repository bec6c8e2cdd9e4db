//! End-to-end pipeline tests with a scripted extraction provider

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use textab::config::AppConfig;
use textab::error::Result;
use textab::providers::LlmProvider;
use textab::{ExtractionPipeline, SourceFile};

/// Provider that replays canned responses and captures the prompts it saw
struct ScriptedProvider {
    responses: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().rev().map(|s| s.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn seen_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, _system: &str, user: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(user.to_string());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop()
            .expect("no scripted response left"))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "test"
    }
}

fn txt_file(name: &str, content: &str) -> SourceFile {
    SourceFile::new(name, content.as_bytes().to_vec())
}

#[tokio::test]
async fn single_document_two_records() {
    let provider = ScriptedProvider::new(&[r#"[
        {"key":"name","value":"Alice","raw_value":"Alice","comments":"Given name from the header paragraph.","confidence":0.95},
        {"key":"age","value":"30","raw_value":"30","comments":"As of document date.","confidence":0.9}
    ]"#]);

    let config = AppConfig::default();
    let pipeline = ExtractionPipeline::new(&config, provider.clone());
    let rows = pipeline
        .run(&[txt_file("people.txt", "Name: Alice\n\nAge: 30")], None)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].key, "name");
    assert_eq!(rows[0].value, "Alice");
    assert_eq!(rows[1].key, "age");
    assert!(rows.iter().all(|r| r.source_file == "people.txt"));

    // One chunk, carrying the document identity
    let prompts = provider.seen_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("doc_id: D1"));
    assert!(prompts[0].contains("paragraph_index: 0"));
    assert!(prompts[0].contains("Name: Alice\n\nAge: 30"));
}

#[tokio::test]
async fn documents_keep_contiguous_row_order() {
    let provider = ScriptedProvider::new(&[
        r#"[{"key":"city","value":"Oslo","comments":"From the first file."}]"#,
        r#"[{"key":"country","value":"Norway","comments":"From the second file."},
            {"key":"capital","value":"Oslo","comments":"From the second file."}]"#,
    ]);

    let config = AppConfig::default();
    let pipeline = ExtractionPipeline::new(&config, provider.clone());
    let rows = pipeline
        .run(
            &[
                txt_file("a.txt", "City: Oslo"),
                txt_file("b.txt", "Country: Norway. Capital: Oslo."),
            ],
            None,
        )
        .await
        .unwrap();

    let sources: Vec<&str> = rows.iter().map(|r| r.source_file.as_str()).collect();
    assert_eq!(sources, vec!["a.txt", "b.txt", "b.txt"]);

    let prompts = provider.seen_prompts();
    assert!(prompts[0].contains("doc_id: D1"));
    assert!(prompts[1].contains("doc_id: D2"));
}

#[tokio::test]
async fn priority_keys_reach_the_prompt() {
    let provider = ScriptedProvider::new(&["[]"]);
    let config = AppConfig::default();
    let pipeline = ExtractionPipeline::new(&config, provider.clone());

    let keys = vec!["email".to_string(), "phone".to_string()];
    let rows = pipeline
        .run(&[txt_file("c.txt", "Contact: c@example.com")], Some(&keys))
        .await
        .unwrap();

    assert!(rows.is_empty());
    assert!(provider.seen_prompts()[0]
        .contains("Prioritize extracting these keys if present: email, phone"));
}

#[tokio::test]
async fn whitespace_only_document_yields_no_rows() {
    let provider = ScriptedProvider::new(&["[]"]);
    let config = AppConfig::default();
    let pipeline = ExtractionPipeline::new(&config, provider.clone());

    let rows = pipeline
        .run(&[txt_file("blank.txt", "  \n\n\t  \n")], None)
        .await
        .unwrap();

    assert!(rows.is_empty());
    // Degenerate input still produces exactly one (empty) chunk
    assert_eq!(provider.seen_prompts().len(), 1);
}

#[tokio::test]
async fn unsupported_extension_fails_fast() {
    let provider = ScriptedProvider::new(&[]);
    let config = AppConfig::default();
    let pipeline = ExtractionPipeline::new(&config, provider);

    let err = pipeline
        .run(&[SourceFile::new("slides.pptx", vec![0u8; 4])], None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("pptx"));
}

#[tokio::test]
async fn oversized_document_is_chunked_with_overlap() {
    let para_a = "a".repeat(800);
    let para_b = "b".repeat(800);
    let para_c = "c".repeat(800);
    let text = format!("{}\n\n{}\n\n{}", para_a, para_b, para_c);

    let provider = ScriptedProvider::new(&[
        r#"[{"key":"first","value":"1","comments":"chunk one"}]"#,
        r#"[{"key":"second","value":"2","comments":"chunk two"}]"#,
    ]);
    let config = AppConfig::default();
    let pipeline = ExtractionPipeline::new(&config, provider.clone());

    let rows = pipeline.run(&[txt_file("big.txt", &text)], None).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].key, "first");
    assert_eq!(rows[1].key, "second");

    let prompts = provider.seen_prompts();
    assert_eq!(prompts.len(), 2);
    // Overlap: the second chunk re-submits the first chunk's last paragraph
    assert!(prompts[1].contains(&para_b));
    assert!(prompts[1].contains("paragraph_index: 1"));
}
