/*!
 * Integration tests for the file-to-file document workflow
 */

use anyhow::Result;
use std::sync::Arc;

use dotwai::app_config::TranslationCommonConfig;
use dotwai::document::Document;
use dotwai::file_utils::FileManager;
use dotwai::providers::mock::MockGateway;
use dotwai::providers::CompletionGateway;
use dotwai::translation::{CancellationFlag, TranslationService};

use crate::common;

/// Test the full path from an article on disk to a translated file on disk
#[tokio::test]
async fn test_workflow_withArticleFile_shouldWriteTranslatedFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input_path = common::create_test_article(&dir, "article.txt")?;

    let document = Document::from_file(&input_path)?;
    assert_eq!(document.len(), 3);

    let gateway = Arc::new(
        MockGateway::working()
            .with_reply("first paragraph", "Premier paragraphe.")
            .with_reply("second paragraph", "Deuxieme paragraphe.")
            .with_reply("wrapped list item", "Troisieme paragraphe."),
    );
    let common_config = TranslationCommonConfig {
        worker_count: 3,
        retry_delay_ms: 10,
        ..TranslationCommonConfig::default()
    };
    let service = TranslationService::new(
        Arc::clone(&gateway) as Arc<dyn CompletionGateway>,
        "French",
        common_config,
    );

    let outcome = service
        .run(document.paragraphs.clone(), CancellationFlag::new(), |_| {})
        .await?;
    let translated = outcome.into_text().expect("Expected a completed run");

    let output_path = FileManager::generate_output_path(&input_path, "French");
    FileManager::write_to_file(&output_path, &translated)?;

    assert_eq!(output_path, dir.join("article.french.txt"));
    let written = FileManager::read_to_string(&output_path)?;
    assert_eq!(
        written,
        "Premier paragraphe.\n\nDeuxieme paragraphe.\n\nTroisieme paragraphe."
    );
    Ok(())
}

/// Test that segmentation output feeds straight back through assemble unchanged
#[tokio::test]
async fn test_workflow_withEchoGateway_shouldKeepParagraphCount() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input_path = common::create_test_article(&dir, "article.txt")?;

    let document = Document::from_file(&input_path)?;
    let total = document.len();

    let mut gateway = MockGateway::working();
    for (i, paragraph) in document.paragraphs.iter().enumerate() {
        gateway = gateway.with_reply(paragraph.clone(), format!("Translated {}.", i));
    }
    let gateway = Arc::new(gateway);
    let common_config = TranslationCommonConfig {
        worker_count: 2,
        retry_delay_ms: 10,
        ..TranslationCommonConfig::default()
    };
    let service = TranslationService::new(
        Arc::clone(&gateway) as Arc<dyn CompletionGateway>,
        "German",
        common_config,
    );

    let outcome = service
        .run(document.paragraphs.clone(), CancellationFlag::new(), |_| {})
        .await?;
    let translated = outcome.into_text().expect("Expected a completed run");

    let output_document = Document::from_text(&translated);
    assert_eq!(output_document.len(), total);
    assert_eq!(gateway.request_count(), total);
    Ok(())
}
