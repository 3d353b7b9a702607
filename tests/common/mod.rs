/*!
 * Common test utilities for the dotwai test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample article file for testing
pub fn create_test_article(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "This is the first paragraph of a test article.\n\n\
                   This is the second paragraph.\nIt spans two lines.\n\n\
                   - This is a wrapped list item paragraph.\n";
    create_test_file(dir, filename, content)
}
