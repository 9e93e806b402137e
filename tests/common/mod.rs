/*!
 * Common test utilities for the termlock test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a comma-delimited terminology file for testing
pub fn create_comma_terms(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = "\
text,translation
cocoa,koko pa
export market,amannɔne dwam
fertilizer,nhwiren aduro
";
    create_test_file(dir, filename, content)
}

/// Creates the same terminology as `create_comma_terms` with `;` delimiters
/// and differently named header columns
pub fn create_semicolon_terms(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = "\
Source;Target
cocoa;koko pa
export market;amannɔne dwam
fertilizer;nhwiren aduro
";
    create_test_file(dir, filename, content)
}
