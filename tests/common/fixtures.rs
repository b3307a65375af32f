use std::path::{Path, PathBuf};

#[allow(dead_code)]
pub fn invalid_content_hashes() -> Vec<String> {
    [
        "0".to_string(),
        "-1".to_string(),
        "INVALID CONTENT HASH".to_string(),
        "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a0".to_string(), // 63-char length instead of 64
        "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a0&".to_string(), // Invalid char
    ]
    .to_vec()
}

/// Writes `content` to a new file called `name` in `dir`.
#[allow(dead_code)]
pub fn a_file_with(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("it should write the test file");
    path
}
