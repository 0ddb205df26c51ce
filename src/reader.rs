use {
    crate::error::{Error, Result},
    log::debug,
    std::{fs::read, path::Path},
};

/// Decodes `bytes` as UTF-8, dropping any invalid sequences rather than substituting
/// `U+FFFD` for them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text: String = String::with_capacity(bytes.len());

    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }

    text
}

/// Splits on `\n`, `\r\n` and a lone `\r`. A trailing terminator doesn't add an empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split_terminator(['\n', '\r'])
        .map(String::from)
        .collect()
}

pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path: &Path = path.as_ref();
    let bytes: Vec<u8> = read(path).map_err(|source| Error::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<String> = split_lines(&decode_lossy(&bytes));

    debug!("read {} bytes, {} lines from {path:?}", bytes.len(), lines.len());

    Ok(lines)
}
