//! Character-based chunking shared by the PDF tool and the summarizer.

use crate::ToolError;

/// Split `text` into consecutive runs of at most `chunk_size` characters.
///
/// Characters are Unicode scalar values, so a chunk never splits a code
/// point. Empty input yields no chunks.
pub fn chunk_text(text: &str, chunk_size: usize) -> Result<Vec<&str>, ToolError> {
    if chunk_size == 0 {
        return Err(ToolError::InvalidArguments(
            "chunk_size must be greater than zero".to_string(),
        ));
    }
    let mut chunks = Vec::with_capacity(text.len() / chunk_size + 1);
    let mut start = 0;
    for (count, (idx, _)) in text.char_indices().enumerate() {
        if count > 0 && count % chunk_size == 0 {
            chunks.push(&text[start..idx]);
            start = idx;
        }
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::chunk_text;
    use crate::ToolError;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_into_fixed_size_chunks() {
        let chunks = chunk_text("abcdefghij", 4).expect("chunks");
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        assert_eq!(chunk_text("abc", 10).expect("chunks"), vec!["abc"]);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(chunk_text("", 3).expect("chunks").is_empty());
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let err = chunk_text("abc", 0).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "héllo wörld ✓";
        let chunks = chunk_text(text, 5).expect("chunks");
        assert_eq!(chunks, vec!["héllo", " wörl", "d ✓"]);
        let total: usize = chunks.iter().map(|chunk| chunk.chars().count()).sum();
        assert_eq!(total, text.chars().count());
    }

    #[test]
    fn chunk_count_is_ceiling_of_length() {
        let text = "x".repeat(1001);
        for size in [1, 7, 100, 1000, 1001, 5000] {
            let chunks = chunk_text(&text, size).expect("chunks");
            assert_eq!(chunks.len(), 1001_usize.div_ceil(size));
            assert_eq!(chunks.concat(), text);
        }
    }
}
