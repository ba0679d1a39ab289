/// Split user input into words: one per line, trimmed, blank lines dropped.
///
/// Order and duplicates are preserved; each occurrence is generated separately.
pub fn parse_word_list(input: &str) -> Vec<String> {
    input
        .split('\n')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
