/// Strips `search` from the front of `src` when it forms a whole
/// whitespace-separated token, returning the trimmed rest.
pub fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
        .map(<str>::trim_start)
}
