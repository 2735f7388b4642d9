/// Progress log interval (emit a count every N written lines)
pub const PROGRESS_INTERVAL: u64 = 10_000;

/// Regex matching a masked-anchor placeholder; tokenizers must keep matches atomic
pub const PLACEHOLDER_PATTERN: &str = r"__\d+__";

/// Delimiter written on both sides of a placeholder index
pub const PLACEHOLDER_DELIM: &str = "__";

/// Buffer size for the input line reader
pub const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Buffer size for the compressed output writer
pub const WRITE_BUFFER_SIZE: usize = 128 * 1024;

/// Suffix of the temporary output file renamed into place on success
pub const TMP_SUFFIX: &str = "tmp";
