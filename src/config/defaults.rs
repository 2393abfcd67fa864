pub const DEFAULT_SOURCE_LITERAL: &str = "#F54029";
pub const DEFAULT_TARGET_LITERAL: &str = "#4dd9cf";
pub const DEFAULT_ROOTS: [&str; 2] = ["src", "extension"];
pub const DEFAULT_NAMED_FILES: [&str; 2] = ["base_console.txt", "replace_partial.py"];

pub const DEFAULT_SPLICE_FILE: &str = "src/app/console/page.tsx";
pub const DEFAULT_START_MARKER: &str = "type BoneState = {";
pub const DEFAULT_END_MARKER: &str = "function EarIcon";
