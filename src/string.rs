use compact_str::CompactString;

pub type IdentName = CompactString;

/// Words that name statements or builtins and can never be assigned to.
pub const RESERVED_KEYWORDS: [&str; 11] = [
    "p", "if", "else", "sleep", "cat", "type", "str", "int", "float", "for", "in",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}
