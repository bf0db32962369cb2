use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::bail;
use derive_more::{Deref, Display};

/// C and C++ keywords that can't be used as array names.
const RESERVED: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor",
    "bool", "break", "case", "catch", "char", "char8_t", "char16_t",
    "char32_t", "class", "co_await", "co_return", "co_yield", "compl",
    "concept", "const", "const_cast", "consteval", "constexpr", "constinit",
    "continue", "decltype", "default", "delete", "do", "double",
    "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false",
    "float", "for", "friend", "goto", "if", "inline", "int", "long",
    "mutable", "namespace", "new", "noexcept", "not", "not_eq", "nullptr",
    "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "restrict", "return", "short", "signed",
    "sizeof", "static", "static_assert", "static_cast", "struct", "switch",
    "template", "this", "thread_local", "throw", "true", "try", "typedef",
    "typeid", "typename", "typeof", "union", "unsigned", "using", "virtual",
    "void", "volatile", "wchar_t", "while", "xor", "xor_eq", "_Alignas",
    "_Alignof", "_Atomic", "_Bool", "_Complex", "_Generic", "_Imaginary",
    "_Noreturn", "_Static_assert", "_Thread_local",
];

/// C identifier derived from an asset file name.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Deref, Display)]
pub struct Ident(String);

impl Ident {
    /// Turn a file name into an identifier.
    ///
    /// Anything that isn't an ASCII letter, digit or underscore becomes an
    /// underscore. A leading digit or a C/C++ keyword gets an underscore
    /// prefix.
    ///
    /// ```
    /// # use embed::Ident;
    /// assert_eq!(Ident::from_file_name("logo.bin").as_str(), "logo_bin");
    /// assert_eq!(Ident::from_file_name("b-data.txt").as_str(), "b_data_txt");
    /// assert_eq!(Ident::from_file_name("404.html").as_str(), "_404_html");
    /// assert_eq!(Ident::from_file_name("int").as_str(), "_int");
    /// ```
    pub fn from_file_name(name: &str) -> Self {
        let mut ret: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if !ret.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
            || RESERVED.contains(&ret.as_str())
        {
            ret.insert(0, '_');
        }
        Ident(ret)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pair each input file with its identifier.
///
/// Every file declares both `ident` and `ident_len`. Fails if any of those
/// symbols would be declared twice, the header would not compile.
pub fn assign_idents(
    paths: &[PathBuf],
) -> anyhow::Result<Vec<(Ident, &Path)>> {
    let mut seen: BTreeMap<String, &Path> = BTreeMap::new();
    let mut ret = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|a| a.to_string_lossy())
            .unwrap_or_default();
        let ident = Ident::from_file_name(&name);
        let symbols = [ident.to_string(), format!("{ident}_len")];
        for sym in &symbols {
            if let Some(prev) = seen.get(sym) {
                bail!(
                    "{} and {} both declare `{sym}`",
                    prev.display(),
                    path.display()
                );
            }
        }
        for sym in symbols {
            seen.insert(sym, path);
        }
        ret.push((ident, path.as_path()));
    }
    Ok(ret)
}
