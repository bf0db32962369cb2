use std::fmt;

use itertools::Itertools;

use crate::Ident;

/// One embedded asset, rendered as an array and a length declaration.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Constant<'a> {
    pub ident: &'a Ident,
    pub bytes: &'a [u8],
    pub qualifier: &'a str,
}

impl fmt::Display for Constant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Length is taken from the same slice that gets printed so the two
        // can't disagree.
        writeln!(
            f,
            "const uint8_t {}[] {}= {{ {} }};",
            self.ident,
            self.qualifier,
            self.bytes.iter().map(|b| format!("0x{b:02x}")).join(", ")
        )?;
        writeln!(f, "unsigned int {}_len = {};", self.ident, self.bytes.len())?;
        writeln!(f)
    }
}

/// Render the declarations for one compressed asset with the default
/// `PROGMEM` qualifier.
///
/// ```
/// # use embed::{render_constant, Ident};
/// let name = Ident::from_file_name("a.txt");
/// assert_eq!(
///     render_constant(&name, &[0x1f, 0x8b, 0x0a]),
///     "const uint8_t a_txt[] PROGMEM= { 0x1f, 0x8b, 0x0a };\n\
///      unsigned int a_txt_len = 3;\n\n"
/// );
/// ```
pub fn render_constant(ident: &Ident, bytes: &[u8]) -> String {
    Constant {
        ident,
        bytes,
        qualifier: crate::DEFAULT_QUALIFIER,
    }
    .to_string()
}

/// Header opening: the include directive and a blank line.
pub fn render_preamble(directive: &str) -> String {
    format!("{directive}\n\n")
}
