use std::fmt;
use std::ops::Deref;

use tracing::trace;

/// Marker that flags a line as a hex color custom property.
const HEX_DECLARATION_MARKER: &str = ": #";

const DEFAULT_LEVELS: [u8; 9] = [90, 80, 70, 60, 50, 40, 30, 20, 10];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpacityLevels(Vec<u8>);

impl OpacityLevels {
    pub fn new(levels: Vec<u8>) -> Self {
        Self(levels)
    }
}

impl Default for OpacityLevels {
    fn default() -> Self {
        Self(DEFAULT_LEVELS.to_vec())
    }
}

impl Deref for OpacityLevels {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub css: String,
    pub declarations_expanded: usize,
}

impl fmt::Display for Expansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css.as_str())
    }
}

/// `floor(opacity / 100 * 255)` as two lowercase hex digits.
pub fn alpha_byte(opacity: u8) -> String {
    let alpha = (f64::from(opacity) / 100.0 * 255.0).floor() as u8;
    format!("{:02x}", alpha)
}

pub fn is_hex_declaration(line: &str) -> bool {
    line.contains(HEX_DECLARATION_MARKER)
}

/// Expands a single line. Lines that are not hex color custom properties are
/// returned untouched; matching lines are followed by one indented declaration
/// per opacity level and a trailing `\n\t`.
///
/// The hex value is treated as an opaque string: the alpha byte is appended
/// whatever its current length, so `#abc` and `#11223344` come out invalid.
pub fn expand_line(line: &str, levels: &OpacityLevels) -> String {
    if !is_hex_declaration(line) {
        return line.to_string();
    }

    let mut parts = line.split(": ");
    let var_name = parts.next().unwrap_or_default();
    let hex = parts.next().unwrap_or_default().replacen(';', "", 1);
    let var_name = var_name.trim().replacen("--", "", 1);

    let (base, suffix) = split_var_name(&var_name);
    trace!(base = %base, suffix, hex = %hex, "expanding declaration");

    let mut expanded = line.to_string();
    for &opacity in levels.iter() {
        expanded.push_str(&format!(
            "\n\t\t--{}-{}-{}: {}{};",
            base,
            suffix,
            opacity,
            hex,
            alpha_byte(opacity)
        ));
    }
    expanded.push_str("\n\t");
    expanded
}

pub fn expand_css(css: &str, levels: &OpacityLevels) -> Expansion {
    let mut declarations_expanded = 0;
    let css = css
        .split('\n')
        .map(|line| {
            if is_hex_declaration(line) {
                declarations_expanded += 1;
            }
            expand_line(line, levels)
        })
        .collect::<Vec<_>>()
        .join("\n");

    Expansion {
        css,
        declarations_expanded,
    }
}

// base is every segment but the last, suffix is the last segment
fn split_var_name(var_name: &str) -> (String, &str) {
    match var_name.rsplit_once('-') {
        Some((base, suffix)) => (base.to_string(), suffix),
        None => (String::new(), var_name),
    }
}
