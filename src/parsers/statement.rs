//! Line-oriented declaration recognition
//!
//! Each physical line is split on whitespace and classified by its first
//! token only. Comments, string literals and multi-line statements get no
//! special treatment.

use crate::error::{PacktreeError, Result};
use crate::models::config::Settings;
use crate::models::tree::split_dotted;

/// Modifier that turns an import into a member import
const STATIC_MODIFIER: &str = "static";

/// Wildcard segment of an on-demand import
const WILDCARD: &str = "*";

/// What a single line declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `package a.b;` with the terminator stripped
    Package { name: &'a str },
    /// `import a.b.C;` or `import static a.b.C.m;`
    Import { reference: &'a str, is_static: bool },
    /// Blank line or anything else
    Ignored,
}

/// Where an import points once split into package and unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTarget<'a> {
    /// A single unit: `a.b.C` gives package `a.b`, unit `C`
    Unit { package: &'a str, name: &'a str },
    /// `a.b.*` names a package but no unit
    Wildcard { package: &'a str },
}

/// Classifies lines using configurable keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognizer {
    package_keyword: String,
    import_keyword: String,
    terminator: char,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::new("package", "import", ';')
    }
}

impl Recognizer {
    pub fn new(
        package_keyword: impl Into<String>,
        import_keyword: impl Into<String>,
        terminator: char,
    ) -> Self {
        Self {
            package_keyword: package_keyword.into(),
            import_keyword: import_keyword.into(),
            terminator,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.package_keyword.clone(),
            settings.import_keyword.clone(),
            settings.terminator,
        )
    }

    /// Classify one physical line
    pub fn recognize<'a>(&self, line: &'a str) -> Statement<'a> {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return Statement::Ignored;
        };

        if first == self.package_keyword {
            let name = self.strip_terminator(tokens.next().unwrap_or(""));
            return Statement::Package { name };
        }

        if first == self.import_keyword {
            let mut reference = tokens.next().unwrap_or("");
            let mut is_static = false;
            if reference == STATIC_MODIFIER {
                is_static = true;
                reference = tokens.next().unwrap_or("");
            }
            return Statement::Import {
                reference: self.strip_terminator(reference),
                is_static,
            };
        }

        Statement::Ignored
    }

    fn strip_terminator<'a>(&self, token: &'a str) -> &'a str {
        token.strip_suffix(self.terminator).unwrap_or(token)
    }
}

/// Split an import reference into its target package and unit
///
/// For static imports the trailing member (or `*`) is dropped first, so
/// `a.b.C.m` targets unit `C` in package `a.b`.
pub fn split_reference(reference: &str, is_static: bool) -> Result<ImportTarget<'_>> {
    split_dotted(reference)?;

    let (prefix, last) = reference
        .rsplit_once('.')
        .ok_or_else(|| PacktreeError::invalid_path(reference))?;

    if is_static {
        let (package, name) = prefix
            .rsplit_once('.')
            .ok_or_else(|| PacktreeError::invalid_path(reference))?;
        return Ok(ImportTarget::Unit { package, name });
    }

    if last == WILDCARD {
        return Ok(ImportTarget::Wildcard { package: prefix });
    }

    Ok(ImportTarget::Unit { package: prefix, name: last })
}
