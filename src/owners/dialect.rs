//! Row dialects of the markdown area-ownership table.
//!
//! Two layouts are in use:
//!
//! ```text
//! | area-System.Net | @karelz | @owner1 @owner2 | notes |          (plain)
//! | **[area-auth](https://…)** | [@halter73](https://…) | … |     (linked)
//! ```
//!
//! A document is probed once per scope prefix to pick the layout; rows are
//! then cut at every occurrence of the dialect's row marker.

/// Layout of the scope cell in an ownership table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableDialect {
    /// Scope cell is bold and linked: `| **[area-x](url)** |`.
    Linked,
    /// Scope cell is the bare label: `| area-x |`.
    Plain,
}

/// Result of parsing one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRow {
    /// A scope label with its owner alias.
    Entry {
        /// Full scope label including the prefix, e.g. `area-JIT`.
        scope: String,
        /// Owner alias, e.g. `@agocke`.
        alias: String,
    },
    /// The row has no cell separator after the scope.
    Malformed,
    /// The owner cell did not yield an alias.
    MissingOwner {
        /// Full scope label including the prefix.
        scope: String,
    },
}

impl TableDialect {
    /// Picks the dialect used for rows of `prefix`, or `None` when the
    /// document holds no row for it in either layout.
    #[must_use]
    pub fn detect(document: &str, prefix: &str) -> Option<Self> {
        [Self::Linked, Self::Plain]
            .into_iter()
            .find(|dialect| document.contains(&dialect.marker(prefix)))
    }

    /// Text that starts every row of `prefix` in this dialect.
    #[must_use]
    pub fn marker(self, prefix: &str) -> String {
        match self {
            Self::Linked => format!("| **[{prefix}"),
            Self::Plain => format!("| {prefix}"),
        }
    }

    /// Parses every row of `prefix` in `document`.
    #[must_use]
    pub fn parse_rows(self, document: &str, prefix: &str) -> Vec<ParsedRow> {
        let marker = self.marker(prefix);
        document
            .split(marker.as_str())
            .skip(1)
            .map(|row| parse_row(row, prefix))
            .collect()
    }
}

/// Parses the text following a row marker.
///
/// The first cell completes the scope label (anything from the first `]`
/// onwards is link decoration); the second cell names the owner.
fn parse_row(row: &str, prefix: &str) -> ParsedRow {
    let mut cells = row.split('|');
    let (Some(scope_cell), Some(owner_cell)) = (cells.next(), cells.next()) else {
        return ParsedRow::Malformed;
    };

    let scope_text = format!("{prefix}{}", scope_cell.trim());
    let scope = scope_text
        .split_once(']')
        .map_or(scope_text.as_str(), |(label, _)| label)
        .to_owned();

    let alias = owner_alias(owner_cell.trim());
    if alias.is_empty() {
        return ParsedRow::MissingOwner { scope };
    }

    ParsedRow::Entry {
        scope,
        alias: alias.to_owned(),
    }
}

/// Extracts the alias from an owner cell, which is either a bare alias or a
/// markdown link whose text is the alias.
fn owner_alias(cell: &str) -> &str {
    cell.strip_prefix('[').map_or(cell, |link| {
        link.split_once(']').map_or("", |(alias, _)| alias.trim())
    })
}
