//! Hand-maintained ownership data that the ownership document lacks.

/// Seed entries loaded into an [`OwnerDirectory`](super::OwnerDirectory)
/// before the ownership document is ingested.
///
/// Seeded scope labels take precedence over document rows because ingestion
/// never overwrites an existing mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSeed {
    /// `(scope label, owner alias)` pairs, e.g. `("os-linux", "@jeffhandley")`.
    pub leads: Vec<(String, String)>,
    /// `(owner alias, display name)` pairs, e.g. `("@agocke", "Andy Gocke")`.
    pub names: Vec<(String, String)>,
}

impl OwnerSeed {
    /// A seed without any entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            leads: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Adds a scope label to owner alias mapping.
    #[must_use]
    pub fn with_lead(mut self, scope_label: &str, alias: &str) -> Self {
        self.leads.push((scope_label.to_owned(), alias.to_owned()));
        self
    }

    /// Adds an owner alias to display name mapping.
    #[must_use]
    pub fn with_name(mut self, alias: &str, display_name: &str) -> Self {
        self.names.push((alias.to_owned(), display_name.to_owned()));
        self
    }
}

const DEFAULT_LEADS: &[(&str, &str)] = &[
    ("arch-loongarch64", "@mangod9"),
    ("os-linux", "@jeffhandley"),
    ("os-freebsd", "@jeffhandley"),
    ("arch-riscv", "@JulieLeeMSFT"),
];

const DEFAULT_NAMES: &[(&str, &str)] = &[
    ("@agocke", "Andy Gocke"),
    ("@sammonort", "Sam Patel"),
    ("@ericstj", "Eric St. John"),
    ("@karelz", "Karel Zikmund"),
    ("@steveisok", "Steve Pfister"),
    ("@lewing", "Larry Ewing"),
    ("@jeffhandley", "Jeff Handley"),
    ("@JulieLeeMSFT", "Julie Lee"),
    ("@jeffschwMSFT", "Jeff Schwartz"),
    ("@tommcdon", "Tom McDonald"),
    ("@mangod9", "Manish Godse"),
    ("@dleeapho", "Dan Leeaphon"),
    ("@HongGit", "Hong Li"),
    ("@marek-safar", "Marek Safar"),
    ("@kevinpi", "Kevin Pilch"),
    ("@jaredpar", "Jared Parsons"),
    ("@ajcvickers", "Arthur Vickers"),
    ("@danmoseley", "Dan Moseley"),
    ("@MichaelSimons", "Michael Simons"),
    ("@adityamandaleeka", "Aditya Mandaleeka"),
    ("@David-Engel", "David Engel"),
    ("@vitek-karas", "Vitek Karas"),
    ("@joperezr", "Jose Perez Rodriguez"),
];

impl Default for OwnerSeed {
    /// Architecture and OS labels missing from the .NET ownership documents,
    /// plus the known lead display names.
    fn default() -> Self {
        Self {
            leads: owned_pairs(DEFAULT_LEADS),
            names: owned_pairs(DEFAULT_NAMES),
        }
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|&(key, value)| (key.to_owned(), value.to_owned()))
        .collect()
}
