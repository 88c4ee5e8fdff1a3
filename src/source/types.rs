use std::fmt;

use unicode_width::UnicodeWidthStr;

/// Tag carried by the lead story of the news feed.
pub const LEAD_STORY_TAG: &str = "main-story";

/// Which standings dataset a result table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Drivers,
    Team,
    Races,
    FastestLaps,
}

impl TableKind {
    /// Main menu order: options 1-4 map onto this slice.
    pub const ALL: [TableKind; 4] = [
        TableKind::Drivers,
        TableKind::Team,
        TableKind::Races,
        TableKind::FastestLaps,
    ];

    /// Path segment used by the results archive.
    pub fn slug(self) -> &'static str {
        match self {
            TableKind::Drivers => "drivers",
            TableKind::Team => "team",
            TableKind::Races => "races",
            TableKind::FastestLaps => "fastest-laps",
        }
    }

    /// Championship title shown above the table.
    pub fn title(self) -> &'static str {
        match self {
            TableKind::Drivers => "Drivers Championship",
            TableKind::Team => "Constructor Championship",
            TableKind::Races => "Race Results",
            TableKind::FastestLaps => "DHL Fastest Lap Award",
        }
    }

    /// Screen name: the slug with dashes as spaces, title-cased.
    pub fn display_name(self) -> String {
        self.slug()
            .split('-')
            .map(title_case)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Uppercases the first character and lowercases the rest.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Tabular rows with named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table as aligned text, one row per line, without an index column.
    /// Columns are sized by display width so accented names line up.
    pub fn to_text(&self) -> String {
        let column_count = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.columns.len()))
            .max()
            .unwrap_or(0);

        let mut widths = vec![0usize; column_count];
        for row in std::iter::once(&self.columns).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        for row in std::iter::once(&self.columns).chain(self.rows.iter()) {
            let mut line = String::new();
            for (i, width) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                if i > 0 {
                    line.push_str("  ");
                }
                line.push_str(cell);
                line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }
}

/// One entry of the drivers index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverRecord {
    pub name: String,
    pub number: String,
    pub team: String,
    pub url: String,
    pub img_url: String,
}

impl DriverRecord {
    /// Last word of the name, as printed in the driver header strip.
    pub fn surname(&self) -> &str {
        self.name.split(' ').next_back().unwrap_or(&self.name)
    }

    /// Displayable record fields, in listing order.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("NAME", self.name.as_str()),
            ("NUMBER", self.number.as_str()),
            ("TEAM", self.team.as_str()),
        ]
    }
}

/// Profile page data for one driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverDetail {
    /// Stat rows in page order, labels uppercased.
    pub fields: Vec<(String, String)>,
    pub bio: String,
}

/// A top-stories feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub headline: String,
    /// Ordered tags; the last one is the category.
    pub tags: Vec<String>,
    pub url: String,
    pub img_url: String,
}

impl Story {
    pub fn is_lead(&self) -> bool {
        self.tags.iter().any(|t| t == LEAD_STORY_TAG)
    }

    pub fn category(&self) -> &str {
        self.tags.last().map(String::as_str).unwrap_or("")
    }
}
