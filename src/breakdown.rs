use crate::model::{Commit, LineEdit};
use serde::{Deserialize, Serialize};

/// Tableau10, the palette used for per-language line swatches.
pub const TABLEAU10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub count: usize,
    pub proportion: f64,
}

/// Per-language line counts, in the order languages first appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub total_lines: usize,
    pub languages: Vec<LanguageShare>,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn get(&self, language: &str) -> Option<&LanguageShare> {
        self.languages.iter().find(|l| l.language == language)
    }
}

fn count_first_seen<'a, I>(keys: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key.to_string(), 1)),
        }
    }
    counts
}

pub fn compute_breakdown<'a, I>(commits: I) -> Breakdown
where
    I: IntoIterator<Item = &'a Commit>,
{
    let lines: Vec<&LineEdit> = commits.into_iter().flat_map(|c| c.lines.iter()).collect();
    let total = lines.len();
    if total == 0 {
        return Breakdown::default();
    }

    let languages = count_first_seen(lines.iter().map(|l| l.language.as_str()))
        .into_iter()
        .map(|(language, count)| LanguageShare {
            language,
            count,
            proportion: count as f64 / total as f64,
        })
        .collect();

    Breakdown {
        total_lines: total,
        languages,
    }
}

/// Breakdown of the selection, or of the whole dataset when nothing is
/// selected. The returned flag reports whether the fallback was taken.
pub fn breakdown_with_fallback(selection: &[&Commit], all: &[Commit]) -> (Breakdown, bool) {
    if selection.is_empty() {
        (compute_breakdown(all), true)
    } else {
        (compute_breakdown(selection.iter().copied()), false)
    }
}

/// Assigns palette colours to keys in the order they are first requested.
#[derive(Debug, Clone, Default)]
pub struct OrdinalColors {
    domain: Vec<String>,
}

impl OrdinalColors {
    /// Seed the domain with every language in `commits`, in first-seen line
    /// order, so colours do not shift as the view narrows.
    pub fn for_languages<'a, I>(commits: I) -> Self
    where
        I: IntoIterator<Item = &'a Commit>,
    {
        let mut colors = Self::default();
        for line in commits.into_iter().flat_map(|c| c.lines.iter()) {
            colors.color(&line.language);
        }
        colors
    }

    pub fn color(&mut self, key: &str) -> &'static str {
        let idx = match self.domain.iter().position(|k| k == key) {
            Some(i) => i,
            None => {
                self.domain.push(key.to_string());
                self.domain.len() - 1
            }
        };
        TABLEAU10[idx % TABLEAU10.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSwatch {
    pub language: String,
    pub color: String,
}

/// One row of the file-composition strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub lines: usize,
    pub languages: Vec<(String, usize)>,
    pub swatches: Vec<LineSwatch>,
}

/// One swatch per language of `breakdown`, coloured from `colors`.
pub fn legend(breakdown: &Breakdown, colors: &mut OrdinalColors) -> Vec<LineSwatch> {
    breakdown
        .languages
        .iter()
        .map(|share| LineSwatch {
            language: share.language.clone(),
            color: colors.color(&share.language).to_string(),
        })
        .collect()
}

/// Lines of `commits` grouped by file (first-seen order) with one coloured
/// swatch per line.
pub fn file_entries<'a, I>(commits: I, colors: &mut OrdinalColors) -> Vec<FileEntry>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut groups: Vec<(String, Vec<&LineEdit>)> = Vec::new();
    for line in commits.into_iter().flat_map(|c| c.lines.iter()) {
        match groups.iter_mut().find(|(name, _)| *name == line.file) {
            Some((_, lines)) => lines.push(line),
            None => groups.push((line.file.clone(), vec![line])),
        }
    }

    groups
        .into_iter()
        .map(|(name, lines)| FileEntry {
            languages: count_first_seen(lines.iter().map(|l| l.language.as_str())),
            swatches: lines
                .iter()
                .map(|l| LineSwatch {
                    language: l.language.clone(),
                    color: colors.color(&l.language).to_string(),
                })
                .collect(),
            lines: lines.len(),
            name,
        })
        .collect()
}
