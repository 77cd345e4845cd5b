//! Further-reading panel
//!
//! A fixed catalogue of PubMed Central searches and articles, shown after a
//! short artificial loading delay.

use crate::i18n::TextKey;

/// Delay before the catalogue appears
pub const LOADING_DELAY_MS: i32 = 1000;

/// A literature search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub title: &'static str,
    pub link: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Article {
    pub title: &'static str,
    pub link: &'static str,
    /// Journal and year
    pub journal: &'static str,
}

pub const QUERIES: [Query; 2] = [
    Query {
        title: r#"("visual perception" OR "motion perception") AND ("Gestalt principles" OR "emergent properties")"#,
        link: "https://www.ncbi.nlm.nih.gov/pmc/?term=(%22visual+perception%22+OR+%22motion+perception%22)+AND+(%22Gestalt+principles%22+OR+%22emergent+properties%22)",
    },
    Query {
        title: r#""circular motion illusion" OR "visual motion illusion""#,
        link: "https://www.ncbi.nlm.nih.gov/pmc/?term=%22circular+motion+illusion%22+OR+%22visual+motion+illusion%22",
    },
];

pub const REVIEWS: [Article; 2] = [
    Article {
        title: "A Primer on Gestalt Psychology",
        link: "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC8978553/",
        journal: "Frontiers in Psychology, 2022",
    },
    Article {
        title: "Gestalt theory rearranged: Back to Wertheimer",
        link: "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC4535213/",
        journal: "Frontiers in Psychology, 2015",
    },
];

pub const EXPERIMENTAL: [Article; 1] = [Article {
    title: "Neural correlates of the vibrating motion illusion in human V5/MT+",
    link: "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC8107931/",
    journal: "NeuroImage, 2021",
}];

/// One titled list in the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: TextKey,
    pub entries: Vec<Entry>,
}

/// A rendered list item: link text, target and optional trailing note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub title: &'static str,
    pub link: &'static str,
    pub journal: Option<&'static str>,
}

impl From<&Query> for Entry {
    fn from(q: &Query) -> Self {
        Self {
            title: q.title,
            link: q.link,
            journal: None,
        }
    }
}

impl From<&Article> for Entry {
    fn from(a: &Article) -> Self {
        Self {
            title: a.title,
            link: a.link,
            journal: Some(a.journal),
        }
    }
}

/// Panel contents in display order
pub fn sections() -> Vec<Section> {
    vec![
        Section {
            heading: TextKey::PmcQueries,
            entries: QUERIES.iter().map(Entry::from).collect(),
        },
        Section {
            heading: TextKey::ReviewArticles,
            entries: REVIEWS.iter().map(Entry::from).collect(),
        },
        Section {
            heading: TextKey::RecentExperimentalArticles,
            entries: EXPERIMENTAL.iter().map(Entry::from).collect(),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingState {
    #[default]
    Hidden,
    Loading {
        generation: u64,
    },
    Shown,
}

#[derive(Debug, Default)]
pub struct ReadingPanel {
    state: ReadingState,
    generation: u64,
}

impl ReadingPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ReadingState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ReadingState::Loading { .. })
    }

    pub fn is_visible(&self) -> bool {
        self.state != ReadingState::Hidden
    }

    /// Hide when visible, otherwise start loading.
    ///
    /// Returns the generation to pass to `finish_loading` once the delay
    /// elapsed, or `None` if the panel was hidden.
    pub fn toggle(&mut self) -> Option<u64> {
        if self.is_visible() {
            self.hide();
            return None;
        }
        self.generation += 1;
        self.state = ReadingState::Loading {
            generation: self.generation,
        };
        Some(self.generation)
    }

    /// Returns true if the catalogue should now be displayed
    pub fn finish_loading(&mut self, generation: u64) -> bool {
        match self.state {
            ReadingState::Loading { generation: current } if current == generation => {
                self.state = ReadingState::Shown;
                true
            }
            _ => false,
        }
    }

    pub fn hide(&mut self) {
        self.state = ReadingState::Hidden;
    }
}
