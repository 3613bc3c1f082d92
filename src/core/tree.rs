//! Flattens the section tree into the rows the sidebar draws, top to bottom.
//!
//! Every known section yields a header row. Expanded sections are followed
//! by one row per topic, in store order. Topics with unknown sections never
//! appear.

use crate::core::section::SectionId;
use crate::core::state::NavState;
use crate::core::store::TopicStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRow {
    Section {
        section: SectionId,
        expanded: bool,
        topic_count: usize,
    },
    Topic {
        section: SectionId,
        id: String,
        title: String,
        selected: bool,
    },
}

impl NavRow {
    pub fn section(&self) -> SectionId {
        match self {
            NavRow::Section { section, .. } | NavRow::Topic { section, .. } => *section,
        }
    }
}

pub fn nav_rows(store: &TopicStore, nav: &NavState) -> Vec<NavRow> {
    let mut rows = Vec::new();
    for (section, topics) in store.group_by_section() {
        let expanded = nav.is_expanded(section);
        rows.push(NavRow::Section {
            section,
            expanded,
            topic_count: topics.len(),
        });
        if !expanded {
            continue;
        }
        rows.extend(topics.into_iter().map(|t| NavRow::Topic {
            section,
            id: t.id.clone(),
            title: t.title.clone(),
            selected: t.id == nav.selected,
        }));
    }
    rows
}
