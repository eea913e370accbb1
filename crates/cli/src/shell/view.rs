use quicksearch_api::{DisplayGroup, IndexStats};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// One result row. The name is printed on the first row of its group only.
#[derive(Tabled)]
pub struct EntryRow {
    pub name: String,
    pub signature: String,
    pub file: String,
    pub target: String,
}

/// Full details of one entry, for `show`
#[derive(Tabled)]
pub struct EntryDetail {
    #[tabled(rename = "#")]
    pub index: usize,
    pub qualified_name: String,
    pub category: String,
    pub file: String,
    pub target: String,
}

#[derive(Tabled)]
struct StatRow {
    stat: &'static str,
    value: usize,
}

pub fn render_groups(groups: &[DisplayGroup]) -> String {
    if groups.is_empty() {
        return "NO RECORDS FOUND".to_string();
    }

    let rows: Vec<EntryRow> = groups
        .iter()
        .flat_map(|group| {
            group.items.iter().enumerate().map(|(i, item)| EntryRow {
                name: if i == 0 {
                    group.display_name.to_string()
                } else {
                    String::new()
                },
                signature: item.signature_label.to_string(),
                file: item.file.as_deref().unwrap_or("-").to_string(),
                target: item.target.to_string(),
            })
        })
        .collect();

    Table::new(&rows).with(Style::psql()).to_string()
}

pub fn render_group(group: &DisplayGroup) -> String {
    let rows: Vec<EntryDetail> = group
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| EntryDetail {
            index: i + 1,
            qualified_name: item.qualified_name.to_string(),
            category: item
                .category
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            file: item.file.as_deref().unwrap_or("-").to_string(),
            target: item.target.to_string(),
        })
        .collect();

    format!(
        "{} ({} entries)\n{}",
        group.display_name,
        group.len(),
        Table::new(&rows).with(Style::psql())
    )
}

pub fn render_stats(stats: &IndexStats) -> String {
    let rows = [
        StatRow { stat: "names", value: stats.name_count },
        StatRow { stat: "entries", value: stats.entry_count },
        StatRow { stat: "nodes", value: stats.node_count },
        StatRow { stat: "skipped records", value: stats.skipped_records },
    ];
    Table::new(rows).with(Style::psql()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksearch_api::{Category, SubEntry};
    use std::sync::Arc;

    fn group() -> DisplayGroup {
        let mut group = DisplayGroup::new(Arc::from("abs"));
        for (target, label) in [("#A", "(array)"), ("#B", "(vector)")] {
            group.items.push(SubEntry {
                signature_label: Arc::from(label),
                target: Arc::from(target),
                qualified_name: Arc::from(format!("abs{}", label)),
                file: None,
                category: (target == "#A").then_some(Category::FUNCTIONS),
            });
        }
        group
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_groups(&[]), "NO RECORDS FOUND");
    }

    #[test]
    fn test_name_printed_once_per_group() {
        let out = render_groups(&[group()]);
        assert_eq!(out.matches("abs").count(), 1);
        assert!(out.contains("(array)"));
        assert!(out.contains("#B"));
    }

    #[test]
    fn test_render_group_details() {
        let out = render_group(&group());
        assert!(out.starts_with("abs (2 entries)"));
        assert!(out.contains("abs(vector)"));
        assert!(out.contains("functions"));
    }
}
