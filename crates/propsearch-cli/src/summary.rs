//! Plain-text summary of every dataset store.

use chrono::{DateTime, Utc};
use propsearch_core::cache::age_display;
use propsearch_core::{DatasetId, LoadState, Stores};

pub struct Row {
    pub dataset: DatasetId,
    pub state: LoadState,
    pub count: usize,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl Row {
    pub fn render(&self) -> String {
        let age = self
            .refreshed_at
            .map(age_display)
            .unwrap_or_else(|| "never".to_string());
        format!(
            "{:<14} {:<8} {:>7} records  {}",
            self.dataset.display_name(),
            self.state.display_name(),
            self.count,
            age
        )
    }
}

pub fn rows(stores: &Stores) -> Vec<Row> {
    vec![
        Row {
            dataset: DatasetId::Property,
            state: stores.property.load_state(),
            count: stores.property.len(),
            refreshed_at: stores.property.refreshed_at(),
        },
        Row {
            dataset: DatasetId::School,
            state: stores.school.load_state(),
            count: stores.school.len(),
            refreshed_at: stores.school.refreshed_at(),
        },
        Row {
            dataset: DatasetId::Transit,
            state: stores.transit.load_state(),
            count: stores.transit.len(),
            refreshed_at: stores.transit.refreshed_at(),
        },
        Row {
            dataset: DatasetId::Metadata,
            state: stores.metadata.load_state(),
            count: stores.metadata.len(),
            refreshed_at: stores.metadata.refreshed_at(),
        },
    ]
}

pub fn print(stores: &Stores, show_lines: bool) {
    for row in rows(stores) {
        println!("{}", row.render());
    }

    match stores.metadata.last_updated().and_then(|u| u.latest()) {
        Some(at) => println!("\nServer data last refreshed {}", at.format("%d %b %Y %H:%M UTC")),
        None => println!("\nServer data last refreshed: unknown"),
    }

    if show_lines {
        let lines = stores.transit.all_lines();
        println!("\n{} tube lines:", lines.len());
        for line in lines {
            println!("  {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_row_never_refreshed() {
        let row = Row {
            dataset: DatasetId::School,
            state: LoadState::Failed,
            count: 0,
            refreshed_at: None,
        };
        let rendered = row.render();
        assert!(rendered.starts_with("Schools"));
        assert!(rendered.contains("failed"));
        assert!(rendered.ends_with("never"));
    }

    #[test]
    fn test_row_with_age() {
        let row = Row {
            dataset: DatasetId::Transit,
            state: LoadState::Ready,
            count: 272,
            refreshed_at: Some(Utc::now() - Duration::minutes(5)),
        };
        let rendered = row.render();
        assert!(rendered.contains("272 records"));
        assert!(rendered.ends_with("5m ago"));
    }
}
