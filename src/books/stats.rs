//! Aggregate figures over a crawled catalog.

use crate::books::models::Book;
use crate::report::Report;
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals, most expensive title and rating histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total: usize,
    /// First book with the highest price.
    pub most_expensive: Option<Book>,
    pub available: usize,
    /// Rating ordinal to count, ascending. Unrated books are not counted.
    pub rating_distribution: BTreeMap<u8, usize>,
}

impl CatalogSummary {
    pub fn from_books(books: &[Book]) -> Self {
        let most_expensive = books
            .iter()
            .fold(None::<&Book>, |best, book| match best {
                Some(b) if b.price >= book.price => Some(b),
                _ => Some(book),
            })
            .cloned();

        let mut rating_distribution = BTreeMap::new();
        for rating in books.iter().filter_map(|b| b.rating) {
            *rating_distribution.entry(rating).or_insert(0) += 1;
        }

        Self {
            total: books.len(),
            most_expensive,
            available: books.iter().filter(|b| b.available).count(),
            rating_distribution,
        }
    }

    /// Appends the summary block to a transcript.
    pub fn write_to(&self, report: &mut Report) {
        report.field("Total books extracted", self.total);

        if self.total == 0 {
            return;
        }

        if let Some(book) = &self.most_expensive {
            report.blank();
            report.json("Most expensive book", book);
        }

        report.blank();
        report.field("Available", self.available);

        report.blank();
        report.line("Rating distribution:");
        for (rating, count) in &self.rating_distribution {
            report.line(format!("  {}: {}", rating, count));
        }
    }
}
