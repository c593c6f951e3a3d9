//! Static extraction from a quote listing page.

use crate::html::{class_list, raw_text, stripped_text};
use crate::quotes::models::{Quote, QuoteDetails};
use crate::quotes::selectors;
use scraper::{ElementRef, Html, Selector};

/// A parsed quote page.
pub struct QuotePage {
    document: Html,
}

impl QuotePage {
    pub fn parse(html: &str) -> Self {
        Self { document: Html::parse_document(html) }
    }

    /// Every quote as a structured record, whitespace-trimmed.
    pub fn quotes(&self) -> Vec<Quote> {
        self.document.select(&selectors::QUOTE).map(quote_from_element).collect()
    }

    /// Text of every quote, as written in the page.
    pub fn quote_texts(&self) -> Vec<String> {
        self.all_text(&selectors::QUOTE_TEXT)
    }

    pub fn authors(&self) -> Vec<String> {
        self.all_text(&selectors::AUTHOR)
    }

    /// Every tag link on the page, in order, duplicates kept.
    pub fn tags(&self) -> Vec<String> {
        self.all_text(&selectors::TAG)
    }

    pub fn first_author(&self) -> Option<String> {
        self.first_text(&selectors::AUTHOR)
    }

    pub fn first_quote(&self) -> Option<String> {
        self.first_text(&selectors::QUOTE_TEXT)
    }

    /// Author of the first quote, located through the quote container.
    pub fn first_quote_author(&self) -> Option<String> {
        self.first_text(&selectors::QUOTE_AUTHOR)
    }

    /// Target of the "Next" pagination link.
    pub fn next_href(&self) -> Option<String> {
        self.document
            .select(&selectors::NEXT_LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(String::from)
    }

    /// Tag labels grouped by quote.
    pub fn tags_per_quote(&self) -> Vec<Vec<String>> {
        self.document
            .select(&selectors::QUOTE)
            .map(|q| q.select(&selectors::QUOTE_TAGS).map(stripped_text).collect())
            .collect()
    }

    /// Attribute-level view of every quote.
    pub fn details(&self) -> Vec<QuoteDetails> {
        self.document
            .select(&selectors::QUOTE)
            .map(|q| QuoteDetails {
                text: first_stripped(q, &selectors::TEXT),
                author: first_stripped(q, &selectors::AUTHOR),
                about_href: q
                    .select(&selectors::ABOUT_LINK)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(String::from),
                tag_count: q.select(&selectors::QUOTE_TAGS).count(),
                classes: class_list(q).map(String::from).collect(),
            })
            .collect()
    }

    fn all_text(&self, selector: &Selector) -> Vec<String> {
        self.document.select(selector).map(raw_text).collect()
    }

    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.document.select(selector).next().map(raw_text)
    }
}

fn quote_from_element(element: ElementRef) -> Quote {
    Quote {
        text: first_stripped(element, &selectors::TEXT),
        author: first_stripped(element, &selectors::AUTHOR),
        tags: element.select(&selectors::QUOTE_TAGS).map(stripped_text).collect(),
    }
}

fn first_stripped(element: ElementRef, selector: &Selector) -> String {
    element.select(selector).next().map(stripped_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
            <span class="text" itemprop="text">“The world as we have created it is a process of our thinking.”</span>
            <span>by <small class="author" itemprop="author">Albert Einstein</small>
            <a href="/author/Albert-Einstein">(about)</a></span>
            <div class="tags">Tags:
                <a class="tag" href="/tag/change/page/1/">change</a>
                <a class="tag" href="/tag/deep-thoughts/page/1/">deep-thoughts</a>
            </div>
        </div>
        <div class="quote">
            <span class="text">“It is our choices, Harry.”</span>
            <span>by <small class="author">J.K. Rowling</small></span>
            <div class="tags">Tags:
                <a class="tag" href="/tag/abilities/page/1/">abilities</a>
            </div>
        </div>
        <div class="tags-box">
            <a class="tag" href="/tag/love/">love</a>
        </div>
        <nav><ul class="pager"><li class="next"><a href="/page/2/">Next <span>→</span></a></li></ul></nav>
        </body></html>
    "#;

    #[test]
    fn test_quotes() {
        let page = QuotePage::parse(PAGE);
        let quotes = page.quotes();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].author, "Albert Einstein");
        assert_eq!(quotes[0].tags, vec!["change", "deep-thoughts"]);
        assert!(quotes[0].text.starts_with("“The world"));
        assert_eq!(quotes[1].tags, vec!["abilities"]);
    }

    #[test]
    fn test_texts_and_authors() {
        let page = QuotePage::parse(PAGE);
        assert_eq!(page.quote_texts().len(), 2);
        assert_eq!(page.authors(), vec!["Albert Einstein", "J.K. Rowling"]);
        assert_eq!(page.first_author().as_deref(), Some("Albert Einstein"));
        assert_eq!(page.first_quote_author().as_deref(), Some("Albert Einstein"));
        assert_eq!(page.first_quote().as_deref(), Some("“The world as we have created it is a process of our thinking.”"));
    }

    #[test]
    fn test_page_wide_tags() {
        let page = QuotePage::parse(PAGE);
        assert_eq!(page.tags(), vec!["change", "deep-thoughts", "abilities", "love"]);
    }

    #[test]
    fn test_tags_per_quote() {
        let page = QuotePage::parse(PAGE);
        assert_eq!(
            page.tags_per_quote(),
            vec![vec!["change".to_string(), "deep-thoughts".to_string()], vec!["abilities".to_string()]]
        );
    }

    #[test]
    fn test_next_href() {
        let page = QuotePage::parse(PAGE);
        assert_eq!(page.next_href().as_deref(), Some("/page/2/"));

        let last = QuotePage::parse("<html><body><ul class=\"pager\"></ul></body></html>");
        assert!(last.next_href().is_none());
    }

    #[test]
    fn test_details() {
        let page = QuotePage::parse(PAGE);
        let details = page.details();
        assert_eq!(details.len(), 2);

        assert_eq!(details[0].about_href.as_deref(), Some("/author/Albert-Einstein"));
        assert_eq!(details[0].tag_count, 2);
        assert_eq!(details[0].classes, vec!["quote"]);

        assert_eq!(details[1].author, "J.K. Rowling");
        assert!(details[1].about_href.is_none());
        assert_eq!(details[1].tag_count, 1);
    }

    #[test]
    fn test_details_classes_in_markup_order() {
        let page = QuotePage::parse(
            r#"<html><body><div class="quote zebra alpha"><span class="text">t</span></div></body></html>"#,
        );
        assert_eq!(page.details()[0].classes, vec!["quote", "zebra", "alpha"]);
    }

    #[test]
    fn test_empty_page() {
        let page = QuotePage::parse("<html></html>");
        assert!(page.quotes().is_empty());
        assert!(page.first_author().is_none());
        assert!(page.details().is_empty());
    }
}
