//! arXiv Atom feed parsing.
//!
//! Extracts the fields of each `<entry>` into a [`PaperRecord`]. Elements are
//! matched by local name, so the `arxiv:` and `opensearch:` prefixes need no
//! namespace resolution.

use chrono::DateTime;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ClientError, ClientResult};
use crate::models::PaperRecord;

/// Marker in the `<id>` of entries that report a query error instead of a paper.
const ERROR_ENTRY_MARKER: &str = "/api/errors";

/// Base URL for PDFs when an entry carries no pdf link.
const ARXIV_PDF_URL: &str = "https://arxiv.org/pdf";

/// Text-bearing element currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Summary,
    Published,
    Updated,
    AuthorName,
    Comment,
    JournalRef,
    Doi,
}

impl Field {
    fn from_local_name(name: &[u8], in_author: bool) -> Option<Self> {
        match name {
            b"id" => Some(Self::Id),
            b"title" => Some(Self::Title),
            b"summary" => Some(Self::Summary),
            b"published" => Some(Self::Published),
            b"updated" => Some(Self::Updated),
            b"name" if in_author => Some(Self::AuthorName),
            b"comment" => Some(Self::Comment),
            b"journal_ref" => Some(Self::JournalRef),
            b"doi" => Some(Self::Doi),
            _ => None,
        }
    }
}

/// Fields collected for one `<entry>`.
#[derive(Debug, Default)]
struct EntryBuilder {
    id: String,
    title: String,
    summary: String,
    published: String,
    updated: String,
    authors: Vec<String>,
    author_name: String,
    categories: Vec<String>,
    primary_category: Option<String>,
    pdf_url: Option<String>,
    comment: String,
    journal_ref: String,
    doi: String,
}

impl EntryBuilder {
    fn push_text(&mut self, field: Field, text: &str) {
        let target = match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::Summary => &mut self.summary,
            Field::Published => &mut self.published,
            Field::Updated => &mut self.updated,
            Field::AuthorName => &mut self.author_name,
            Field::Comment => &mut self.comment,
            Field::JournalRef => &mut self.journal_ref,
            Field::Doi => &mut self.doi,
        };
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(text);
    }

    fn finish_author(&mut self) {
        let name = collapse_whitespace(&self.author_name);
        if !name.is_empty() {
            self.authors.push(name);
        }
        self.author_name.clear();
    }

    fn add_category(&mut self, term: String) {
        if !term.is_empty() && !self.categories.contains(&term) {
            self.categories.push(term);
        }
    }

    fn is_error_entry(&self) -> bool {
        self.id.contains(ERROR_ENTRY_MARKER)
    }

    fn build(self) -> PaperRecord {
        let arxiv_id = entry_id_to_arxiv_id(self.id.trim());
        let pdf_url = self
            .pdf_url
            .unwrap_or_else(|| format!("{}/{}", ARXIV_PDF_URL, arxiv_id));

        PaperRecord {
            title: collapse_whitespace(&self.title),
            authors: self.authors,
            r#abstract: collapse_whitespace(&self.summary),
            published: normalize_timestamp(&self.published),
            updated: non_empty(normalize_timestamp(&self.updated)),
            categories: self.categories,
            primary_category: self.primary_category,
            pdf_url,
            comment: non_empty(collapse_whitespace(&self.comment)),
            journal_ref: non_empty(collapse_whitespace(&self.journal_ref)),
            doi: non_empty(self.doi.trim().to_string()),
            arxiv_id,
        }
    }
}

/// Parse an arXiv Atom feed into paper records.
///
/// Returns an empty vector for a well-formed feed without entries. Error
/// entries (arXiv's way of reporting a malformed `id_list`) become
/// [`ClientError::NotFound`].
///
/// # Errors
///
/// Returns [`ClientError::Xml`] when the document is not a well-formed Atom feed.
pub fn parse_atom_feed(xml: &str) -> ClientResult<Vec<PaperRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut papers = Vec::new();
    let mut saw_feed = false;
    let mut entry: Option<EntryBuilder> = None;
    let mut in_author = false;
    let mut field: Option<Field> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ClientError::xml(format!("{e} at position {}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(e) => {
                let local = e.local_name();
                match local.as_ref() {
                    b"feed" => saw_feed = true,
                    b"entry" => {
                        entry = Some(EntryBuilder::default());
                        in_author = false;
                        field = None;
                    }
                    b"author" if entry.is_some() => in_author = true,
                    name => {
                        if let Some(current) = entry.as_mut() {
                            apply_attributes(current, &e)?;
                            field = Field::from_local_name(name, in_author);
                        }
                    }
                }
            }
            Event::Empty(e) => {
                if let Some(current) = entry.as_mut() {
                    apply_attributes(current, &e)?;
                }
            }
            Event::Text(t) => {
                if let (Some(current), Some(f)) = (entry.as_mut(), field) {
                    let text = t.unescape().map_err(|e| ClientError::xml(e.to_string()))?;
                    current.push_text(f, &text);
                }
            }
            Event::CData(c) => {
                if let (Some(current), Some(f)) = (entry.as_mut(), field) {
                    current.push_text(f, &String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"entry" => {
                    if let Some(done) = entry.take() {
                        if done.is_error_entry() {
                            return Err(ClientError::not_found(collapse_whitespace(
                                &done.summary,
                            )));
                        }
                        papers.push(done.build());
                    }
                    field = None;
                }
                b"author" => {
                    if let Some(current) = entry.as_mut() {
                        current.finish_author();
                    }
                    in_author = false;
                    field = None;
                }
                _ => field = None,
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if entry.is_some() {
        return Err(ClientError::xml("feed ended inside an <entry>"));
    }
    if !saw_feed {
        return Err(ClientError::xml("missing <feed> root element"));
    }

    Ok(papers)
}

/// Read `<link>`, `<category>` and `<arxiv:primary_category>` attributes.
fn apply_attributes(entry: &mut EntryBuilder, element: &BytesStart<'_>) -> ClientResult<()> {
    match element.local_name().as_ref() {
        b"link" => {
            let mut href = None;
            let mut is_pdf = false;
            for attr in element.attributes() {
                let attr = attr.map_err(|e| ClientError::xml(e.to_string()))?;
                let value = attr.unescape_value().map_err(|e| ClientError::xml(e.to_string()))?;
                match attr.key.local_name().as_ref() {
                    b"href" => href = Some(value.into_owned()),
                    b"title" => is_pdf = value == "pdf",
                    _ => {}
                }
            }
            if is_pdf {
                entry.pdf_url = href;
            }
        }
        b"category" => {
            if let Some(term) = term_attribute(element)? {
                entry.add_category(term);
            }
        }
        b"primary_category" => {
            entry.primary_category = term_attribute(element)?;
        }
        _ => {}
    }
    Ok(())
}

fn term_attribute(element: &BytesStart<'_>) -> ClientResult<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| ClientError::xml(e.to_string()))?;
        if attr.key.local_name().as_ref() == b"term" {
            let value = attr.unescape_value().map_err(|e| ClientError::xml(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// `http://arxiv.org/abs/2301.07041v2` -> `2301.07041v2`,
/// `http://arxiv.org/abs/math/0104020v1` -> `math/0104020v1`.
fn entry_id_to_arxiv_id(entry_id: &str) -> String {
    entry_id
        .split_once("/abs/")
        .map(|(_, id)| id)
        .unwrap_or(entry_id)
        .to_string()
}

fn normalize_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|_| raw.to_string())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query?search_query%3Dall%3Aelectron" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: search_query=all:electron</title>
  <id>http://arxiv.org/api/cHxbiOdZaP56ODnBPIenZhzg5f8</id>
  <updated>2023-01-20T00:00:00-05:00</updated>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">1</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/abs/2301.07041v2</id>
    <updated>2023-01-19T10:00:00Z</updated>
    <published>2023-01-17T18:58:03Z</published>
    <title>Attention Over
      Electrons &amp; Holes</title>
    <summary>  We study electrons.
  And holes.
</summary>
    <author>
      <name>Ada Lovelace</name>
      <arxiv:affiliation xmlns:arxiv="http://arxiv.org/schemas/atom">Analytical Engines Ltd</arxiv:affiliation>
    </author>
    <author>
      <name>Alan Turing</name>
    </author>
    <arxiv:doi xmlns:arxiv="http://arxiv.org/schemas/atom">10.1234/electrons</arxiv:doi>
    <link title="doi" href="http://dx.doi.org/10.1234/electrons" rel="related"/>
    <arxiv:comment xmlns:arxiv="http://arxiv.org/schemas/atom">12 pages, 3 figures</arxiv:comment>
    <arxiv:journal_ref xmlns:arxiv="http://arxiv.org/schemas/atom">Phys. Rev. X 1 (2023)</arxiv:journal_ref>
    <link href="http://arxiv.org/abs/2301.07041v2" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2301.07041v2" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cond-mat.str-el" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cond-mat.str-el" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_full_entry() {
        let papers = parse_atom_feed(FEED).unwrap();
        assert_eq!(papers.len(), 1);

        let paper = &papers[0];
        assert_eq!(paper.arxiv_id, "2301.07041v2");
        assert_eq!(paper.title, "Attention Over Electrons & Holes");
        assert_eq!(paper.r#abstract, "We study electrons. And holes.");
        assert_eq!(paper.authors, vec!["Ada Lovelace", "Alan Turing"]);
        assert_eq!(paper.published, "2023-01-17T18:58:03+00:00");
        assert_eq!(paper.updated.as_deref(), Some("2023-01-19T10:00:00+00:00"));
        assert_eq!(paper.categories, vec!["cond-mat.str-el", "cs.LG"]);
        assert_eq!(paper.primary_category.as_deref(), Some("cond-mat.str-el"));
        assert_eq!(paper.pdf_url, "http://arxiv.org/pdf/2301.07041v2");
        assert_eq!(paper.doi.as_deref(), Some("10.1234/electrons"));
        assert_eq!(paper.comment.as_deref(), Some("12 pages, 3 figures"));
        assert_eq!(paper.journal_ref.as_deref(), Some("Phys. Rev. X 1 (2023)"));
    }

    #[test]
    fn test_affiliation_is_not_an_author() {
        let papers = parse_atom_feed(FEED).unwrap();
        assert!(!papers[0].authors.iter().any(|a| a.contains("Analytical")));
    }

    #[test]
    fn test_empty_feed_yields_no_papers() {
        let xml = r#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom">
            <title>ArXiv Query</title><id>http://arxiv.org/api/x</id>
            <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">0</opensearch:totalResults>
        </feed>"#;
        assert!(parse_atom_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_error_entry_is_not_found() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
          <entry>
            <id>http://arxiv.org/api/errors#incorrect_id_format_for_bogus</id>
            <title>Error</title>
            <summary>incorrect id format for bogus</summary>
          </entry>
        </feed>"#;
        let err = parse_atom_feed(xml).unwrap_err();
        assert!(matches!(err, ClientError::NotFound { .. }));
        assert!(err.to_string().contains("incorrect id format"));
    }

    #[test]
    fn test_old_style_identifier_and_missing_pdf_link() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
          <entry>
            <id>http://arxiv.org/abs/math/0104020v1</id>
            <published>2001-04-02T00:00:00Z</published>
            <title>Knots</title>
          </entry>
        </feed>"#;
        let papers = parse_atom_feed(xml).unwrap();
        assert_eq!(papers[0].arxiv_id, "math/0104020v1");
        assert_eq!(papers[0].pdf_url, "https://arxiv.org/pdf/math/0104020v1");
        assert!(papers[0].primary_category.is_none());
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        let err = parse_atom_feed("<feed><entry><id>x</title></entry></feed>").unwrap_err();
        assert!(matches!(err, ClientError::Xml(_)));
    }

    #[test]
    fn test_truncated_document_is_rejected() {
        let err = parse_atom_feed("<feed><entry><id>http://arxiv.org/abs/1</id>").unwrap_err();
        assert!(matches!(err, ClientError::Xml(_)));
    }

    #[test]
    fn test_non_feed_document_is_rejected() {
        let err = parse_atom_feed("<html><body>Service Unavailable</body></html>").unwrap_err();
        assert!(matches!(err, ClientError::Xml(_)));
    }
}
