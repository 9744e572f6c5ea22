//! Output formatting for CLI commands.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SieveArgs};
use crate::document::{DocId, Document, DocumentStatus};
use crate::error::Result;

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub status: DocumentStatus,
    pub policy: String,
    pub hits: Vec<Document>,
    /// Page boundaries as hit counts, when pagination was requested.
    pub pages: Option<Vec<usize>>,
    pub duration_ms: u64,
}

/// Result structure for document matching.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub query: String,
    pub id: DocId,
    pub status: DocumentStatus,
    pub words: Vec<String>,
}

/// Result structure for duplicate removal.
#[derive(Debug, Serialize, Deserialize)]
pub struct DedupResult {
    pub removed: Vec<DocId>,
    pub remaining: usize,
}

/// Hits of one query in a batch.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchQueryResult {
    pub query: String,
    pub hits: Vec<Document>,
}

/// Result structure for batch queries.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResults {
    pub threads: usize,
    pub results: Vec<BatchQueryResult>,
    pub duration_ms: u64,
}

fn write_hits(f: &mut fmt::Formatter<'_>, hits: &[Document]) -> fmt::Result {
    if hits.is_empty() {
        return writeln!(f, "No documents found.");
    }
    for hit in hits {
        writeln!(f, "{hit}")?;
    }
    Ok(())
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Results:")?;
        writeln!(f, "═══════════════")?;
        match &self.pages {
            Some(pages) => {
                let mut start = 0;
                for (number, &len) in pages.iter().enumerate() {
                    writeln!(f, "Page {}:", number + 1)?;
                    write_hits(f, &self.hits[start..start + len])?;
                    start += len;
                }
                if pages.is_empty() {
                    write_hits(f, &[])?;
                }
            }
            None => write_hits(f, &self.hits)?,
        }
        writeln!(f)?;
        writeln!(f, "Total hits: {}", self.hits.len())?;
        write!(f, "Search time: {}ms ({})", self.duration_ms, self.policy)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, status = {}, words =",
            self.id, self.status
        )?;
        for word in &self.words {
            write!(f, " {word}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for DedupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in &self.removed {
            writeln!(f, "Found duplicate document id {id}")?;
        }
        write!(
            f,
            "Removed {} duplicates, {} documents remain",
            self.removed.len(),
            self.remaining
        )
    }
}

impl fmt::Display for BatchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "Query: {}", result.query)?;
            write_hits(f, &result.hits)?;
            writeln!(f)?;
        }
        write!(
            f,
            "{} queries on {} threads in {}ms",
            self.results.len(),
            self.threads,
            self.duration_ms
        )
    }
}

/// Output a result to stdout in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &SieveArgs) -> Result<()>
where
    T: Serialize + fmt::Display,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result to `out` in the specified format.
pub fn write_result<W, T>(out: &mut W, message: &str, result: &T, args: &SieveArgs) -> Result<()>
where
    W: Write,
    T: Serialize + fmt::Display,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            writeln!(out, "{result}")?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> SieveArgs {
        let mut argv = vec!["sieve"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["dedup", "corpus.jsonl"]);
        SieveArgs::try_parse_from(argv).unwrap()
    }

    fn render<T: Serialize + fmt::Display>(result: &T, args: &SieveArgs) -> String {
        let mut out = Vec::new();
        write_result(&mut out, "Done", result, args).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_human_search_output() {
        let results = SearchResults {
            query: "cat".to_string(),
            status: DocumentStatus::Actual,
            policy: "sequential".to_string(),
            hits: vec![Document::new(42, 0.5, 2)],
            pages: None,
            duration_ms: 0,
        };
        let text = render(&results, &args(&[]));
        assert!(text.contains("{ document_id = 42, relevance = 0.5, rating = 2 }"));
        assert!(text.contains("Total hits: 1"));
        assert!(!text.starts_with("Done"));

        let text = render(&results, &args(&["-vv"]));
        assert!(text.starts_with("Done"));
    }

    #[test]
    fn test_human_paged_output() {
        let results = SearchResults {
            query: "cat".to_string(),
            status: DocumentStatus::Actual,
            policy: "parallel".to_string(),
            hits: vec![
                Document::new(1, 0.3, 1),
                Document::new(2, 0.2, 1),
                Document::new(3, 0.1, 1),
            ],
            pages: Some(vec![2, 1]),
            duration_ms: 1,
        };
        let text = render(&results, &args(&[]));
        assert!(text.contains("Page 1:"));
        assert!(text.contains("Page 2:\n{ document_id = 3"));
    }

    #[test]
    fn test_json_output() {
        let result = DedupResult {
            removed: vec![3, 4],
            remaining: 5,
        };
        let text = render(&result, &args(&["--format", "json"]));
        assert_eq!(text, "{\"removed\":[3,4],\"remaining\":5}\n");

        let text = render(&result, &args(&["--format", "json", "--pretty"]));
        assert!(text.contains("\n  \"remaining\": 5"));
    }

    #[test]
    fn test_match_output() {
        let result = MatchResult {
            query: "cat city".to_string(),
            id: 42,
            status: DocumentStatus::Actual,
            words: vec!["cat".to_string(), "city".to_string()],
        };
        assert_eq!(
            result.to_string(),
            "{ document_id = 42, status = actual, words = cat city}"
        );
    }
}
