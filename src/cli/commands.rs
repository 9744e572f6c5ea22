//! Command implementations for the Sieve CLI.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::analysis::StopWords;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::SearchConfig;
use crate::document::{DocId, DocumentStatus};
use crate::error::Result;
use crate::index::SearchIndex;
use crate::search::ExecutionPolicy;
use crate::service::{process_queries, remove_duplicates};
use crate::util::Paginator;

/// One line of a JSON Lines corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusRecord {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Execute a CLI command.
pub fn execute_command(args: SieveArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search_corpus(search_args, &args),
        Command::Match(match_args) => match_document(match_args, &args),
        Command::Dedup(dedup_args) => dedup_corpus(dedup_args, &args),
        Command::Batch(batch_args) => batch_queries(batch_args, &args),
    }
}

/// Build an index from the corpus named in `args`.
///
/// Lines that are not valid records, and records the index rejects, are
/// skipped with a warning.
pub fn load_index(args: &CorpusArgs, config: SearchConfig) -> Result<SearchIndex> {
    let stop_words = StopWords::from_text(&args.stop_words)?;
    let mut index = SearchIndex::with_stop_words(config, stop_words)?;
    let added = load_corpus(&args.corpus, &mut index)?;
    info!(
        corpus = %args.corpus.display(),
        documents = added,
        "loaded corpus"
    );
    Ok(index)
}

/// Add every valid record of a JSON Lines file to `index`, returning the
/// number of documents added.
pub fn load_corpus<P: AsRef<Path>>(path: P, index: &mut SearchIndex) -> Result<usize> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open corpus {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut added = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!("failed to read line {} of {}", line_num + 1, path.display())
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record: CorpusRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_num + 1, "skipping malformed corpus line: {e}");
                continue;
            }
        };

        match index.add_document(record.id, &record.text, record.status, &record.ratings) {
            Ok(()) => added += 1,
            Err(e) => warn!(line = line_num + 1, id = record.id, "skipping document: {e}"),
        }
    }

    Ok(added)
}

/// Read one query per line, skipping blank lines.
pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read queries file {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn load_config(args: &CorpusArgs) -> Result<SearchConfig> {
    match &args.config {
        Some(path) => {
            debug!(config = %path.display(), "loading configuration");
            let config = SearchConfig::from_json_file(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            Ok(config)
        }
        None => Ok(SearchConfig::default()),
    }
}

fn policy(parallel: bool) -> ExecutionPolicy {
    if parallel {
        ExecutionPolicy::Parallel
    } else {
        ExecutionPolicy::Sequential
    }
}

/// Rank the corpus against a query.
fn search_corpus(args: &SearchArgs, cli_args: &SieveArgs) -> Result<()> {
    let status: DocumentStatus = args.status.parse()?;
    let index = load_index(&args.corpus, load_config(&args.corpus)?)?;
    let policy = policy(args.parallel);

    let start_time = Instant::now();
    let hits = index.find_top_documents_by_status_policy(policy, &args.query, status)?;
    let duration = start_time.elapsed();

    let pages = match args.page_size {
        Some(page_size) => Some(
            Paginator::new(&hits, page_size)?
                .iter()
                .map(<[_]>::len)
                .collect(),
        ),
        None => None,
    };

    output_result(
        "Search completed",
        &SearchResults {
            query: args.query.clone(),
            status,
            policy: policy.to_string(),
            hits,
            pages,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Report the query words contained in one document.
fn match_document(args: &MatchArgs, cli_args: &SieveArgs) -> Result<()> {
    let index = load_index(&args.corpus, load_config(&args.corpus)?)?;
    let (words, status) =
        index.match_document_with_policy(policy(args.parallel), &args.query, args.id)?;

    output_result(
        "Match completed",
        &MatchResult {
            query: args.query.clone(),
            id: args.id,
            status,
            words,
        },
        cli_args,
    )
}

/// Remove duplicate documents and report them.
fn dedup_corpus(args: &DedupArgs, cli_args: &SieveArgs) -> Result<()> {
    let mut index = load_index(&args.corpus, load_config(&args.corpus)?)?;
    let removed = remove_duplicates(&mut index);

    output_result(
        "Duplicate removal completed",
        &DedupResult {
            removed,
            remaining: index.document_count(),
        },
        cli_args,
    )
}

/// Run every query of a file against the corpus.
fn batch_queries(args: &BatchArgs, cli_args: &SieveArgs) -> Result<()> {
    let config = load_config(&args.corpus)?.with_num_threads(args.threads);
    let index = load_index(&args.corpus, config)?;

    let queries = load_queries(&args.queries_file)?;

    let start_time = Instant::now();
    let hits = process_queries(&index, &queries)?;
    let duration = start_time.elapsed();

    let results = queries
        .into_iter()
        .zip(hits)
        .map(|(query, hits)| BatchQueryResult { query, hits })
        .collect();

    output_result(
        "Batch completed",
        &BatchResults {
            threads: args.threads,
            results,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SieveError;
    use clap::Parser;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn corpus(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    fn corpus_args(path: &Path, stop_words: &str) -> CorpusArgs {
        CorpusArgs {
            corpus: PathBuf::from(path),
            stop_words: stop_words.to_string(),
            config: None,
        }
    }

    #[test]
    fn test_load_corpus_skips_bad_lines() -> Result<()> {
        let file = corpus(&[
            r#"{"id": 42, "text": "cat in the city", "ratings": [1, 2, 3]}"#,
            r#"not json"#,
            "",
            r#"{"id": 39, "text": "dog with funny hair", "status": "banned"}"#,
            r#"{"id": 42, "text": "duplicate id"}"#,
            r#"{"id": -1, "text": "negative id"}"#,
            r#"{"id": 7, "text": "in the"}"#,
        ]);

        let index = load_index(
            &corpus_args(file.path(), "in the with"),
            SearchConfig::default(),
        )?;
        assert_eq!(index.document_count(), 2);
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![39, 42]);

        let data = index.document_data(42).unwrap();
        assert_eq!(data.rating, 2);
        assert_eq!(data.status, DocumentStatus::Actual);
        assert_eq!(
            index.document_data(39).unwrap().status,
            DocumentStatus::Banned
        );
        Ok(())
    }

    #[test]
    fn test_missing_corpus_is_an_error() {
        let args = corpus_args(Path::new("/nonexistent/sieve/corpus.jsonl"), "");
        let err = load_index(&args, SearchConfig::default()).unwrap_err();
        assert!(matches!(err, SieveError::Anyhow(_)));
        assert!(
            err.to_string()
                .contains("failed to open corpus /nonexistent/sieve/corpus.jsonl"),
            "unexpected message: {err}"
        );
    }

    #[test]
    fn test_load_queries() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "cat -city\n\n  dog  \n")?;
        assert_eq!(load_queries(file.path())?, vec!["cat -city", "dog"]);

        let err = load_queries("/nonexistent/sieve/queries.txt").unwrap_err();
        assert!(matches!(err, SieveError::Anyhow(_)));
        assert!(err.to_string().contains("/nonexistent/sieve/queries.txt"));
        Ok(())
    }

    #[test]
    fn test_bad_config_file_names_the_path() -> Result<()> {
        let file = corpus(&[r#"{"id": 1, "text": "cat"}"#]);
        let mut config = NamedTempFile::new()?;
        write!(config, r#"{{"shard_count": 0}}"#)?;

        let args = CorpusArgs {
            corpus: PathBuf::from(file.path()),
            stop_words: String::new(),
            config: Some(PathBuf::from(config.path())),
        };
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("failed to load configuration"));
        Ok(())
    }

    #[test]
    fn test_execute_search_and_dedup() -> Result<()> {
        let file = corpus(&[
            r#"{"id": 1, "text": "white cat and fancy collar", "ratings": [8, -3]}"#,
            r#"{"id": 2, "text": "fluffy cat fluffy tail", "ratings": [7, 2, 7]}"#,
            r#"{"id": 3, "text": "fancy collar and white cat", "ratings": [5]}"#,
        ]);
        let path = file.path().to_str().unwrap();

        let args =
            SieveArgs::try_parse_from(["sieve", "-q", "search", path, "fluffy cat", "--parallel"])
                .unwrap();
        execute_command(args)?;

        let args = SieveArgs::try_parse_from([
            "sieve", "-q", "--format", "json", "dedup", path, "-s", "and",
        ])
        .unwrap();
        execute_command(args)?;

        let args =
            SieveArgs::try_parse_from(["sieve", "-q", "search", path, "cat", "--status", "bogus"])
                .unwrap();
        assert!(execute_command(args).is_err());
        Ok(())
    }

    #[test]
    fn test_execute_batch() -> Result<()> {
        let file = corpus(&[r#"{"id": 1, "text": "white cat"}"#]);
        let mut queries = NamedTempFile::new()?;
        writeln!(queries, "cat\n\nwhite -dog")?;

        let args = SieveArgs::try_parse_from([
            "sieve",
            "-q",
            "batch",
            file.path().to_str().unwrap(),
            queries.path().to_str().unwrap(),
            "--threads",
            "2",
        ])
        .unwrap();
        execute_command(args)
    }
}
