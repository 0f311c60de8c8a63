//! `signals`: auxiliary heuristics for ad-hoc comments.

use crate::error::Result;
use crate::output;
use comment_spam::text::sentiment::SentimentLexicon;
use comment_spam::text::signals::{SignalRow, SignalSet};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct CommentSignals<'a> {
    text: &'a str,
    signals: SignalRow,
}

pub(crate) fn run(texts: &[String], json: bool) -> Result<()> {
    let set = SignalSet::standard(Arc::new(SentimentLexicon::english()));
    let rows: Vec<CommentSignals<'_>> = texts
        .iter()
        .map(|text| CommentSignals {
            text,
            signals: set.extract(text),
        })
        .collect();

    if json {
        return output::json(&rows);
    }
    for row in &rows {
        output::section(row.text);
        for (name, signal) in row.signals.iter() {
            output::kv(name, signal);
        }
    }
    Ok(())
}
