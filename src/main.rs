use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use bm25_ranker::{
    error::Result, term_freqs, tokenizer::Tokenizer, Bm25Config, Bm25Scorer, Corpus, IdfTable,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Corpus JSON file, or a directory of them
    #[arg(long)]
    corpus: PathBuf,

    /// IDF table JSON file
    #[arg(long)]
    idfs: PathBuf,

    /// Parameter file to load instead of the defaults
    #[arg(long)]
    params: Option<PathBuf>,

    /// Where to write the parameters that were used
    #[arg(long, default_value = "bm25Para.txt")]
    write_params: PathBuf,

    /// Stem query and document terms
    #[arg(long, default_value = "false")]
    stem: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&Args::parse()) {
        tracing::error!(error = %e, "scoring failed");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.params {
        Some(path) => Bm25Config::read_params(path)?,
        None => Bm25Config::default(),
    };

    let corpus = Corpus::load(&args.corpus)?;
    let idfs = IdfTable::load(&args.idfs)?;
    let tokenizer = if args.stem {
        Tokenizer::stemming()?
    } else {
        Tokenizer::new()?
    };

    // Time the precomputation
    let start = std::time::Instant::now();
    let scorer = Bm25Scorer::new(config, &corpus)?;
    tracing::info!(
        documents = scorer.stats().len(),
        elapsed = ?start.elapsed(),
        "scorer ready"
    );

    scorer.config().write_params_best_effort(&args.write_params);

    let mut out = BufWriter::new(io::stdout().lock());
    for results in &corpus.queries {
        let query = term_freqs::normalize_query(&results.query, &tokenizer);

        for (url, doc) in &results.documents {
            let tfs = term_freqs::extract(doc, &query, &tokenizer);
            let score = scorer.score(url, &tfs, &query, &idfs)?;
            writeln!(out, "{}\t{url}\t{score}", results.query)?;
        }
    }
    out.flush()?;

    Ok(())
}
