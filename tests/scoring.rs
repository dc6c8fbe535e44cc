use std::fs;

use bm25_ranker::{
    term_freqs, tokenizer::Tokenizer, Bm25Config, Bm25Scorer, Corpus, Field, IdfTable,
};

const CORPUS: &str = r#"[
    {
        "query": ["gates", "building"],
        "documents": {
            "http://gates.stanford.edu/": {
                "url": "http://gates.stanford.edu/",
                "title": "Gates Building",
                "body_length": 200,
                "headers": ["Gates Computer Science Building"],
                "anchors": {"gates building": 12, "gates": 3},
                "body_hits": {"gates": [1, 40, 88], "building": [2, 41]},
                "page_rank": 6
            },
            "http://www.stanford.edu/dept/parking/": {
                "url": "http://www.stanford.edu/dept/parking/",
                "title": "Parking and Transportation",
                "body_length": 600,
                "body_hits": {"building": [300]},
                "page_rank": 2
            }
        }
    },
    {
        "query": ["aoerc"],
        "documents": {
            "http://aoerc.stanford.edu/": {
                "url": "http://aoerc.stanford.edu/",
                "title": "Arrillaga Outdoor Education and Recreation Center",
                "body_length": 100,
                "body_hits": {"aoerc": [5, 6]},
                "page_rank": 0
            }
        }
    }
]"#;

const IDFS: &str = r#"{"idfs": {"gates": 3.2, "building": 1.7, "aoerc": 6.5}, "unseen": 8.0}"#;

fn score_all(corpus: &Corpus, scorer: &Bm25Scorer, idfs: &IdfTable) -> Vec<(String, f64)> {
    let tokenizer = Tokenizer::new().expect("Failed to create tokenizer");

    corpus
        .queries
        .iter()
        .flat_map(|results| {
            results.documents.iter().map(|(url, doc)| {
                let tfs = term_freqs::extract(doc, &results.query, &tokenizer);
                let score = scorer
                    .score(url, &tfs, &results.query, idfs)
                    .expect("Failed to score");
                (url.clone(), score)
            })
        })
        .collect()
}

#[test]
fn corpus_averages_cover_every_document() {
    let corpus = Corpus::from_reader(CORPUS.as_bytes()).expect("Failed to parse corpus");
    let scorer =
        Bm25Scorer::new(Bm25Config::default(), &corpus).expect("Failed to create scorer");

    let averages = scorer.stats().average_lengths();
    assert_eq!(scorer.stats().len(), 3);
    assert!((averages[Field::Body] - 300.0).abs() < 1e-12);
    // only the first document has anchors
    assert!((averages[Field::Anchor] - (2.0 * 12.0 + 3.0) / 3.0).abs() < 1e-12);
}

#[test]
fn matching_document_outscores_weak_match() {
    let corpus = Corpus::from_reader(CORPUS.as_bytes()).expect("Failed to parse corpus");
    let idfs: IdfTable = serde_json::from_str(IDFS).expect("Failed to parse idfs");
    let scorer =
        Bm25Scorer::new(Bm25Config::default(), &corpus).expect("Failed to create scorer");

    let scores = score_all(&corpus, &scorer, &idfs);
    let score_of = |url: &str| {
        scores
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, s)| *s)
            .expect("url was scored")
    };

    assert!(score_of("http://gates.stanford.edu/") > score_of("http://www.stanford.edu/dept/parking/"));
    assert!(scores.iter().all(|(_, score)| score.is_finite()));
}

#[test]
fn page_rank_weight_shifts_scores() {
    let corpus = Corpus::from_reader(CORPUS.as_bytes()).expect("Failed to parse corpus");
    let idfs: IdfTable = serde_json::from_str(IDFS).expect("Failed to parse idfs");

    let with_page_rank =
        Bm25Scorer::new(Bm25Config::default(), &corpus).expect("Failed to create scorer");
    let without_page_rank = Bm25Scorer::new(
        Bm25Config {
            page_rank_lambda: 0.0,
            ..Bm25Config::default()
        },
        &corpus,
    )
    .expect("Failed to create scorer");

    let with = score_all(&corpus, &with_page_rank, &idfs);
    let without = score_all(&corpus, &without_page_rank, &idfs);

    for ((url, a), (_, b)) in with.iter().zip(&without) {
        let page_rank = corpus
            .documents()
            .find(|(u, _)| u == url)
            .map(|(_, doc)| doc.page_rank)
            .expect("document exists");
        let expected = (0.7 + page_rank).ln();
        assert!((a - b - expected).abs() < 1e-12, "{url}");
    }
}

#[test]
fn tuned_params_are_persisted_and_reloaded() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("bm25Para.txt");

    let mut config = Bm25Config::default();
    config.fields[Field::Title].weight = 2.0;
    config.page_rank_lambda_prime = 1.5;
    config.write_params_best_effort(&path);

    let written = fs::read_to_string(&path).expect("Failed to read params");
    assert_eq!(written.lines().count(), 13);
    assert!(written.contains("titleweight 2.0\n"));

    let reloaded = Bm25Config::read_params(&path).expect("Failed to reload params");
    assert_eq!(reloaded, config);
}
