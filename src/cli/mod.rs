//! Subcommand handlers. Each one is a batch file-to-file transformation.

mod errors;
mod params;

pub use errors::{CliError, render};
pub use params::{Cli, Command};

use params::{BuildParams, CorpusParams, LookupParams, MatchRateParams, VariantsParams};
use tracing::{info, warn};

use crate::corpus;
use crate::dictionary::{self, BuildStats, store};
use crate::source;
use crate::variants::{self, Translations, WordTokenizer};

pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Build(params) => build(params),
        Command::Variants(params) => expand_sentences(params),
        Command::Corpus(params) => expand_corpus(params),
        Command::MatchRate(params) => match_rate(params),
    }
}

fn log_build_stats(stats: &BuildStats, entries: usize, senses: usize) {
    info!(
        blocks = stats.blocks,
        entries,
        senses,
        merged = stats.merged_derivatives,
        cross_references = stats.cross_references,
        "dictionary built"
    );
    if stats.skipped_blocks > 0 {
        warn!(count = stats.skipped_blocks, "blocks without a parsable header were skipped");
    }
    if stats.empty_heads > 0 {
        warn!(count = stats.empty_heads, "headwords produced no senses and were dropped");
    }
    if stats.unparsed_fragments > 0 {
        warn!(count = stats.unparsed_fragments, "fragments matched no rule and were dropped");
    }
}

fn build(params: BuildParams) -> Result<(), CliError> {
    let encoding = source::encoding_for(&params.encoding)?;
    let output = params.output_path();
    info!(input = %params.input.display(), encoding = encoding.name(), "cmd:build");

    let lines = source::read_lines(&params.input, encoding)?;
    let (store, stats) = dictionary::build(&lines, &params.lang);
    log_build_stats(&stats, store.len(), store.sense_count());

    store::save(&store, &output)?;
    println!("Wrote {} word entries → {}", store.len(), output.display());
    Ok(())
}

fn load_translations(lookup: &LookupParams) -> Result<Translations, CliError> {
    let store = store::load(&lookup.dict)?;
    let translations = Translations::from_store(&store, lookup.direction, &lookup.lang);
    info!(
        dict = %lookup.dict.display(),
        entries = store.len(),
        keys = translations.len(),
        direction = ?lookup.direction,
        "lookup index ready"
    );
    if translations.is_empty() {
        warn!(
            lang = %lookup.lang,
            "no translations for this language; sentences will pass through unchanged"
        );
    }
    Ok(translations)
}

fn expand_sentences(params: VariantsParams) -> Result<(), CliError> {
    let translations = load_translations(&params.lookup)?;
    let sentences = match (params.input, &params.file) {
        (Some(sentence), _) => vec![sentence],
        (None, Some(file)) => corpus::read_lines(file)?,
        (None, None) => Vec::new(),
    };
    info!(sentences = sentences.len(), max = params.max, "cmd:variants");

    let rows: Vec<Vec<String>> = sentences
        .iter()
        .map(|s| variants::expand(&translations, &WordTokenizer, s, params.max))
        .collect();
    corpus::write_variant_rows(&params.output, &rows)?;

    let total: usize = rows.iter().map(Vec::len).sum();
    info!(variants = total, "variants complete");
    println!("Wrote {} rows ({total} variants) → {}", rows.len(), params.output.display());
    Ok(())
}

fn expand_corpus(params: CorpusParams) -> Result<(), CliError> {
    let translations = load_translations(&params.lookup)?;
    let rows = corpus::read_corpus(&params.in_csv, &params.id_col, &params.source_col)?;
    info!(input = %params.in_csv.display(), rows = rows.len(), max = params.max, "cmd:corpus");

    let wide: Vec<(String, Vec<String>)> = rows
        .into_iter()
        .map(|row| {
            let expanded = variants::expand(&translations, &WordTokenizer, &row.source, params.max);
            (row.id, expanded)
        })
        .collect();
    let width = corpus::write_wide(&params.out_csv, &wide)?;

    info!(width, "corpus complete");
    println!("Wrote {} rows → {}", wide.len(), params.out_csv.display());
    Ok(())
}

fn match_rate(params: MatchRateParams) -> Result<(), CliError> {
    let hyps = corpus::read_hypotheses(&params.hyp)?;
    let refs = corpus::read_lines(&params.refs)?;
    info!(hyps = hyps.len(), refs = refs.len(), "cmd:match-rate");

    let rate = corpus::exact_match_rate(&hyps, &refs)?;
    println!("Exact match rate: {rate}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use clap::Parser;

    use super::*;

    const DICT: &str = "\
Children, n. abantwana;
play, v. i. dlala, dlalisa;
played, v. dlalile;
world, n. ihlabathi;
";

    fn run_args(args: &[&str]) -> Result<(), CliError> {
        run(Cli::try_parse_from(std::iter::once("gramble").chain(args.iter().copied())).unwrap())
    }

    fn build_dict(dir: &Path) -> String {
        let input = dir.join("dict.txt");
        fs::write(&input, DICT).unwrap();
        run_args(&["build", "--input", input.to_str().unwrap()]).unwrap();
        dir.join("xhosa-en.json").to_str().unwrap().to_string()
    }

    #[test]
    fn build_writes_store_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let dict = build_dict(dir.path());
        let store = store::load(Path::new(&dict)).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.sense_count(), 5);
    }

    #[test]
    fn build_rejects_unknown_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dict.txt");
        fs::write(&input, DICT).unwrap();
        let input = input.to_str().unwrap();
        let err = run_args(&["build", "--input", input, "--encoding", "nope"]).unwrap_err();
        assert!(matches!(err, CliError::Source(_)));
    }

    #[test]
    fn variants_from_file_keeps_row_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let dict = build_dict(dir.path());
        let sentences = dir.path().join("sentences.txt");
        fs::write(&sentences, "children play.\n\nHello , world !\n").unwrap();
        let output = dir.path().join("variants.csv");

        run_args(&[
            "variants",
            "--dict",
            &dict,
            "--file",
            sentences.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "abantwana dlala.,abantwana dlalile.,abantwana dlalisa.\n\n\"Hello, ihlabathi!\"\n"
        );
    }

    #[test]
    fn corpus_writes_wide_rows() {
        let dir = tempfile::tempdir().unwrap();
        let dict = build_dict(dir.path());
        let in_csv = dir.path().join("devtest.csv");
        fs::write(&in_csv, "id,sentence_eng\n1,children play\n2,Zebra\n").unwrap();
        let out_csv = dir.path().join("wide.csv");

        run_args(&[
            "corpus",
            "--dict",
            &dict,
            "--in-csv",
            in_csv.to_str().unwrap(),
            "--out-csv",
            out_csv.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(
            fs::read_to_string(&out_csv).unwrap(),
            "id,variant_1,variant_2,variant_3\n\
             1,abantwana dlala,abantwana dlalile,abantwana dlalisa\n\
             2,Zebra,,\n"
        );
    }

    #[test]
    fn missing_dictionary_has_hint() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let missing = missing.to_str().unwrap();
        let err = run_args(&["variants", "--dict", missing, "--input", "x"]).unwrap_err();
        assert!(render(&err).contains("gramble build"));
    }

    #[test]
    fn match_rate_rejects_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let hyp = dir.path().join("best.tsv");
        let refs = dir.path().join("refs.txt");
        fs::write(&hyp, "0\tMolo\n").unwrap();
        fs::write(&refs, "Molo\nEnkosi\n").unwrap();

        let (hyp, refs) = (hyp.to_str().unwrap(), refs.to_str().unwrap());
        let err = run_args(&["match-rate", "--hyp", hyp, "--refs", refs]).unwrap_err();
        assert!(matches!(
            err,
            CliError::Corpus(corpus::CorpusError::LengthMismatch { hyps: 1, refs: 2 })
        ));
    }
}
