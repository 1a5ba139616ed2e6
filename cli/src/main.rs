//! Command-line front end for fenci-core.
//!
//! Reads a sentence (positional argument or stdin) and prints the cut
//! words, one per line, or as a JSON array with `--json`. Loads the
//! embedded default dictionary and HMM model unless `--dict`/`--hmm-model`
//! point somewhere else.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use fenci_core::facade::{Segmenter, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Mix,
    Full,
    Query,
    Hmm,
    Small,
}

#[derive(Debug, Parser)]
#[command(name = "fenci", version, about = "Chinese-language full-text tokenizer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Sentence to cut. Reads from stdin if omitted and no subcommand runs.
    text: Option<String>,

    /// Cutting strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Mix)]
    strategy: StrategyArg,

    /// Word-length cap in runes, used only by `--strategy small`.
    #[arg(long, default_value_t = 4)]
    max_word_len: usize,

    /// Path to a base dictionary (`word freq tag` lines). Defaults to the
    /// embedded dictionary.
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Path to an HMM model file. Defaults to the embedded model.
    #[arg(long)]
    hmm_model: Option<PathBuf>,

    /// Path to a user dictionary, loaded after the base dictionary.
    #[arg(long)]
    user_dict: Option<PathBuf>,

    /// Emit a JSON array of words instead of one per line.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Cut text and print the resulting words.
    Cut {
        text: Option<String>,

        #[arg(long, value_enum, default_value_t = StrategyArg::Mix)]
        strategy: StrategyArg,

        #[arg(long, default_value_t = 4)]
        max_word_len: usize,

        #[arg(long)]
        dict: Option<PathBuf>,

        #[arg(long)]
        hmm_model: Option<PathBuf>,

        #[arg(long)]
        user_dict: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Cut text and print each word with its part of speech.
    Tag {
        text: Option<String>,

        #[arg(long)]
        dict: Option<PathBuf>,

        #[arg(long)]
        hmm_model: Option<PathBuf>,

        #[arg(long)]
        user_dict: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Look up a single word in the dictionary and print its tag.
    Find {
        word: String,

        #[arg(long)]
        dict: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Cut {
            text,
            strategy,
            max_word_len,
            dict,
            hmm_model,
            user_dict,
            json,
        }) => run_cut(text, strategy, max_word_len, dict, hmm_model, user_dict, json),
        Some(Commands::Tag {
            text,
            dict,
            hmm_model,
            user_dict,
            json,
        }) => run_tag(text, dict, hmm_model, user_dict, json),
        Some(Commands::Find { word, dict }) => run_find(word, dict),
        None => run_cut(
            cli.text,
            cli.strategy,
            cli.max_word_len,
            cli.dict,
            cli.hmm_model,
            cli.user_dict,
            cli.json,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("fenci: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_cut(
    text: Option<String>,
    strategy: StrategyArg,
    max_word_len: usize,
    dict: Option<PathBuf>,
    hmm_model: Option<PathBuf>,
    user_dict: Option<PathBuf>,
    json: bool,
) -> Result<(), String> {
    let seg = build_segmenter(dict, hmm_model, user_dict)?;
    let text = read_text(text)?;
    let words = match strategy {
        StrategyArg::Mix => seg.cut_with(&text, Strategy::Mix),
        StrategyArg::Full => seg.cut_with(&text, Strategy::Full),
        StrategyArg::Query => seg.cut_with(&text, Strategy::Query),
        StrategyArg::Hmm => seg.cut_with(&text, Strategy::Hmm),
        StrategyArg::Small => seg.cut_small(&text, max_word_len),
    }
    .map_err(|e| e.to_string())?;
    print_words(&words, json)
}

fn run_tag(
    text: Option<String>,
    dict: Option<PathBuf>,
    hmm_model: Option<PathBuf>,
    user_dict: Option<PathBuf>,
    json: bool,
) -> Result<(), String> {
    let seg = build_segmenter(dict, hmm_model, user_dict)?;
    let text = read_text(text)?;
    let tagged = seg.tag(&text).map_err(|e| e.to_string())?;
    if json {
        let value: Vec<_> = tagged
            .iter()
            .map(|(word, tag)| serde_json::json!({ "word": word, "tag": tag }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?);
    } else {
        for (word, tag) in tagged {
            println!("{word}\t{tag}");
        }
    }
    Ok(())
}

fn run_find(word: String, dict: Option<PathBuf>) -> Result<(), String> {
    let seg = build_segmenter(dict, None, None)?;
    match seg.find(&word) {
        Some(tag) => println!("{word}\t{tag}"),
        None => println!("{word}\t(not found)"),
    }
    Ok(())
}

fn build_segmenter(
    dict: Option<PathBuf>,
    hmm_model: Option<PathBuf>,
    user_dict: Option<PathBuf>,
) -> Result<Segmenter, String> {
    let mut seg = Segmenter::new();

    match dict {
        Some(path) => seg.load_base_dict(open(&path)?).map_err(|e| e.to_string())?,
        None => seg
            .load_base_dict(io::Cursor::new(fenci_core::defaults::DICT))
            .map_err(|e| e.to_string())?,
    }

    match hmm_model {
        Some(path) => seg.load_hmm_model(open(&path)?).map_err(|e| e.to_string())?,
        None => seg
            .load_hmm_model(io::Cursor::new(fenci_core::defaults::HMM_MODEL))
            .map_err(|e| e.to_string())?,
    }

    if let Some(path) = user_dict {
        seg.load_user_dict(open(&path)?).map_err(|e| e.to_string())?;
    }

    Ok(seg)
}

fn open(path: &PathBuf) -> Result<BufReader<File>, String> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| format!("failed to open {}: {e}", path.display()))
}

fn read_text(text: Option<String>) -> Result<String, String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            Ok(buf.trim_end_matches('\n').to_string())
        }
    }
}

fn print_words(words: &[String], json: bool) -> Result<(), String> {
    if json {
        println!("{}", serde_json::to_string_pretty(words).map_err(|e| e.to_string())?);
    } else {
        for word in words {
            println!("{word}");
        }
    }
    Ok(())
}
