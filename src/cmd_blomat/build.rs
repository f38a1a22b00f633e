use clap::*;
use log::info;
use std::io::Write;

use blomat::libs::alignment::Alignment;
use blomat::libs::block::extract_blocks;
use blomat::libs::blosum;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("build")
        .about("Builds a nucleotide scoring matrix from aligned FASTA file(s)")
        .after_help(
            r###"
Derives a BLOSUM-style 4x4 log-odds scoring matrix from multiple sequence
alignments.

Notes:
* Blocks are extracted first; see `blomat block` for --min-len/--min-density
* Within each block, rows with pairwise similarity >= -x are clustered
  transitively and averaged, so near-duplicate sequences are not overcounted
* Blocks whose rows all fall into one cluster carry no pairwise signal;
  they are skipped and reported on stderr
* Per-block work runs in parallel; the reduction keeps input order, so
  output is identical for any --parallel value
* Scores are half bits: round(2 * log2(observed / expected))
* The output is a symbol header line plus one row of scores per symbol,
  in A, C, G, T order

Examples:
1. Build a matrix with the default 0.62 clustering threshold:
   blomat build tests/blosum/dense.fa

2. Cluster more aggressively and use fully populated columns only:
   blomat build tests/blosum/dense.fa -x 0.8 --min-density 1.0

3. Run on 4 threads and save the matrix:
   blomat build tests/blosum/dense.fa --parallel 4 -o BLOSUM62.matrix

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Input aligned FASTA file(s) to process"),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .short('x')
                .value_parser(value_parser!(f64))
                .num_args(1)
                .default_value("0.62")
                .help("Similarity threshold in (0,1); rows at or above it are clustered"),
        )
        .arg(
            Arg::new("min_len")
                .long("min-len")
                .value_parser(value_parser!(usize))
                .num_args(1)
                .default_value("5")
                .help("Minimum number of columns in a block"),
        )
        .arg(
            Arg::new("min_density")
                .long("min-density")
                .value_parser(value_parser!(f64))
                .num_args(1)
                .default_value("0.5")
                .help("Minimum fraction of non-gap rows per column"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .value_parser(value_parser!(usize))
                .num_args(1)
                .default_value("1")
                .help("Number of threads for parallel processing"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let mut writer = blomat::writer(args.get_one::<String>("outfile").unwrap());
    let opt_x = *args.get_one::<f64>("threshold").unwrap();
    let opt_min_len = *args.get_one::<usize>("min_len").unwrap();
    let opt_min_density = *args.get_one::<f64>("min_density").unwrap();

    anyhow::ensure!(
        opt_x > 0.0 && opt_x < 1.0,
        "--threshold must lie within (0, 1), got {}",
        opt_x
    );

    // Set the number of threads for rayon
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();
    rayon::ThreadPoolBuilder::new()
        .num_threads(opt_parallel)
        .build_global()?;

    //----------------------------
    // Ops
    //----------------------------
    let mut blocks = vec![];
    for infile in args.get_many::<String>("infiles").unwrap() {
        let mut reader = blomat::reader(infile);
        let alignment = Alignment::from_fasta(&mut reader)?;
        blocks.extend(extract_blocks(&alignment, opt_min_len, opt_min_density));
    }
    info!("{} blocks extracted", blocks.len());

    let outcome = blosum::build(&blocks, opt_x)?;
    if outcome.n_skipped > 0 {
        info!(
            "{} of {} blocks skipped as degenerate",
            outcome.n_skipped,
            outcome.n_counted + outcome.n_skipped
        );
    }

    //----------------------------
    // Output
    //----------------------------
    writer.write_all(outcome.matrix.to_string().as_ref())?;

    Ok(())
}
