use clap::*;
use std::io::Write;

use blomat::libs::alignment::Alignment;
use blomat::libs::block::extract_blocks;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("block")
        .about("Extracts dense, gap-free blocks from aligned FASTA file(s)")
        .after_help(
            r###"
Extracts contiguous, gap-free sub-alignments ("blocks") from multiple
sequence alignments.

Notes:
* A column is kept when the fraction of non-gap rows is >= --min-density
* Adjacent kept columns are merged into maximal runs; runs shorter than
  --min-len are discarded, as is any run still containing a gap
* Every block keeps the full row count of its source alignment
* Blocks are printed as raw sequence rows, separated by blank lines
* Supports both plain text and gzipped (.gz) files
* Reads from stdin if input file is 'stdin'

Examples:
1. Extract blocks from an aligned FASTA file:
   blomat block tests/blosum/dense.fa

2. Require longer, fully populated columns:
   blomat block tests/blosum/dense.fa --min-len 20 --min-density 1.0

3. Output results to a file:
   blomat block tests/blosum/dense.fa -o blocks.txt

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
    let opt_min_len = *args.get_one::<usize>("min_len").unwrap();
    let opt_min_density = *args.get_one::<f64>("min_density").unwrap();

    //----------------------------
    // Ops
    //----------------------------
    let mut is_first = true;
    for infile in args.get_many::<String>("infiles").unwrap() {
        let mut reader = blomat::reader(infile);
        let alignment = Alignment::from_fasta(&mut reader)?;

        for block in extract_blocks(&alignment, opt_min_len, opt_min_density) {
            if !is_first {
                writer.write_all(b"\n")?;
            }
            is_first = false;
            writer.write_all(block.to_string().as_ref())?;
        }
    }

    Ok(())
}
