extern crate clap;
use clap::*;

mod cmd_blomat;

fn main() -> anyhow::Result<()> {
    let app = Command::new("blomat")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`blomat` - BLOSUM-style nucleotide scoring matrices from alignments")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Increase stderr logging verbosity"),
        )
        .subcommand(cmd_blomat::block::make_subcommand())
        .subcommand(cmd_blomat::build::make_subcommand())
        .after_help(
            r###"Subcommands:

* block - Extract dense, gap-free blocks from multiple sequence alignments
* build - Derive a 4x4 log-odds scoring matrix from alignment blocks

The pipeline: aligned FASTA -> blocks -> clustered co-occurrence counts
-> symmetric half-bit log-odds matrix (A, C, G, T order).

"###,
        );

    let matches = app.get_matches();

    stderrlog::new()
        .module(module_path!())
        .module("blomat")
        .verbosity(matches.get_count("verbose") as usize + 1)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .unwrap();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("block", sub_matches)) => cmd_blomat::block::execute(sub_matches),
        Some(("build", sub_matches)) => cmd_blomat::build::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
